//! Signature extraction: scanning a genome for prefix-matched k-mers.
//!
//! The extractor searches both strands of a sequence for windows of
//! length `k` that begin with the spec's prefix, encodes each matching
//! window to a coordinate, and produces the sorted, deduplicated
//! coordinate array that is the genome's signature.
//!
//! Reverse-strand matches are found without materializing the reverse
//! complement of the whole sequence: a window on the reverse strand that
//! begins with the prefix corresponds to a forward-strand window that
//! *ends* with the reverse-complemented prefix, so the forward strand is
//! scanned a second time for that pattern and only the matching windows
//! are reverse-complemented.
//!
//! Windows containing bytes outside the ACGT alphabet are skipped rather
//! than failing the whole extraction; ambiguous bases are common in real
//! assemblies. Direct encoder calls remain strict (see
//! [`crate::kmers::kmer_to_index`]).

use crate::codec::{nucleotide_code, reverse_complement_into};
use crate::constants::INVALID_CODE;
use crate::error::{Result, SigtaxError};
use crate::kmers::{Coord, KmerSpec};
use crate::signature::KmerSignature;
use crate::workspace::ExtractionWorkspace;

/// Encode one window, or `None` if it contains an invalid base.
#[inline]
fn encode_window<C: Coord>(window: &[u8]) -> Option<C> {
    let mut index = C::zero();
    for &byte in window {
        let code = nucleotide_code(byte);
        if code == INVALID_CODE {
            return None;
        }
        index = index.push_code(code);
    }
    Some(index)
}

/// Case-insensitive match of sequence bytes against pre-encoded codes.
///
/// Invalid sequence bytes never equal a valid code, so windows containing
/// ambiguous bases fail the match for free.
#[inline]
fn matches_codes(window: &[u8], codes: &[u8]) -> bool {
    window
        .iter()
        .zip(codes.iter())
        .all(|(&byte, &code)| nucleotide_code(byte) == code)
}

/// Extract a genome's signature into a workspace buffer.
///
/// Scans both strands with stride 1, retains windows whose leading bytes
/// equal the spec prefix, encodes them and leaves the sorted,
/// deduplicated coordinates in `ws.buffer`. Strictly increasing output
/// with no duplicates is an invariant the similarity kernel depends on
/// without re-validating.
///
/// Fails only if the spec's `k` does not fit the coordinate width `C`;
/// ambiguous bases in the sequence are skipped silently.
pub fn extract_into<C: Coord>(
    seq: &[u8],
    spec: &KmerSpec,
    ws: &mut ExtractionWorkspace<C>,
) -> Result<()> {
    let k = spec.k();
    if k > (C::BITS / 2) as usize {
        return Err(SigtaxError::validation(format!(
            "spec k = {} does not fit a {} coordinate (use a wider type)",
            k,
            C::WIDTH
        )));
    }

    ws.buffer.clear();
    if seq.len() < k {
        return Ok(());
    }

    let p = spec.prefix_len();
    ws.prefix_codes.clear();
    ws.prefix_codes
        .extend(spec.prefix().iter().map(|&b| nucleotide_code(b)));
    // The prefix is validated ACGT, so complement-then-reverse stays in
    // code space: complement of code c is 3 - c.
    ws.rc_prefix_codes.clear();
    ws.rc_prefix_codes
        .extend(ws.prefix_codes.iter().rev().map(|&c| 3 - c));

    // Forward strand: windows starting with the prefix.
    for start in 0..=(seq.len() - k) {
        if !matches_codes(&seq[start..start + p], &ws.prefix_codes) {
            continue;
        }
        if let Some(index) = encode_window::<C>(&seq[start..start + k]) {
            ws.buffer.push(index);
        }
    }

    // Reverse strand: forward windows ending with the rc'd prefix.
    for end in k..=seq.len() {
        if !matches_codes(&seq[end - p..end], &ws.rc_prefix_codes) {
            continue;
        }
        reverse_complement_into(&seq[end - k..end], &mut ws.rc_window);
        if let Some(index) = encode_window::<C>(&ws.rc_window) {
            ws.buffer.push(index);
        }
    }

    ws.buffer.sort_unstable();
    ws.buffer.dedup();

    log::debug!(
        "extracted {} distinct k-mers from {} bp sequence",
        ws.buffer.len(),
        seq.len()
    );
    Ok(())
}

/// Extract a genome's signature, allocating the output.
///
/// Convenience wrapper around [`extract_into`] for callers without a
/// long-lived workspace.
pub fn extract_signature<C: Coord>(seq: &[u8], spec: &KmerSpec) -> Result<KmerSignature<C>> {
    let mut ws = ExtractionWorkspace::new();
    extract_into(seq, spec, &mut ws)?;
    Ok(ws.buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kmers::kmer_to_index;

    fn idx(kmer: &[u8]) -> u16 {
        kmer_to_index::<u16>(kmer).unwrap()
    }

    #[test]
    fn test_both_strands_scanned() {
        // Forward windows of length 3 starting with 'A': ACG.
        // Reverse-strand windows starting with 'A': rc(CGT) = ACG (dup),
        // rc(GTT) = AAC.
        let spec = KmerSpec::new(3, b"A").unwrap();
        let sig = extract_signature::<u16>(b"ACGTT", &spec).unwrap();
        assert_eq!(sig, vec![idx(b"AAC"), idx(b"ACG")]);
    }

    #[test]
    fn test_output_sorted_and_deduplicated() {
        let spec = KmerSpec::new(2, b"").unwrap();
        let sig = extract_signature::<u16>(b"ATATATAT", &spec).unwrap();
        assert!(sig.windows(2).all(|w| w[0] < w[1]));
        // AT and TA on both strands; both are their own reverse complement.
        assert_eq!(sig, vec![idx(b"AT"), idx(b"TA")]);
    }

    #[test]
    fn test_prefix_filter_restricts_windows() {
        let spec = KmerSpec::new(4, b"GG").unwrap();
        let sig = extract_signature::<u16>(b"GGATTCGGCA", &spec).unwrap();
        // Forward: GGAT, GGCA. Reverse strand: windows of rc(seq) =
        // TGCCGAATCC contain no GG-prefixed window.
        assert_eq!(sig, {
            let mut v = vec![idx(b"GGAT"), idx(b"GGCA")];
            v.sort_unstable();
            v
        });
    }

    #[test]
    fn test_ambiguous_bases_skipped_not_fatal() {
        let spec = KmerSpec::new(3, b"A").unwrap();
        // The N poisons every window containing it; extraction still
        // succeeds on the rest.
        let sig = extract_signature::<u16>(b"ACGNACG", &spec).unwrap();
        assert!(sig.contains(&idx(b"ACG")));
        assert!(!sig.is_empty());
    }

    #[test]
    fn test_case_insensitive_matching() {
        let spec = KmerSpec::new(3, b"A").unwrap();
        let upper = extract_signature::<u16>(b"ACGTT", &spec).unwrap();
        let lower = extract_signature::<u16>(b"acgtt", &spec).unwrap();
        assert_eq!(upper, lower);
    }

    #[test]
    fn test_sequence_shorter_than_k() {
        let spec = KmerSpec::new(8, b"AT").unwrap();
        let sig = extract_signature::<u16>(b"ATG", &spec).unwrap();
        assert!(sig.is_empty());
    }

    #[test]
    fn test_width_contract_checked_once() {
        let spec = KmerSpec::new(12, b"AT").unwrap();
        let err = extract_signature::<u16>(b"ATGACGTACGTACGT", &spec).unwrap_err();
        assert!(matches!(err, SigtaxError::Validation(_)));
        assert!(extract_signature::<u32>(b"ATGACGTACGTACGT", &spec).is_ok());
    }

    #[test]
    fn test_workspace_reuse() {
        let spec = KmerSpec::new(3, b"A").unwrap();
        let mut ws = ExtractionWorkspace::<u16>::new();

        extract_into(b"ACGTT", &spec, &mut ws).unwrap();
        let first = ws.buffer.clone();
        extract_into(b"ACGTT", &spec, &mut ws).unwrap();
        assert_eq!(ws.buffer, first);

        extract_into(b"GGGGG", &spec, &mut ws).unwrap();
        assert!(ws.buffer.is_empty());
    }

    #[test]
    fn test_matches_extraction_via_reverse_complement() {
        // A signature must be identical whether extracted from a sequence
        // or from its reverse complement.
        let spec = KmerSpec::new(4, b"AC").unwrap();
        let seq = b"ACGTTACGGACTTACACGT";
        let rc = crate::codec::reverse_complement(seq);
        let fwd = extract_signature::<u16>(seq, &spec).unwrap();
        let rev = extract_signature::<u16>(&rc, &spec).unwrap();
        assert_eq!(fwd, rev);
        assert!(!fwd.is_empty());
    }
}
