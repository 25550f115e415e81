//! Nucleotide codec: 2-bit encoding, complements and reverse complements.
//!
//! All functions operate on DNA sequences as bytes containing ASCII
//! nucleotide codes. Encoding is case-insensitive; decoding always emits
//! upper case. The complement is permissive: bytes outside the ACGT
//! alphabet pass through unchanged, so ambiguous codes survive a
//! reverse-complement round trip.

use crate::constants::{INVALID_CODE, NUCLEOTIDES};
use crate::error::{Result, SigtaxError};

/// Lookup table mapping ASCII bytes to 2-bit nucleotide codes.
/// A=0, C=1, G=2, T=3 (both cases); everything else is [`INVALID_CODE`].
const NUC_TO_CODE: [u8; 256] = {
    let mut lut = [INVALID_CODE; 256];
    lut[b'A' as usize] = 0;
    lut[b'a' as usize] = 0;
    lut[b'C' as usize] = 1;
    lut[b'c' as usize] = 1;
    lut[b'G' as usize] = 2;
    lut[b'g' as usize] = 2;
    lut[b'T' as usize] = 3;
    lut[b't' as usize] = 3;
    lut
};

/// Lookup table mapping ASCII bytes to their Watson-Crick complement,
/// preserving case. Bytes outside the alphabet map to themselves.
const COMPLEMENT: [u8; 256] = {
    let mut lut = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        lut[i] = i as u8;
        i += 1;
    }
    lut[b'A' as usize] = b'T';
    lut[b'T' as usize] = b'A';
    lut[b'C' as usize] = b'G';
    lut[b'G' as usize] = b'C';
    lut[b'a' as usize] = b't';
    lut[b't' as usize] = b'a';
    lut[b'c' as usize] = b'g';
    lut[b'g' as usize] = b'c';
    lut
};

/// Raw table lookup for a nucleotide's 2-bit code.
///
/// Returns [`INVALID_CODE`] for bytes outside the ACGT alphabet. Hot-loop
/// entry point; callers that must fail loudly check the sentinel and build
/// the error themselves with the real position.
#[inline(always)]
pub(crate) fn nucleotide_code(byte: u8) -> u8 {
    NUC_TO_CODE[byte as usize]
}

/// Encode a single nucleotide to its 2-bit code.
///
/// Case-insensitive. Fails with [`SigtaxError::InvalidNucleotide`] for any
/// byte outside the ACGT alphabet.
#[inline]
pub fn encode_nucleotide(byte: u8) -> Result<u8> {
    let code = nucleotide_code(byte);
    if code == INVALID_CODE {
        return Err(SigtaxError::invalid_nucleotide(byte, 0));
    }
    Ok(code)
}

/// Decode a 2-bit code back to an upper-case nucleotide.
///
/// Total function: only the low two bits are inspected, so every input
/// decodes to one of A, C, G, T.
#[inline(always)]
pub fn decode_code(code: u8) -> u8 {
    NUCLEOTIDES[(code & 0b11) as usize]
}

/// Watson-Crick complement of a single byte, preserving case.
///
/// Bytes outside the four-letter alphabet are returned unchanged so that
/// ambiguous codes pass through reverse-complement unscathed.
#[inline(always)]
pub fn complement(byte: u8) -> u8 {
    COMPLEMENT[byte as usize]
}

/// Reverse complement of a sequence, allocating a fresh buffer.
pub fn reverse_complement(seq: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(seq.len());
    reverse_complement_into(seq, &mut out);
    out
}

/// Reverse complement of a sequence written into a caller-provided buffer.
///
/// The buffer is cleared first. Reusing one buffer across calls avoids
/// allocation churn in hot extraction loops.
pub fn reverse_complement_into(seq: &[u8], out: &mut Vec<u8>) {
    out.clear();
    out.extend(seq.iter().rev().map(|&b| complement(b)));
}
