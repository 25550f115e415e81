//! K-mer specifications and coordinate encoding.
//!
//! A k-mer of length `k` is packed big-endian into an unsigned integer
//! coordinate, 2 bits per base, with the first nucleotide occupying the
//! most significant bits of the encoding window. The [`Coord`] trait
//! abstracts over the three supported coordinate widths (u16/u32/u64) so
//! the encoder and similarity kernel are written once and monomorphized
//! per width.

use std::fmt;
use std::hash::Hash;

use crate::codec::{decode_code, nucleotide_code};
use crate::constants::{INVALID_CODE, MAX_K};
use crate::error::{Result, SigtaxError};
use crate::types::CoordWidth;

/// An unsigned integer type usable as a k-mer coordinate.
///
/// Implemented for `u16`, `u32` and `u64`. A coordinate of `B` bits can
/// hold k-mers up to length `B / 2`.
pub trait Coord:
    Copy + Ord + Eq + Hash + Send + Sync + fmt::Debug + 'static
{
    /// Bit width of this coordinate type.
    const BITS: u32;

    /// Runtime tag for this coordinate type's width.
    const WIDTH: CoordWidth;

    fn zero() -> Self;

    /// Shift the accumulator left by one base and append a 2-bit code.
    fn push_code(self, code: u8) -> Self;

    /// The 2-bit code in the least significant position.
    fn low_code(self) -> u8;

    /// Shift right by one base.
    fn shift_base(self) -> Self;
}

macro_rules! impl_coord {
    ($ty:ty, $width:expr) => {
        impl Coord for $ty {
            const BITS: u32 = <$ty>::BITS;
            const WIDTH: CoordWidth = $width;

            #[inline(always)]
            fn zero() -> Self {
                0
            }

            #[inline(always)]
            fn push_code(self, code: u8) -> Self {
                (self << 2) | code as $ty
            }

            #[inline(always)]
            fn low_code(self) -> u8 {
                (self & 0b11) as u8
            }

            #[inline(always)]
            fn shift_base(self) -> Self {
                self >> 2
            }
        }
    };
}

impl_coord!(u16, CoordWidth::U16);
impl_coord!(u32, CoordWidth::U32);
impl_coord!(u64, CoordWidth::U64);

/// Specification for a k-mer search operation.
///
/// `k` is the total window length, prefix included. The prefix is a fixed
/// leading subsequence required of retained k-mers; it narrows the
/// effective index space and reduces signature size. Validated at
/// construction and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KmerSpec {
    k: usize,
    prefix: Vec<u8>,
}

impl KmerSpec {
    /// Create a spec, validating `k` and the prefix.
    ///
    /// Requirements: `1 <= k <= 32`, `prefix.len() < k`, prefix contains
    /// only ACGT (case-insensitive; stored upper-case).
    pub fn new(k: usize, prefix: &[u8]) -> Result<Self> {
        if k == 0 || k > MAX_K {
            return Err(SigtaxError::validation(format!(
                "k must be in 1..={}, got {}",
                MAX_K, k
            )));
        }
        if prefix.len() >= k {
            return Err(SigtaxError::validation(format!(
                "prefix length {} must be less than k = {}",
                prefix.len(),
                k
            )));
        }
        for (position, &byte) in prefix.iter().enumerate() {
            if nucleotide_code(byte) == INVALID_CODE {
                return Err(SigtaxError::invalid_nucleotide(byte, position));
            }
        }
        Ok(KmerSpec {
            k,
            prefix: prefix.to_ascii_uppercase(),
        })
    }

    /// Total k-mer window length, prefix included.
    pub fn k(&self) -> usize {
        self.k
    }

    /// The upper-cased prefix filter. Empty means no filtering.
    pub fn prefix(&self) -> &[u8] {
        &self.prefix
    }

    pub fn prefix_len(&self) -> usize {
        self.prefix.len()
    }

    /// Number of possible k-mer coordinates, `4^k`.
    pub fn index_space_size(&self) -> u128 {
        1u128 << (2 * self.k)
    }

    /// Smallest coordinate width able to index this spec's k-mers.
    pub fn width(&self) -> CoordWidth {
        // k is validated to 1..=MAX_K at construction.
        CoordWidth::for_k(self.k).expect("k validated at construction")
    }
}

impl fmt::Display for KmerSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "KmerSpec(k={}, prefix={})",
            self.k,
            String::from_utf8_lossy(&self.prefix)
        )
    }
}

/// Encode a k-mer into its integer coordinate.
///
/// Iterates left to right, shifting the accumulator left by 2 bits and
/// adding each base's code (big-endian packing). Case-insensitive. Fails
/// with [`SigtaxError::InvalidNucleotide`] identifying the offending byte
/// and its position; invalid bases are never silently dropped here —
/// tolerance for ambiguous bases belongs to the extraction layer.
///
/// ```
/// let idx: u16 = sigtax::kmer_to_index(b"ACGT").unwrap();
/// assert_eq!(idx, 0b0001_1011);
/// ```
pub fn kmer_to_index<C: Coord>(kmer: &[u8]) -> Result<C> {
    if kmer.len() > (C::BITS / 2) as usize {
        return Err(SigtaxError::validation(format!(
            "k-mer of length {} does not fit a {} coordinate",
            kmer.len(),
            C::WIDTH
        )));
    }
    let mut index = C::zero();
    for (position, &byte) in kmer.iter().enumerate() {
        let code = nucleotide_code(byte);
        if code == INVALID_CODE {
            return Err(SigtaxError::invalid_nucleotide(byte, position));
        }
        index = index.push_code(code);
    }
    Ok(index)
}

/// Decode a coordinate back into its length-`k` upper-case k-mer.
///
/// Total function: every bit pattern in `[0, 4^k)` is a valid k-mer.
pub fn index_to_kmer<C: Coord>(index: C, k: usize) -> Vec<u8> {
    let mut out = vec![0u8; k];
    index_to_kmer_into(index, &mut out);
    out
}

/// Decode a coordinate into a caller-provided buffer of length `k`.
///
/// Extracts 2-bit groups from least to most significant, writing bases
/// right to left.
pub fn index_to_kmer_into<C: Coord>(mut index: C, out: &mut [u8]) {
    for slot in out.iter_mut().rev() {
        *slot = decode_code(index.low_code());
        index = index.shift_base();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_encodings() {
        assert_eq!(kmer_to_index::<u16>(b"A").unwrap(), 0);
        assert_eq!(kmer_to_index::<u16>(b"T").unwrap(), 3);
        assert_eq!(kmer_to_index::<u16>(b"ACGT").unwrap(), 0b0001_1011);
        assert_eq!(kmer_to_index::<u32>(b"TTTTTTTT").unwrap(), u16::MAX as u32);
        assert_eq!(
            kmer_to_index::<u64>(b"GATTACA").unwrap(),
            0b10_00_11_11_00_01_00
        );
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(
            kmer_to_index::<u16>(b"acgt").unwrap(),
            kmer_to_index::<u16>(b"ACGT").unwrap()
        );
        assert_eq!(
            kmer_to_index::<u32>(b"GaTtAcA").unwrap(),
            kmer_to_index::<u32>(b"GATTACA").unwrap()
        );
    }

    #[test]
    fn test_invalid_nucleotide_identified() {
        let err = kmer_to_index::<u16>(b"ACGN").unwrap_err();
        assert_eq!(err, SigtaxError::invalid_nucleotide(b'N', 3));
    }

    #[test]
    fn test_kmer_too_long_for_width() {
        let err = kmer_to_index::<u16>(b"AAAAAAAAA").unwrap_err();
        assert!(matches!(err, SigtaxError::Validation(_)));
        assert!(kmer_to_index::<u32>(b"AAAAAAAAA").is_ok());
    }

    #[test]
    fn test_round_trip_full_index_space() {
        for k in 1..=6usize {
            for i in 0..(1u16 << (2 * k)) {
                let kmer = index_to_kmer(i, k);
                assert_eq!(kmer_to_index::<u16>(&kmer).unwrap(), i);
            }
        }
    }

    #[test]
    fn test_round_trip_uppercases() {
        let idx = kmer_to_index::<u32>(b"gattaca").unwrap();
        assert_eq!(index_to_kmer(idx, 7), b"GATTACA");
    }

    #[test]
    fn test_round_trip_wide_coords() {
        for kmer in [&b"ACGTACGTACGTACGT"[..], &b"TTTTGGGGCCCCAAAA"[..]] {
            let idx = kmer_to_index::<u32>(kmer).unwrap();
            assert_eq!(index_to_kmer(idx, 16), kmer);
            let idx = kmer_to_index::<u64>(kmer).unwrap();
            assert_eq!(index_to_kmer(idx, 16), kmer);
        }
    }

    #[test]
    fn test_spec_validation() {
        assert!(KmerSpec::new(0, b"").is_err());
        assert!(KmerSpec::new(33, b"").is_err());
        assert!(KmerSpec::new(4, b"ACGT").is_err());
        assert_eq!(
            KmerSpec::new(8, b"ATGNC").unwrap_err(),
            SigtaxError::invalid_nucleotide(b'N', 3)
        );

        let spec = KmerSpec::new(8, b"atg").unwrap();
        assert_eq!(spec.prefix(), b"ATG");
        assert_eq!(spec.prefix_len(), 3);
        assert_eq!(spec.index_space_size(), 1 << 16);
        assert_eq!(spec.width(), CoordWidth::U16);
    }

    #[test]
    fn test_spec_width_extremes() {
        assert_eq!(KmerSpec::new(16, b"ATGAC").unwrap().width(), CoordWidth::U32);
        assert_eq!(KmerSpec::new(32, b"").unwrap().width(), CoordWidth::U64);
        assert_eq!(
            KmerSpec::new(32, b"").unwrap().index_space_size(),
            1u128 << 64
        );
    }
}
