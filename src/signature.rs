//! Signatures and columnar signature collections.
//!
//! A signature is a strictly increasing, deduplicated array of k-mer
//! coordinates representing the set of distinct k-mers in a genome.
//! [`SignatureArray`] concatenates many signatures into one contiguous
//! coordinate buffer plus a boundary index, the compact columnar layout
//! that backs parallel batch comparison.

use crate::error::{Result, SigtaxError};
use crate::kmers::Coord;
use crate::types::CoordWidth;

/// A k-mer signature: sorted, deduplicated coordinates.
pub type KmerSignature<C> = Vec<C>;

/// A collection of signatures stored in a single contiguous buffer.
///
/// `bounds` has length `member_count + 1`; member `i` occupies
/// `values[bounds[i]..bounds[i + 1]]`. Built once when a collection is
/// loaded and immutable during comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureArray<C: Coord> {
    values: Vec<C>,
    bounds: Vec<usize>,
}

impl<C: Coord> SignatureArray<C> {
    /// Build a collection by concatenating individual signatures.
    ///
    /// Each input must already be sorted and deduplicated; this is the
    /// extractor's output invariant and is not re-validated here.
    pub fn from_signatures<S: AsRef<[C]>>(signatures: &[S]) -> Self {
        let total: usize = signatures.iter().map(|s| s.as_ref().len()).sum();
        let mut values = Vec::with_capacity(total);
        let mut bounds = Vec::with_capacity(signatures.len() + 1);
        bounds.push(0);
        for sig in signatures {
            values.extend_from_slice(sig.as_ref());
            bounds.push(values.len());
        }
        SignatureArray { values, bounds }
    }

    /// Build a collection from a collaborator-supplied buffer and boundary
    /// index, validating the boundary invariants.
    pub fn from_parts(values: Vec<C>, bounds: Vec<usize>) -> Result<Self> {
        if bounds.is_empty() {
            return Err(SigtaxError::validation(
                "bounds must have length member_count + 1, got 0",
            ));
        }
        if bounds[0] != 0 {
            return Err(SigtaxError::validation(format!(
                "bounds must start at 0, got {}",
                bounds[0]
            )));
        }
        if bounds.windows(2).any(|w| w[0] > w[1]) {
            return Err(SigtaxError::validation(
                "bounds must be monotonically non-decreasing",
            ));
        }
        let end = bounds[bounds.len() - 1];
        if end != values.len() {
            return Err(SigtaxError::validation(format!(
                "last bound {} does not match value count {}",
                end,
                values.len()
            )));
        }
        Ok(SignatureArray { values, bounds })
    }

    /// Number of member signatures.
    pub fn len(&self) -> usize {
        self.bounds.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The member signature at `index`.
    ///
    /// # Panics
    /// Panics if `index >= self.len()`.
    pub fn get(&self, index: usize) -> &[C] {
        &self.values[self.bounds[index]..self.bounds[index + 1]]
    }

    /// Length of the member signature at `index`.
    pub fn size_of(&self, index: usize) -> usize {
        self.bounds[index + 1] - self.bounds[index]
    }

    /// Iterate over member signatures in order.
    pub fn iter(&self) -> impl Iterator<Item = &[C]> {
        (0..self.len()).map(move |i| self.get(i))
    }

    /// The shared coordinate buffer.
    pub fn values(&self) -> &[C] {
        &self.values
    }

    /// The boundary index, length `member_count + 1`.
    pub fn bounds(&self) -> &[usize] {
        &self.bounds
    }
}

/// A signature of runtime-declared coordinate width.
///
/// Persisted signatures arrive from the storage collaborator with a
/// declared integer width; this wrapper carries the width tag so mixed
/// widths can be rejected at the call boundary before entering the
/// comparison kernel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnySignature {
    U16(Vec<u16>),
    U32(Vec<u32>),
    U64(Vec<u64>),
}

impl AnySignature {
    pub fn width(&self) -> CoordWidth {
        match self {
            AnySignature::U16(_) => CoordWidth::U16,
            AnySignature::U32(_) => CoordWidth::U32,
            AnySignature::U64(_) => CoordWidth::U64,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            AnySignature::U16(v) => v.len(),
            AnySignature::U32(v) => v.len(),
            AnySignature::U64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_signatures_layout() {
        let sigs: Vec<Vec<u32>> = vec![vec![1, 3, 5], vec![], vec![2, 7]];
        let arr = SignatureArray::from_signatures(&sigs);

        assert_eq!(arr.len(), 3);
        assert_eq!(arr.get(0), &[1, 3, 5]);
        assert_eq!(arr.get(1), &[] as &[u32]);
        assert_eq!(arr.get(2), &[2, 7]);
        assert_eq!(arr.size_of(0), 3);
        assert_eq!(arr.size_of(1), 0);
        assert_eq!(arr.bounds(), &[0, 3, 3, 5]);
        assert_eq!(arr.values(), &[1, 3, 5, 2, 7]);
    }

    #[test]
    fn test_from_parts_valid() {
        let arr = SignatureArray::from_parts(vec![1u16, 2, 3], vec![0, 1, 3]).unwrap();
        assert_eq!(arr.len(), 2);
        assert_eq!(arr.get(1), &[2, 3]);
    }

    #[test]
    fn test_from_parts_rejects_bad_bounds() {
        assert!(SignatureArray::<u16>::from_parts(vec![], vec![]).is_err());
        assert!(SignatureArray::from_parts(vec![1u16], vec![1, 1]).is_err());
        assert!(SignatureArray::from_parts(vec![1u16, 2], vec![0, 2, 1]).is_err());
        assert!(SignatureArray::from_parts(vec![1u16, 2], vec![0, 1]).is_err());
    }

    #[test]
    fn test_iter_matches_get() {
        let sigs: Vec<Vec<u64>> = vec![vec![10, 20], vec![30]];
        let arr = SignatureArray::from_signatures(&sigs);
        let collected: Vec<&[u64]> = arr.iter().collect();
        assert_eq!(collected, vec![&[10u64, 20][..], &[30u64][..]]);
    }

    #[test]
    fn test_any_signature_width() {
        assert_eq!(AnySignature::U16(vec![1]).width(), CoordWidth::U16);
        assert_eq!(AnySignature::U32(vec![]).width(), CoordWidth::U32);
        assert_eq!(AnySignature::U64(vec![9]).width(), CoordWidth::U64);
        assert!(AnySignature::U32(vec![]).is_empty());
    }
}
