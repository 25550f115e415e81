//! Jaccard similarity kernel over sorted coordinate sets.
//!
//! The pairwise kernel is a two-cursor linear merge that counts the size
//! of the union by construction; the intersection falls out of the
//! identity `|A ∩ B| = |A| + |B| - |A ∪ B|`. The batch variant scores one
//! query against every member of a [`SignatureArray`] in parallel with
//! rayon: each member's score is a pure computation over read-only shared
//! inputs written to a disjoint output slot, so the members are scored in
//! unspecified order while the output preserves member order.
//!
//! Inputs must be sorted and duplicate-free; that invariant is
//! established by the extractor and is not re-validated here, keeping the
//! hot loop branch-free.

use rayon::prelude::*;

use crate::error::{Result, SigtaxError};
use crate::kmers::Coord;
use crate::signature::{AnySignature, SignatureArray};

/// Jaccard similarity of two sorted, deduplicated coordinate sets.
///
/// Runs in O(N + M) with no allocation. The comparison of two empty sets
/// is defined as 0 rather than a division error.
///
/// ```
/// let a: Vec<u32> = vec![1, 3, 5];
/// let b: Vec<u32> = vec![3, 5, 7];
/// assert_eq!(sigtax::jaccard(&a, &b), 0.5);
/// ```
pub fn jaccard<C: Coord>(a: &[C], b: &[C]) -> f32 {
    let n = a.len();
    let m = b.len();
    let mut i = 0;
    let mut j = 0;
    let mut union = 0usize;

    while i < n && j < m {
        union += 1;
        let x = a[i];
        let y = b[j];
        // Both cursors advance on equality, counting the shared element once.
        if x <= y {
            i += 1;
        }
        if y <= x {
            j += 1;
        }
    }
    union += (n - i) + (m - j);

    if union == 0 {
        return 0.0;
    }
    (n + m - union) as f32 / union as f32
}

/// Jaccard distance, `1 - jaccard(a, b)`.
pub fn jaccard_distance<C: Coord>(a: &[C], b: &[C]) -> f32 {
    1.0 - jaccard(a, b)
}

/// Score one query signature against every member of a collection.
///
/// `out[i]` corresponds to boundary interval `i` regardless of thread
/// scheduling. Members vary in size, so rayon's work-stealing scheduler
/// is left to balance them.
pub fn jaccard_batch<C: Coord>(query: &[C], collection: &SignatureArray<C>) -> Vec<f32> {
    (0..collection.len())
        .into_par_iter()
        .map(|i| jaccard(query, collection.get(i)))
        .collect()
}

/// Width-checked Jaccard over signatures of runtime-declared width.
///
/// The width precondition is checked once here, at the call boundary,
/// never inside the merge loop. Mixed widths fail with
/// [`SigtaxError::WidthMismatch`].
pub fn jaccard_any(a: &AnySignature, b: &AnySignature) -> Result<f32> {
    match (a, b) {
        (AnySignature::U16(x), AnySignature::U16(y)) => Ok(jaccard(x, y)),
        (AnySignature::U32(x), AnySignature::U32(y)) => Ok(jaccard(x, y)),
        (AnySignature::U64(x), AnySignature::U64(y)) => Ok(jaccard(x, y)),
        _ => Err(SigtaxError::width_mismatch(a.width(), b.width())),
    }
}
