//! Reusable workspace for signature extraction.
//!
//! The workspace pattern avoids repeated allocations in hot loops by
//! providing pre-allocated buffers that can be reused across multiple
//! extraction calls. Scratch memory is acquired and released by the
//! caller with deterministic scope, not allocated ad hoc inside the
//! codec.

use crate::constants::{ESTIMATED_KMERS_PER_GENOME, WINDOW_SCRATCH_CAPACITY};
use crate::kmers::Coord;

/// Workspace for the signature extraction algorithm.
///
/// Holds the per-call scratch buffers: the 2-bit codes of the prefix and
/// its reverse complement, a reverse-complement window buffer, and the
/// output coordinate buffer. Reusing a workspace across sequences avoids
/// repeated heap allocations.
pub struct ExtractionWorkspace<C: Coord> {
    /// 2-bit codes of the spec prefix.
    pub(crate) prefix_codes: Vec<u8>,
    /// 2-bit codes of the reverse-complemented prefix.
    pub(crate) rc_prefix_codes: Vec<u8>,
    /// Scratch buffer for reverse-complementing candidate windows.
    pub(crate) rc_window: Vec<u8>,
    /// Output buffer for extracted coordinates.
    pub buffer: Vec<C>,
}

impl<C: Coord> ExtractionWorkspace<C> {
    /// Create a new workspace with default capacities.
    pub fn new() -> Self {
        Self {
            prefix_codes: Vec::with_capacity(WINDOW_SCRATCH_CAPACITY),
            rc_prefix_codes: Vec::with_capacity(WINDOW_SCRATCH_CAPACITY),
            rc_window: Vec::with_capacity(WINDOW_SCRATCH_CAPACITY),
            buffer: Vec::with_capacity(ESTIMATED_KMERS_PER_GENOME),
        }
    }
}

impl<C: Coord> Default for ExtractionWorkspace<C> {
    fn default() -> Self {
        Self::new()
    }
}
