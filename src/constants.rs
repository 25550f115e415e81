//! Constants used throughout the sigtax library for alphabet definitions,
//! default search parameters, and performance tuning.
//!
//! Centralizing these constants ensures consistency across the codebase and
//! makes it easy to adjust values when needed.

// ============================================================================
// Nucleotide Alphabet
// ============================================================================

/// The four DNA nucleotides in the order used for coordinate encoding.
///
/// The order is arbitrary but load-bearing: it defines the 2-bit code
/// assigned to each base (A=0, C=1, G=2, T=3) and therefore the integer
/// coordinate of every k-mer.
pub const NUCLEOTIDES: &[u8; 4] = b"ACGT";

/// Sentinel code returned by the encoding lookup table for bytes outside
/// the ACGT alphabet.
pub(crate) const INVALID_CODE: u8 = 0xFF;

// ============================================================================
// K-mer Search Parameters
// ============================================================================

/// Maximum supported k-mer length. Coordinates are packed 2 bits per base,
/// so k = 32 saturates a 64-bit coordinate.
pub const MAX_K: usize = 32;

/// Default k-mer length (prefix included).
pub const DEFAULT_K: usize = 16;

/// Default k-mer prefix filter.
pub const DEFAULT_PREFIX: &[u8] = b"ATGAC";

// ============================================================================
// Capacity Hints
// ============================================================================

/// Initial capacity of the extraction workspace coordinate buffer.
/// Sized for a typical bacterial assembly under the default prefix filter.
pub(crate) const ESTIMATED_KMERS_PER_GENOME: usize = 4096;

/// Initial capacity of the workspace scratch buffers holding prefix codes
/// and reverse-complemented windows.
pub(crate) const WINDOW_SCRATCH_CAPACITY: usize = 64;
