//! Unified error type for the sigtax library.
//!
//! Library code uses `SigtaxError` while configuration parsing and
//! integration tests use `anyhow::Result` for convenience.
//!
//! # Error Categories
//!
//! - **InvalidNucleotide**: A byte outside the ACGT alphabet reached a
//!   context requiring strict encoding (direct `kmer_to_index` calls).
//!   Signature extraction never produces this error for sequence content;
//!   it skips the offending window instead.
//! - **WidthMismatch**: Two coordinate sets of different integer widths
//!   were compared. Checked once at the call boundary, never in the
//!   merge loop.
//! - **Validation**: Invalid parameters or data invariants (k-mer length
//!   out of range, malformed collection bounds, empty reference set).
//!
//! Classification outcomes such as "no confident call" are *not* errors;
//! they are variants of [`crate::classify::Classification`].

use std::fmt;

use crate::types::CoordWidth;

/// Unified error type for the sigtax library.
#[derive(Debug, Clone, PartialEq)]
pub enum SigtaxError {
    /// A byte outside the ACGT alphabet, with its position in the input.
    InvalidNucleotide { byte: u8, position: usize },

    /// Coordinate sets of different integer widths were compared.
    WidthMismatch { left: CoordWidth, right: CoordWidth },

    /// Validation error (invalid parameters, data invariants).
    Validation(String),
}

impl fmt::Display for SigtaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SigtaxError::InvalidNucleotide { byte, position } => {
                if byte.is_ascii_graphic() {
                    write!(
                        f,
                        "invalid nucleotide '{}' at position {}",
                        *byte as char, position
                    )
                } else {
                    write!(
                        f,
                        "invalid nucleotide byte 0x{:02X} at position {}",
                        byte, position
                    )
                }
            }
            SigtaxError::WidthMismatch { left, right } => {
                write!(
                    f,
                    "coordinate width mismatch: {} vs {}",
                    left, right
                )
            }
            SigtaxError::Validation(msg) => write!(f, "validation error: {}", msg),
        }
    }
}

impl std::error::Error for SigtaxError {}

/// Convenience type alias for Results using SigtaxError.
pub type Result<T> = std::result::Result<T, SigtaxError>;

// ============================================================================
// Helper constructors
// ============================================================================

impl SigtaxError {
    /// Create an invalid-nucleotide error for a byte at a given position.
    pub fn invalid_nucleotide(byte: u8, position: usize) -> Self {
        SigtaxError::InvalidNucleotide { byte, position }
    }

    /// Create a width-mismatch error.
    pub fn width_mismatch(left: CoordWidth, right: CoordWidth) -> Self {
        SigtaxError::WidthMismatch { left, right }
    }

    /// Create a validation error with a message.
    pub fn validation(msg: impl Into<String>) -> Self {
        SigtaxError::Validation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_nucleotide() {
        let err = SigtaxError::invalid_nucleotide(b'N', 3);
        assert_eq!(err.to_string(), "invalid nucleotide 'N' at position 3");

        let err = SigtaxError::invalid_nucleotide(b'\n', 0);
        assert_eq!(err.to_string(), "invalid nucleotide byte 0x0A at position 0");
    }

    #[test]
    fn test_display_width_mismatch() {
        let err = SigtaxError::width_mismatch(CoordWidth::U16, CoordWidth::U64);
        assert_eq!(err.to_string(), "coordinate width mismatch: u16 vs u64");
    }
}
