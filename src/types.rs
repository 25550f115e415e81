//! Core types used throughout the sigtax library.

use std::fmt;

/// Integer width of a k-mer coordinate.
///
/// The width is derived from `k`: coordinates are packed 2 bits per base,
/// so the smallest unsigned integer type holding `4^k - 1` is chosen.
/// Signatures of different widths cannot be compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoordWidth {
    U16,
    U32,
    U64,
}

impl CoordWidth {
    /// Number of bits in a coordinate of this width.
    pub fn bits(self) -> u32 {
        match self {
            CoordWidth::U16 => 16,
            CoordWidth::U32 => 32,
            CoordWidth::U64 => 64,
        }
    }

    /// Smallest width whose coordinate type can hold every index in
    /// `[0, 4^k)`, or `None` if `k` exceeds the 64-bit limit of 32.
    pub fn for_k(k: usize) -> Option<CoordWidth> {
        match k {
            1..=8 => Some(CoordWidth::U16),
            9..=16 => Some(CoordWidth::U32),
            17..=32 => Some(CoordWidth::U64),
            _ => None,
        }
    }
}

impl fmt::Display for CoordWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "u{}", self.bits())
    }
}

/// Taxonomic rank of a classification call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaxRank {
    Genus,
    Species,
}

impl fmt::Display for TaxRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaxRank::Genus => write!(f, "genus"),
            TaxRank::Species => write!(f, "species"),
        }
    }
}

/// Taxonomic identity of a reference genome.
///
/// A plain immutable value record, deliberately decoupled from any storage
/// session or versioned database key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Taxon {
    pub genus: String,
    pub species: String,
}

impl Taxon {
    pub fn new(genus: impl Into<String>, species: impl Into<String>) -> Self {
        Taxon {
            genus: genus.into(),
            species: species.into(),
        }
    }
}

impl fmt::Display for Taxon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.genus, self.species)
    }
}
