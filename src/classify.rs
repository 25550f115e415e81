//! Nearest-neighbor classification with per-taxon thresholds.
//!
//! A query signature is scored against every member of a reference
//! collection, the highest-scoring member is selected (ties broken by
//! reference order), and the applicable similarity cutoff is looked up
//! in a threshold table: the (genus, species) key if present, else the
//! genus key. A call is emitted at the rank whose threshold matched if
//! the score meets it. This is a deterministic decision procedure, not a
//! trained model; no state is retained across queries.

use std::collections::HashMap;

use crate::error::{Result, SigtaxError};
use crate::kmers::Coord;
use crate::metric::jaccard_batch;
use crate::signature::SignatureArray;
use crate::types::{TaxRank, Taxon};

/// A reference collection with known per-member taxonomic identity.
#[derive(Debug, Clone)]
pub struct ReferenceCollection<C: Coord> {
    signatures: SignatureArray<C>,
    taxa: Vec<Taxon>,
}

impl<C: Coord> ReferenceCollection<C> {
    /// Pair a signature collection with its taxa.
    ///
    /// Fails if the member and taxon counts disagree.
    pub fn new(signatures: SignatureArray<C>, taxa: Vec<Taxon>) -> Result<Self> {
        if signatures.len() != taxa.len() {
            return Err(SigtaxError::validation(format!(
                "collection has {} signatures but {} taxa",
                signatures.len(),
                taxa.len()
            )));
        }
        Ok(ReferenceCollection { signatures, taxa })
    }

    pub fn len(&self) -> usize {
        self.taxa.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taxa.is_empty()
    }

    pub fn signatures(&self) -> &SignatureArray<C> {
        &self.signatures
    }

    pub fn taxon(&self, index: usize) -> &Taxon {
        &self.taxa[index]
    }

    pub fn taxa(&self) -> &[Taxon] {
        &self.taxa
    }
}

/// Per-taxon similarity cutoffs, keyed by species or genus.
///
/// Read-only input to the classifier; lookup prefers the species key and
/// falls back to the genus key.
#[derive(Debug, Clone, Default)]
pub struct ThresholdTable {
    /// genus -> species -> cutoff
    species: HashMap<String, HashMap<String, f32>>,
    genus: HashMap<String, f32>,
}

impl ThresholdTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_species(
        &mut self,
        genus: impl Into<String>,
        species: impl Into<String>,
        cutoff: f32,
    ) {
        self.species
            .entry(genus.into())
            .or_default()
            .insert(species.into(), cutoff);
    }

    pub fn insert_genus(&mut self, genus: impl Into<String>, cutoff: f32) {
        self.genus.insert(genus.into(), cutoff);
    }

    /// The applicable cutoff for a taxon: its (genus, species) entry if
    /// present, else its genus entry.
    pub fn lookup(&self, taxon: &Taxon) -> Option<(TaxRank, f32)> {
        if let Some(&cutoff) = self
            .species
            .get(&taxon.genus)
            .and_then(|m| m.get(&taxon.species))
        {
            return Some((TaxRank::Species, cutoff));
        }
        if let Some(&cutoff) = self.genus.get(&taxon.genus) {
            return Some((TaxRank::Genus, cutoff));
        }
        None
    }

    pub fn len(&self) -> usize {
        self.species.values().map(HashMap::len).sum::<usize>() + self.genus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty() && self.genus.is_empty()
    }
}

/// Outcome of classifying one query.
///
/// "Could not make a call" is a normal variant, distinct from a
/// computation error.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// The best score met the applicable threshold.
    Call {
        rank: TaxRank,
        taxon: Taxon,
        score: f32,
        best_index: usize,
    },
    /// A threshold applied but the best score fell short.
    NoConfidentCall {
        rank_tried: TaxRank,
        best_index: usize,
        best_score: f32,
    },
    /// No species- or genus-level threshold exists for the nearest
    /// neighbor's taxon.
    NoThresholdAvailable {
        best_index: usize,
        best_score: f32,
    },
}

/// Index and score of the highest-scoring member.
///
/// Ties are broken by reference order (first index wins), a stable
/// deterministic secondary key since the metric alone cannot distinguish
/// them. Returns `None` for an empty score slice.
pub fn find_closest(scores: &[f32]) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &score) in scores.iter().enumerate() {
        match best {
            Some((_, s)) if score <= s => {}
            _ => best = Some((i, score)),
        }
    }
    best
}

/// Indices and scores of the `k` highest-scoring members in decreasing
/// score order, ties broken by reference order.
pub fn find_closest_k(scores: &[f32], k: usize) -> Result<Vec<(usize, f32)>> {
    if k == 0 || k > scores.len() {
        return Err(SigtaxError::validation(format!(
            "k must be > 0 and <= the number of reference signatures ({}), got {}",
            scores.len(),
            k
        )));
    }
    let mut ranked: Vec<(usize, f32)> = scores.iter().copied().enumerate().collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal).then(a.0.cmp(&b.0)));
    ranked.truncate(k);
    Ok(ranked)
}

/// Classify a query signature against a reference collection.
///
/// Computes batch Jaccard scores, takes the nearest neighbor, and applies
/// the taxon's threshold. An empty reference collection is a validation
/// error; every other "no call" situation is a [`Classification`]
/// variant.
pub fn classify<C: Coord>(
    query: &[C],
    references: &ReferenceCollection<C>,
    thresholds: &ThresholdTable,
) -> Result<Classification> {
    if references.is_empty() {
        return Err(SigtaxError::validation(
            "cannot classify against an empty reference collection",
        ));
    }

    let scores = jaccard_batch(query, references.signatures());
    // references is non-empty, so a maximum always exists.
    let (best_index, best_score) =
        find_closest(&scores).expect("non-empty collection has a best score");
    let taxon = references.taxon(best_index);

    log::debug!(
        "nearest neighbor {} ({}) with score {:.4}",
        best_index,
        taxon,
        best_score
    );

    let outcome = match thresholds.lookup(taxon) {
        None => Classification::NoThresholdAvailable {
            best_index,
            best_score,
        },
        Some((rank, cutoff)) => {
            if best_score >= cutoff {
                Classification::Call {
                    rank,
                    taxon: taxon.clone(),
                    score: best_score,
                    best_index,
                }
            } else {
                Classification::NoConfidentCall {
                    rank_tried: rank,
                    best_index,
                    best_score,
                }
            }
        }
    };
    Ok(outcome)
}
