//! sigtax: a k-mer signature engine for taxonomic identification of
//! bacterial genomes.
//!
//! A genome's signature is the sorted, deduplicated set of integer
//! coordinates of its prefix-matched k-mers, scanned over both strands.
//! Signatures are compared with the Jaccard coefficient, pairwise or in
//! parallel batches against a columnar reference collection, and a
//! nearest-neighbor rule with per-taxon cutoffs turns the scores into a
//! genus- or species-level call.
//!
//! Storage, archive formats and the command line are external
//! collaborators; this crate consumes in-memory arrays and typed values
//! only.
//!
//! # Example
//!
//! ```
//! use sigtax::{classify, extract_signature, Classification, KmerSpec,
//!              ReferenceCollection, SignatureArray, Taxon, ThresholdTable};
//!
//! let spec = KmerSpec::new(4, b"AT")?;
//!
//! let reference = b"ATGACGTATTGACCATCGGATTCAATCGCA";
//! let sig = extract_signature::<u16>(reference, &spec)?;
//! let refs = ReferenceCollection::new(
//!     SignatureArray::from_signatures(&[sig]),
//!     vec![Taxon::new("Escherichia", "coli")],
//! )?;
//!
//! let mut thresholds = ThresholdTable::new();
//! thresholds.insert_species("Escherichia", "coli", 0.9);
//!
//! let query = extract_signature::<u16>(reference, &spec)?;
//! let result = classify(&query, &refs, &thresholds)?;
//! assert!(matches!(result, Classification::Call { score, .. } if score == 1.0));
//! # Ok::<(), sigtax::SigtaxError>(())
//! ```

pub mod classify;
pub mod codec;
pub mod config;
pub mod constants;
pub mod error;
pub mod extract;
pub mod kmers;
pub mod logging;
pub mod metric;
pub mod signature;
pub mod types;
pub mod workspace;

pub use classify::{
    classify, find_closest, find_closest_k, Classification, ReferenceCollection, ThresholdTable,
};
pub use codec::{complement, decode_code, encode_nucleotide, reverse_complement,
    reverse_complement_into};
pub use constants::{DEFAULT_K, DEFAULT_PREFIX, MAX_K, NUCLEOTIDES};
pub use error::{Result, SigtaxError};
pub use extract::{extract_into, extract_signature};
pub use kmers::{index_to_kmer, index_to_kmer_into, kmer_to_index, Coord, KmerSpec};
pub use logging::init_logger;
pub use metric::{jaccard, jaccard_any, jaccard_batch, jaccard_distance};
pub use signature::{AnySignature, KmerSignature, SignatureArray};
pub use types::{CoordWidth, TaxRank, Taxon};
pub use workspace::ExtractionWorkspace;
