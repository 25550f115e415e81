//! TOML configuration for the k-mer spec and threshold table.
//!
//! Collaborators supply the search parameters and per-taxon cutoffs as a
//! TOML file:
//!
//! ```toml
//! [spec]
//! k = 16
//! prefix = "ATGAC"
//!
//! [thresholds.genus]
//! Escherichia = 0.5
//!
//! [thresholds.species]
//! "Escherichia coli" = 0.92
//! ```
//!
//! Species keys are `"Genus species"` pairs separated by a single space.
//! Parsing and semantic validation are separate steps; `build` converts
//! a validated config into the typed [`KmerSpec`] and [`ThresholdTable`]
//! values the engine consumes.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::classify::ThresholdTable;
use crate::constants::{DEFAULT_K, DEFAULT_PREFIX, MAX_K};
use crate::kmers::KmerSpec;

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub spec: SpecSettings,
    #[serde(default)]
    pub thresholds: ThresholdSettings,
}

#[derive(Debug, Deserialize)]
pub struct SpecSettings {
    #[serde(default = "default_k")]
    pub k: usize,
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

fn default_k() -> usize {
    DEFAULT_K
}

fn default_prefix() -> String {
    String::from_utf8_lossy(DEFAULT_PREFIX).into_owned()
}

#[derive(Debug, Default, Deserialize)]
pub struct ThresholdSettings {
    #[serde(default)]
    pub genus: HashMap<String, f32>,
    #[serde(default)]
    pub species: HashMap<String, f32>,
}

pub fn parse_config(path: &Path) -> Result<ConfigFile> {
    let contents = fs::read_to_string(path)
        .context(format!("Failed to read config file: {}", path.display()))?;

    let config: ConfigFile =
        toml::from_str(&contents).context("Failed to parse TOML config")?;

    Ok(config)
}

pub fn validate_config(config: &ConfigFile) -> Result<()> {
    if config.spec.k == 0 || config.spec.k > MAX_K {
        return Err(anyhow!(
            "Config error: k must be in 1..={} (got {})",
            MAX_K,
            config.spec.k
        ));
    }

    if config.spec.prefix.len() >= config.spec.k {
        return Err(anyhow!(
            "Config error: prefix '{}' must be shorter than k = {}",
            config.spec.prefix,
            config.spec.k
        ));
    }

    if !config
        .spec
        .prefix
        .bytes()
        .all(|b| matches!(b.to_ascii_uppercase(), b'A' | b'C' | b'G' | b'T'))
    {
        return Err(anyhow!(
            "Config error: prefix '{}' contains non-ACGT characters",
            config.spec.prefix
        ));
    }

    for (key, &cutoff) in config
        .thresholds
        .genus
        .iter()
        .chain(config.thresholds.species.iter())
    {
        if !(0.0..=1.0).contains(&cutoff) {
            return Err(anyhow!(
                "Threshold for '{}' must be in [0, 1], got {}",
                key,
                cutoff
            ));
        }
    }

    for key in config.thresholds.species.keys() {
        if split_species_key(key).is_none() {
            return Err(anyhow!(
                "Species threshold key '{}' must be of the form 'Genus species'",
                key
            ));
        }
    }

    Ok(())
}

impl ConfigFile {
    /// Convert a validated config into the typed engine inputs.
    pub fn build(&self) -> Result<(KmerSpec, ThresholdTable)> {
        let spec = KmerSpec::new(self.spec.k, self.spec.prefix.as_bytes())?;

        let mut table = ThresholdTable::new();
        for (genus, &cutoff) in &self.thresholds.genus {
            table.insert_genus(genus.clone(), cutoff);
        }
        for (key, &cutoff) in &self.thresholds.species {
            let (genus, species) = split_species_key(key)
                .ok_or_else(|| anyhow!("Invalid species threshold key '{}'", key))?;
            table.insert_species(genus, species, cutoff);
        }

        Ok((spec, table))
    }
}

/// Split a `"Genus species"` key at its single separating space.
fn split_species_key(key: &str) -> Option<(&str, &str)> {
    let (genus, species) = key.split_once(' ')?;
    if genus.is_empty() || species.is_empty() || species.contains(' ') {
        return None;
    }
    Some((genus, species))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{TaxRank, Taxon};

    fn parse(toml: &str) -> ConfigFile {
        toml::from_str(toml).unwrap()
    }

    #[test]
    fn test_defaults_applied() {
        let cfg = parse("[spec]\n");
        assert_eq!(cfg.spec.k, DEFAULT_K);
        assert_eq!(cfg.spec.prefix, "ATGAC");
        assert!(cfg.thresholds.genus.is_empty());
        assert!(validate_config(&cfg).is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_spec() {
        let cfg = parse("[spec]\nk = 0\n");
        assert!(validate_config(&cfg).is_err());

        let cfg = parse("[spec]\nk = 4\nprefix = \"ACGT\"\n");
        assert!(validate_config(&cfg).is_err());

        let cfg = parse("[spec]\nk = 8\nprefix = \"ATN\"\n");
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_thresholds() {
        let cfg = parse("[spec]\n[thresholds.genus]\nEscherichia = 1.5\n");
        assert!(validate_config(&cfg).is_err());

        let cfg = parse("[spec]\n[thresholds.species]\nEscherichia = 0.9\n");
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn test_build() {
        let cfg = parse(
            r#"
[spec]
k = 12
prefix = "atg"

[thresholds.genus]
Escherichia = 0.5

[thresholds.species]
"Escherichia coli" = 0.92
"#,
        );
        validate_config(&cfg).unwrap();
        let (spec, table) = cfg.build().unwrap();

        assert_eq!(spec.k(), 12);
        assert_eq!(spec.prefix(), b"ATG");
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.lookup(&Taxon::new("Escherichia", "coli")),
            Some((TaxRank::Species, 0.92))
        );
        assert_eq!(
            table.lookup(&Taxon::new("Escherichia", "fergusonii")),
            Some((TaxRank::Genus, 0.5))
        );
        assert_eq!(table.lookup(&Taxon::new("Salmonella", "enterica")), None);
    }

    #[test]
    fn test_split_species_key() {
        assert_eq!(
            split_species_key("Escherichia coli"),
            Some(("Escherichia", "coli"))
        );
        assert_eq!(split_species_key("Escherichia"), None);
        assert_eq!(split_species_key("a b c"), None);
        assert_eq!(split_species_key(" coli"), None);
    }
}
