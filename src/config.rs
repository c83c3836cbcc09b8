//! Settings shared by both derivations
//!
//! A [`DeriveConfig`] can be created in code, or loaded from a TOML file:
//!
//! ```toml
//! promoter_distance = 5000
//! canonical_only = true
//! gene_ids = ["ENSG00000157764", "ENSG00000141510"]
//! threads = 8
//! ```
//!
//! Every key is optional, missing keys use the default value.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::models::{Gene, Transcript};
use crate::utils::errors::ReadWriteError;

/// Default number of bases the search window extends upstream of a gene
pub const DEFAULT_PROMOTER_DISTANCE: u32 = 10_000;

/// Settings of the splice acceptor and protein derivations
///
/// `canonical_only` and `gene_ids` only restrict which genes and transcripts
/// receive an annotation. The splice acceptor candidates are always taken
/// from the complete catalog.
///
/// # Examples
///
/// ```rust
/// use txannot::config::DeriveConfig;
///
/// let config = DeriveConfig::from_toml("canonical_only = true").unwrap();
/// assert_eq!(config.promoter_distance, 10_000);
/// assert!(config.canonical_only);
/// assert!(config.gene_ids.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeriveConfig {
    pub promoter_distance: u32,
    pub canonical_only: bool,
    pub gene_ids: Option<Vec<String>>,
    /// Number of worker threads, `0` lets rayon decide
    pub threads: usize,
}

impl Default for DeriveConfig {
    fn default() -> Self {
        DeriveConfig {
            promoter_distance: DEFAULT_PROMOTER_DISTANCE,
            canonical_only: false,
            gene_ids: None,
            threads: 0,
        }
    }
}

impl DeriveConfig {
    /// Parses the configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, ReadWriteError> {
        Ok(toml::from_str(content)?)
    }

    /// Reads the configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ReadWriteError> {
        Self::from_toml(&fs::read_to_string(path)?)
    }

    /// Returns `true` if the gene should be annotated
    pub fn includes_gene(&self, gene: &Gene) -> bool {
        match &self.gene_ids {
            Some(ids) => ids.iter().any(|id| id == gene.id()),
            None => true,
        }
    }

    /// Returns `true` if the transcript should be annotated
    pub fn includes_transcript(&self, transcript: &Transcript) -> bool {
        !self.canonical_only || transcript.is_canonical()
    }

    /// Builds a dedicated rayon thread pool with the configured number of threads
    pub fn thread_pool(&self) -> Result<rayon::ThreadPool, rayon::ThreadPoolBuildError> {
        rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .build()
    }
}
