//! Error types of *txannot*
//!
//! - [`AnnotationError`] is raised for invalid gene, transcript or exon data
//! - [`FastaError`] is raised by the reference genome lookups
//! - [`ReadWriteError`] is raised when parsing input tables or writing output
//! - [`ProteinError`] ties a [`FastaError`] to the transcript it occurred for

use thiserror::Error;

/// Invalid or inconsistent model data
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct AnnotationError {
    message: String,
}

impl AnnotationError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        AnnotationError {
            message: message.into(),
        }
    }
}

impl From<String> for AnnotationError {
    fn from(message: String) -> Self {
        AnnotationError::new(message)
    }
}

impl From<&str> for AnnotationError {
    fn from(message: &str) -> Self {
        AnnotationError::new(message)
    }
}

/// Errors while reading bases from a reference genome
#[derive(Error, Debug)]
pub enum FastaError {
    #[error("unknown chromosome {0}")]
    UnknownChromosome(String),
    #[error("invalid coordinates {chrom}:{start}-{end} (chromosome length {length})")]
    InvalidCoordinates {
        chrom: String,
        start: u32,
        end: u32,
        length: u64,
    },
    #[error("invalid fasta index: {0}")]
    Index(String),
    #[error("the fasta file handle is no longer usable")]
    Poisoned,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors while parsing input tables or writing output records
#[derive(Error, Debug)]
pub enum ReadWriteError {
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("missing column {0}")]
    MissingColumn(String),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
    #[error(transparent)]
    Annotation(#[from] AnnotationError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ReadWriteError {
    pub fn parse<S: Into<String>>(line: usize, message: S) -> Self {
        ReadWriteError::Parse {
            line,
            message: message.into(),
        }
    }
}

/// A reference lookup failed while assembling the coding sequence of a transcript
#[derive(Error, Debug)]
#[error("unable to assemble coding sequence of {transcript}: {source}")]
pub struct ProteinError {
    pub transcript: String,
    #[source]
    pub source: FastaError,
}
