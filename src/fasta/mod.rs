//! Access to the reference genome sequence
//!
//! Sequence lookups go through the [`BaseSource`] trait. Two implementations
//! are provided:
//!
//! - [`FastaReader`] reads from an (optionally `.fai` indexed) fasta file on disk
//! - [`InMemoryReference`] keeps all chromosomes in memory, which is useful
//!   for small genomes and for testing
//!
//! All coordinates are 1-based and inclusive and all sequences are returned
//! for the forward strand.

mod reader;

use std::collections::HashMap;
use std::io::BufRead;

use crate::models::Sequence;
use crate::utils::errors::FastaError;

pub use crate::fasta::reader::FastaReader;

/// Provides forward-strand bases of the reference genome
///
/// Implementations must be usable from several threads at once.
pub trait BaseSource: Sync {
    /// Returns the bases of `chrom` from `start` to `end` (1-based, inclusive)
    fn bases(&self, chrom: &str, start: u32, end: u32) -> Result<Sequence, FastaError>;
}

/// Checks that `[start, end]` is a valid, non-empty range on a chromosome of `length` bases
fn check_range(chrom: &str, start: u32, end: u32, length: u64) -> Result<(), FastaError> {
    if start == 0 || start > end || end as u64 > length {
        return Err(FastaError::InvalidCoordinates {
            chrom: chrom.to_string(),
            start,
            end,
            length,
        });
    }
    Ok(())
}

/// A reference genome held entirely in memory
///
/// # Examples
///
/// ```rust
/// use txannot::fasta::{BaseSource, InMemoryReference};
///
/// let fasta = ">chr1 test\nACGTACGT\nGGGG\n>chr2\nTTTT\n";
/// let reference = InMemoryReference::from_fasta(fasta.as_bytes()).unwrap();
///
/// assert_eq!(reference.bases("chr1", 7, 10).unwrap().to_string(), "GTGG");
/// assert!(reference.bases("chr2", 3, 5).is_err());
/// ```
#[derive(Debug, Default)]
pub struct InMemoryReference {
    chromosomes: HashMap<String, Vec<u8>>,
}

impl InMemoryReference {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the sequence of a chromosome
    pub fn insert(&mut self, chrom: &str, sequence: &[u8]) {
        self.chromosomes
            .insert(chrom.to_string(), sequence.to_ascii_uppercase());
    }

    /// Parses all records of a fasta file
    ///
    /// The chromosome name is the first word of the header line.
    pub fn from_fasta<R: BufRead>(reader: R) -> Result<Self, FastaError> {
        let mut reference = Self::new();
        let mut current: Option<(String, Vec<u8>)> = None;
        for line in reader.lines() {
            let line = line?;
            if let Some(header) = line.strip_prefix('>') {
                if let Some((name, seq)) = current.take() {
                    reference.insert(&name, &seq);
                }
                let name = header.split_whitespace().next().unwrap_or_default();
                current = Some((name.to_string(), Vec::new()));
            } else if let Some((_, seq)) = current.as_mut() {
                seq.extend_from_slice(line.trim_end().as_bytes());
            }
        }
        if let Some((name, seq)) = current {
            reference.insert(&name, &seq);
        }
        Ok(reference)
    }

    /// Returns the length of the chromosome, if present
    pub fn length(&self, chrom: &str) -> Option<u64> {
        self.chromosomes.get(chrom).map(|seq| seq.len() as u64)
    }
}

impl BaseSource for InMemoryReference {
    fn bases(&self, chrom: &str, start: u32, end: u32) -> Result<Sequence, FastaError> {
        let seq = self
            .chromosomes
            .get(chrom)
            .ok_or_else(|| FastaError::UnknownChromosome(chrom.to_string()))?;
        check_range(chrom, start, end, seq.len() as u64)?;
        Ok(Sequence::from_raw_bytes(
            &seq[start as usize - 1..end as usize],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_bounds() {
        let mut reference = InMemoryReference::new();
        reference.insert("1", b"acgtn");

        assert_eq!(reference.bases("1", 1, 5).unwrap().to_string(), "ACGTN");
        assert_eq!(reference.bases("1", 3, 3).unwrap().to_string(), "G");
        assert!(matches!(
            reference.bases("1", 0, 3),
            Err(FastaError::InvalidCoordinates { .. })
        ));
        assert!(matches!(
            reference.bases("1", 4, 6),
            Err(FastaError::InvalidCoordinates { .. })
        ));
        assert!(matches!(
            reference.bases("1", 4, 3),
            Err(FastaError::InvalidCoordinates { .. })
        ));
        assert!(matches!(
            reference.bases("2", 1, 3),
            Err(FastaError::UnknownChromosome(_))
        ));
    }

    #[test]
    fn test_from_fasta() {
        let fasta = ">1\nAC\nGT\n\n>2 second chromosome\nCC\n";
        let reference = InMemoryReference::from_fasta(fasta.as_bytes()).unwrap();
        assert_eq!(reference.length("1"), Some(4));
        assert_eq!(reference.length("2"), Some(2));
        assert_eq!(reference.length("3"), None);
    }
}
