use serde::{Deserialize, Serialize};

use crate::models::{Exon, Strand};
use crate::utils::errors::AnnotationError;

/// Numeric identifier of a transcript, unique within a catalog
pub type TranscriptId = u32;

/// A transcript with its exons
///
/// Exons are always sorted by ascending genomic position, independent of the
/// strand. Use [`Strand::exons_5_to_3`] to iterate them in transcript orientation.
///
/// A transcript is coding if both its coding start and coding end are known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    id: TranscriptId,
    name: String,
    gene_id: String,
    chrom: String,
    strand: Strand,
    start: u32,
    end: u32,
    coding: Option<(u32, u32)>,
    exons: Vec<Exon>,
    canonical: bool,
    biotype: Option<String>,
}

impl Transcript {
    pub fn id(&self) -> TranscriptId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn gene_id(&self) -> &str {
        &self.gene_id
    }

    pub fn chrom(&self) -> &str {
        &self.chrom
    }

    pub fn strand(&self) -> Strand {
        self.strand
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    pub fn coding_start(&self) -> Option<u32> {
        self.coding.map(|c| c.0)
    }

    pub fn coding_end(&self) -> Option<u32> {
        self.coding.map(|c| c.1)
    }

    /// Returns the coding region `(coding_start, coding_end)`, if any
    pub fn coding_region(&self) -> Option<(u32, u32)> {
        self.coding
    }

    pub fn is_coding(&self) -> bool {
        self.coding.is_some()
    }

    pub fn is_canonical(&self) -> bool {
        self.canonical
    }

    pub fn biotype(&self) -> Option<&str> {
        self.biotype.as_deref()
    }

    /// The exons, sorted by ascending genomic position
    pub fn exons(&self) -> &[Exon] {
        &self.exons
    }

    pub fn exon_count(&self) -> usize {
        self.exons.len()
    }

    /// The 5' end of the transcript, taking the strand into account
    ///
    /// # Examples
    ///
    /// ```rust
    /// use txannot::models::{Exon, Strand, TranscriptBuilder};
    ///
    /// let tx = TranscriptBuilder::new()
    ///     .id(1)
    ///     .name("ENST01")
    ///     .gene("ENSG01")
    ///     .chrom("1")
    ///     .strand(Strand::Minus)
    ///     .exon(Exon::new(100, 199, 1, -1, -1).unwrap())
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(tx.five_prime(), 199);
    /// ```
    pub fn five_prime(&self) -> u32 {
        self.strand.five_prime(self.start, self.end)
    }

    /// Iterates all exons that have a splice acceptor, i.e. all exons
    /// except rank 1. Single-exon transcripts have none.
    pub fn acceptor_exons(&self) -> impl Iterator<Item = &Exon> {
        let multi_exon = self.exons.len() > 1;
        self.exons
            .iter()
            .filter(move |exon| multi_exon && exon.rank() != 1)
    }
}

/// Builds a [`Transcript`]
///
/// # Examples
///
/// ```rust
/// use txannot::models::{Exon, Strand, TranscriptBuilder};
///
/// let tx = TranscriptBuilder::new()
///     .id(7)
///     .name("ENST07")
///     .gene("ENSG01")
///     .chrom("1")
///     .strand(Strand::Plus)
///     .coding(Some(150), Some(550))
///     .exon(Exon::new(500, 599, 3, 0, -1).unwrap())
///     .exon(Exon::new(100, 199, 1, -1, 1).unwrap())
///     .exon(Exon::new(300, 399, 2, 1, 0).unwrap())
///     .canonical(true)
///     .build()
///     .unwrap();
///
/// assert_eq!(tx.start(), 100);
/// assert_eq!(tx.end(), 599);
/// assert_eq!(tx.exons()[0].rank(), 1);
/// assert!(tx.is_coding());
/// ```
#[derive(Debug, Default)]
pub struct TranscriptBuilder {
    id: Option<TranscriptId>,
    name: Option<String>,
    gene_id: Option<String>,
    chrom: Option<String>,
    strand: Option<Strand>,
    start: Option<u32>,
    end: Option<u32>,
    coding_start: Option<u32>,
    coding_end: Option<u32>,
    exons: Vec<Exon>,
    canonical: bool,
    biotype: Option<String>,
}

impl TranscriptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: TranscriptId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn gene(mut self, gene_id: &str) -> Self {
        self.gene_id = Some(gene_id.to_string());
        self
    }

    pub fn chrom(mut self, chrom: &str) -> Self {
        self.chrom = Some(chrom.to_string());
        self
    }

    pub fn strand(mut self, strand: Strand) -> Self {
        self.strand = Some(strand);
        self
    }

    /// Sets the transcript boundaries. If omitted, they are derived from the exons
    pub fn bounds(mut self, start: u32, end: u32) -> Self {
        self.start = Some(start);
        self.end = Some(end);
        self
    }

    /// Sets the coding boundaries. The transcript is only considered coding
    /// if both are present.
    pub fn coding(mut self, start: Option<u32>, end: Option<u32>) -> Self {
        self.coding_start = start;
        self.coding_end = end;
        self
    }

    pub fn exon(mut self, exon: Exon) -> Self {
        self.exons.push(exon);
        self
    }

    pub fn exons(mut self, exons: Vec<Exon>) -> Self {
        self.exons.extend(exons);
        self
    }

    pub fn canonical(mut self, canonical: bool) -> Self {
        self.canonical = canonical;
        self
    }

    pub fn biotype(mut self, biotype: &str) -> Self {
        self.biotype = Some(biotype.to_string());
        self
    }

    pub fn build(self) -> Result<Transcript, AnnotationError> {
        let name = self
            .name
            .ok_or_else(|| AnnotationError::new("transcript name is missing"))?;
        let id = self
            .id
            .ok_or_else(|| AnnotationError::new(format!("{} has no id", name)))?;
        let gene_id = self
            .gene_id
            .ok_or_else(|| AnnotationError::new(format!("{} has no gene", name)))?;
        let chrom = self
            .chrom
            .ok_or_else(|| AnnotationError::new(format!("{} has no chromosome", name)))?;
        let strand = self
            .strand
            .ok_or_else(|| AnnotationError::new(format!("{} has no strand", name)))?;

        let mut exons = self.exons;
        exons.sort_by_key(|exon| exon.start());
        for pair in exons.windows(2) {
            if pair[0].end() >= pair[1].start() {
                return Err(AnnotationError::new(format!(
                    "{} contains overlapping exons at {}",
                    name,
                    pair[1].start()
                )));
            }
        }

        let start = match (self.start, exons.first()) {
            (Some(start), _) => start,
            (None, Some(exon)) => exon.start(),
            (None, None) => {
                return Err(AnnotationError::new(format!("{} has no coordinates", name)))
            }
        };
        let end = match (self.end, exons.last()) {
            (Some(end), _) => end,
            (None, Some(exon)) => exon.end(),
            (None, None) => {
                return Err(AnnotationError::new(format!("{} has no coordinates", name)))
            }
        };
        if start > end {
            return Err(AnnotationError::new(format!(
                "{} starts after its end ({} > {})",
                name, start, end
            )));
        }

        let coding = match (self.coding_start, self.coding_end) {
            (Some(cds_start), Some(cds_end)) => {
                if cds_start > cds_end || cds_start < start || cds_end > end {
                    return Err(AnnotationError::new(format!(
                        "{} has an invalid coding region {}-{}",
                        name, cds_start, cds_end
                    )));
                }
                Some((cds_start, cds_end))
            }
            _ => None,
        };

        Ok(Transcript {
            id,
            name,
            gene_id,
            chrom,
            strand,
            start,
            end,
            coding,
            exons,
            canonical: self.canonical,
            biotype: self.biotype,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> TranscriptBuilder {
        TranscriptBuilder::new()
            .id(1)
            .name("ENST01")
            .gene("ENSG01")
            .chrom("1")
            .strand(Strand::Plus)
    }

    #[test]
    fn test_exons_are_sorted() {
        let tx = builder()
            .exon(Exon::new(300, 399, 2, -1, -1).unwrap())
            .exon(Exon::new(100, 199, 1, -1, -1).unwrap())
            .build()
            .unwrap();
        assert_eq!(tx.exons()[0].start(), 100);
        assert_eq!(tx.exons()[1].start(), 300);
        assert_eq!(tx.start(), 100);
        assert_eq!(tx.end(), 399);
    }

    #[test]
    fn test_overlapping_exons() {
        let res = builder()
            .exon(Exon::new(100, 199, 1, -1, -1).unwrap())
            .exon(Exon::new(150, 399, 2, -1, -1).unwrap())
            .build();
        assert!(res.is_err());
    }

    #[test]
    fn test_partial_coding_is_non_coding() {
        let tx = builder()
            .coding(Some(120), None)
            .exon(Exon::new(100, 199, 1, -1, -1).unwrap())
            .build()
            .unwrap();
        assert!(!tx.is_coding());
        assert_eq!(tx.coding_start(), None);
    }

    #[test]
    fn test_missing_id() {
        let res = TranscriptBuilder::new()
            .name("ENST01")
            .gene("ENSG01")
            .chrom("1")
            .strand(Strand::Plus)
            .exon(Exon::new(100, 199, 1, -1, -1).unwrap())
            .build();
        assert!(res.is_err());

        let tx = builder()
            .exon(Exon::new(100, 199, 1, -1, -1).unwrap())
            .build()
            .unwrap();
        assert_eq!(tx.id(), 1);
    }

    #[test]
    fn test_invalid_coding_region() {
        let res = builder()
            .coding(Some(90), Some(150))
            .exon(Exon::new(100, 199, 1, -1, -1).unwrap())
            .build();
        assert!(res.is_err());
    }

    #[test]
    fn test_acceptor_exons() {
        let tx = builder()
            .exon(Exon::new(100, 199, 1, -1, -1).unwrap())
            .exon(Exon::new(300, 399, 2, -1, -1).unwrap())
            .exon(Exon::new(500, 599, 3, -1, -1).unwrap())
            .build()
            .unwrap();
        let ranks: Vec<u32> = tx.acceptor_exons().map(|e| e.rank()).collect();
        assert_eq!(ranks, vec![2, 3]);

        let single = builder()
            .exon(Exon::new(100, 199, 2, -1, -1).unwrap())
            .build()
            .unwrap();
        assert_eq!(single.acceptor_exons().count(), 0);
    }
}
