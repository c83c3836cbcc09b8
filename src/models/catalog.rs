use std::collections::{HashMap, HashSet};

use crate::models::{Gene, Transcript, TranscriptId};
use crate::utils::errors::{AnnotationError, ReadWriteError};
use crate::utils::overlaps;

/// In-memory index of all genes and their transcripts
///
/// Genes can be looked up by their id or grouped by chromosome. Transcripts
/// are stored per gene. A gene without any transcripts is valid, it simply
/// returns an empty slice from [`Catalog::transcripts`].
///
/// # Examples
///
/// ```rust
/// use txannot::models::{Catalog, Exon, Gene, Strand, TranscriptBuilder};
///
/// let mut catalog = Catalog::new();
/// catalog
///     .push_gene(Gene::new("ENSG01", "GENE1", "1", Strand::Plus, 100, 599).unwrap())
///     .unwrap();
/// catalog
///     .push_transcript(
///         TranscriptBuilder::new()
///             .id(1)
///             .name("ENST01")
///             .gene("ENSG01")
///             .chrom("1")
///             .strand(Strand::Plus)
///             .exon(Exon::new(100, 599, 1, -1, -1).unwrap())
///             .build()
///             .unwrap(),
///     )
///     .unwrap();
///
/// assert_eq!(catalog.len(), 1);
/// assert_eq!(catalog.transcripts("ENSG01").len(), 1);
/// assert_eq!(catalog.transcripts("ENSG02").len(), 0);
/// ```
#[derive(Debug, Default)]
pub struct Catalog {
    genes: Vec<Gene>,
    gene_index: HashMap<String, usize>,
    chromosomes: Vec<String>,
    by_chrom: HashMap<String, Vec<usize>>,
    transcripts: HashMap<String, Vec<Transcript>>,
    transcript_ids: HashSet<TranscriptId>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a gene to the catalog
    ///
    /// Gene ids must be unique
    pub fn push_gene(&mut self, gene: Gene) -> Result<(), AnnotationError> {
        if self.gene_index.contains_key(gene.id()) {
            return Err(AnnotationError::new(format!(
                "duplicate gene id {}",
                gene.id()
            )));
        }
        let idx = self.genes.len();
        if !self.by_chrom.contains_key(gene.chrom()) {
            self.chromosomes.push(gene.chrom().to_string());
        }
        self.by_chrom
            .entry(gene.chrom().to_string())
            .or_default()
            .push(idx);
        self.gene_index.insert(gene.id().to_string(), idx);
        self.genes.push(gene);
        Ok(())
    }

    /// Adds a transcript to its gene
    ///
    /// The gene must already be part of the catalog and the transcript
    /// must be on the same chromosome and strand as the gene. Transcript ids
    /// are unique across all genes.
    pub fn push_transcript(&mut self, transcript: Transcript) -> Result<(), AnnotationError> {
        let gene = self.gene(transcript.gene_id()).ok_or_else(|| {
            AnnotationError::new(format!(
                "{} belongs to unknown gene {}",
                transcript.name(),
                transcript.gene_id()
            ))
        })?;
        if gene.strand() != transcript.strand() || gene.chrom() != transcript.chrom() {
            return Err(AnnotationError::new(format!(
                "{} is not on the same chromosome and strand as {}",
                transcript.name(),
                gene.id()
            )));
        }
        if !self.transcript_ids.insert(transcript.id()) {
            return Err(AnnotationError::new(format!(
                "duplicate transcript id {}",
                transcript.id()
            )));
        }
        self.transcripts
            .entry(transcript.gene_id().to_string())
            .or_default()
            .push(transcript);
        Ok(())
    }

    /// Number of genes
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Number of transcripts of all genes
    pub fn transcript_count(&self) -> usize {
        self.transcript_ids.len()
    }

    pub fn gene(&self, id: &str) -> Option<&Gene> {
        self.gene_index.get(id).map(|idx| &self.genes[*idx])
    }

    /// All genes, in the order they were added
    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    /// All chromosomes, in the order they first appeared
    pub fn chromosomes(&self) -> &[String] {
        &self.chromosomes
    }

    /// All genes on the chromosome, in the order they were added
    pub fn genes_on<'a>(&'a self, chrom: &str) -> impl Iterator<Item = &'a Gene> + 'a {
        self.by_chrom
            .get(chrom)
            .map(|idx| idx.as_slice())
            .unwrap_or_default()
            .iter()
            .map(move |idx| &self.genes[*idx])
    }

    /// The transcripts of the gene. Unknown genes have no transcripts.
    pub fn transcripts(&self, gene_id: &str) -> &[Transcript] {
        self.transcripts
            .get(gene_id)
            .map(|txs| txs.as_slice())
            .unwrap_or_default()
    }

    /// Iterates all transcripts, grouped by gene in catalog order
    pub fn all_transcripts(&self) -> impl Iterator<Item = (&Gene, &Transcript)> {
        self.genes
            .iter()
            .flat_map(move |gene| self.transcripts(gene.id()).iter().map(move |tx| (gene, tx)))
    }

    /// Returns all genes on the same chromosome and strand whose body overlaps
    /// the gene's search window, i.e. the gene body extended upstream by
    /// `promoter_distance`.
    ///
    /// The gene itself is part of the result.
    pub fn proximate_genes(&self, gene: &Gene, promoter_distance: u32) -> Vec<&Gene> {
        let (window_start, window_end) = gene.search_window(promoter_distance);
        self.genes_on(gene.chrom())
            .filter(|other| {
                other.strand() == gene.strand()
                    && overlaps(other.start(), other.end(), window_start, window_end)
            })
            .collect()
    }
}

/// Trait for sources that can provide a full [`Catalog`]
///
/// Implement this for any storage of gene and transcript data, e.g.
/// flat files or a database connection.
pub trait CatalogSource {
    fn catalog(&mut self) -> Result<Catalog, ReadWriteError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Strand;
    use crate::tests::catalogs::{gene, transcript};

    #[test]
    fn test_duplicate_gene() {
        let mut catalog = Catalog::new();
        catalog.push_gene(gene("G1", Strand::Plus, 100, 200)).unwrap();
        assert!(catalog.push_gene(gene("G1", Strand::Plus, 300, 400)).is_err());
    }

    #[test]
    fn test_transcript_for_unknown_gene() {
        let mut catalog = Catalog::new();
        let tx = transcript(1, "G1", Strand::Plus, &[(100, 200)]);
        assert!(catalog.push_transcript(tx).is_err());
    }

    #[test]
    fn test_transcript_strand_mismatch() {
        let mut catalog = Catalog::new();
        catalog.push_gene(gene("G1", Strand::Plus, 100, 200)).unwrap();
        let tx = transcript(1, "G1", Strand::Minus, &[(100, 200)]);
        assert!(catalog.push_transcript(tx).is_err());
    }

    #[test]
    fn test_duplicate_transcript_id() {
        let mut catalog = Catalog::new();
        catalog.push_gene(gene("G1", Strand::Plus, 100, 200)).unwrap();
        catalog.push_gene(gene("G2", Strand::Plus, 300, 400)).unwrap();
        catalog
            .push_transcript(transcript(1, "G1", Strand::Plus, &[(100, 200)]))
            .unwrap();
        let tx = transcript(1, "G2", Strand::Plus, &[(300, 400)]);
        assert!(catalog.push_transcript(tx).is_err());
        assert_eq!(catalog.transcript_count(), 1);
        assert_eq!(catalog.transcripts("G2").len(), 0);

        catalog
            .push_transcript(transcript(2, "G2", Strand::Plus, &[(300, 400)]))
            .unwrap();
        assert_eq!(catalog.transcript_count(), 2);
    }

    #[test]
    fn test_genes_by_chromosome() {
        let mut catalog = Catalog::new();
        catalog.push_gene(gene("G1", Strand::Plus, 100, 200)).unwrap();
        catalog
            .push_gene(Gene::new("G2", "G2", "2", Strand::Plus, 100, 200).unwrap())
            .unwrap();
        catalog.push_gene(gene("G3", Strand::Minus, 100, 200)).unwrap();

        assert_eq!(catalog.chromosomes(), &["1".to_string(), "2".to_string()]);
        let ids: Vec<&str> = catalog.genes_on("1").map(|g| g.id()).collect();
        assert_eq!(ids, vec!["G1", "G3"]);
        assert_eq!(catalog.genes_on("X").count(), 0);
    }

    #[test]
    fn test_proximate_genes() {
        let mut catalog = Catalog::new();
        catalog.push_gene(gene("A", Strand::Plus, 10_000, 12_000)).unwrap();
        catalog.push_gene(gene("B", Strand::Plus, 9_000, 9_600)).unwrap();
        catalog.push_gene(gene("C", Strand::Plus, 8_000, 9_400)).unwrap();
        catalog.push_gene(gene("D", Strand::Minus, 9_000, 9_600)).unwrap();
        catalog.push_gene(gene("E", Strand::Plus, 12_000, 13_000)).unwrap();

        let a = catalog.gene("A").unwrap();
        let ids: Vec<&str> = catalog
            .proximate_genes(a, 500)
            .iter()
            .map(|g| g.id())
            .collect();
        assert_eq!(ids, vec!["A", "B", "E"]);
    }
}
