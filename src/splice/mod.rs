//! Locate the nearest upstream splice acceptor of neighbouring genes
//!
//! A transcript that starts inside (or just downstream of) another gene on the
//! same strand can be spliced into that gene's transcripts. For every
//! transcript, this module finds the closest splice acceptor that lies
//! upstream of the transcript's 5' end and belongs to a transcript of a
//! proximate gene.
//!
//! Proximate genes are all genes on the same chromosome and strand whose body
//! overlaps the search window of the gene, i.e. the gene body extended by the
//! promoter distance in upstream direction. The gene itself is always part
//! of its proximate genes, so other transcripts of the same gene are
//! candidates as well.
//!
//! ```text
//!                     |<-- distance -->|
//! Gene B    ====XXXXX-------XXXXX-------XXXXXXX======
//! Gene A    ~~~~~~~~~~~~~~~~~~~~~~~~~~~XXXXXXXXXXXXXXXXXXX~~~~~
//!                           ^          ^
//!                  splice acceptor   anchor
//! ```
//!
//! Every exon of a multi-exon transcript, except the exon with rank 1, has a
//! splice acceptor at its 5' boundary.

mod writer;

use log::{debug, info};
use rayon::prelude::*;
use serde::Serialize;

use crate::config::DeriveConfig;
use crate::models::{Catalog, Gene, Transcript, TranscriptId};

pub use crate::splice::writer::Writer;

/// The nearest upstream splice acceptor of a transcript
///
/// `anchor` is the 5' end of the transcript, `distance` the number of bases
/// between the splice acceptor and the anchor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpliceAcceptor {
    gene_id: String,
    transcript_id: TranscriptId,
    transcript_name: String,
    anchor: u32,
    splice_acceptor: u32,
    distance: u32,
}

impl SpliceAcceptor {
    fn new(gene: &Gene, transcript: &Transcript, splice_acceptor: u32) -> Self {
        let anchor = transcript.five_prime();
        SpliceAcceptor {
            gene_id: gene.id().to_string(),
            transcript_id: transcript.id(),
            transcript_name: transcript.name().to_string(),
            anchor,
            splice_acceptor,
            distance: gene.strand().distance(anchor, splice_acceptor),
        }
    }

    pub fn gene_id(&self) -> &str {
        &self.gene_id
    }

    pub fn transcript_id(&self) -> TranscriptId {
        self.transcript_id
    }

    pub fn transcript_name(&self) -> &str {
        &self.transcript_name
    }

    pub fn anchor(&self) -> u32 {
        self.anchor
    }

    pub fn splice_acceptor(&self) -> u32 {
        self.splice_acceptor
    }

    pub fn distance(&self) -> u32 {
        self.distance
    }
}

/// Returns the splice acceptor closest to, and upstream of, the 5' end of `transcript`
///
/// The transcript itself is ignored if it is part of `candidates`.
///
/// # Examples
///
/// ```rust
/// use txannot::splice::nearest_acceptor;
/// use txannot::models::Strand;
/// use txannot::tests::catalogs::transcript;
///
/// let tx = transcript(1, "A", Strand::Plus, &[(12_000, 12_100)]);
/// let other = transcript(2, "B", Strand::Plus, &[(11_000, 11_100), (11_500, 11_600)]);
///
/// assert_eq!(nearest_acceptor(&tx, &[&other]), Some(11_500));
/// assert_eq!(nearest_acceptor(&other, &[&tx]), None);
/// ```
pub fn nearest_acceptor(transcript: &Transcript, candidates: &[&Transcript]) -> Option<u32> {
    let strand = transcript.strand();
    let anchor = transcript.five_prime();
    candidates
        .iter()
        .filter(|candidate| candidate.id() != transcript.id())
        .flat_map(|candidate| candidate.acceptor_exons())
        .map(|exon| strand.five_prime_edge(exon))
        .filter(|position| strand.is_upstream(*position, anchor))
        .reduce(|a, b| strand.nearest(a, b))
}

/// Locates the nearest upstream splice acceptor for all transcripts of one gene
pub fn locate_gene(catalog: &Catalog, gene: &Gene, config: &DeriveConfig) -> Vec<SpliceAcceptor> {
    let proximate = catalog.proximate_genes(gene, config.promoter_distance);
    if proximate.is_empty() {
        return vec![];
    }
    let candidates: Vec<&Transcript> = proximate
        .iter()
        .flat_map(|other| catalog.transcripts(other.id()))
        .collect();

    catalog
        .transcripts(gene.id())
        .iter()
        .filter(|tx| config.includes_transcript(tx))
        .filter_map(|tx| {
            nearest_acceptor(tx, &candidates).map(|position| SpliceAcceptor::new(gene, tx, position))
        })
        .collect()
}

/// Locates the nearest upstream splice acceptor for all transcripts of the catalog
///
/// The genes of each chromosome are processed in parallel, the records are
/// returned in catalog order.
///
/// # Examples
///
/// ```rust
/// use txannot::config::DeriveConfig;
/// use txannot::splice::locate;
/// use txannot::tests::catalogs::two_gene_catalog;
///
/// let catalog = two_gene_catalog();
/// let config = DeriveConfig {
///     promoter_distance: 500,
///     ..Default::default()
/// };
/// let records = locate(&catalog, &config);
///
/// assert_eq!(records[0].transcript_name(), "T1");
/// assert_eq!(records[0].splice_acceptor(), 11_810);
/// assert_eq!(records[0].distance(), 190);
/// ```
pub fn locate(catalog: &Catalog, config: &DeriveConfig) -> Vec<SpliceAcceptor> {
    let mut records = Vec::new();
    for chrom in catalog.chromosomes() {
        let genes: Vec<&Gene> = catalog
            .genes_on(chrom)
            .filter(|gene| config.includes_gene(gene))
            .collect();
        debug!("Locating splice acceptors for {} genes on {}", genes.len(), chrom);
        let per_gene: Vec<Vec<SpliceAcceptor>> = genes
            .par_iter()
            .map(|gene| locate_gene(catalog, gene, config))
            .collect();
        records.extend(per_gene.into_iter().flatten());
    }
    info!(
        "Found upstream splice acceptors for {} transcripts",
        records.len()
    );
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Exon, Strand, TranscriptBuilder};
    use crate::tests::catalogs::{
        gene, straddling_catalog, transcript, two_gene_catalog, MIRROR,
    };
    use pretty_assertions::assert_eq;

    fn config(promoter_distance: u32) -> DeriveConfig {
        DeriveConfig {
            promoter_distance,
            ..Default::default()
        }
    }

    fn record(
        gene_id: &str,
        tx: TranscriptId,
        anchor: u32,
        splice_acceptor: u32,
        distance: u32,
    ) -> SpliceAcceptor {
        SpliceAcceptor {
            gene_id: gene_id.to_string(),
            transcript_id: tx,
            transcript_name: format!("T{}", tx),
            anchor,
            splice_acceptor,
            distance,
        }
    }

    #[test]
    fn test_two_genes() {
        let records = locate(&two_gene_catalog(), &config(500));
        // T2 starts at 11000, no acceptor of another transcript is upstream
        assert_eq!(
            records,
            vec![
                record("A", 1, 12_000, 11_810, 190),
                record("B", 3, 11_800, 11_200, 600),
            ]
        );
    }

    #[test]
    fn test_gene_outside_of_window() {
        let mut catalog = Catalog::new();
        catalog.push_gene(gene("A", Strand::Plus, 10_000, 12_000)).unwrap();
        catalog.push_gene(gene("B", Strand::Plus, 8_000, 9_000)).unwrap();
        catalog
            .push_transcript(transcript(1, "A", Strand::Plus, &[(10_000, 12_000)]))
            .unwrap();
        catalog
            .push_transcript(transcript(
                2,
                "B",
                Strand::Plus,
                &[(8_000, 8_100), (8_500, 9_000)],
            ))
            .unwrap();
        assert!(locate(&catalog, &config(500)).is_empty());
        assert_eq!(
            locate(&catalog, &config(1_000)),
            vec![record("A", 1, 10_000, 8_500, 1_500)]
        );
    }

    #[test]
    fn test_strand_symmetry() {
        let plus = locate(&straddling_catalog(Strand::Plus), &config(500));
        let minus = locate(&straddling_catalog(Strand::Minus), &config(500));

        assert_eq!(plus, vec![record("A", 1, 11_900, 11_600, 300)]);
        assert_eq!(
            minus,
            vec![record("A", 1, MIRROR - 11_900, MIRROR - 11_600, 300)]
        );
    }

    #[test]
    fn test_acceptor_of_same_gene() {
        let mut catalog = Catalog::new();
        catalog.push_gene(gene("G", Strand::Plus, 1_000, 5_000)).unwrap();
        catalog
            .push_transcript(transcript(1, "G", Strand::Plus, &[(3_000, 5_000)]))
            .unwrap();
        catalog
            .push_transcript(transcript(
                2,
                "G",
                Strand::Plus,
                &[(1_000, 1_100), (2_000, 2_500)],
            ))
            .unwrap();

        let records = locate(&catalog, &config(0));
        assert_eq!(records, vec![record("G", 1, 3_000, 2_000, 1_000)]);
    }

    #[test]
    fn test_transcript_is_not_its_own_candidate() {
        let mut catalog = Catalog::new();
        catalog.push_gene(gene("G", Strand::Plus, 1_000, 5_000)).unwrap();
        catalog
            .push_transcript(transcript(
                1,
                "G",
                Strand::Plus,
                &[(1_000, 1_100), (2_000, 2_500), (3_000, 5_000)],
            ))
            .unwrap();
        assert!(locate(&catalog, &config(10_000)).is_empty());
    }

    #[test]
    fn test_never_rank_one() {
        // on the minus strand, rank 1 is the 3' exon but it is still ignored
        let mut catalog = Catalog::new();
        catalog.push_gene(gene("G", Strand::Minus, 1_000, 3_100)).unwrap();
        catalog
            .push_transcript(transcript(1, "G", Strand::Minus, &[(1_000, 2_000)]))
            .unwrap();
        catalog
            .push_transcript(transcript(
                2,
                "G",
                Strand::Minus,
                &[(2_500, 2_600), (3_000, 3_100)],
            ))
            .unwrap();

        let records = locate(&catalog, &config(0));
        assert_eq!(records, vec![record("G", 1, 2_000, 3_100, 1_100)]);
    }

    #[test]
    fn test_no_candidates() {
        let mut catalog = Catalog::new();
        catalog.push_gene(gene("A", Strand::Plus, 1_000, 5_000)).unwrap();
        // no transcripts at all
        catalog.push_gene(gene("B", Strand::Plus, 900, 1_200)).unwrap();
        // opposite strand
        catalog.push_gene(gene("C", Strand::Minus, 100, 2_000)).unwrap();
        catalog
            .push_transcript(transcript(1, "A", Strand::Plus, &[(1_000, 5_000)]))
            .unwrap();
        catalog
            .push_transcript(transcript(
                2,
                "C",
                Strand::Minus,
                &[(100, 200), (500, 600)],
            ))
            .unwrap();

        assert!(locate(&catalog, &config(10_000)).is_empty());
        for gene in catalog.genes() {
            assert!(locate_gene(&catalog, gene, &config(10_000)).is_empty());
        }
    }

    #[test]
    fn test_acceptor_is_upstream() {
        for strand in [Strand::Plus, Strand::Minus] {
            let catalog = straddling_catalog(strand);
            for rec in locate(&catalog, &config(5_000)) {
                assert!(strand.is_upstream(rec.splice_acceptor(), rec.anchor()));
                assert_eq!(
                    rec.distance(),
                    rec.anchor().abs_diff(rec.splice_acceptor())
                );
            }
        }
    }

    #[test]
    fn test_annotated_subset() {
        let catalog = two_gene_catalog();
        let mut cfg = config(500);
        cfg.gene_ids = Some(vec!["B".to_string()]);
        assert_eq!(
            locate(&catalog, &cfg),
            vec![record("B", 3, 11_800, 11_200, 600)]
        );

        let mut cfg = config(500);
        cfg.canonical_only = true;
        assert!(locate(&catalog, &cfg).is_empty());
    }

    #[test]
    fn test_canonical_transcript() {
        let mut catalog = two_gene_catalog();
        catalog
            .push_transcript(
                TranscriptBuilder::new()
                    .id(4)
                    .name("T4")
                    .gene("A")
                    .chrom("1")
                    .strand(Strand::Plus)
                    .exon(Exon::new(11_950, 12_000, 1, -1, -1).unwrap())
                    .canonical(true)
                    .build()
                    .unwrap(),
            )
            .unwrap();
        let mut cfg = config(500);
        cfg.canonical_only = true;
        // the acceptor belongs to a non-canonical transcript
        assert_eq!(
            locate(&catalog, &cfg),
            vec![record("A", 4, 11_950, 11_810, 140)]
        );
    }
}
