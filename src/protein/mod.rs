//! Canonical protein sequences of coding transcripts
//!
//! The coding exons of a transcript are stitched together into a
//! frame-continuous sense strand sequence ([`coding_sequence`]), which is
//! then translated up to the first stop codon ([`translate`]).
//!
//! [`derive_proteins`] runs both steps for every coding transcript of a
//! catalog. Reference lookups can fail for single transcripts (e.g. a missing
//! chromosome in the fasta file), so the result contains one `Result` per
//! transcript and the caller decides whether to skip or abort.

mod cds;
mod translate;
mod writer;

use log::{debug, info};
use rayon::prelude::*;
use serde::Serialize;

use crate::config::DeriveConfig;
use crate::fasta::BaseSource;
use crate::models::{Catalog, Gene, GeneticCode, Transcript};
use crate::utils::errors::ProteinError;

pub use crate::protein::cds::coding_sequence;
pub use crate::protein::translate::{translate, translate_sequence};
pub use crate::protein::writer::Writer;

/// The amino acid sequence of a coding transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProteinRecord {
    gene_id: String,
    gene_name: String,
    transcript_name: String,
    canonical: bool,
    amino_acids: String,
}

impl ProteinRecord {
    pub fn gene_id(&self) -> &str {
        &self.gene_id
    }

    pub fn gene_name(&self) -> &str {
        &self.gene_name
    }

    pub fn transcript_name(&self) -> &str {
        &self.transcript_name
    }

    pub fn is_canonical(&self) -> bool {
        self.canonical
    }

    /// The single-letter amino acids, without the stop codon
    pub fn amino_acids(&self) -> &str {
        &self.amino_acids
    }
}

/// Assembles and translates the coding sequence of a single transcript
///
/// Non-coding transcripts return `Ok(None)`.
///
/// # Examples
///
/// ```rust
/// use txannot::models::{GeneticCode, Strand};
/// use txannot::protein::protein;
/// use txannot::tests::catalogs::{coding_reference, coding_transcript, gene};
///
/// let record = protein(
///     &gene("G", Strand::Plus, 100, 599),
///     &coding_transcript(Strand::Plus),
///     &coding_reference(),
///     &GeneticCode::default(),
/// )
/// .unwrap()
/// .unwrap();
///
/// assert_eq!(record.transcript_name(), "ENST10");
/// assert!(record.amino_acids().starts_with("MKKK"));
/// assert_eq!(record.amino_acids().len(), 66);
/// ```
pub fn protein<S: BaseSource + ?Sized>(
    gene: &Gene,
    transcript: &Transcript,
    source: &S,
    code: &GeneticCode,
) -> Result<Option<ProteinRecord>, ProteinError> {
    let seq = coding_sequence(transcript, source).map_err(|err| ProteinError {
        transcript: transcript.name().to_string(),
        source: err,
    })?;
    Ok(seq.map(|seq| ProteinRecord {
        gene_id: gene.id().to_string(),
        gene_name: gene.name().to_string(),
        transcript_name: transcript.name().to_string(),
        canonical: transcript.is_canonical(),
        amino_acids: translate_sequence(code, &seq),
    }))
}

/// Derives the protein sequence of every coding transcript in the catalog
///
/// Transcripts are processed in parallel, the results are returned in
/// catalog order.
pub fn derive_proteins<S: BaseSource + ?Sized>(
    catalog: &Catalog,
    source: &S,
    config: &DeriveConfig,
) -> Vec<Result<ProteinRecord, ProteinError>> {
    let code = GeneticCode::default();
    let transcripts: Vec<(&Gene, &Transcript)> = catalog
        .all_transcripts()
        .filter(|(gene, tx)| {
            tx.is_coding() && config.includes_gene(gene) && config.includes_transcript(tx)
        })
        .collect();
    debug!("Translating {} coding transcripts", transcripts.len());

    let results: Vec<Result<ProteinRecord, ProteinError>> = transcripts
        .par_iter()
        .filter_map(|(gene, tx)| protein(gene, tx, source, &code).transpose())
        .collect();
    info!(
        "Translated {} of {} coding transcripts",
        results.iter().filter(|res| res.is_ok()).count(),
        transcripts.len()
    );
    results
}
