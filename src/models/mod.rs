//! The data model: genes, transcripts, exons and the catalog holding them,
//! plus nucleotide and amino acid sequences.

mod aminoacid;
mod catalog;
mod exon;
mod gene;
mod genetic_code;
mod sequence;
mod strand;
mod transcript;

pub use crate::models::aminoacid::AminoAcid;
pub use crate::models::catalog::{Catalog, CatalogSource};
pub use crate::models::exon::{Exon, NON_CODING_PHASE};
pub use crate::models::gene::Gene;
pub use crate::models::genetic_code::GeneticCode;
pub use crate::models::sequence::{Nucleotide, Sequence};
pub use crate::models::strand::{ExonIter, Strand};
pub use crate::models::transcript::{Transcript, TranscriptBuilder, TranscriptId};
