//! Read a [`Catalog`](`crate::models::Catalog`) from flat Ensembl exports
//!
//! The catalog is built from two comma separated tables, both with a header
//! line. Columns are identified by their header name and may appear in any
//! order. Additional columns are ignored. Fields may be quoted and surrounding
//! whitespace is trimmed.
//!
//! The gene table contains one row per gene:
//!
//! ```text
//! GeneId,GeneName,Chromosome,Strand,GeneStart,GeneEnd
//! ENSG00000157764,BRAF,7,-1,140719327,140924929
//! ```
//!
//! The transcript table contains one row per exon:
//!
//! ```text
//! GeneId,CanonicalTranscriptId,Strand,TransId,TransName,BioType,TransStart,TransEnd,ExonRank,ExonStart,ExonEnd,ExonPhase,ExonEndPhase,CodingStart,CodingEnd
//! ```
//!
//! `CodingStart` and `CodingEnd` are `NULL`, `\N` or empty for non-coding
//! transcripts. A transcript is canonical if its `TransId` is the
//! `CanonicalTranscriptId` of its gene. A `TransId` must not appear under
//! more than one gene.

mod reader;

pub use crate::ensembl::reader::Reader;
