use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use log::{debug, info, warn};
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer};

use crate::models::{Catalog, CatalogSource, Exon, Gene, Strand, TranscriptBuilder, TranscriptId};
use crate::utils::errors::ReadWriteError;

const GENE_COLUMNS: [&str; 6] = [
    "GeneId",
    "GeneName",
    "Chromosome",
    "Strand",
    "GeneStart",
    "GeneEnd",
];

const TRANSCRIPT_COLUMNS: [&str; 15] = [
    "GeneId",
    "CanonicalTranscriptId",
    "Strand",
    "TransId",
    "TransName",
    "BioType",
    "TransStart",
    "TransEnd",
    "ExonRank",
    "ExonStart",
    "ExonEnd",
    "ExonPhase",
    "ExonEndPhase",
    "CodingStart",
    "CodingEnd",
];

/// Parses the gene and transcript tables into a [`Catalog`]
///
/// # Examples
///
/// ```rust
/// use txannot::ensembl::Reader;
/// use txannot::models::CatalogSource;
///
/// let genes = "GeneId,GeneName,Chromosome,Strand,GeneStart,GeneEnd
/// ENSG01,ALPHA,1,1,100,599
/// ";
/// let transcripts = "GeneId,CanonicalTranscriptId,Strand,TransId,TransName,BioType,TransStart,TransEnd,ExonRank,ExonStart,ExonEnd,ExonPhase,ExonEndPhase,CodingStart,CodingEnd
/// ENSG01,10,1,10,ENST10,protein_coding,100,599,1,100,199,-1,0,150,599
/// ENSG01,10,1,10,ENST10,protein_coding,100,599,2,300,599,0,-1,150,599
/// ";
///
/// let mut reader = Reader::new(genes.as_bytes(), transcripts.as_bytes());
/// let catalog = reader.catalog().unwrap();
///
/// assert_eq!(catalog.len(), 1);
/// let tx = &catalog.transcripts("ENSG01")[0];
/// assert_eq!(tx.exon_count(), 2);
/// assert!(tx.is_canonical());
/// ```
pub struct Reader<G: Read, T: Read> {
    genes: G,
    transcripts: T,
}

impl Reader<File, File> {
    /// Opens the gene and transcript tables
    pub fn from_files<P: AsRef<Path>, Q: AsRef<Path>>(
        genes: P,
        transcripts: Q,
    ) -> Result<Self, ReadWriteError> {
        Ok(Self::new(
            File::open(genes.as_ref())?,
            File::open(transcripts.as_ref())?,
        ))
    }
}

impl<G: Read, T: Read> Reader<G, T> {
    pub fn new(genes: G, transcripts: T) -> Self {
        Reader { genes, transcripts }
    }

    fn read_genes(&mut self, catalog: &mut Catalog) -> Result<(), ReadWriteError> {
        for_each_row(&mut self.genes, &GENE_COLUMNS, |line, row: GeneRow| {
            let gene = Gene::new(&row.id, &row.name, &row.chrom, row.strand, row.start, row.end)
                .map_err(|err| ReadWriteError::parse(line, err.to_string()))?;
            catalog
                .push_gene(gene)
                .map_err(|err| ReadWriteError::parse(line, err.to_string()))
        })
    }

    fn read_transcripts(&mut self, catalog: &mut Catalog) -> Result<(), ReadWriteError> {
        let mut pending: Vec<PendingTranscript> = Vec::new();
        let mut by_id: HashMap<TranscriptId, usize> = HashMap::new();
        let mut unknown_genes: HashSet<String> = HashSet::new();

        for_each_row(
            &mut self.transcripts,
            &TRANSCRIPT_COLUMNS,
            |line, row: TranscriptRow| {
                let chrom = match catalog.gene(&row.gene_id) {
                    Some(gene) => gene.chrom().to_string(),
                    None => {
                        if unknown_genes.insert(row.gene_id.clone()) {
                            warn!("Skipping transcripts of unknown gene {}", row.gene_id);
                        }
                        return Ok(());
                    }
                };
                let exon = Exon::new(
                    row.exon_start,
                    row.exon_end,
                    row.exon_rank,
                    row.exon_phase,
                    row.exon_end_phase,
                )
                .map_err(|err| ReadWriteError::parse(line, err.to_string()))?;

                let idx = match by_id.get(&row.id) {
                    Some(idx) if pending[*idx].gene_id != row.gene_id => {
                        return Err(ReadWriteError::parse(
                            line,
                            format!(
                                "transcript {} is listed for {} and {}",
                                row.id, pending[*idx].gene_id, row.gene_id
                            ),
                        ));
                    }
                    Some(idx) => *idx,
                    None => {
                        pending.push(PendingTranscript {
                            builder: TranscriptBuilder::new()
                                .id(row.id)
                                .name(&row.name)
                                .gene(&row.gene_id)
                                .chrom(&chrom)
                                .strand(row.strand)
                                .bounds(row.start, row.end)
                                .coding(row.coding_start, row.coding_end)
                                .canonical(row.canonical_id == Some(row.id))
                                .biotype(&row.biotype),
                            gene_id: row.gene_id,
                            exons: Vec::new(),
                        });
                        by_id.insert(row.id, pending.len() - 1);
                        pending.len() - 1
                    }
                };
                pending[idx].exons.push(exon);
                Ok(())
            },
        )?;

        debug!("Building {} transcripts", pending.len());
        for tx in pending {
            catalog.push_transcript(tx.builder.exons(tx.exons).build()?)?;
        }
        Ok(())
    }
}

impl<G: Read, T: Read> CatalogSource for Reader<G, T> {
    fn catalog(&mut self) -> Result<Catalog, ReadWriteError> {
        let mut catalog = Catalog::new();
        self.read_genes(&mut catalog)?;
        self.read_transcripts(&mut catalog)?;
        info!(
            "Read {} genes with {} transcripts",
            catalog.len(),
            catalog.transcript_count()
        );
        Ok(catalog)
    }
}

#[derive(Debug, Deserialize)]
struct GeneRow {
    #[serde(rename = "GeneId")]
    id: String,
    #[serde(rename = "GeneName")]
    name: String,
    #[serde(rename = "Chromosome")]
    chrom: String,
    #[serde(rename = "Strand", deserialize_with = "strand")]
    strand: Strand,
    #[serde(rename = "GeneStart")]
    start: u32,
    #[serde(rename = "GeneEnd")]
    end: u32,
}

/// One exon of a transcript
#[derive(Debug, Deserialize)]
struct TranscriptRow {
    #[serde(rename = "GeneId")]
    gene_id: String,
    #[serde(rename = "CanonicalTranscriptId", deserialize_with = "nullable")]
    canonical_id: Option<TranscriptId>,
    #[serde(rename = "Strand", deserialize_with = "strand")]
    strand: Strand,
    #[serde(rename = "TransId")]
    id: TranscriptId,
    #[serde(rename = "TransName")]
    name: String,
    #[serde(rename = "BioType")]
    biotype: String,
    #[serde(rename = "TransStart")]
    start: u32,
    #[serde(rename = "TransEnd")]
    end: u32,
    #[serde(rename = "ExonRank")]
    exon_rank: u32,
    #[serde(rename = "ExonStart")]
    exon_start: u32,
    #[serde(rename = "ExonEnd")]
    exon_end: u32,
    #[serde(rename = "ExonPhase")]
    exon_phase: i8,
    #[serde(rename = "ExonEndPhase")]
    exon_end_phase: i8,
    #[serde(rename = "CodingStart", deserialize_with = "nullable")]
    coding_start: Option<u32>,
    #[serde(rename = "CodingEnd", deserialize_with = "nullable")]
    coding_end: Option<u32>,
}

/// All rows of one transcript, collected until the table is read completely
struct PendingTranscript {
    gene_id: String,
    builder: TranscriptBuilder,
    exons: Vec<Exon>,
}

/// Deserializes every row of a comma separated table with a header line
///
/// `handle` receives the line number and the parsed row.
fn for_each_row<R, T, F>(reader: R, columns: &[&str], mut handle: F) -> Result<(), ReadWriteError>
where
    R: Read,
    T: DeserializeOwned,
    F: FnMut(usize, T) -> Result<(), ReadWriteError>,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = reader.headers()?.clone();
    if let Some(missing) = columns
        .iter()
        .find(|column| !headers.iter().any(|header| header == **column))
    {
        return Err(ReadWriteError::MissingColumn(missing.to_string()));
    }

    let mut record = csv::StringRecord::new();
    while reader.read_record(&mut record)? {
        let line = record.position().map_or(0, |pos| pos.line() as usize);
        handle(line, record.deserialize(Some(&headers))?)?;
    }
    Ok(())
}

/// Accepts `1`, `-1`, `+` and `-`
fn strand<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Strand, D::Error> {
    let value = String::deserialize(deserializer)?;
    value.parse().map_err(de::Error::custom)
}

/// Missing values are empty, `NULL` or `\N`
fn nullable<'de, D, N>(deserializer: D) -> Result<Option<N>, D::Error>
where
    D: Deserializer<'de>,
    N: FromStr,
    N::Err: Display,
{
    let value = String::deserialize(deserializer)?;
    match value.as_str() {
        "" | "NULL" | "\\N" => Ok(None),
        number => number.parse().map(Some).map_err(de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::catalogs::coding_transcript;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const GENES: &str = "\
GeneId,GeneName,Chromosome,Strand,GeneStart,GeneEnd,GeneBiotype
ENSG01,ALPHA,1,1,100,599,protein_coding

ENSG02,BETA,1,-1,1000,2000,lncRNA
";

    const TRANSCRIPT_HEADER: &str = "GeneId,CanonicalTranscriptId,Strand,TransId,TransName,BioType,TransStart,TransEnd,ExonRank,ExonStart,ExonEnd,ExonPhase,ExonEndPhase,CodingStart,CodingEnd";

    const TRANSCRIPTS: &str = "\
GeneId,CanonicalTranscriptId,Strand,TransId,TransName,BioType,TransStart,TransEnd,ExonRank,ExonStart,ExonEnd,ExonPhase,ExonEndPhase,CodingStart,CodingEnd
ENSG01,10,1,10,ENST10,protein_coding,100,599,2,300,399,2,0,150,550
ENSG01,10,1,10,ENST10,protein_coding,100,599,1,100,199,-1,2,150,550
ENSG01,10,1,11,ENST11,retained_intron,100,399,1,100,399,-1,-1,NULL,NULL
ENSG99,99,1,99,ENST99,protein_coding,1,10,1,1,10,-1,-1,,
ENSG02,20,-1,20,ENST20,lncRNA,1000,2000,1,1000,1200,-1,-1,,
ENSG01,10,1,10,ENST10,protein_coding,100,599,3,500,599,0,-1,150,550
ENSG02,20,-1,20,ENST20,lncRNA,1000,2000,2,1500,2000,-1,-1,,
";

    fn read(genes: &str, transcripts: &str) -> Result<Catalog, ReadWriteError> {
        Reader::new(genes.as_bytes(), transcripts.as_bytes()).catalog()
    }

    #[test]
    fn test_read_catalog() {
        let catalog = read(GENES, TRANSCRIPTS).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.transcript_count(), 3);
        assert!(catalog.gene("ENSG99").is_none());

        let beta = catalog.gene("ENSG02").unwrap();
        assert_eq!(beta.name(), "BETA");
        assert_eq!(beta.strand(), Strand::Minus);

        let txs = catalog.transcripts("ENSG01");
        assert_eq!(txs.len(), 2);
        let expected = coding_transcript(Strand::Plus);
        assert_eq!(txs[0].name(), "ENST10");
        assert_eq!(txs[0].exons(), expected.exons());
        assert_eq!(txs[0].coding_region(), Some((150, 550)));
        assert_eq!(txs[0].biotype(), Some("protein_coding"));
        assert!(txs[0].is_canonical());

        assert_eq!(txs[1].name(), "ENST11");
        assert!(!txs[1].is_coding());
        assert!(!txs[1].is_canonical());

        let tx = &catalog.transcripts("ENSG02")[0];
        assert_eq!(tx.exon_count(), 2);
        assert_eq!(tx.five_prime(), 2000);
        assert_eq!(tx.chrom(), "1");
    }

    #[test]
    fn test_quoted_fields() {
        let genes = "\
\"GeneId\",\"GeneName\",\"Chromosome\",\"Strand\",\"GeneStart\",\"GeneEnd\"
\"ENSG01\",\"ALPHA, isoform 1\",\"1\",1,100,599
";
        let transcripts = format!(
            "{}\n\"ENSG01\",10,\"1\",10,\"ENST10\",\"protein_coding\",100,599,1,100,599,-1,-1,\"NULL\",\"\"\n",
            TRANSCRIPT_HEADER
        );
        let catalog = read(genes, &transcripts).unwrap();

        let gene = catalog.gene("ENSG01").unwrap();
        assert_eq!(gene.name(), "ALPHA, isoform 1");
        let txs = catalog.transcripts("ENSG01");
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].name(), "ENST10");
        assert!(!txs[0].is_coding());
    }

    #[test]
    fn test_missing_column() {
        let genes = "GeneId,GeneName,Strand,GeneStart,GeneEnd\nENSG01,ALPHA,1,100,599\n";
        assert!(matches!(
            read(genes, TRANSCRIPTS),
            Err(ReadWriteError::MissingColumn(col)) if col == "Chromosome"
        ));
        assert!(matches!(
            read("", TRANSCRIPTS),
            Err(ReadWriteError::MissingColumn(col)) if col == "GeneId"
        ));
    }

    #[test]
    fn test_invalid_rows() {
        let genes = "GeneId,GeneName,Chromosome,Strand,GeneStart,GeneEnd\nENSG01,ALPHA,1,0,100,599\n";
        assert!(matches!(
            read(genes, TRANSCRIPTS),
            Err(ReadWriteError::Csv(_))
        ));

        let genes = "GeneId,GeneName,Chromosome,Strand,GeneStart,GeneEnd\nENSG01,ALPHA,1,1,600,599\n";
        assert!(matches!(
            read(genes, TRANSCRIPTS),
            Err(ReadWriteError::Parse { line: 2, .. })
        ));

        let genes = "GeneId,GeneName,Chromosome,Strand,GeneStart,GeneEnd\nENSG01,ALPHA,1,1\n";
        assert!(matches!(
            read(genes, TRANSCRIPTS),
            Err(ReadWriteError::Csv(_))
        ));

        let transcripts = format!(
            "{}\nENSG01,10,1,10,ENST10,protein_coding,100,599,1,100,599,-1,-1,abc,\n",
            TRANSCRIPT_HEADER
        );
        assert!(matches!(
            read(GENES, &transcripts),
            Err(ReadWriteError::Csv(_))
        ));
    }

    #[test]
    fn test_transcript_of_two_genes() {
        let transcripts = format!(
            "{}\n{}\n{}\n",
            TRANSCRIPT_HEADER,
            "ENSG01,10,1,10,ENST10,protein_coding,100,599,1,100,199,-1,-1,,",
            "ENSG02,20,-1,10,ENST10,lncRNA,1000,2000,1,1000,1200,-1,-1,,"
        );
        assert!(matches!(
            read(GENES, &transcripts),
            Err(ReadWriteError::Parse { line: 3, .. })
        ));
    }

    #[test]
    fn test_strand_mismatch() {
        let transcripts = format!(
            "{}\nENSG02,20,1,20,ENST20,lncRNA,1000,2000,1,1000,2000,-1,-1,,\n",
            TRANSCRIPT_HEADER
        );
        assert!(matches!(
            read(GENES, &transcripts),
            Err(ReadWriteError::Annotation(_))
        ));
    }

    #[test]
    fn test_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let genes = dir.path().join("genes.csv");
        let transcripts = dir.path().join("transcripts.csv");
        File::create(&genes)
            .unwrap()
            .write_all(GENES.as_bytes())
            .unwrap();
        File::create(&transcripts)
            .unwrap()
            .write_all(TRANSCRIPTS.as_bytes())
            .unwrap();

        let catalog = Reader::from_files(&genes, &transcripts)
            .unwrap()
            .catalog()
            .unwrap();
        assert_eq!(catalog.transcript_count(), 3);

        assert!(matches!(
            Reader::from_files(dir.path().join("missing.csv"), &transcripts),
            Err(ReadWriteError::Io(_))
        ));
    }
}
