use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::protein::ProteinRecord;
use crate::utils::errors::ReadWriteError;

const HEADER: &str = "GeneId\tGeneName\tTransName\tCanonical\tAminoAcids";

/// Writes [`ProteinRecord`]s as tab separated lines into a `BufWriter`
///
/// # Examples
///
/// ```rust
/// use txannot::config::DeriveConfig;
/// use txannot::models::{Catalog, Strand};
/// use txannot::protein::{derive_proteins, Writer};
/// use txannot::tests::catalogs::{coding_reference, coding_transcript, gene};
///
/// let mut catalog = Catalog::new();
/// catalog.push_gene(gene("G", Strand::Plus, 100, 599)).unwrap();
/// catalog.push_transcript(coding_transcript(Strand::Plus)).unwrap();
///
/// let records: Vec<_> = derive_proteins(&catalog, &coding_reference(), &DeriveConfig::default())
///     .into_iter()
///     .collect::<Result<_, _>>()
///     .unwrap();
///
/// let mut writer = Writer::new(Vec::new());
/// writer.write_records(&records).unwrap();
///
/// let output = String::from_utf8(writer.into_inner().unwrap()).unwrap();
/// let lines: Vec<&str> = output.lines().collect();
/// assert_eq!(lines[0], "GeneId\tGeneName\tTransName\tCanonical\tAminoAcids");
/// assert!(lines[1].starts_with("G\tG\tENST10\ttrue\tMKKK"));
/// ```
pub struct Writer<W: std::io::Write> {
    inner: BufWriter<W>,
    header_written: bool,
}

impl Writer<File> {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ReadWriteError> {
        Ok(Self::new(File::create(path.as_ref())?))
    }
}

impl<W: std::io::Write> Writer<W> {
    /// Creates a new generic Writer for any `std::io::Write` object
    pub fn new(writer: W) -> Self {
        Writer {
            inner: BufWriter::new(writer),
            header_written: false,
        }
    }

    pub fn with_capacity(capacity: usize, writer: W) -> Self {
        Writer {
            inner: BufWriter::with_capacity(capacity, writer),
            header_written: false,
        }
    }

    pub fn flush(&mut self) -> Result<(), ReadWriteError> {
        Ok(self.inner.flush()?)
    }

    pub fn into_inner(self) -> Result<W, ReadWriteError> {
        self.inner
            .into_inner()
            .map_err(|err| ReadWriteError::Io(err.into_error()))
    }

    pub fn write_header(&mut self) -> Result<(), ReadWriteError> {
        if self.header_written {
            return Ok(());
        }
        self.inner.write_all(HEADER.as_bytes())?;
        self.inner.write_all(b"\n")?;
        self.header_written = true;
        Ok(())
    }

    pub fn write_record(&mut self, record: &ProteinRecord) -> Result<(), ReadWriteError> {
        self.write_header()?;
        writeln!(
            self.inner,
            "{}\t{}\t{}\t{}\t{}",
            record.gene_id(),
            record.gene_name(),
            record.transcript_name(),
            record.is_canonical(),
            record.amino_acids()
        )?;
        Ok(())
    }

    pub fn write_records(&mut self, records: &[ProteinRecord]) -> Result<(), ReadWriteError> {
        self.write_header()?;
        for record in records {
            self.write_record(record)?;
        }
        Ok(())
    }
}
