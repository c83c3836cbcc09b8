use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::splice::SpliceAcceptor;
use crate::utils::errors::ReadWriteError;

const HEADER: &str = "GeneId\tTransId\tTransName\tPosition\tPreSpliceAcceptorPosition\tDistance";

/// Writes [`SpliceAcceptor`] records as tab separated lines into a `BufWriter`
///
/// # Examples
///
/// ```rust
/// use txannot::config::DeriveConfig;
/// use txannot::splice::{locate, Writer};
/// use txannot::tests::catalogs::two_gene_catalog;
///
/// let config = DeriveConfig {
///     promoter_distance: 500,
///     ..Default::default()
/// };
/// let records = locate(&two_gene_catalog(), &config);
///
/// let output = Vec::new(); // substitute this with proper IO (io::stdout())
/// let mut writer = Writer::new(output);
/// writer.write_records(&records).unwrap();
///
/// assert_eq!(
///     writer.into_inner().unwrap(), // this is our actual output
///     b"GeneId\tTransId\tTransName\tPosition\tPreSpliceAcceptorPosition\tDistance
/// A\t1\tT1\t12000\t11810\t190
/// B\t3\tT3\t11800\t11200\t600
/// "
/// );
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
    ///
    /// Use this method when you want to write to stdout or
    /// a remote source, e.g. via HTTP
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

    /// Writes the header line, unless it was written before
    pub fn write_header(&mut self) -> Result<(), ReadWriteError> {
        if self.header_written {
            return Ok(());
        }
        self.inner.write_all(HEADER.as_bytes())?;
        self.inner.write_all(b"\n")?;
        self.header_written = true;
        Ok(())
    }

    /// Writes a single record, followed by a newline
    pub fn write_record(&mut self, record: &SpliceAcceptor) -> Result<(), ReadWriteError> {
        self.write_header()?;
        writeln!(
            self.inner,
            "{}\t{}\t{}\t{}\t{}\t{}",
            record.gene_id(),
            record.transcript_id(),
            record.transcript_name(),
            record.anchor(),
            record.splice_acceptor(),
            record.distance()
        )?;
        Ok(())
    }

    pub fn write_records(&mut self, records: &[SpliceAcceptor]) -> Result<(), ReadWriteError> {
        self.write_header()?;
        for record in records {
            self.write_record(record)?;
        }
        Ok(())
    }
}
