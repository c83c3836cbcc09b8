use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::debug;

use crate::fasta::{check_range, BaseSource};
use crate::models::Sequence;
use crate::utils::errors::FastaError;

/// A single line of a `.fai` index
#[derive(Debug, Clone, PartialEq, Eq)]
struct FaiEntry {
    length: u64,
    offset: u64,
    line_bases: u64,
    line_bytes: u64,
}

/// Random access reader for fasta files
///
/// The reader uses the `.fai` index next to the fasta file (`genome.fa.fai`).
/// If there is no index, it is built by scanning the file once.
///
/// The file handle is shared between threads, every lookup seeks to the
/// requested position.
///
/// # Examples
///
/// ```rust,no_run
/// use txannot::fasta::{BaseSource, FastaReader};
///
/// let reader = FastaReader::from_file("GRCh38.fa").unwrap();
/// let seq = reader.bases("chr1", 1_000_000, 1_000_099).unwrap();
/// assert_eq!(seq.len(), 100);
/// ```
#[derive(Debug)]
pub struct FastaReader {
    index: HashMap<String, FaiEntry>,
    file: Mutex<File>,
}

impl FastaReader {
    /// Opens the fasta file and loads (or builds) its index
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, FastaError> {
        let path = path.as_ref();
        let fai_path = PathBuf::from(format!("{}.fai", path.display()));
        let index = if fai_path.exists() {
            debug!("Reading fasta index {}", fai_path.display());
            read_fai(File::open(&fai_path)?)?
        } else {
            debug!("No fasta index found, scanning {}", path.display());
            build_index(File::open(path)?)?
        };
        Self::new(path, index)
    }

    /// Opens the fasta file using an explicit `.fai` index file
    pub fn from_file_with_index<P: AsRef<Path>, I: AsRef<Path>>(
        path: P,
        fai_path: I,
    ) -> Result<Self, FastaError> {
        let index = read_fai(File::open(fai_path.as_ref())?)?;
        Self::new(path.as_ref(), index)
    }

    fn new(path: &Path, index: HashMap<String, FaiEntry>) -> Result<Self, FastaError> {
        Ok(FastaReader {
            index,
            file: Mutex::new(File::open(path)?),
        })
    }

    /// Returns the length of the chromosome, if present
    pub fn length(&self, chrom: &str) -> Option<u64> {
        self.index.get(chrom).map(|entry| entry.length)
    }

    pub fn contains(&self, chrom: &str) -> bool {
        self.index.contains_key(chrom)
    }
}

impl BaseSource for FastaReader {
    fn bases(&self, chrom: &str, start: u32, end: u32) -> Result<Sequence, FastaError> {
        let entry = self
            .index
            .get(chrom)
            .ok_or_else(|| FastaError::UnknownChromosome(chrom.to_string()))?;
        check_range(chrom, start, end, entry.length)?;

        let first = start as u64 - 1;
        let len = (end - start) as u64 + 1;
        let file_offset =
            entry.offset + (first / entry.line_bases) * entry.line_bytes + first % entry.line_bases;
        // the range can span several lines, each line adds its newline bytes
        let lines = (first % entry.line_bases + len).div_ceil(entry.line_bases);
        let byte_len = len + lines * (entry.line_bytes - entry.line_bases);

        let mut buffer = Vec::with_capacity(byte_len as usize);
        {
            let mut file = self.file.lock().map_err(|_| FastaError::Poisoned)?;
            file.seek(SeekFrom::Start(file_offset))?;
            // the last line of a record may lack the newline
            file.by_ref().take(byte_len).read_to_end(&mut buffer)?;
        }

        let bases: Vec<u8> = buffer
            .into_iter()
            .filter(|b| !b.is_ascii_whitespace())
            .take(len as usize)
            .collect();
        if (bases.len() as u64) < len {
            return Err(FastaError::InvalidCoordinates {
                chrom: chrom.to_string(),
                start,
                end,
                length: entry.length,
            });
        }
        Ok(Sequence::from_raw_bytes(&bases))
    }
}

/// Parses a samtools `.fai` index
fn read_fai<R: Read>(reader: R) -> Result<HashMap<String, FaiEntry>, FastaError> {
    let mut index = HashMap::new();
    for (i, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 5 {
            return Err(FastaError::Index(format!(
                "line {} has {} columns, expected 5",
                i + 1,
                fields.len()
            )));
        }
        let number = |idx: usize| {
            fields[idx].trim().parse::<u64>().map_err(|_| {
                FastaError::Index(format!("line {}: invalid number {}", i + 1, fields[idx]))
            })
        };
        let entry = FaiEntry {
            length: number(1)?,
            offset: number(2)?,
            line_bases: number(3)?,
            line_bytes: number(4)?,
        };
        if entry.line_bases == 0 || entry.line_bytes < entry.line_bases {
            return Err(FastaError::Index(format!(
                "line {}: invalid line lengths for {}",
                i + 1,
                fields[0]
            )));
        }
        index.insert(fields[0].to_string(), entry);
    }
    Ok(index)
}

/// Builds the index by scanning through the complete fasta file
///
/// All sequence lines of a record, except the last one, must have the same length.
fn build_index<R: Read>(reader: R) -> Result<HashMap<String, FaiEntry>, FastaError> {
    let mut reader = BufReader::new(reader);
    let mut index = HashMap::new();
    let mut current: Option<(String, FaiEntry)> = None;
    let mut position = 0u64;
    let mut line = String::new();

    loop {
        line.clear();
        let bytes = reader.read_line(&mut line)? as u64;
        if bytes == 0 {
            break;
        }
        let line_start = position;
        position += bytes;

        if let Some(header) = line.strip_prefix('>') {
            if let Some((name, entry)) = current.take() {
                index.insert(name, entry);
            }
            let name = header.split_whitespace().next().unwrap_or_default();
            current = Some((
                name.to_string(),
                FaiEntry {
                    length: 0,
                    offset: position,
                    line_bases: 0,
                    line_bytes: 0,
                },
            ));
        } else if let Some((_, entry)) = current.as_mut() {
            let bases = line.trim_end().len() as u64;
            if bases == 0 {
                continue;
            }
            if entry.line_bases == 0 {
                entry.offset = line_start;
                entry.line_bases = bases;
                entry.line_bytes = bytes;
            }
            entry.length += bases;
        }
    }
    if let Some((name, entry)) = current {
        index.insert(name, entry);
    }
    Ok(index)
}
