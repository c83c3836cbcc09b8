use core::str::FromStr;
use std::collections::VecDeque;
use std::fmt;

use crate::utils::errors::AnnotationError;

/// Nucleotide is a single DNA nucleotide (A C G T N)
///
/// All IUPAC ambiguity codes of a reference genome are treated as `N`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Nucleotide {
    A,
    C,
    G,
    T,
    N,
}

impl Nucleotide {
    /// Crates a `Nucleotide` from a character
    pub fn new(c: &char) -> Result<Self, AnnotationError> {
        match c {
            'a' | 'A' => Ok(Self::A),
            'c' | 'C' => Ok(Self::C),
            'g' | 'G' => Ok(Self::G),
            't' | 'T' => Ok(Self::T),
            'n' | 'N' => Ok(Self::N),
            _ => Err(AnnotationError::new(format!("Invalid nucleotide {}", c))),
        }
    }

    /// Creates a `Nucleotide` from a single byte of a reference genome
    ///
    /// Returns `None` for whitespace, every other unknown letter is `N`.
    pub fn from_reference_byte(b: u8) -> Option<Self> {
        match b {
            b'a' | b'A' => Some(Self::A),
            b'c' | b'C' => Some(Self::C),
            b'g' | b'G' => Some(Self::G),
            b't' | b'T' => Some(Self::T),
            b'\n' | b'\r' | b' ' | b'\t' => None,
            _ => Some(Self::N),
        }
    }

    /// Returns the complementary nucleotide
    pub fn complement(&self) -> Self {
        match self {
            Self::A => Self::T,
            Self::C => Self::G,
            Self::G => Self::C,
            Self::T => Self::A,
            Self::N => Self::N,
        }
    }

    /// Position of the nucleotide in the NCBI codon table ordering (`TCAG`)
    ///
    /// `N` has no position
    pub fn as_ncbi_int(&self) -> Option<usize> {
        match self {
            Self::T => Some(0),
            Self::C => Some(1),
            Self::A => Some(2),
            Self::G => Some(3),
            Self::N => None,
        }
    }
}

impl FromStr for Nucleotide {
    type Err = AnnotationError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::new(&c),
            _ => Err(AnnotationError::new(format!("Invalid nucleotide {}", s))),
        }
    }
}

impl From<&Nucleotide> for char {
    fn from(n: &Nucleotide) -> Self {
        match n {
            Nucleotide::A => 'A',
            Nucleotide::C => 'C',
            Nucleotide::G => 'G',
            Nucleotide::T => 'T',
            Nucleotide::N => 'N',
        }
    }
}

impl fmt::Display for Nucleotide {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", char::from(self))
    }
}

/// A DNA sequence consisting of Nucleotides.
///
/// Sequences grow at both ends, which allows collecting exons of minus-strand
/// transcripts in transcription order. See
/// [`reverse_complement`](`Sequence::reverse_complement`)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sequence {
    sequence: VecDeque<Nucleotide>,
}

impl FromStr for Sequence {
    type Err = AnnotationError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut sequence = Sequence::with_capacity(s.len());
        for c in s.chars() {
            sequence.push(Nucleotide::new(&c)?)
        }
        Ok(sequence)
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s: String = self.sequence.iter().map(char::from).collect();
        write!(f, "{}", s)
    }
}

impl Sequence {
    /// Creates a new sequence
    ///
    /// # Examples
    ///
    /// ```rust
    /// use txannot::models::Sequence;
    ///
    /// let seq = Sequence::new();
    /// assert_eq!(seq.len(), 0)
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new, empty sequence with an initial buffer for
    /// `capacity` Nucleotides
    pub fn with_capacity(capacity: usize) -> Self {
        Sequence {
            sequence: VecDeque::with_capacity(capacity),
        }
    }

    /// Creates a new `Sequence` from raw reference genome bytes, ignoring newlines
    ///
    /// # Examples
    ///
    /// ```rust
    /// use txannot::models::Sequence;
    ///
    /// let seq = Sequence::from_raw_bytes("A\nC\r\nGt".as_bytes());
    /// assert_eq!(seq.to_string(), "ACGT");
    ///
    /// // ambiguity codes become N
    /// let seq = Sequence::from_raw_bytes(b"ARY");
    /// assert_eq!(seq.to_string(), "ANN");
    /// ```
    pub fn from_raw_bytes(bytes: &[u8]) -> Self {
        let mut seq = Self::with_capacity(bytes.len());
        for b in bytes {
            if let Some(n) = Nucleotide::from_reference_byte(*b) {
                seq.push(n)
            }
        }
        seq
    }

    /// Returns the length of the Sequence
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Returns true if the Sequence contains no Nucleotides.
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Appends a Nucleotide to the back of the sequence
    pub fn push(&mut self, n: Nucleotide) {
        self.sequence.push_back(n);
    }

    /// Moves all the nucleotides of `other` to the end of `Self`
    ///
    /// # Examples
    /// ```rust
    /// use txannot::models::Sequence;
    ///
    /// let mut seq = Sequence::from_raw_bytes(b"AC");
    /// seq.append(Sequence::from_raw_bytes(b"GT"));
    /// assert_eq!(seq.to_string(), "ACGT");
    /// ```
    pub fn append(&mut self, other: Sequence) {
        self.sequence.extend(other.sequence)
    }

    /// Moves all the nucleotides of `other` to the front of `Self`
    ///
    /// # Examples
    /// ```rust
    /// use txannot::models::Sequence;
    ///
    /// let mut seq = Sequence::from_raw_bytes(b"AC");
    /// seq.prepend(Sequence::from_raw_bytes(b"GT"));
    /// assert_eq!(seq.to_string(), "GTAC");
    /// ```
    pub fn prepend(&mut self, other: Sequence) {
        for n in other.sequence.into_iter().rev() {
            self.sequence.push_front(n)
        }
    }

    /// Changes `Self` to the complementary sequence
    pub fn complement(&mut self) {
        for n in self.sequence.iter_mut() {
            *n = n.complement();
        }
    }

    /// Reverses the `Sequence`, in place
    pub fn reverse(&mut self) {
        self.sequence.make_contiguous().reverse()
    }

    /// Changes `Self` into the reverse complement sequence
    ///
    /// # Examples
    /// ```rust
    /// use txannot::models::Sequence;
    ///
    /// let mut seq = Sequence::from_raw_bytes(b"AACG");
    /// seq.reverse_complement();
    /// assert_eq!(seq.to_string(), "CGTT");
    /// ```
    pub fn reverse_complement(&mut self) {
        self.reverse();
        self.complement();
    }

    /// Returns an iterator over complete codons, starting at the first nucleotide
    ///
    /// Trailing nucleotides that do not form a complete codon are skipped.
    ///
    /// # Examples
    /// ```rust
    /// use txannot::models::{Nucleotide, Sequence};
    ///
    /// let seq = Sequence::from_raw_bytes(b"ATGCTAG");
    /// let codons: Vec<[Nucleotide; 3]> = seq.codons().collect();
    /// assert_eq!(codons.len(), 2);
    /// assert_eq!(codons[0], [Nucleotide::A, Nucleotide::T, Nucleotide::G]);
    /// ```
    pub fn codons(&self) -> impl Iterator<Item = [Nucleotide; 3]> + '_ {
        let (front, back) = self.sequence.as_slices();
        let mut iter = front.iter().chain(back.iter()).copied();
        std::iter::from_fn(move || match (iter.next(), iter.next(), iter.next()) {
            (Some(a), Some(b), Some(c)) => Some([a, b, c]),
            _ => None,
        })
    }

    /// Returns the Sequence as a byte array of UTF-8 encoded nucleotides
    pub fn to_bytes(&self) -> Vec<u8> {
        self.sequence.iter().map(|n| char::from(n) as u8).collect()
    }
}
