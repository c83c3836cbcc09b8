use core::str::FromStr;
use std::fmt;
use std::iter::Rev;
use std::slice::Iter;

use serde::{Deserialize, Serialize};

use crate::models::{Exon, Sequence};
use crate::utils::errors::AnnotationError;

/// The strand of a gene or transcript
///
/// Besides naming the strand, `Strand` knows how genomic coordinates
/// translate into transcript orientation: which exon comes first, which exon
/// boundary is the 5' end and what "upstream" means. The splice acceptor
/// search and the coding sequence assembly only use these methods and
/// never branch on the strand themselves.
///
/// # Examples
///
/// ```rust
/// use txannot::models::Strand;
///
/// let strand: Strand = "-1".parse().unwrap();
/// assert_eq!(strand, Strand::Minus);
/// assert_eq!(strand.to_string(), "-");
///
/// // upstream on the minus strand means higher coordinates
/// assert!(strand.is_upstream(120, 100));
/// assert!(!Strand::Plus.is_upstream(120, 100));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strand {
    Plus,
    Minus,
}

impl Strand {
    /// Returns the 5' end of the closed interval `[start, end]`
    pub fn five_prime(&self, start: u32, end: u32) -> u32 {
        match self {
            Strand::Plus => start,
            Strand::Minus => end,
        }
    }

    /// Returns the 5' boundary of the exon.
    ///
    /// For every exon that is not the first exon of a transcript,
    /// this is the position of its splice acceptor
    pub fn five_prime_edge(&self, exon: &Exon) -> u32 {
        self.five_prime(exon.start(), exon.end())
    }

    /// Extends the interval `[start, end]` upstream by `distance` bases
    ///
    /// The extension stops at position 0, it never wraps around.
    ///
    /// ```rust
    /// use txannot::models::Strand;
    ///
    /// assert_eq!(Strand::Plus.upstream_window(1000, 2000, 500), (500, 2000));
    /// assert_eq!(Strand::Minus.upstream_window(1000, 2000, 500), (1000, 2500));
    /// assert_eq!(Strand::Plus.upstream_window(100, 2000, 500), (0, 2000));
    /// ```
    pub fn upstream_window(&self, start: u32, end: u32, distance: u32) -> (u32, u32) {
        match self {
            Strand::Plus => (start.saturating_sub(distance), end),
            Strand::Minus => (start, end.saturating_add(distance)),
        }
    }

    /// Returns `true` if `position` lies strictly upstream of `anchor`
    pub fn is_upstream(&self, position: u32, anchor: u32) -> bool {
        match self {
            Strand::Plus => position < anchor,
            Strand::Minus => position > anchor,
        }
    }

    /// Of two upstream positions, returns the one closer to the anchor
    pub fn nearest(&self, a: u32, b: u32) -> u32 {
        match self {
            Strand::Plus => a.max(b),
            Strand::Minus => a.min(b),
        }
    }

    /// Number of bases from `position` downstream to `anchor`
    ///
    /// `position` must be upstream of (or equal to) `anchor`
    pub fn distance(&self, anchor: u32, position: u32) -> u32 {
        match self {
            Strand::Plus => anchor - position,
            Strand::Minus => position - anchor,
        }
    }

    /// Iterates the (genomically ascending) exons in 5' to 3' order
    pub fn exons_5_to_3<'a>(&self, exons: &'a [Exon]) -> ExonIter<'a> {
        match self {
            Strand::Plus => ExonIter::Forward(exons.iter()),
            Strand::Minus => ExonIter::Reverse(exons.iter().rev()),
        }
    }

    /// Returns `true` if the exon lies entirely 5' of the region `[start, end]`
    pub fn precedes(&self, exon: &Exon, start: u32, end: u32) -> bool {
        match self {
            Strand::Plus => exon.end() < start,
            Strand::Minus => exon.start() > end,
        }
    }

    /// Returns `true` if the exon lies entirely 3' of the region `[start, end]`
    pub fn follows(&self, exon: &Exon, start: u32, end: u32) -> bool {
        match self {
            Strand::Plus => exon.start() > end,
            Strand::Minus => exon.end() < start,
        }
    }

    /// Moves the 5' boundary of `[start, end]` inwards by `offset` bases
    pub fn trim_five_prime(&self, start: u32, end: u32, offset: u32) -> (u32, u32) {
        match self {
            Strand::Plus => (start + offset, end),
            Strand::Minus => (start, end - offset),
        }
    }

    /// Adds the bases of the next exon (in 5' to 3' order) to `seq`
    ///
    /// `seq` stays in genomic orientation, so minus strand exons are added
    /// to the front. Use [`Strand::to_sense`] once all exons are added.
    pub fn extend_5_to_3(&self, seq: &mut Sequence, bases: Sequence) {
        match self {
            Strand::Plus => seq.append(bases),
            Strand::Minus => seq.prepend(bases),
        }
    }

    /// Converts a forward strand sequence into the sense sequence of this strand
    pub fn to_sense(&self, seq: &mut Sequence) {
        if let Strand::Minus = self {
            seq.reverse_complement()
        }
    }
}

/// Iterator over exons in transcript orientation, see [`Strand::exons_5_to_3`]
pub enum ExonIter<'a> {
    Forward(Iter<'a, Exon>),
    Reverse(Rev<Iter<'a, Exon>>),
}

impl<'a> Iterator for ExonIter<'a> {
    type Item = &'a Exon;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            ExonIter::Forward(it) => it.next(),
            ExonIter::Reverse(it) => it.next(),
        }
    }
}

impl FromStr for Strand {
    type Err = AnnotationError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "+" | "1" | "+1" => Ok(Strand::Plus),
            "-" | "-1" => Ok(Strand::Minus),
            _ => Err(AnnotationError::new(format!("invalid strand {}", s))),
        }
    }
}

impl TryFrom<i8> for Strand {
    type Error = AnnotationError;
    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Strand::Plus),
            -1 => Ok(Strand::Minus),
            _ => Err(AnnotationError::new(format!("invalid strand {}", value))),
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Strand::Plus => "+",
                Strand::Minus => "-",
            }
        )
    }
}
