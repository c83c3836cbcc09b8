use serde::{Deserialize, Serialize};

use crate::models::Strand;
use crate::utils::errors::AnnotationError;

/// Phase value of an exon boundary that is not part of the coding sequence
pub const NON_CODING_PHASE: i8 = -1;

/// A single exon of a transcript
///
/// Coordinates are 1-based and inclusive. The `rank` increases with the
/// genomic position, i.e. rank 1 is always the leftmost exon, even for
/// transcripts on the minus strand.
///
/// `phase` is the reading frame phase when entering the exon and `end_phase`
/// the phase when leaving it. Both are `-1` if the respective boundary is not
/// coding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exon {
    start: u32,
    end: u32,
    rank: u32,
    phase: i8,
    end_phase: i8,
}

impl Exon {
    /// Creates a new Exon
    ///
    /// # Examples
    ///
    /// ```rust
    /// use txannot::models::Exon;
    ///
    /// let exon = Exon::new(100, 199, 1, -1, 0).unwrap();
    /// assert_eq!(exon.len(), 100);
    ///
    /// assert!(Exon::new(200, 199, 1, -1, 0).is_err());
    /// assert!(Exon::new(100, 199, 1, 3, 0).is_err());
    /// ```
    pub fn new(
        start: u32,
        end: u32,
        rank: u32,
        phase: i8,
        end_phase: i8,
    ) -> Result<Self, AnnotationError> {
        if start > end {
            return Err(AnnotationError::new(format!(
                "exon start {} is larger than its end {}",
                start, end
            )));
        }
        for p in [phase, end_phase] {
            if !(NON_CODING_PHASE..=2).contains(&p) {
                return Err(AnnotationError::new(format!("invalid exon phase {}", p)));
            }
        }
        Ok(Exon {
            start,
            end,
            rank,
            phase,
            end_phase,
        })
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    pub fn rank(&self) -> u32 {
        self.rank
    }

    pub fn phase(&self) -> i8 {
        self.phase
    }

    pub fn end_phase(&self) -> i8 {
        self.end_phase
    }

    pub fn len(&self) -> u32 {
        self.end - self.start + 1
    }

    /// Always `false`, an exon covers at least one base
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of bases to skip at the start of the coding sequence so that
    /// it begins on a codon boundary
    ///
    /// `coding_boundary` is the position at which the coding sequence enters
    /// this exon (the clipped 5' end of the first coding exon). The offset is
    /// only non-zero if the coding sequence enters at the exon's 5' edge and
    /// the exon carries a phase of 1 or 2, i.e. the first codon is split with
    /// an upstream exon that is not part of the annotated CDS. In that case the
    /// remaining `(3 - phase) % 3` bases of the split codon are skipped.
    ///
    /// The offset never exceeds the number of coding bases in this exon.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use txannot::models::{Exon, Strand};
    ///
    /// let exon = Exon::new(100, 199, 2, 1, 0).unwrap();
    /// assert_eq!(exon.codon_offset(&Strand::Plus, 100), 2);
    /// // the coding sequence starts within the exon, the phase does not apply
    /// assert_eq!(exon.codon_offset(&Strand::Plus, 150), 0);
    /// // on the minus strand the 5' edge is the exon end
    /// assert_eq!(exon.codon_offset(&Strand::Minus, 199), 2);
    /// ```
    pub fn codon_offset(&self, strand: &Strand, coding_boundary: u32) -> u32 {
        if coding_boundary != strand.five_prime_edge(self) || self.phase <= 0 {
            return 0;
        }
        let offset = ((3 - self.phase) % 3) as u32;
        let coding_bases = match strand {
            Strand::Plus => self.end - coding_boundary + 1,
            Strand::Minus => coding_boundary - self.start + 1,
        };
        offset.min(coding_bases - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codon_offset_phases() {
        let ex0 = Exon::new(100, 199, 2, 0, 0).unwrap();
        let ex1 = Exon::new(100, 199, 2, 1, 0).unwrap();
        let ex2 = Exon::new(100, 199, 2, 2, 0).unwrap();
        let nc = Exon::new(100, 199, 2, -1, 0).unwrap();

        assert_eq!(ex0.codon_offset(&Strand::Plus, 100), 0);
        assert_eq!(ex1.codon_offset(&Strand::Plus, 100), 2);
        assert_eq!(ex2.codon_offset(&Strand::Plus, 100), 1);
        assert_eq!(nc.codon_offset(&Strand::Plus, 100), 0);
    }

    #[test]
    fn test_codon_offset_minus_strand() {
        let ex = Exon::new(100, 199, 2, 2, 0).unwrap();
        assert_eq!(ex.codon_offset(&Strand::Minus, 199), 1);
        assert_eq!(ex.codon_offset(&Strand::Minus, 100), 0);
        assert_eq!(ex.codon_offset(&Strand::Minus, 150), 0);
    }

    #[test]
    fn test_codon_offset_tiny_exon() {
        let ex = Exon::new(100, 100, 2, 1, -1).unwrap();
        assert_eq!(ex.codon_offset(&Strand::Plus, 100), 0);

        let ex = Exon::new(100, 101, 2, 1, -1).unwrap();
        assert_eq!(ex.codon_offset(&Strand::Plus, 100), 1);
    }
}
