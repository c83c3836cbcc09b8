use std::fmt;

use crate::models::sequence::Nucleotide;
use crate::models::{AminoAcid, Sequence};
use crate::utils::errors::AnnotationError;

/// The standard genetic code in NCBI ordering
const STANDARD_CODE: &str = "FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG";

/// The genetic code lookup table is an Array with 64 amino acids
/// The lookup occurs through defined calculations:
/// T => positions 0-15
/// C => posisions 16-31
/// A => positions 32-47
/// G => positions 48-63
/// https://www.ncbi.nlm.nih.gov/IEB/ToolBox/SDKDOCS/SEQFEAT.HTML
type GeneticCodeLookup = [AminoAcid; 64];

/// The genetic code is a lookup table from DNA codons to AminoAcids
///
/// # Examples
/// ```
/// use txannot::models::{AminoAcid, GeneticCode, Nucleotide};
/// let code = GeneticCode::default();
/// assert_eq!(
///     code.translate(&[Nucleotide::A, Nucleotide::T, Nucleotide::G]),
///     AminoAcid::M
/// );
/// assert_eq!(
///     code.translate(&[Nucleotide::A, Nucleotide::N, Nucleotide::G]),
///     AminoAcid::X
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneticCode {
    code: GeneticCodeLookup,
}

impl Default for GeneticCode {
    /// Crates the [standard genetic code](https://en.wikipedia.org/wiki/DNA_codon_table)
    fn default() -> GeneticCode {
        let mut code = [AminoAcid::X; 64];
        for (slot, letter) in code.iter_mut().zip(STANDARD_CODE.chars()) {
            // the standard table contains only valid single letter codes
            *slot = AminoAcid::try_from(letter).unwrap_or(AminoAcid::X);
        }
        GeneticCode { code }
    }
}

impl fmt::Display for GeneticCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            self.code
                .iter()
                .map(|aa| aa.single_letter())
                .collect::<String>()
        )
    }
}

impl GeneticCode {
    /// Creates a new, custom genetic code
    ///
    /// The aa_table must be the amino acid translation for each possible codon, in the same order
    /// as the [NCBI genetic code tables](https://www.ncbi.nlm.nih.gov/IEB/ToolBox/C_DOC/lxr/source/data/gc.prt)
    ///
    /// # Examples
    /// ```
    /// use txannot::models::{AminoAcid, GeneticCode, Nucleotide};
    /// // the vertebrate mitochondrial code
    /// let code = GeneticCode::new("FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNKKSS**VVVVAAAADDEEGGGG").unwrap();
    /// assert_eq!(
    ///     code.translate(&[Nucleotide::A, Nucleotide::G, Nucleotide::A]),
    ///     AminoAcid::Ter
    /// );
    /// ```
    pub fn new(aa_table: &str) -> Result<GeneticCode, AnnotationError> {
        if aa_table.chars().count() != 64 {
            return Err(AnnotationError::new(
                "aa_table has wrong length. 64 amino acids are required",
            ));
        }
        let mut code = [AminoAcid::X; 64];
        for (slot, letter) in code.iter_mut().zip(aa_table.chars()) {
            *slot = match AminoAcid::try_from(letter)? {
                AminoAcid::X => {
                    return Err(AnnotationError::new("X is not allowed in a genetic code"))
                }
                aa => aa,
            };
        }
        Ok(GeneticCode { code })
    }

    /// Translates a codon into an AminoAcid
    ///
    /// Codons with an `N` nucleotide translate to [`AminoAcid::X`]
    pub fn translate(&self, codon: &[Nucleotide; 3]) -> AminoAcid {
        match (
            codon[0].as_ncbi_int(),
            codon[1].as_ncbi_int(),
            codon[2].as_ncbi_int(),
        ) {
            (Some(first), Some(second), Some(third)) => self.code[first * 16 + second * 4 + third],
            _ => AminoAcid::X,
        }
    }

    /// Translates an in-frame coding sequence up to the first stop codon
    ///
    /// Translation starts at the first nucleotide, the sequence is not searched
    /// for a start codon. The stop codon is not part of the result and trailing
    /// nucleotides that do not form a complete codon are ignored.
    ///
    /// # Examples
    /// ```
    /// use txannot::models::{GeneticCode, Sequence};
    ///
    /// let code = GeneticCode::default();
    /// let peptide = code.translate_sequence(&Sequence::from_raw_bytes(b"ATGGCNTAAGGG"));
    /// let letters: String = peptide.iter().map(|aa| aa.single_letter()).collect();
    /// assert_eq!(letters, "MX");
    /// ```
    pub fn translate_sequence(&self, seq: &Sequence) -> Vec<AminoAcid> {
        seq.codons()
            .map(|codon| self.translate(&codon))
            .take_while(|aa| !aa.is_stop())
            .collect()
    }

    /// Returns true if the provided codon is a stop codon
    pub fn is_stop_codon(&self, codon: &[Nucleotide; 3]) -> bool {
        self.translate(codon).is_stop()
    }
}
