use crate::models::{GeneticCode, Nucleotide, Sequence};

/// Translates a coding sequence into single-letter amino acids
///
/// Translation starts at the first base and stops at the first stop codon,
/// which is not part of the result. Incomplete trailing codons are ignored.
/// Codons with any base other than `A`, `C`, `G` or `T` translate to `X`.
///
/// # Examples
///
/// ```rust
/// use txannot::protein::translate;
///
/// assert_eq!(translate("ATGGCCTGA"), "MA");
/// assert_eq!(translate("ATGNNNAAATAGCCC"), "MXK");
/// assert_eq!(translate("ATGGC"), "M");
/// ```
pub fn translate(bases: &str) -> String {
    let code = GeneticCode::default();
    bases
        .as_bytes()
        .chunks_exact(3)
        .map(|codon| code.translate(&[base(codon[0]), base(codon[1]), base(codon[2])]))
        .take_while(|aa| !aa.is_stop())
        .map(|aa| aa.single_letter())
        .collect()
}

/// Translates a [`Sequence`] with the provided genetic code
///
/// Follows the same rules as [`translate`].
pub fn translate_sequence(code: &GeneticCode, seq: &Sequence) -> String {
    code.translate_sequence(seq)
        .iter()
        .map(|aa| aa.single_letter())
        .collect()
}

fn base(b: u8) -> Nucleotide {
    match b {
        b'A' | b'a' => Nucleotide::A,
        b'C' | b'c' => Nucleotide::C,
        b'G' | b'g' => Nucleotide::G,
        b'T' | b't' => Nucleotide::T,
        _ => Nucleotide::N,
    }
}
