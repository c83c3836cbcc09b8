use core::fmt::Display;

use crate::utils::errors::AnnotationError;

/// The standard amino acids, the termination signal (`Ter`) and
/// `X` for codons that contain unknown nucleotides
///
/// # Examples
///
/// ```
/// use txannot::models::AminoAcid;
///
/// assert_eq!(AminoAcid::try_from('*').unwrap(), AminoAcid::Ter);
/// assert_eq!(AminoAcid::M.single_letter(), 'M');
///
/// // `Display` uses the three letter code
/// assert_eq!(AminoAcid::A.to_string(), "Ala");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AminoAcid {
    Ter,
    A,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    K,
    L,
    M,
    N,
    P,
    Q,
    R,
    S,
    T,
    V,
    W,
    Y,
    X,
}

/// (variant, single letter code, three letter code)
static AMINO_ACIDS: [(AminoAcid, char, &str); 22] = [
    (AminoAcid::Ter, '*', "Ter"),
    (AminoAcid::A, 'A', "Ala"),
    (AminoAcid::C, 'C', "Cys"),
    (AminoAcid::D, 'D', "Asp"),
    (AminoAcid::E, 'E', "Glu"),
    (AminoAcid::F, 'F', "Phe"),
    (AminoAcid::G, 'G', "Gly"),
    (AminoAcid::H, 'H', "His"),
    (AminoAcid::I, 'I', "Ile"),
    (AminoAcid::K, 'K', "Lys"),
    (AminoAcid::L, 'L', "Leu"),
    (AminoAcid::M, 'M', "Met"),
    (AminoAcid::N, 'N', "Asn"),
    (AminoAcid::P, 'P', "Pro"),
    (AminoAcid::Q, 'Q', "Gln"),
    (AminoAcid::R, 'R', "Arg"),
    (AminoAcid::S, 'S', "Ser"),
    (AminoAcid::T, 'T', "Thr"),
    (AminoAcid::V, 'V', "Val"),
    (AminoAcid::W, 'W', "Trp"),
    (AminoAcid::Y, 'Y', "Tyr"),
    (AminoAcid::X, 'X', "Xaa"),
];

impl AminoAcid {
    fn entry(&self) -> &'static (AminoAcid, char, &'static str) {
        // the variants are declared in the same order as `AMINO_ACIDS`
        &AMINO_ACIDS[*self as usize]
    }

    /// Returns the single-letter code of the `AminoAcid`
    pub fn single_letter(&self) -> char {
        self.entry().1
    }

    /// Returns the three-letter code of the `AminoAcid`
    pub fn three_letter(&self) -> &'static str {
        self.entry().2
    }

    /// Returns `true` for the termination signal
    pub fn is_stop(&self) -> bool {
        matches!(self, AminoAcid::Ter)
    }
}

impl Display for AminoAcid {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.three_letter())
    }
}

impl TryFrom<char> for AminoAcid {
    type Error = AnnotationError;
    fn try_from(c: char) -> Result<AminoAcid, AnnotationError> {
        AMINO_ACIDS
            .iter()
            .find(|entry| entry.1 == c)
            .map(|entry| entry.0)
            .ok_or_else(|| AnnotationError::new(format!("Invalid amino acid {}", c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_table_order() {
        for &(aa, letter, _) in AMINO_ACIDS.iter() {
            assert_eq!(aa.single_letter(), letter);
            assert_eq!(AminoAcid::try_from(letter).unwrap(), aa);
        }
    }

    #[test]
    fn test_unknown_amino_acid() {
        assert_eq!(AminoAcid::try_from('X').unwrap(), AminoAcid::X);
        assert_eq!(AminoAcid::X.to_string(), "Xaa");
        assert!(AminoAcid::try_from('B').is_err());
        assert!(!AminoAcid::X.is_stop());
        assert!(AminoAcid::Ter.is_stop());
    }
}
