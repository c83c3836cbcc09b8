use serde::{Deserialize, Serialize};

use crate::models::Strand;
use crate::utils::errors::AnnotationError;

/// A gene on the reference genome
///
/// The coordinates are 1-based and inclusive, `start <= end` for both strands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gene {
    id: String,
    name: String,
    chrom: String,
    strand: Strand,
    start: u32,
    end: u32,
}

impl Gene {
    /// Creates a new Gene
    ///
    /// # Examples
    ///
    /// ```rust
    /// use txannot::models::{Gene, Strand};
    ///
    /// let gene = Gene::new("ENSG01", "BRAF", "7", Strand::Minus, 100, 200).unwrap();
    /// assert_eq!(gene.name(), "BRAF");
    ///
    /// assert!(Gene::new("ENSG01", "BRAF", "7", Strand::Minus, 200, 100).is_err());
    /// ```
    pub fn new(
        id: &str,
        name: &str,
        chrom: &str,
        strand: Strand,
        start: u32,
        end: u32,
    ) -> Result<Self, AnnotationError> {
        if start > end {
            return Err(AnnotationError::new(format!(
                "gene {} starts after its end ({} > {})",
                id, start, end
            )));
        }
        Ok(Gene {
            id: id.to_string(),
            name: name.to_string(),
            chrom: chrom.to_string(),
            strand,
            start,
            end,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn chrom(&self) -> &str {
        &self.chrom
    }

    pub fn strand(&self) -> Strand {
        self.strand
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    /// The gene body, extended upstream by the promoter distance
    pub fn search_window(&self, promoter_distance: u32) -> (u32, u32) {
        self.strand
            .upstream_window(self.start, self.end, promoter_distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_window() {
        let gene = Gene::new("G1", "G1", "1", Strand::Plus, 10_000, 12_000).unwrap();
        assert_eq!(gene.search_window(500), (9_500, 12_000));

        let gene = Gene::new("G2", "G2", "1", Strand::Minus, 10_000, 12_000).unwrap();
        assert_eq!(gene.search_window(500), (10_000, 12_500));
        assert_eq!(gene.search_window(0), (10_000, 12_000));
    }
}
