//! Shared helpers: error types and small interval utilities

pub mod errors;

/// Returns `true` if the two closed intervals `[a_start, a_end]` and
/// `[b_start, b_end]` share at least one position
///
/// # Examples
///
/// ```rust
/// use txannot::utils::overlaps;
///
/// assert!(overlaps(10, 20, 20, 30));
/// assert!(!overlaps(10, 19, 20, 30));
/// ```
pub fn overlaps(a_start: u32, a_end: u32, b_start: u32, b_end: u32) -> bool {
    a_start <= b_end && b_start <= a_end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlaps() {
        assert!(overlaps(1, 10, 5, 6));
        assert!(overlaps(5, 6, 1, 10));
        assert!(overlaps(1, 10, 10, 12));
        assert!(overlaps(10, 12, 1, 10));
        assert!(!overlaps(1, 10, 11, 12));
        assert!(!overlaps(11, 12, 1, 10));
        assert!(overlaps(7, 7, 7, 7));
    }
}
