//! Ratcliff-Obershelp (gestalt pattern matching) distance
//!
//! Scores two sequences by the total length of their matching blocks:
//! `1 - 2 * matched / (len1 + len2)`.

use super::{matched_len, Distance, Metric, PartialStrategy, Sequence, Symbol};

/// Ratcliff-Obershelp distance calculator
///
/// Not commutative: for inputs of equal length the result can change when
/// they are swapped. Declares [`PartialStrategy::MatchingBlocks`], so a partial match only
/// evaluates windows anchored on its matching blocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatcliffObershelp;

impl RatcliffObershelp {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Metric for RatcliffObershelp {
    fn name(&self) -> &'static str {
        "ratcliff_obershelp"
    }

    /// Longest-block ties resolve by position in the first input, so equal
    /// length inputs can score differently when swapped.
    fn is_commutative(&self) -> bool {
        false
    }

    fn partial_strategy(&self) -> PartialStrategy {
        PartialStrategy::MatchingBlocks
    }
}

impl<T: Symbol> Distance<T> for RatcliffObershelp {
    fn distance(&self, a: &Sequence<'_, T>, b: &Sequence<'_, T>, _max_dist: Option<f64>) -> f64 {
        ratcliff_obershelp(a, b)
    }
}

/// Ratcliff-Obershelp distance between two slices, in `[0, 1]`.
///
/// The shorter slice is scanned first so block selection does not depend
/// on argument order for inputs of different length.
#[must_use]
pub fn ratcliff_obershelp<T: PartialEq>(a: &[T], b: &[T]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 0.0;
    }
    let matched = if a.len() <= b.len() {
        matched_len(a, b)
    } else {
        matched_len(b, a)
    };
    1.0 - 2.0 * matched as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::TextDistance;

    #[test]
    fn test_identical_and_disjoint() {
        assert_eq!(RatcliffObershelp.evaluate("hello", "hello"), 0.0);
        assert_eq!(RatcliffObershelp.evaluate("abc", "xyz"), 1.0);
        assert_eq!(RatcliffObershelp.evaluate("", ""), 0.0);
        assert_eq!(RatcliffObershelp.evaluate("", "abc"), 1.0);
    }

    #[test]
    fn test_reordered_words() {
        let d = RatcliffObershelp.evaluate(
            "New York Mets vs Atlanta Braves",
            "Atlanta Braves vs New York Mets",
        );
        assert!((d - 0.5483870967741935).abs() < 1e-12);
    }

    #[test]
    fn test_gestalt_example() {
        // "WIKIM" then "IA": 7 matched symbols out of 9 on each side
        let d = RatcliffObershelp.evaluate("WIKIMEDIA", "WIKIMANIA");
        assert!((d - (1.0 - 14.0 / 18.0)).abs() < 1e-12);
    }

    #[test]
    fn test_swapped_equal_lengths_can_differ() {
        assert!(!RatcliffObershelp.is_commutative());
        let forward = RatcliffObershelp.evaluate("aaaab", "bacac");
        let backward = RatcliffObershelp.evaluate("bacac", "aaaab");
        assert!((forward - 0.6).abs() < 1e-12);
        assert!((backward - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_strategy_flag() {
        assert_eq!(
            RatcliffObershelp.partial_strategy(),
            PartialStrategy::MatchingBlocks
        );
    }
}
