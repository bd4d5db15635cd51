//! Edit distances that also count adjacent transpositions
//!
//! Two variants:
//! - [`OptimalStringAlignment`]: restricted form, no substring is edited
//!   more than once. O(n) space, supports early termination.
//! - [`DamerauLevenshtein`]: unrestricted form with full transposition
//!   support. O(m*n) space; falls back to the restricted form for inputs
//!   longer than 10,000 symbols.

use super::{bounded_count, normalized_count, Distance, Metric, Sequence, Symbol};
use ahash::AHashMap;
use smallvec::SmallVec;

/// Maximum length for the O(m*n) space unrestricted algorithm.
/// Longer inputs use the restricted algorithm instead.
const MAX_QUADRATIC_LENGTH: usize = 10_000;

/// Restricted Damerau-Levenshtein: no substring is edited twice.
///
/// # Complexity
/// - Time: O(m*n)
/// - Space: O(n)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OptimalStringAlignment;

impl Metric for OptimalStringAlignment {
    fn name(&self) -> &'static str {
        "optimal_string_alignment"
    }

    fn is_normalized(&self) -> bool {
        false
    }
}

impl<T: Symbol> Distance<T> for OptimalStringAlignment {
    fn distance(&self, a: &Sequence<'_, T>, b: &Sequence<'_, T>, max_dist: Option<f64>) -> f64 {
        bounded_count(max_dist, |budget| osa_bounded(a, b, budget))
    }

    fn normalized(&self, a: &Sequence<'_, T>, b: &Sequence<'_, T>, max_dist: Option<f64>) -> f64 {
        normalized_count(a.len().max(b.len()), max_dist, |budget| osa_bounded(a, b, budget))
    }
}

/// Damerau-Levenshtein with unrestricted transpositions.
///
/// # Complexity
/// - Time: O(m*n)
/// - Space: O(m*n), or O(n) fallback for very long inputs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DamerauLevenshtein;

impl Metric for DamerauLevenshtein {
    fn name(&self) -> &'static str {
        "damerau_levenshtein"
    }

    fn is_normalized(&self) -> bool {
        false
    }
}

impl<T: Symbol> Distance<T> for DamerauLevenshtein {
    fn distance(&self, a: &Sequence<'_, T>, b: &Sequence<'_, T>, max_dist: Option<f64>) -> f64 {
        bounded_count(max_dist, |budget| damerau_levenshtein_bounded(a, b, budget))
    }

    fn normalized(&self, a: &Sequence<'_, T>, b: &Sequence<'_, T>, max_dist: Option<f64>) -> f64 {
        normalized_count(a.len().max(b.len()), max_dist, |budget| {
            damerau_levenshtein_bounded(a, b, budget)
        })
    }
}

/// OSA distance, or `None` once every cell of a row exceeds `max_distance`.
#[inline]
#[must_use]
pub fn osa_bounded<T: PartialEq>(a: &[T], b: &[T], max_distance: Option<usize>) -> Option<usize> {
    if a == b {
        return Some(0);
    }

    let m = a.len();
    let n = b.len();

    if let Some(max_d) = max_distance {
        if m.abs_diff(n) > max_d {
            return None;
        }
    }
    if m == 0 || n == 0 {
        return Some(m.max(n));
    }

    // Need 3 rows for transposition detection
    let mut prev2_row: SmallVec<[usize; 64]> = smallvec::smallvec![0; n + 1];
    let mut prev_row: SmallVec<[usize; 64]> = (0..=n).collect();
    let mut curr_row: SmallVec<[usize; 64]> = smallvec::smallvec![0; n + 1];

    for i in 1..=m {
        curr_row[0] = i;
        let mut row_min = i;

        for j in 1..=n {
            let cost = usize::from(a[i - 1] != b[j - 1]);

            curr_row[j] = (prev_row[j] + 1) // deletion
                .min(curr_row[j - 1] + 1) // insertion
                .min(prev_row[j - 1] + cost); // substitution

            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                curr_row[j] = curr_row[j].min(prev2_row[j - 2] + 1);
            }

            row_min = row_min.min(curr_row[j]);
        }

        // A transposition never goes below the previous row's minimum
        if let Some(max_d) = max_distance {
            if row_min > max_d {
                return None;
            }
        }

        std::mem::swap(&mut prev2_row, &mut prev_row);
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    match max_distance {
        Some(max_d) if prev_row[n] > max_d => None,
        _ => Some(prev_row[n]),
    }
}

/// Unrestricted Damerau-Levenshtein distance.
///
/// The budget is only checked on the final value, except for the length
/// difference which is a lower bound.
#[must_use]
pub fn damerau_levenshtein_bounded<T: Symbol>(
    a: &[T],
    b: &[T],
    max_distance: Option<usize>,
) -> Option<usize> {
    if a == b {
        return Some(0);
    }

    let m = a.len();
    let n = b.len();

    if let Some(max_d) = max_distance {
        if m.abs_diff(n) > max_d {
            return None;
        }
    }
    if m == 0 || n == 0 {
        return Some(m.max(n));
    }

    if m > MAX_QUADRATIC_LENGTH || n > MAX_QUADRATIC_LENGTH {
        return osa_bounded(a, b, max_distance);
    }

    let max_dist = m + n;

    // Last row in which each symbol of `a` was seen
    let mut last_row: AHashMap<&T, usize> = AHashMap::new();

    // Sentinel row and column hold `max_dist`
    let mut d: Vec<Vec<usize>> = vec![vec![0; n + 2]; m + 2];

    d[0][0] = max_dist;
    for i in 0..=m {
        d[i + 1][0] = max_dist;
        d[i + 1][1] = i;
    }
    for j in 0..=n {
        d[0][j + 1] = max_dist;
        d[1][j + 1] = j;
    }

    for i in 1..=m {
        let mut db = 0usize;

        for j in 1..=n {
            let i1 = last_row.get(&b[j - 1]).copied().unwrap_or(0);
            let j1 = db;

            let cost = if a[i - 1] == b[j - 1] {
                db = j;
                0
            } else {
                1
            };

            d[i + 1][j + 1] = (d[i][j] + cost) // substitution
                .min(d[i + 1][j] + 1) // insertion
                .min(d[i][j + 1] + 1) // deletion
                .min(d[i1][j1] + (i - i1 - 1) + 1 + (j - j1 - 1)); // transposition
        }

        last_row.insert(&a[i - 1], i);
    }

    let result = d[m + 1][n + 1];
    match max_distance {
        Some(max_d) if result > max_d => None,
        _ => Some(result),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn osa(a: &str, b: &str) -> usize {
        osa_bounded(&chars(a), &chars(b), None).unwrap_or(usize::MAX)
    }

    fn dl(a: &str, b: &str) -> usize {
        damerau_levenshtein_bounded(&chars(a), &chars(b), None).unwrap_or(usize::MAX)
    }

    #[test]
    fn test_damerau_basic() {
        assert_eq!(dl("", ""), 0);
        assert_eq!(dl("abc", "abc"), 0);
        assert_eq!(dl("abc", ""), 3);
        assert_eq!(dl("ab", "ba"), 1);
    }

    #[test]
    fn test_true_vs_osa() {
        // "ca" -> "abc": OSA needs 3, unrestricted needs 2
        assert_eq!(osa("ca", "abc"), 3);
        assert_eq!(dl("ca", "abc"), 2);
    }

    #[test]
    fn test_osa_basic() {
        assert_eq!(osa("abcdef", "abcfed"), 2);
        assert_eq!(osa("martha", "marhta"), 1);
    }

    #[test]
    fn test_budget_exceeded() {
        assert_eq!(osa_bounded(&chars("abcdef"), &chars("ghijkl"), Some(2)), None);
        assert_eq!(
            damerau_levenshtein_bounded(&chars("abcdef"), &chars("ghijkl"), Some(2)),
            None
        );
        let a = Sequence::from("martha");
        let b = Sequence::from("marhta");
        assert_eq!(OptimalStringAlignment.distance(&a, &b, Some(1.0)), 1.0);
        assert!((DamerauLevenshtein.normalized(&a, &b, None) - 1.0 / 6.0).abs() < 1e-12);
    }
}
