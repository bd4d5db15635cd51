//! Word-order insensitive comparison.
//!
//! Both modifiers split text on whitespace and rebuild a canonical string
//! before handing it to the inner distance. They are defined over code point
//! sequences only.

use crate::algorithms::{Distance, Metric, Sequence};

use super::tighten;

/// Whitespace-delimited tokens of a sequence, sorted.
fn sorted_tokens(seq: &Sequence<'_, char>) -> Vec<String> {
    let text = seq.to_text();
    let mut tokens: Vec<String> = text.split_whitespace().map(str::to_owned).collect();
    tokens.sort();
    tokens
}

fn joined(tokens: &[String]) -> Sequence<'static, char> {
    Sequence::from_text(&tokens.join(" "))
}

/// Compares inputs after sorting their tokens.
///
/// `"New York Mets vs Atlanta Braves"` and `"Atlanta Braves vs New York Mets"`
/// both become `"Atlanta Braves Mets New York vs"`.
///
/// # Examples
/// ```
/// use fuzzydist::algorithms::{Levenshtein, TextDistance};
/// use fuzzydist::modifiers::TokenSort;
///
/// let dist = TokenSort::new(Levenshtein);
/// assert_eq!(dist.evaluate("fuzzy wuzzy", "wuzzy   fuzzy"), 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenSort<D> {
    inner: D,
}

impl<D> TokenSort<D> {
    #[must_use]
    pub fn new(inner: D) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }
}

impl<D: Metric> Metric for TokenSort<D> {
    fn name(&self) -> &'static str {
        "token_sort"
    }

    fn is_commutative(&self) -> bool {
        self.inner.is_commutative()
    }

    fn is_normalized(&self) -> bool {
        self.inner.is_normalized()
    }
}

impl<D: Distance<char>> Distance<char> for TokenSort<D> {
    fn distance(&self, a: &Sequence<'_, char>, b: &Sequence<'_, char>, max_dist: Option<f64>) -> f64 {
        let (a, b) = (joined(&sorted_tokens(a)), joined(&sorted_tokens(b)));
        self.inner.distance(&a, &b, max_dist)
    }

    fn normalized(&self, a: &Sequence<'_, char>, b: &Sequence<'_, char>, max_dist: Option<f64>) -> f64 {
        let (a, b) = (joined(&sorted_tokens(a)), joined(&sorted_tokens(b)));
        self.inner.normalized(&a, &b, max_dist)
    }
}

/// Compares inputs as sets of tokens.
///
/// Duplicate tokens are dropped. With `inter` the sorted shared tokens and
/// `set1`, `set2` each input's sorted token set, the result is the smallest
/// of `d(inter, set1)`, `d(inter, set2)` and `d(set1, set2)`. When nothing is
/// shared it is `d(set1, set2)` alone.
///
/// # Examples
/// ```
/// use fuzzydist::algorithms::{RatcliffObershelp, TextDistance};
/// use fuzzydist::modifiers::TokenSet;
///
/// let dist = TokenSet::new(RatcliffObershelp);
/// // Every token of the first input appears in the second
/// assert_eq!(
///     dist.evaluate("New York Mets vs Atlanta", "Atlanta Braves vs New York Mets"),
///     0.0
/// );
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenSet<D> {
    inner: D,
}

impl<D> TokenSet<D> {
    #[must_use]
    pub fn new(inner: D) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }
}

impl<D: Metric> Metric for TokenSet<D> {
    fn name(&self) -> &'static str {
        "token_set"
    }

    fn is_commutative(&self) -> bool {
        self.inner.is_commutative()
    }

    fn is_normalized(&self) -> bool {
        self.inner.is_normalized()
    }
}

impl<D: Distance<char>> TokenSet<D> {
    fn best_of_sets(
        &self,
        a: &Sequence<'_, char>,
        b: &Sequence<'_, char>,
        max_dist: Option<f64>,
        eval: impl Fn(&Sequence<'_, char>, &Sequence<'_, char>, Option<f64>) -> f64,
    ) -> f64 {
        let mut set1 = sorted_tokens(a);
        let mut set2 = sorted_tokens(b);
        set1.dedup();
        set2.dedup();
        let shared = intersect_sorted(&set1, &set2);

        let (set1, set2) = (joined(&set1), joined(&set2));
        if shared.is_empty() {
            return eval(&set1, &set2, max_dist);
        }
        let shared = joined(&shared);

        let mut budget = max_dist;
        let mut out = eval(&shared, &set1, budget);
        budget = tighten(budget, out);
        out = out.min(eval(&shared, &set2, budget));
        budget = tighten(budget, out);
        out.min(eval(&set1, &set2, budget))
    }
}

impl<D: Distance<char>> Distance<char> for TokenSet<D> {
    fn distance(&self, a: &Sequence<'_, char>, b: &Sequence<'_, char>, max_dist: Option<f64>) -> f64 {
        self.best_of_sets(a, b, max_dist, |x, y, m| self.inner.distance(x, y, m))
    }

    fn normalized(&self, a: &Sequence<'_, char>, b: &Sequence<'_, char>, max_dist: Option<f64>) -> f64 {
        self.best_of_sets(a, b, max_dist, |x, y, m| self.inner.normalized(x, y, m))
    }
}

/// Tokens present in both sorted, deduplicated lists.
fn intersect_sorted(a: &[String], b: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(a.len().min(b.len()));
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                out.push(a[i].clone());
                i += 1;
                j += 1;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::{Levenshtein, RatcliffObershelp, TextDistance};

    const METS: &str = "New York Mets vs Atlanta Braves";
    const BRAVES: &str = "Atlanta Braves vs New York Mets";

    #[test]
    fn test_sorted_tokens_collapse_whitespace() {
        let tokens = sorted_tokens(&Sequence::from("  b\ta  c\n"));
        assert_eq!(tokens, vec!["a", "b", "c"]);
        assert_eq!(joined(&tokens).to_text(), "a b c");
    }

    #[test]
    fn test_token_sort_reordered_words() {
        assert_eq!(TokenSort::new(Levenshtein).evaluate(METS, BRAVES), 0.0);
    }

    #[test]
    fn test_token_sort_keeps_duplicates() {
        // "a a b" vs "a b": one extra token survives sorting
        assert_eq!(TokenSort::new(Levenshtein).evaluate("a b a", "b a"), 2.0);
    }

    #[test]
    fn test_token_set_subset_is_identical() {
        let dist = TokenSet::new(RatcliffObershelp);
        assert_eq!(dist.evaluate("New York Mets vs Atlanta", BRAVES), 0.0);
        assert_eq!(dist.evaluate("mets mets mets", "mets"), 0.0);
    }

    #[test]
    fn test_token_set_disjoint_compares_sets() {
        let dist = TokenSet::new(Levenshtein);
        // No shared tokens: d("ab cd", "ef") directly
        assert_eq!(dist.evaluate("cd ab", "ef"), Levenshtein.evaluate("ab cd", "ef"));
    }

    #[test]
    fn test_token_set_takes_best_configuration() {
        let dist = TokenSet::new(Levenshtein);
        // inter "a b"; set1 "a b c"; set2 "a b d e"
        // d(inter, set1) = 2, d(inter, set2) = 4, d(set1, set2) = 3
        assert_eq!(dist.evaluate("c b a", "e d b a"), 2.0);
    }

    #[test]
    fn test_absent_propagates() {
        assert_eq!(TokenSet::new(Levenshtein).call(None, Some("a"), None), None);
        assert_eq!(TokenSort::new(Levenshtein).call(Some("a"), None, None), None);
    }

    #[test]
    fn test_intersect_sorted() {
        let a: Vec<String> = ["a", "c", "e"].iter().map(|s| s.to_string()).collect();
        let b: Vec<String> = ["b", "c", "e", "f"].iter().map(|s| s.to_string()).collect();
        assert_eq!(intersect_sorted(&a, &b), vec!["c", "e"]);
    }
}
