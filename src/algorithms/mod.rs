//! Base string metrics and the distance capability they share.
//!
//! Each metric is a small stateless (or config-only) struct implementing
//! [`Distance`] for any [`Symbol`] type, plus free functions on slices for
//! direct use. Modifiers in [`crate::modifiers`] consume and produce the same
//! trait, so metrics and modifiers nest freely.

pub mod blocks;
pub mod damerau;
pub mod hamming;
pub mod jaro;
pub mod levenshtein;
pub mod qgram;
pub mod ratcliff;
pub mod sequence;

pub use blocks::*;
pub use damerau::*;
pub use hamming::*;
pub use jaro::*;
pub use levenshtein::*;
pub use qgram::*;
pub use ratcliff::*;
pub use sequence::*;

use serde::{Deserialize, Serialize};

/// How [`crate::modifiers::Partial`] searches for the best alignment.
///
/// Resolved once when the modifier is built, never per call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartialStrategy {
    /// Evaluate every window of the shorter length across the longer input.
    #[default]
    SlidingWindow,
    /// Only evaluate windows anchored on matching blocks.
    ///
    /// Sound for metrics scored from matching blocks (Ratcliff-Obershelp),
    /// where every locally optimal window contains at least one block.
    MatchingBlocks,
}

/// Symbol-independent properties of a metric.
pub trait Metric: Send + Sync {
    /// Name of the algorithm for debugging/logging
    fn name(&self) -> &'static str;

    /// `d(a, b) == d(b, a)` for all inputs.
    fn is_commutative(&self) -> bool {
        true
    }

    /// Whether [`Distance::distance`] already lies in `[0, 1]`.
    fn is_normalized(&self) -> bool {
        true
    }

    fn partial_strategy(&self) -> PartialStrategy {
        PartialStrategy::SlidingWindow
    }

    /// Q-gram size for metrics that can run on a prebuilt [`QGramProfile`].
    fn qgram_size(&self) -> Option<usize> {
        None
    }
}

/// A distance between two symbol sequences.
///
/// `max_dist` is a budget: the implementation may stop early once the result
/// is certain to exceed it. A result `<= max_dist` is always exact; a result
/// above it only means "greater than the budget".
pub trait Distance<T: Symbol = char>: Metric {
    /// Distance in the metric's native unit (edit count or `[0, 1]`).
    fn distance(&self, a: &Sequence<'_, T>, b: &Sequence<'_, T>, max_dist: Option<f64>) -> f64;

    /// Distance scaled to `[0, 1]`. Returns exactly 1.0 when the value
    /// exceeds `max_dist` (default 1.0).
    fn normalized(&self, a: &Sequence<'_, T>, b: &Sequence<'_, T>, max_dist: Option<f64>) -> f64 {
        let max_dist = max_dist.unwrap_or(1.0);
        let out = self.distance(a, b, Some(max_dist));
        if out > max_dist {
            1.0
        } else {
            out
        }
    }

    /// Distance between two preprocessed profiles.
    ///
    /// Metrics without a profile representation fall back to the source
    /// symbols the profile keeps.
    fn profile_distance(
        &self,
        a: &QGramProfile<T>,
        b: &QGramProfile<T>,
        max_dist: Option<f64>,
    ) -> f64 {
        self.distance(&a.sequence(), &b.sequence(), max_dist)
    }

    fn profile_normalized(
        &self,
        a: &QGramProfile<T>,
        b: &QGramProfile<T>,
        max_dist: Option<f64>,
    ) -> f64 {
        self.normalized(&a.sequence(), &b.sequence(), max_dist)
    }

    /// Absent-propagating form: `None` if either operand is absent.
    fn call_sequences(
        &self,
        a: Option<&Sequence<'_, T>>,
        b: Option<&Sequence<'_, T>>,
        max_dist: Option<f64>,
    ) -> Option<f64> {
        Some(self.distance(a?, b?, max_dist))
    }
}

/// String entry points for any distance over code points.
///
/// # Examples
/// ```
/// use fuzzydist::algorithms::{Levenshtein, TextDistance};
///
/// assert_eq!(Levenshtein.evaluate("kitten", "sitting"), 3.0);
/// assert_eq!(Levenshtein.call(Some("abc"), None, None), None);
/// assert!((Levenshtein.compare("martha", "marhta", 0.0) - 4.0 / 6.0).abs() < 1e-12);
/// ```
pub trait TextDistance: Distance<char> {
    /// Budget-free distance between two strings.
    fn evaluate(&self, a: &str, b: &str) -> f64 {
        self.distance(&Sequence::from(a), &Sequence::from(b), None)
    }

    /// Distance with absent propagation and an optional budget.
    fn call(&self, a: Option<&str>, b: Option<&str>, max_dist: Option<f64>) -> Option<f64> {
        let (a, b) = (a?, b?);
        Some(self.distance(&Sequence::from(a), &Sequence::from(b), max_dist))
    }

    /// Similarity in `[0, 1]`: `1 - normalized distance`.
    ///
    /// Returns 0.0 when the similarity is below `min_score`.
    fn compare(&self, a: &str, b: &str, min_score: f64) -> f64 {
        1.0 - self.normalized(&Sequence::from(a), &Sequence::from(b), Some(1.0 - min_score))
    }
}

impl<D: Distance<char> + ?Sized> TextDistance for D {}

macro_rules! forward_metric {
    ($($wrapper:ty),*) => {$(
        impl<D: Metric + ?Sized> Metric for $wrapper {
            fn name(&self) -> &'static str {
                (**self).name()
            }
            fn is_commutative(&self) -> bool {
                (**self).is_commutative()
            }
            fn is_normalized(&self) -> bool {
                (**self).is_normalized()
            }
            fn partial_strategy(&self) -> PartialStrategy {
                (**self).partial_strategy()
            }
            fn qgram_size(&self) -> Option<usize> {
                (**self).qgram_size()
            }
        }

        impl<T: Symbol, D: Distance<T> + ?Sized> Distance<T> for $wrapper {
            fn distance(&self, a: &Sequence<'_, T>, b: &Sequence<'_, T>, max_dist: Option<f64>) -> f64 {
                (**self).distance(a, b, max_dist)
            }
            fn normalized(&self, a: &Sequence<'_, T>, b: &Sequence<'_, T>, max_dist: Option<f64>) -> f64 {
                (**self).normalized(a, b, max_dist)
            }
            fn profile_distance(&self, a: &QGramProfile<T>, b: &QGramProfile<T>, max_dist: Option<f64>) -> f64 {
                (**self).profile_distance(a, b, max_dist)
            }
            fn profile_normalized(&self, a: &QGramProfile<T>, b: &QGramProfile<T>, max_dist: Option<f64>) -> f64 {
                (**self).profile_normalized(a, b, max_dist)
            }
        }
    )*};
}

forward_metric!(&D, Box<D>);

// ============================================================================
// Budget helpers shared by the edit-count metrics
// ============================================================================

/// Integer budget for a raw edit count. `None` means unbounded.
#[inline]
pub(crate) fn count_budget(max_dist: Option<f64>) -> Option<usize> {
    match max_dist {
        Some(m) if m.is_finite() => Some(m.max(0.0).floor() as usize),
        _ => None,
    }
}

/// Run a bounded edit count and report it in the raw unit.
///
/// An exceeded budget is reported as `budget + 1`.
#[inline]
pub(crate) fn bounded_count(
    max_dist: Option<f64>,
    count: impl FnOnce(Option<usize>) -> Option<usize>,
) -> f64 {
    let budget = count_budget(max_dist);
    match count(budget) {
        Some(d) => d as f64,
        None => budget.map_or(f64::INFINITY, |b| b as f64 + 1.0),
    }
}

/// Scale a bounded edit count by the longer length.
///
/// The count runs with budget `ceil(max_len * max_dist)`; anything above
/// `max_dist` after scaling becomes 1.0. Two empty inputs are identical.
#[inline]
pub(crate) fn normalized_count(
    max_len: usize,
    max_dist: Option<f64>,
    count: impl FnOnce(Option<usize>) -> Option<usize>,
) -> f64 {
    if max_len == 0 {
        return 0.0;
    }
    let max_dist = max_dist.unwrap_or(1.0);
    let budget = (max_len as f64 * max_dist.clamp(0.0, 1.0)).ceil() as usize;
    match count(Some(budget)) {
        Some(d) => {
            let out = d as f64 / max_len as f64;
            if out > max_dist {
                1.0
            } else {
                out
            }
        }
        None => 1.0,
    }
}
