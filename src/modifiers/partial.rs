//! Best-substring matching.
//!
//! [`Partial`] compares the shorter input against every window of the same
//! length in the longer input and keeps the best score. Metrics scored from
//! matching blocks only need the windows anchored on those blocks, which
//! turns a scan over every offset into one matcher run plus a handful of
//! evaluations.

use crate::algorithms::{
    matching_blocks, reorder, Distance, Metric, PartialStrategy, Sequence, Symbol,
};

use super::tighten;

/// Minimum distance between the shorter input and any equal-length window
/// of the longer one.
///
/// The search strategy is taken from the inner metric's
/// [`Metric::partial_strategy`] when the modifier is built.
///
/// # Examples
/// ```
/// use fuzzydist::algorithms::{Levenshtein, TextDistance};
/// use fuzzydist::modifiers::Partial;
///
/// let dist = Partial::new(Levenshtein);
/// assert_eq!(dist.evaluate("test", "this is a test!"), 0.0);
/// assert_eq!(dist.evaluate("tast", "this is a test!"), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partial<D> {
    inner: D,
    strategy: PartialStrategy,
}

impl<D: Metric> Partial<D> {
    #[must_use]
    pub fn new(inner: D) -> Self {
        let strategy = inner.partial_strategy();
        Self { inner, strategy }
    }
}

impl<D> Partial<D> {
    pub fn inner(&self) -> &D {
        &self.inner
    }

    #[must_use]
    pub fn strategy(&self) -> PartialStrategy {
        self.strategy
    }

    /// Run the window search with `eval` scoring each candidate pair.
    fn best_alignment<T: Symbol>(
        &self,
        a: &Sequence<'_, T>,
        b: &Sequence<'_, T>,
        max_dist: Option<f64>,
        eval: impl Fn(&Sequence<'_, T>, &Sequence<'_, T>, Option<f64>) -> f64,
    ) -> f64 {
        let (short, long) = reorder(a, b);
        let (len1, len2) = (short.len(), long.len());

        // An empty needle aligns trivially with every offset; score the full
        // pair instead so empty vs non-empty stays maximally distant.
        if len1 == len2 || len1 == 0 {
            return eval(&short, &long, max_dist);
        }

        let last = len2 - len1;
        let mut budget = max_dist;
        let mut best = f64::INFINITY;
        let mut consider = |start: usize, budget: &mut Option<f64>| {
            let d = eval(&short, &long.window(start, start + len1), *budget);
            if d < best {
                best = d;
                *budget = tighten(*budget, d);
            }
            best
        };

        match self.strategy {
            PartialStrategy::SlidingWindow => {
                for start in 0..=last {
                    if consider(start, &mut budget) == 0.0 {
                        break;
                    }
                }
            }
            PartialStrategy::MatchingBlocks => {
                let blocks = matching_blocks(&short, &long);
                if blocks.is_empty() {
                    consider(0, &mut budget);
                }
                for block in blocks {
                    // Place the window so the block keeps its offset in the
                    // needle, shifted back inside the longer input
                    let start = block.start2.saturating_sub(block.start1).min(last);
                    if consider(start, &mut budget) == 0.0 {
                        break;
                    }
                }
            }
        }

        best
    }
}

impl<D: Metric> Metric for Partial<D> {
    fn name(&self) -> &'static str {
        "partial"
    }

    fn is_commutative(&self) -> bool {
        self.inner.is_commutative()
    }

    fn is_normalized(&self) -> bool {
        self.inner.is_normalized()
    }
}

impl<T: Symbol, D: Distance<T>> Distance<T> for Partial<D> {
    fn distance(&self, a: &Sequence<'_, T>, b: &Sequence<'_, T>, max_dist: Option<f64>) -> f64 {
        self.best_alignment(a, b, max_dist, |x, y, m| self.inner.distance(x, y, m))
    }

    fn normalized(&self, a: &Sequence<'_, T>, b: &Sequence<'_, T>, max_dist: Option<f64>) -> f64 {
        self.best_alignment(a, b, max_dist, |x, y, m| self.inner.normalized(x, y, m))
    }
}
