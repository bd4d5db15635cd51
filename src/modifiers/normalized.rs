//! Adapter presenting any distance in the unit interval.

use crate::algorithms::{Distance, Metric, PartialStrategy, QGramProfile, Sequence, Symbol};

/// Reports the inner distance's [`Distance::normalized`] value as its
/// distance.
///
/// Every other property, including the partial strategy and q-gram size,
/// is the inner distance's.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Normalized<D> {
    inner: D,
}

impl<D> Normalized<D> {
    #[must_use]
    pub fn new(inner: D) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &D {
        &self.inner
    }

    pub fn into_inner(self) -> D {
        self.inner
    }
}

impl<D: Metric> Metric for Normalized<D> {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn is_commutative(&self) -> bool {
        self.inner.is_commutative()
    }

    fn is_normalized(&self) -> bool {
        true
    }

    fn partial_strategy(&self) -> PartialStrategy {
        self.inner.partial_strategy()
    }

    fn qgram_size(&self) -> Option<usize> {
        self.inner.qgram_size()
    }
}

impl<T: Symbol, D: Distance<T>> Distance<T> for Normalized<D> {
    fn distance(&self, a: &Sequence<'_, T>, b: &Sequence<'_, T>, max_dist: Option<f64>) -> f64 {
        self.inner.normalized(a, b, max_dist)
    }

    fn normalized(&self, a: &Sequence<'_, T>, b: &Sequence<'_, T>, max_dist: Option<f64>) -> f64 {
        self.inner.normalized(a, b, max_dist)
    }

    fn profile_distance(&self, a: &QGramProfile<T>, b: &QGramProfile<T>, max_dist: Option<f64>) -> f64 {
        self.inner.profile_normalized(a, b, max_dist)
    }

    fn profile_normalized(&self, a: &QGramProfile<T>, b: &QGramProfile<T>, max_dist: Option<f64>) -> f64 {
        self.inner.profile_normalized(a, b, max_dist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::{Levenshtein, QGram, RatcliffObershelp, TextDistance};

    #[test]
    fn test_scales_edit_count() {
        let dist = Normalized::new(Levenshtein);
        assert!(dist.is_normalized());
        assert!((dist.evaluate("kitten", "sitting") - 3.0 / 7.0).abs() < 1e-12);
        assert_eq!(dist.call(Some("kitten"), Some("sitting"), Some(0.2)), Some(1.0));
    }

    #[test]
    fn test_keeps_inner_capabilities() {
        assert_eq!(
            Normalized::new(RatcliffObershelp).partial_strategy(),
            PartialStrategy::MatchingBlocks
        );
        assert_eq!(Normalized::new(QGram::new(3)).qgram_size(), Some(3));
    }
}
