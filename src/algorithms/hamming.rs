//! Hamming distance implementation
//!
//! Counts positions where symbols differ. Sequences of different lengths
//! are compared as if the shorter one were padded: every position past its
//! end counts as a mismatch.
//!
//! # Complexity
//! - Time: O(n) where n is the longer length
//! - Space: O(1)

use super::{bounded_count, normalized_count, Distance, Metric, Sequence, Symbol};

/// Hamming distance calculator
///
/// Stateless calculator - all instances are equivalent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hamming;

impl Hamming {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Metric for Hamming {
    fn name(&self) -> &'static str {
        "hamming"
    }

    fn is_normalized(&self) -> bool {
        false
    }
}

impl<T: Symbol> Distance<T> for Hamming {
    fn distance(&self, a: &Sequence<'_, T>, b: &Sequence<'_, T>, max_dist: Option<f64>) -> f64 {
        bounded_count(max_dist, |budget| hamming_bounded(a, b, budget))
    }

    fn normalized(&self, a: &Sequence<'_, T>, b: &Sequence<'_, T>, max_dist: Option<f64>) -> f64 {
        normalized_count(a.len().max(b.len()), max_dist, |budget| {
            hamming_bounded(a, b, budget)
        })
    }
}

/// Hamming distance with optional early termination.
///
/// Returns `None` once the mismatch count exceeds `max_distance`.
#[must_use]
pub fn hamming_bounded<T: PartialEq>(a: &[T], b: &[T], max_distance: Option<usize>) -> Option<usize> {
    let mut distance = a.len().abs_diff(b.len());
    let limit = max_distance.unwrap_or(usize::MAX);
    if distance > limit {
        return None;
    }

    for (ac, bc) in a.iter().zip(b.iter()) {
        if ac != bc {
            distance += 1;
            if distance > limit {
                return None;
            }
        }
    }

    Some(distance)
}

/// Hamming distance; unequal tails count as mismatches.
#[inline]
#[must_use]
pub fn hamming<T: PartialEq>(a: &[T], b: &[T]) -> usize {
    hamming_bounded(a, b, None).unwrap_or(0)
}
