//! Distance modifiers
//!
//! Each modifier owns an inner distance and implements [`Distance`] itself,
//! so they nest by construction:
//!
//! ```
//! use fuzzydist::algorithms::{Levenshtein, TextDistance};
//! use fuzzydist::modifiers::{Partial, TokenSort};
//!
//! let dist = TokenSort::new(Partial::new(Levenshtein));
//! assert_eq!(dist.evaluate("york new", "new york city"), 0.0);
//! ```
//!
//! [`Distance`]: crate::algorithms::Distance

pub mod normalized;
pub mod partial;
pub mod token;
pub mod token_max;

pub use normalized::Normalized;
pub use partial::Partial;
pub use token::{TokenSet, TokenSort};
pub use token_max::{TokenMax, TokenMaxConfig};

/// Lower a budget to the best value seen so far.
///
/// Values above a budget are only known to exceed it, so the minimum over
/// several calls stays exact as long as each later call gets the running best.
#[inline]
pub(crate) fn tighten(budget: Option<f64>, value: f64) -> Option<f64> {
    Some(budget.map_or(value, |b| b.min(value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tighten() {
        assert_eq!(tighten(None, 0.4), Some(0.4));
        assert_eq!(tighten(Some(0.3), 0.4), Some(0.3));
        assert_eq!(tighten(Some(0.5), 0.4), Some(0.4));
    }
}
