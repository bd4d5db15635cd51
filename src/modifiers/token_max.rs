//! Best of the base, partial and token comparisons, with damping.

use serde::{Deserialize, Serialize};

use crate::algorithms::{reorder, Distance, Metric, Sequence};
use crate::error::{Error, Result};

use super::{Normalized, Partial, TokenSet, TokenSort};

/// Blend weights for [`TokenMax`].
///
/// A modifier's output `v` enters the result as `1 - scale * (1 - v)`, so a
/// scale below 1 keeps modified comparisons from fully matching.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenMaxConfig {
    /// Weight of the token sort and token set comparisons
    pub token_scale: f64,
    /// Extra weight applied once the partial comparison is used
    pub partial_scale: f64,
    /// Length ratio from which the partial comparison is used
    pub lopsided_ratio: f64,
}

impl Default for TokenMaxConfig {
    fn default() -> Self {
        Self {
            token_scale: 0.95,
            partial_scale: 0.9,
            lopsided_ratio: 1.5,
        }
    }
}

impl TokenMaxConfig {
    /// Check that both scales lie in `(0, 1]` and the ratio is at least 1.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("token_scale", self.token_scale),
            ("partial_scale", self.partial_scale),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(Error::InvalidParameter {
                    name,
                    reason: format!("must be in (0, 1], got {value}"),
                });
            }
        }
        if !(self.lopsided_ratio >= 1.0) {
            return Err(Error::InvalidParameter {
                name: "lopsided_ratio",
                reason: format!("must be at least 1, got {}", self.lopsided_ratio),
            });
        }
        Ok(())
    }
}

/// Smallest of the base, token sort, token set and (for inputs of very
/// different length) partial distances.
///
/// The inner distance is wrapped in [`Normalized`], so the result always lies
/// in `[0, 1]`. Token and partial results are damped by the configured
/// scales before they are compared with the base distance.
///
/// # Examples
/// ```
/// use fuzzydist::algorithms::{Levenshtein, TextDistance};
/// use fuzzydist::modifiers::TokenMax;
///
/// let dist = TokenMax::new(Levenshtein);
/// assert_eq!(dist.evaluate("new york", "new york"), 0.0);
/// // Reordered words score the damped token sort result
/// let d = dist.evaluate("york new", "new york");
/// assert!((d - 0.05).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenMax<D> {
    inner: Normalized<D>,
    config: TokenMaxConfig,
}

impl<D> TokenMax<D> {
    #[must_use]
    pub fn new(inner: D) -> Self {
        Self {
            inner: Normalized::new(inner),
            config: TokenMaxConfig::default(),
        }
    }

    /// Create with custom blend weights.
    pub fn with_config(inner: D, config: TokenMaxConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            inner: Normalized::new(inner),
            config,
        })
    }

    pub fn inner(&self) -> &D {
        self.inner.inner()
    }

    #[must_use]
    pub fn config(&self) -> TokenMaxConfig {
        self.config
    }
}

/// Running state of one [`TokenMax`] evaluation.
struct Blend {
    out: f64,
    budget: f64,
}

impl Blend {
    /// Evaluate `dist` with the budget it must meet for its damped value to
    /// meet ours, then fold the damped value in.
    fn fold<D: Distance<char>>(
        &mut self,
        dist: &D,
        a: &Sequence<'_, char>,
        b: &Sequence<'_, char>,
        scale: f64,
    ) {
        let raw = dist.distance(a, b, Some(1.0 - (1.0 - self.budget) / scale));
        let damped = 1.0 - scale * (1.0 - raw);
        self.out = self.out.min(damped);
        self.budget = self.budget.min(damped);
    }

    fn fold_tokens<D: Distance<char>>(
        &mut self,
        base: &D,
        a: &Sequence<'_, char>,
        b: &Sequence<'_, char>,
        scale: f64,
    ) {
        self.fold(&TokenSort::new(base), a, b, scale);
        self.fold(&TokenSet::new(base), a, b, scale);
    }
}

impl<D: Metric> Metric for TokenMax<D> {
    fn name(&self) -> &'static str {
        "token_max"
    }

    fn is_commutative(&self) -> bool {
        self.inner.is_commutative()
    }

    fn is_normalized(&self) -> bool {
        true
    }
}

impl<D: Distance<char>> Distance<char> for TokenMax<D> {
    fn distance(&self, a: &Sequence<'_, char>, b: &Sequence<'_, char>, max_dist: Option<f64>) -> f64 {
        let max_dist = max_dist.unwrap_or(1.0);
        let (s1, s2) = reorder(a, b);
        let base = &self.inner;

        let out = base.distance(&s1, &s2, Some(max_dist));
        let mut blend = Blend {
            out,
            budget: max_dist.min(out),
        };

        let mut scale = self.config.token_scale;
        if s2.len() as f64 >= self.config.lopsided_ratio * s1.len() as f64 {
            let partial = Partial::new(base);
            let pscale = self.config.partial_scale;
            blend.fold(&partial, &s1, &s2, pscale);
            scale *= pscale;
            blend.fold_tokens(&partial, &s1, &s2, scale);
        } else {
            blend.fold_tokens(base, &s1, &s2, scale);
        }

        if blend.out > max_dist {
            1.0
        } else {
            blend.out
        }
    }

    fn normalized(&self, a: &Sequence<'_, char>, b: &Sequence<'_, char>, max_dist: Option<f64>) -> f64 {
        self.distance(a, b, max_dist)
    }
}
