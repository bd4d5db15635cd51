//! Jaro and Jaro-Winkler distances
//!
//! Similarity from symbols matched within a sliding window, penalized by
//! transpositions. Jaro-Winkler adds a bonus for a shared prefix.
//!
//! Both are normalized: the distance is `1 - similarity`.

use super::{Distance, Metric, Sequence, Symbol};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// `1 - jaro_similarity`. Ignores the budget; a single pass is already
/// O(m*n) with O(m+n) flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Jaro;

impl Jaro {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Metric for Jaro {
    fn name(&self) -> &'static str {
        "jaro"
    }
}

impl<T: Symbol> Distance<T> for Jaro {
    fn distance(&self, a: &Sequence<'_, T>, b: &Sequence<'_, T>, _max_dist: Option<f64>) -> f64 {
        1.0 - jaro_similarity(a, b)
    }
}

/// Prefix bonus settings for [`JaroWinkler`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JaroWinklerConfig {
    /// Bonus per shared prefix symbol, clamped to `[0, 0.25]`
    pub prefix_weight: f64,
    /// Jaro similarity above which the prefix boost applies
    pub boost_threshold: f64,
    /// Longest prefix that earns a bonus
    pub max_prefix_length: usize,
}

impl Default for JaroWinklerConfig {
    fn default() -> Self {
        Self {
            prefix_weight: 0.1,
            boost_threshold: 0.7,
            max_prefix_length: 4,
        }
    }
}

/// Jaro with a prefix bonus.
///
/// Extends Jaro by boosting pairs that share a prefix, once their Jaro
/// similarity is above `boost_threshold`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JaroWinkler {
    config: JaroWinklerConfig,
}

impl Default for JaroWinkler {
    fn default() -> Self {
        Self::from_config(JaroWinklerConfig::default())
    }
}

impl JaroWinkler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from configuration. `prefix_weight` is clamped to `[0, 0.25]`
    /// so the similarity stays within `[0, 1]`.
    #[must_use]
    pub fn from_config(config: JaroWinklerConfig) -> Self {
        let prefix_weight = config.prefix_weight.clamp(0.0, 0.25);
        if prefix_weight != config.prefix_weight {
            tracing::warn!(
                requested = config.prefix_weight,
                clamped = prefix_weight,
                "jaro-winkler prefix weight clamped to [0.0, 0.25]"
            );
        }
        Self {
            config: JaroWinklerConfig {
                prefix_weight,
                ..config
            },
        }
    }

    #[must_use]
    pub fn config(&self) -> JaroWinklerConfig {
        self.config
    }
}

impl Metric for JaroWinkler {
    fn name(&self) -> &'static str {
        "jaro_winkler"
    }
}

impl<T: Symbol> Distance<T> for JaroWinkler {
    fn distance(&self, a: &Sequence<'_, T>, b: &Sequence<'_, T>, _max_dist: Option<f64>) -> f64 {
        1.0 - jaro_winkler_similarity(a, b, &self.config)
    }
}

/// Jaro similarity between two symbol slices, in `[0, 1]`.
#[must_use]
pub fn jaro_similarity<T: PartialEq>(a: &[T], b: &[T]) -> f64 {
    if a == b {
        return 1.0;
    }

    let a_len = a.len();
    let b_len = b.len();

    if a_len == 0 || b_len == 0 {
        return 0.0;
    }

    // Match window
    let match_distance = (a_len.max(b_len) / 2).saturating_sub(1);

    let mut a_matched: SmallVec<[bool; 64]> = smallvec::smallvec![false; a_len];
    let mut b_matched: SmallVec<[bool; 64]> = smallvec::smallvec![false; b_len];

    let mut matches = 0usize;
    let mut transpositions = 0usize;

    for i in 0..a_len {
        let start = i.saturating_sub(match_distance);
        let end = (i + match_distance + 1).min(b_len);

        for j in start..end {
            if b_matched[j] || a[i] != b[j] {
                continue;
            }
            a_matched[i] = true;
            b_matched[j] = true;
            matches += 1;
            break;
        }
    }

    if matches == 0 {
        return 0.0;
    }

    // Matched symbols out of order, counted in pairs
    let mut k = 0usize;
    for i in 0..a_len {
        if !a_matched[i] {
            continue;
        }
        while k < b_len && !b_matched[k] {
            k += 1;
        }
        if k >= b_len {
            break;
        }
        if a[i] != b[k] {
            transpositions += 1;
        }
        k += 1;
    }

    let m = matches as f64;
    let t = (transpositions / 2) as f64;
    (m / a_len as f64 + m / b_len as f64 + (m - t) / m) / 3.0
}

/// Jaro-Winkler similarity with explicit parameters, in `[0, 1]`.
#[must_use]
pub fn jaro_winkler_similarity<T: PartialEq>(a: &[T], b: &[T], config: &JaroWinklerConfig) -> f64 {
    let jaro_sim = jaro_similarity(a, b);
    if jaro_sim <= config.boost_threshold {
        return jaro_sim;
    }

    let prefix_len = a
        .iter()
        .zip(b.iter())
        .take(config.max_prefix_length)
        .take_while(|(ac, bc)| ac == bc)
        .count();

    let prefix_weight = config.prefix_weight.clamp(0.0, 0.25);
    jaro_sim + (prefix_len as f64 * prefix_weight * (1.0 - jaro_sim))
}
