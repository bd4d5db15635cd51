//! Levenshtein distance over symbol slices
//!
//! Insertions, deletions and substitutions all cost 1. Two code paths:
//! - Myers bit-parallel algorithm for patterns up to 64 symbols
//! - Single-row DP fallback for longer patterns
//! - Early termination with a max distance budget
//! - Generic over any symbol type (code points, graphemes, bytes, tokens)

use super::{bounded_count, normalized_count, Distance, Metric, Sequence, Symbol};
use ahash::AHashMap;
use smallvec::SmallVec;

/// Longest pattern that fits one `u64` column in the bit-parallel path
const MYERS_BLOCK_SIZE: usize = 64;

// ============================================================================
// Myers Bit-Parallel Algorithm
// ============================================================================

/// Per-symbol match masks: bit `i` set where `pattern[i] == symbol`.
#[inline]
fn pattern_masks<T: Symbol>(pattern: &[T]) -> AHashMap<&T, u64> {
    let mut peq: AHashMap<&T, u64> = AHashMap::with_capacity(pattern.len().min(26));
    for (i, c) in pattern.iter().enumerate() {
        *peq.entry(c).or_insert(0) |= 1u64 << i;
    }
    peq
}

/// Myers bit-parallel Levenshtein distance for patterns up to 64 symbols.
///
/// Based on: Myers, G. (1999). "A fast bit-vector algorithm for approximate string matching"
///
/// With a `max_distance`, gives up as soon as the remaining text can no
/// longer bring the score back under the threshold.
#[inline]
fn myers_64<T: Symbol>(pattern: &[T], text: &[T], max_distance: Option<usize>) -> Option<usize> {
    let m = pattern.len();
    let n = text.len();
    debug_assert!(m > 0 && m <= MYERS_BLOCK_SIZE);

    let peq = pattern_masks(pattern);

    // Vp = all 1s (vertical positive), Vn = all 0s (vertical negative)
    let mut vp: u64 = !0u64;
    let mut vn: u64 = 0u64;
    let mut score = m;

    let mask = 1u64 << (m - 1);

    for (j, tc) in text.iter().enumerate() {
        let eq = peq.get(tc).copied().unwrap_or(0);

        let xv = eq | vn;
        let eq_and_vp = eq & vp;
        let xh = ((eq_and_vp.wrapping_add(vp)) ^ vp) | eq;

        let hp = vn | !(xh | vp);
        let hn = vp & xh;

        if (hp & mask) != 0 {
            score += 1;
        } else if (hn & mask) != 0 {
            score -= 1;
        }

        if let Some(threshold) = max_distance {
            // Each remaining text symbol lowers the score by at most one
            let remaining = n - j - 1;
            if score > threshold + remaining {
                return None;
            }
        }

        // First row is 0,1,2,3... so bit 0 of hp is always set
        let hp_shifted = (hp << 1) | 1;
        let hn_shifted = hn << 1;

        vp = hn_shifted | !(xv | hp_shifted);
        vn = hp_shifted & xv;
    }

    match max_distance {
        Some(threshold) if score > threshold => None,
        _ => Some(score),
    }
}

/// Standard single-row DP distance with optional threshold (fallback for long patterns)
#[inline]
fn dp_distance<T: PartialEq>(target: &[T], source: &[T], max_distance: Option<usize>) -> Option<usize> {
    let n_target = target.len();

    let mut row: SmallVec<[usize; 64]> = (0..=n_target).collect();

    for (i, sc) in source.iter().enumerate() {
        let mut prev = row[0];
        row[0] = i + 1;
        let mut row_min = row[0];

        for j in 0..n_target {
            let cost = usize::from(*sc != target[j]);
            let deletion = row[j + 1] + 1;
            let insertion = row[j] + 1;
            let substitution = prev + cost;

            prev = row[j + 1];
            let cell = substitution.min(deletion).min(insertion);
            row[j + 1] = cell;
            row_min = row_min.min(cell);
        }

        if let Some(max_d) = max_distance {
            if row_min > max_d {
                return None;
            }
        }
    }

    let result = row[n_target];
    match max_distance {
        Some(max_d) if result > max_d => None,
        _ => Some(result),
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Unit-cost edit distance.
///
/// Native unit is the edit count; [`Distance::normalized`] divides by the
/// longer length.
///
/// # Complexity
/// - Time: O(⌈m/64⌉n) for patterns <= 64 symbols, O(m*n) otherwise
/// - Space: O(min(m,n))
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Levenshtein;

impl Levenshtein {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Metric for Levenshtein {
    fn name(&self) -> &'static str {
        "levenshtein"
    }

    fn is_normalized(&self) -> bool {
        false
    }
}

impl<T: Symbol> Distance<T> for Levenshtein {
    fn distance(&self, a: &Sequence<'_, T>, b: &Sequence<'_, T>, max_dist: Option<f64>) -> f64 {
        bounded_count(max_dist, |budget| levenshtein_bounded(a, b, budget))
    }

    fn normalized(&self, a: &Sequence<'_, T>, b: &Sequence<'_, T>, max_dist: Option<f64>) -> f64 {
        normalized_count(a.len().max(b.len()), max_dist, |budget| {
            levenshtein_bounded(a, b, budget)
        })
    }
}

/// Edit distance, or `None` once it is certain to exceed `max_distance`.
///
/// The shorter input becomes the pattern; patterns of up to 64 symbols take
/// the bit-parallel path.
///
/// # Example
/// ```
/// use fuzzydist::algorithms::levenshtein::levenshtein_bounded;
///
/// let a: Vec<char> = "kitten".chars().collect();
/// let b: Vec<char> = "sitting".chars().collect();
/// assert_eq!(levenshtein_bounded(&a, &b, None), Some(3));
/// assert_eq!(levenshtein_bounded(&a, &b, Some(2)), None);
/// ```
#[inline]
#[must_use]
pub fn levenshtein_bounded<T: Symbol>(a: &[T], b: &[T], max_distance: Option<usize>) -> Option<usize> {
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

    // Shorter input as pattern: Myers is O(⌈m/64⌉n)
    let (pattern, text) = if m <= n { (a, b) } else { (b, a) };

    if pattern.len() <= MYERS_BLOCK_SIZE {
        myers_64(pattern, text, max_distance)
    } else {
        dp_distance(pattern, text, max_distance)
    }
}

/// Unbounded edit distance.
#[inline]
#[must_use]
pub fn levenshtein<T: Symbol>(a: &[T], b: &[T]) -> usize {
    // Never fails without a threshold
    levenshtein_bounded(a, b, None).unwrap_or(0)
}
