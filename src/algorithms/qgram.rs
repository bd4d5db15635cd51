//! Q-gram distances
//!
//! Compare sequences by the multiset of their contiguous length-q runs.
//! Profiles are sorted `(q-gram, count)` lists, so two profiles are compared
//! with a single merge pass and can be built once and reused across many
//! comparisons.
//!
//! # Q-gram Size
//!
//! `q` must be at least 1. `new(0)` clamps to 1; `try_new(0)` returns
//! [`Error::InvalidParameter`]. Sequences shorter than `q` have no q-grams,
//! so comparisons involving one fall back to exact equality.

use std::cmp::Ordering;

use super::{Distance, Metric, Sequence, Symbol};
use crate::error::{Error, Result};

/// Sorted q-gram multiset of a sequence, with the source symbols kept.
///
/// Grams are stored as start offsets into the source, so building a profile
/// allocates no per-gram storage.
///
/// # Examples
/// ```
/// use fuzzydist::algorithms::QGramProfile;
///
/// let symbols: Vec<char> = "abab".chars().collect();
/// let profile = QGramProfile::new(&symbols, 2);
/// // "ab" twice, "ba" once
/// assert_eq!(profile.distinct(), 2);
/// assert_eq!(profile.total(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QGramProfile<T> {
    symbols: Vec<T>,
    q: usize,
    /// `(start, count)` sorted by `symbols[start..start + q]`
    grams: Vec<(usize, usize)>,
}

impl<T: Symbol> QGramProfile<T> {
    /// Build the profile of `symbols` for gram size `q` (clamped to at least 1).
    #[must_use]
    pub fn new(symbols: &[T], q: usize) -> Self {
        let q = q.max(1);
        let symbols = symbols.to_vec();

        let mut starts: Vec<usize> = if symbols.len() >= q {
            (0..=symbols.len() - q).collect()
        } else {
            Vec::new()
        };
        starts.sort_by(|&i, &j| symbols[i..i + q].cmp(&symbols[j..j + q]));

        let mut grams: Vec<(usize, usize)> = Vec::new();
        for start in starts {
            match grams.last_mut() {
                Some((first, count)) if symbols[*first..*first + q] == symbols[start..start + q] => {
                    *count += 1;
                }
                _ => grams.push((start, 1)),
            }
        }

        Self { symbols, q, grams }
    }
}

impl<T: Clone> QGramProfile<T> {
    /// The source symbols, borrowed.
    #[must_use]
    pub fn sequence(&self) -> Sequence<'_, T> {
        Sequence::from_slice(&self.symbols)
    }

    #[must_use]
    pub fn q(&self) -> usize {
        self.q
    }

    /// Length of the source sequence in symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Number of distinct q-grams.
    #[must_use]
    pub fn distinct(&self) -> usize {
        self.grams.len()
    }

    /// Number of q-grams counted with multiplicity.
    #[must_use]
    pub fn total(&self) -> usize {
        self.grams.iter().map(|&(_, c)| c).sum()
    }

    /// Whether the source is too short to contain a single q-gram.
    #[inline]
    fn is_short(&self) -> bool {
        self.symbols.len() < self.q
    }

    #[inline]
    fn gram(&self, start: usize) -> &[T] {
        &self.symbols[start..start + self.q]
    }
}

/// Merged statistics of two profiles.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct GramOverlap {
    /// Sum of `|count_a - count_b|` over all grams
    l1: usize,
    /// Sum of `count_a * count_b`
    dot: f64,
    /// Squared norms of the count vectors
    norm_a: f64,
    norm_b: f64,
    /// Distinct grams in each profile and in both
    distinct_a: usize,
    distinct_b: usize,
    shared: usize,
}

fn overlap<T: Symbol>(a: &QGramProfile<T>, b: &QGramProfile<T>) -> GramOverlap {
    let mut out = GramOverlap {
        distinct_a: a.grams.len(),
        distinct_b: b.grams.len(),
        ..GramOverlap::default()
    };

    let (mut i, mut j) = (0, 0);
    while i < a.grams.len() || j < b.grams.len() {
        let order = match (a.grams.get(i), b.grams.get(j)) {
            (Some(&(sa, _)), Some(&(sb, _))) => a.gram(sa).cmp(b.gram(sb)),
            (Some(_), None) => Ordering::Less,
            _ => Ordering::Greater,
        };
        match order {
            Ordering::Less => {
                let ca = a.grams[i].1;
                out.l1 += ca;
                out.norm_a += (ca * ca) as f64;
                i += 1;
            }
            Ordering::Greater => {
                let cb = b.grams[j].1;
                out.l1 += cb;
                out.norm_b += (cb * cb) as f64;
                j += 1;
            }
            Ordering::Equal => {
                let (ca, cb) = (a.grams[i].1, b.grams[j].1);
                out.l1 += ca.abs_diff(cb);
                out.dot += (ca * cb) as f64;
                out.norm_a += (ca * ca) as f64;
                out.norm_b += (cb * cb) as f64;
                out.shared += 1;
                i += 1;
                j += 1;
            }
        }
    }
    out
}

fn check_q(q: usize) -> Result<usize> {
    if q == 0 {
        return Err(Error::InvalidParameter {
            name: "q",
            reason: "q-gram size must be at least 1".to_string(),
        });
    }
    Ok(q)
}

// ============================================================================
// QGram: raw count difference
// ============================================================================

/// Q-gram distance: L1 difference of the q-gram count vectors.
///
/// Raw (not normalized); [`Distance::normalized`] divides by
/// `len1 + len2 - 2q + 2`, the largest count difference two sequences of
/// those lengths can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QGram {
    q: usize,
}

impl Default for QGram {
    fn default() -> Self {
        Self::new(2)
    }
}

impl QGram {
    #[must_use]
    pub fn new(q: usize) -> Self {
        Self { q: q.max(1) }
    }

    pub fn try_new(q: usize) -> Result<Self> {
        check_q(q).map(|q| Self { q })
    }

    #[must_use]
    pub fn q(&self) -> usize {
        self.q
    }

    fn raw<T: Symbol>(&self, a: &QGramProfile<T>, b: &QGramProfile<T>) -> f64 {
        overlap(a, b).l1 as f64
    }

    fn scaled<T: Symbol>(&self, a: &QGramProfile<T>, b: &QGramProfile<T>, max_dist: Option<f64>) -> f64 {
        let out = if a.is_short() || b.is_short() {
            f64::from(u8::from(a.symbols != b.symbols))
        } else {
            let denom = a.len() + b.len() + 2 - 2 * self.q;
            overlap(a, b).l1 as f64 / denom as f64
        };
        if out > max_dist.unwrap_or(1.0) {
            1.0
        } else {
            out
        }
    }
}

impl Metric for QGram {
    fn name(&self) -> &'static str {
        "qgram"
    }

    fn is_normalized(&self) -> bool {
        false
    }

    fn qgram_size(&self) -> Option<usize> {
        Some(self.q)
    }
}

impl<T: Symbol> Distance<T> for QGram {
    fn distance(&self, a: &Sequence<'_, T>, b: &Sequence<'_, T>, _max_dist: Option<f64>) -> f64 {
        self.raw(&QGramProfile::new(a, self.q), &QGramProfile::new(b, self.q))
    }

    fn normalized(&self, a: &Sequence<'_, T>, b: &Sequence<'_, T>, max_dist: Option<f64>) -> f64 {
        self.scaled(&QGramProfile::new(a, self.q), &QGramProfile::new(b, self.q), max_dist)
    }

    fn profile_distance(&self, a: &QGramProfile<T>, b: &QGramProfile<T>, max_dist: Option<f64>) -> f64 {
        if a.q != self.q || b.q != self.q {
            return self.distance(&a.sequence(), &b.sequence(), max_dist);
        }
        self.raw(a, b)
    }

    fn profile_normalized(&self, a: &QGramProfile<T>, b: &QGramProfile<T>, max_dist: Option<f64>) -> f64 {
        if a.q != self.q || b.q != self.q {
            return self.normalized(&a.sequence(), &b.sequence(), max_dist);
        }
        self.scaled(a, b, max_dist)
    }
}

// ============================================================================
// Normalized q-gram distances
// ============================================================================

macro_rules! normalized_qgram {
    ($(#[$doc:meta])* $ty:ident, $name:literal, |$o:ident| $score:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $ty {
            q: usize,
        }

        impl Default for $ty {
            fn default() -> Self {
                Self::new(2)
            }
        }

        impl $ty {
            /// Create with gram size `q`, clamped to at least 1.
            #[must_use]
            pub fn new(q: usize) -> Self {
                Self { q: q.max(1) }
            }

            /// Create with gram size `q`, rejecting 0.
            pub fn try_new(q: usize) -> Result<Self> {
                check_q(q).map(|q| Self { q })
            }

            #[must_use]
            pub fn q(&self) -> usize {
                self.q
            }

            fn score<T: Symbol>(&self, a: &QGramProfile<T>, b: &QGramProfile<T>) -> f64 {
                if a.is_short() || b.is_short() {
                    return f64::from(u8::from(a.symbols != b.symbols));
                }
                let $o = overlap(a, b);
                ($score).clamp(0.0, 1.0)
            }
        }

        impl Metric for $ty {
            fn name(&self) -> &'static str {
                $name
            }

            fn qgram_size(&self) -> Option<usize> {
                Some(self.q)
            }
        }

        impl<T: Symbol> Distance<T> for $ty {
            fn distance(&self, a: &Sequence<'_, T>, b: &Sequence<'_, T>, _max_dist: Option<f64>) -> f64 {
                self.score(&QGramProfile::new(a, self.q), &QGramProfile::new(b, self.q))
            }

            fn profile_distance(&self, a: &QGramProfile<T>, b: &QGramProfile<T>, max_dist: Option<f64>) -> f64 {
                if a.q != self.q || b.q != self.q {
                    return self.distance(&a.sequence(), &b.sequence(), max_dist);
                }
                self.score(a, b)
            }

            fn profile_normalized(&self, a: &QGramProfile<T>, b: &QGramProfile<T>, max_dist: Option<f64>) -> f64 {
                let out = self.profile_distance(a, b, max_dist);
                if out > max_dist.unwrap_or(1.0) {
                    1.0
                } else {
                    out
                }
            }
        }
    };
}

normalized_qgram!(
    /// Cosine distance between q-gram count vectors.
    Cosine,
    "cosine",
    |o| 1.0 - o.dot / (o.norm_a.sqrt() * o.norm_b.sqrt())
);

normalized_qgram!(
    /// Jaccard distance between q-gram sets: `1 - |A ∩ B| / |A ∪ B|`.
    Jaccard,
    "jaccard",
    |o| 1.0 - o.shared as f64 / (o.distinct_a + o.distinct_b - o.shared) as f64
);

normalized_qgram!(
    /// Sørensen-Dice distance between q-gram sets: `1 - 2|A ∩ B| / (|A| + |B|)`.
    SorensenDice,
    "sorensen_dice",
    |o| 1.0 - 2.0 * o.shared as f64 / (o.distinct_a + o.distinct_b) as f64
);

normalized_qgram!(
    /// Overlap distance between q-gram sets: `1 - |A ∩ B| / min(|A|, |B|)`.
    Overlap,
    "overlap",
    |o| 1.0 - o.shared as f64 / o.distinct_a.min(o.distinct_b) as f64
);
