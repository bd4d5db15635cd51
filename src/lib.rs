//! fuzzydist - composable string distances
//!
//! Base string metrics, modifiers that adapt them to multi-word text, and a
//! parallel engine for distance matrices.
//!
//! # Features
//! - Edit distances (Hamming, Levenshtein, OSA, Damerau-Levenshtein),
//!   Jaro/Jaro-Winkler, Ratcliff-Obershelp and the q-gram family
//! - Modifiers that nest freely: [`Partial`], [`TokenSort`], [`TokenSet`],
//!   [`TokenMax`], [`Normalized`]
//! - Early termination through a `max_dist` budget
//! - Generic over symbols: code points, grapheme clusters, bytes or tokens
//! - Parallel pairwise matrices and nearest-match search
//!
//! # Example
//! ```
//! use fuzzydist::{Levenshtein, RatcliffObershelp, TextDistance, TokenMax, TokenSort};
//!
//! let a = "New York Mets vs Atlanta Braves";
//! let b = "Atlanta Braves vs New York Mets";
//! assert_eq!(TokenSort::new(Levenshtein).evaluate(a, b), 0.0);
//! assert!(TokenMax::new(RatcliffObershelp).compare(a, b, 0.0) > 0.9);
//! ```

pub mod algorithms;
pub mod error;
pub mod modifiers;
pub mod pairwise;
pub mod search;

pub use algorithms::{
    Cosine, DamerauLevenshtein, Distance, Hamming, Jaccard, Jaro, JaroWinkler, JaroWinklerConfig,
    Levenshtein, MatchBlock, Metric, OptimalStringAlignment, Overlap, PartialStrategy, QGram,
    QGramProfile, RatcliffObershelp, Sequence, SorensenDice, Symbol, TextDistance,
};
pub use error::{Error, Result};
pub use modifiers::{Normalized, Partial, TokenMax, TokenMaxConfig, TokenSet, TokenSort};
pub use pairwise::{pairwise, pairwise_into, DistanceMatrix, MaybeText, PairwiseOptions, Preprocess};
pub use search::{extract, find_all, find_nearest, Match};
