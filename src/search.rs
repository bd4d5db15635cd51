//! Lookup of a query among candidate strings.
//!
//! Scores are similarities in `[0, 1]` as returned by
//! [`TextDistance::compare`]. Absent candidates are skipped.
//!
//! [`TextDistance::compare`]: crate::algorithms::TextDistance::compare

use rayon::prelude::*;
use serde::Serialize;

use crate::algorithms::{Distance, Sequence};
use crate::pairwise::{MaybeText, PARALLEL_THRESHOLD};

/// A scored candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match {
    /// Position in the candidate list
    pub index: usize,
    pub text: String,
    /// Similarity to the query, `1 - normalized distance`
    pub score: f64,
}

/// Similarity of every present candidate scoring at least `min_score`,
/// in candidate order.
fn score_all<D, S>(query: &str, candidates: &[S], dist: &D, min_score: f64) -> Vec<(usize, f64)>
where
    D: Distance<char> + ?Sized,
    S: MaybeText,
{
    let query = Sequence::from_text(query);
    let budget = Some(1.0 - min_score);
    let score = |(i, candidate): (usize, &S)| {
        let text = candidate.as_text()?;
        let sim = 1.0 - dist.normalized(&query, &Sequence::from_text(text), budget);
        (sim >= min_score).then_some((i, sim))
    };

    if candidates.len() >= PARALLEL_THRESHOLD {
        candidates.par_iter().enumerate().filter_map(score).collect()
    } else {
        candidates.iter().enumerate().filter_map(score).collect()
    }
}

fn to_match<S: MaybeText>(candidates: &[S], (index, score): (usize, f64)) -> Option<Match> {
    Some(Match {
        index,
        text: candidates[index].as_text()?.to_string(),
        score,
    })
}

/// Best candidate for `query`, or `None` if nothing scores at least `min_score`.
///
/// Ties go to the earliest candidate.
///
/// # Examples
/// ```
/// use fuzzydist::algorithms::Levenshtein;
/// use fuzzydist::search::find_nearest;
///
/// let best = find_nearest("appel", &["apple", "banana", "grape"], &Levenshtein, 0.5).unwrap();
/// assert_eq!(best.text, "apple");
/// ```
pub fn find_nearest<D, S>(query: &str, candidates: &[S], dist: &D, min_score: f64) -> Option<Match>
where
    D: Distance<char> + ?Sized,
    S: MaybeText,
{
    let best = score_all(query, candidates, dist, min_score)
        .into_iter()
        .fold(None, |best: Option<(usize, f64)>, (i, score)| match best {
            Some((_, top)) if top >= score => best,
            _ => Some((i, score)),
        })?;
    to_match(candidates, best)
}

/// Indices of every candidate scoring at least `min_score`, ascending.
pub fn find_all<D, S>(query: &str, candidates: &[S], dist: &D, min_score: f64) -> Vec<usize>
where
    D: Distance<char> + ?Sized,
    S: MaybeText,
{
    score_all(query, candidates, dist, min_score)
        .into_iter()
        .map(|(i, _)| i)
        .collect()
}

/// Up to `limit` best candidates, highest score first.
///
/// Equal scores keep candidate order.
pub fn extract<D, S>(query: &str, candidates: &[S], dist: &D, limit: usize, min_score: f64) -> Vec<Match>
where
    D: Distance<char> + ?Sized,
    S: MaybeText,
{
    let mut scored = score_all(query, candidates, dist, min_score);
    scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    scored.truncate(limit);
    scored
        .into_iter()
        .filter_map(|hit| to_match(candidates, hit))
        .collect()
}
