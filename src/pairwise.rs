//! Distance matrices over collections of strings.
//!
//! Every element is decomposed once up front (and profiled once for q-gram
//! metrics when preprocessing applies). Rows are then filled in order, with
//! the cells of each row computed in parallel. Every task writes a distinct
//! cell of the row slice it was handed, so no locking is involved.

use std::ops::Index;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::algorithms::{Distance, QGramProfile, Sequence};
use crate::error::{Error, Result};

/// Minimum number of items for parallel processing.
///
/// Below it, thread pool coordination costs more than the comparisons.
pub const PARALLEL_THRESHOLD: usize = 100;

/// Collections at least this long are profiled under [`Preprocess::Auto`].
pub const AUTO_PREPROCESS_MIN: usize = 5;

/// An input that is either text or absent.
pub trait MaybeText: Sync {
    fn as_text(&self) -> Option<&str>;
}

impl MaybeText for &str {
    fn as_text(&self) -> Option<&str> {
        Some(*self)
    }
}

impl MaybeText for String {
    fn as_text(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl MaybeText for Option<&str> {
    fn as_text(&self) -> Option<&str> {
        *self
    }
}

impl MaybeText for Option<String> {
    fn as_text(&self) -> Option<&str> {
        self.as_deref()
    }
}

/// When to convert elements into q-gram profiles before filling the matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preprocess {
    /// Profile a collection once it has at least [`AUTO_PREPROCESS_MIN`] elements
    #[default]
    Auto,
    Always,
    Never,
}

/// Options for [`pairwise`] and [`pairwise_into`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PairwiseOptions {
    pub preprocess: Preprocess,
    /// Rows (and collections being preprocessed) shorter than this are
    /// handled on the calling thread
    pub parallel_threshold: usize,
}

impl Default for PairwiseOptions {
    fn default() -> Self {
        Self {
            preprocess: Preprocess::Auto,
            parallel_threshold: PARALLEL_THRESHOLD,
        }
    }
}

impl PairwiseOptions {
    #[must_use]
    pub fn with_preprocess(mut self, preprocess: Preprocess) -> Self {
        self.preprocess = preprocess;
        self
    }

    #[must_use]
    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }
}

/// Row-major matrix of distances; a cell is `None` when either input was absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceMatrix {
    rows: usize,
    cols: usize,
    data: Vec<Option<f64>>,
}

impl DistanceMatrix {
    /// A `rows x cols` matrix with every cell `None`.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![None; rows * cols],
        }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Cell `(i, j)`; `None` if absent or out of range.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.rows && j < self.cols {
            self.data[i * self.cols + j]
        } else {
            None
        }
    }

    /// Row `i` as a slice.
    ///
    /// # Panics
    /// Panics if `i >= rows`.
    #[must_use]
    pub fn row(&self, i: usize) -> &[Option<f64>] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// All cells in row-major order.
    #[must_use]
    pub fn as_slice(&self) -> &[Option<f64>] {
        &self.data
    }

    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        self.rows == self.cols
            && (0..self.rows).all(|i| (i + 1..self.cols).all(|j| self[(i, j)] == self[(j, i)]))
    }

    #[must_use]
    pub fn transpose(&self) -> Self {
        let mut out = Self::new(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                out.data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }
        out
    }

    fn row_mut(&mut self, i: usize) -> &mut [Option<f64>] {
        &mut self.data[i * self.cols..(i + 1) * self.cols]
    }
}

impl Index<(usize, usize)> for DistanceMatrix {
    type Output = Option<f64>;

    fn index(&self, (i, j): (usize, usize)) -> &Option<f64> {
        assert!(i < self.rows && j < self.cols, "cell ({i}, {j}) out of range");
        &self.data[i * self.cols + j]
    }
}

/// Distance matrix between `xs` and `ys` (or `xs` with itself).
///
/// `R[(i, j)]` is `dist.distance(xs[i], ys[j])` without a budget, or `None`
/// when either element is absent. When `ys` is `None` (or the same slice as
/// `xs`) and the distance is commutative, only the upper triangle is computed
/// and mirrored.
///
/// # Examples
/// ```
/// use fuzzydist::algorithms::Levenshtein;
/// use fuzzydist::pairwise::{pairwise, PairwiseOptions};
///
/// let names = ["martha", "marhta", "martin"];
/// let m = pairwise(&Levenshtein, &names, None, &PairwiseOptions::default());
/// assert_eq!(m.shape(), (3, 3));
/// assert_eq!(m[(0, 1)], Some(2.0));
/// assert!(m.is_symmetric());
/// ```
#[must_use]
pub fn pairwise<D, S>(dist: &D, xs: &[S], ys: Option<&[S]>, options: &PairwiseOptions) -> DistanceMatrix
where
    D: Distance<char> + ?Sized,
    S: MaybeText,
{
    let cols = ys.map_or(xs.len(), <[S]>::len);
    let mut out = DistanceMatrix::new(xs.len(), cols);
    fill(&mut out, dist, xs, ys, options);
    out
}

/// Fill a caller-supplied matrix; see [`pairwise`].
///
/// Fails with [`Error::DimensionMismatch`] before touching any cell if `out`
/// is not `len(xs) x len(ys)`.
pub fn pairwise_into<D, S>(
    out: &mut DistanceMatrix,
    dist: &D,
    xs: &[S],
    ys: Option<&[S]>,
    options: &PairwiseOptions,
) -> Result<()>
where
    D: Distance<char> + ?Sized,
    S: MaybeText,
{
    let expected = (xs.len(), ys.map_or(xs.len(), <[S]>::len));
    if out.shape() != expected {
        return Err(Error::DimensionMismatch {
            expected,
            actual: out.shape(),
        });
    }
    fill(out, dist, xs, ys, options);
    Ok(())
}

/// An element after its one-time conversion.
enum Prepared {
    Absent,
    Symbols(Sequence<'static, char>),
    Profile(QGramProfile<char>),
}

impl Prepared {
    fn new<S: MaybeText>(item: &S, q: Option<usize>) -> Self {
        match (item.as_text(), q) {
            (None, _) => Self::Absent,
            (Some(text), None) => Self::Symbols(Sequence::from_text(text)),
            (Some(text), Some(q)) => {
                let symbols: Vec<char> = text.chars().collect();
                Self::Profile(QGramProfile::new(&symbols, q))
            }
        }
    }

    fn sequence(&self) -> Option<Sequence<'_, char>> {
        match self {
            Self::Absent => None,
            Self::Symbols(seq) => Some(seq.view()),
            Self::Profile(profile) => Some(profile.sequence()),
        }
    }

    fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

fn evaluate<D: Distance<char> + ?Sized>(dist: &D, a: &Prepared, b: &Prepared) -> Option<f64> {
    match (a, b) {
        (Prepared::Profile(pa), Prepared::Profile(pb)) => Some(dist.profile_distance(pa, pb, None)),
        _ => Some(dist.distance(&a.sequence()?, &b.sequence()?, None)),
    }
}

/// Gram size to profile a collection of `len` elements with, if any.
fn profile_size<D: Distance<char> + ?Sized>(dist: &D, len: usize, preprocess: Preprocess) -> Option<usize> {
    let q = dist.qgram_size()?;
    match preprocess {
        Preprocess::Always => Some(q),
        Preprocess::Auto if len >= AUTO_PREPROCESS_MIN => Some(q),
        Preprocess::Auto | Preprocess::Never => None,
    }
}

fn prepare<D, S>(dist: &D, items: &[S], options: &PairwiseOptions) -> Vec<Prepared>
where
    D: Distance<char> + ?Sized,
    S: MaybeText,
{
    let q = profile_size(dist, items.len(), options.preprocess);
    debug!(
        items = items.len(),
        profiled = q.is_some(),
        metric = dist.name(),
        "preparing collection"
    );
    if items.len() >= options.parallel_threshold {
        items.par_iter().map(|item| Prepared::new(item, q)).collect()
    } else {
        items.iter().map(|item| Prepared::new(item, q)).collect()
    }
}

/// Set every cell of `cells` to `cell(k)`, in parallel for long slices.
fn sweep<F>(cells: &mut [Option<f64>], threshold: usize, cell: F)
where
    F: Fn(usize) -> Option<f64> + Send + Sync,
{
    if cells.len() >= threshold {
        cells
            .par_iter_mut()
            .enumerate()
            .for_each(|(k, slot)| *slot = cell(k));
    } else {
        for (k, slot) in cells.iter_mut().enumerate() {
            *slot = cell(k);
        }
    }
}

fn fill<D, S>(out: &mut DistanceMatrix, dist: &D, xs: &[S], ys: Option<&[S]>, options: &PairwiseOptions)
where
    D: Distance<char> + ?Sized,
    S: MaybeText,
{
    let same_input = ys.map_or(true, |ys| std::ptr::eq(xs, ys));
    let symmetric = same_input && dist.is_commutative();
    debug!(
        rows = out.rows(),
        cols = out.cols(),
        symmetric,
        metric = dist.name(),
        "computing pairwise distances"
    );

    let px = prepare(dist, xs, options);
    if symmetric {
        fill_symmetric(out, dist, &px, options.parallel_threshold);
        return;
    }

    let py_owned;
    let py: &[Prepared] = match ys {
        Some(ys) if !same_input => {
            py_owned = prepare(dist, ys, options);
            &py_owned
        }
        _ => &px,
    };
    for (i, x) in px.iter().enumerate() {
        sweep(out.row_mut(i), options.parallel_threshold, |j| {
            evaluate(dist, x, &py[j])
        });
        trace!(row = i, cells = py.len(), "row computed");
    }
}

/// Upper triangle row by row, then mirror. Diagonal cells never call the metric.
fn fill_symmetric<D>(out: &mut DistanceMatrix, dist: &D, items: &[Prepared], threshold: usize)
where
    D: Distance<char> + ?Sized,
{
    let n = items.len();
    for (i, x) in items.iter().enumerate() {
        let row = out.row_mut(i);
        row[i] = (!x.is_absent()).then_some(0.0);
        sweep(&mut row[i + 1..], threshold, |k| {
            evaluate(dist, x, &items[i + 1 + k])
        });
        trace!(row = i, cells = n - i - 1, "row computed");
    }

    for i in 0..n {
        for j in i + 1..n {
            out.data[j * n + i] = out.data[i * n + j];
        }
    }
}
