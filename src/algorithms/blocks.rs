//! Matching blocks between two sequences.
//!
//! Finds the longest common contiguous run, then recurses independently on
//! the regions before and after it. The result is the set of maximal,
//! aligned, non-overlapping runs the Ratcliff-Obershelp score is built on.
//!
//! The recursion is driven by an explicit stack of pending ranges, so deep
//! inputs never grow the call stack, and the two DP rows used by the scan
//! are allocated once per invocation.
//!
//! # Complexity
//! - Time: O(m*n) per scanned window, O(b*m*n) worst case for b blocks
//! - Space: O(n) scan buffer plus the pending ranges

use serde::{Deserialize, Serialize};

/// A run where `s1[start1..start1 + len] == s2[start2..start2 + len]`.
///
/// Coordinates are 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MatchBlock {
    pub start1: usize,
    pub start2: usize,
    pub len: usize,
}

/// Matching blocks over the whole of both sequences, ordered by position.
///
/// # Examples
/// ```
/// use fuzzydist::algorithms::{matching_blocks, MatchBlock};
///
/// let a: Vec<char> = "abxcd".chars().collect();
/// let b: Vec<char> = "abcd".chars().collect();
/// assert_eq!(
///     matching_blocks(&a, &b),
///     vec![
///         MatchBlock { start1: 0, start2: 0, len: 2 },
///         MatchBlock { start1: 3, start2: 2, len: 2 },
///     ]
/// );
/// ```
#[must_use]
pub fn matching_blocks<T: PartialEq>(s1: &[T], s2: &[T]) -> Vec<MatchBlock> {
    matching_blocks_in(s1, s2, 0, 0, s1.len(), s2.len())
}

/// Matching blocks restricted to `s1[start1..end1]` and `s2[start2..end2]`.
///
/// Blocks are disjoint in both sequences and returned in increasing order of
/// `start1` (and therefore of `start2`).
///
/// # Panics
/// Panics if a range end exceeds its sequence length.
#[must_use]
pub fn matching_blocks_in<T: PartialEq>(
    s1: &[T],
    s2: &[T],
    start1: usize,
    start2: usize,
    end1: usize,
    end2: usize,
) -> Vec<MatchBlock> {
    assert!(end1 <= s1.len() && end2 <= s2.len(), "range out of bounds");

    let mut blocks = Vec::new();
    let mut scan = RunScan::new(end2.saturating_sub(start2));
    let mut pending = vec![(start1, start2, end1, end2)];

    while let Some((lo1, lo2, hi1, hi2)) = pending.pop() {
        let Some(block) = scan.longest(s1, s2, lo1, lo2, hi1, hi2) else {
            continue;
        };
        blocks.push(block);
        // Both sub-ranges exclude the block, so every range strictly shrinks
        pending.push((block.start1 + block.len, block.start2 + block.len, hi1, hi2));
        pending.push((lo1, lo2, block.start1, block.start2));
    }

    blocks.sort_unstable();
    blocks
}

/// Total number of matched symbols across all matching blocks.
#[inline]
#[must_use]
pub fn matched_len<T: PartialEq>(s1: &[T], s2: &[T]) -> usize {
    matching_blocks(s1, s2).iter().map(|b| b.len).sum()
}

/// Reusable rows for the longest-run scan.
///
/// `prev[j + 1]` holds the length of the run ending at `s2[lo2 + j]` and the
/// previous symbol of `s1`.
struct RunScan {
    prev: Vec<usize>,
    curr: Vec<usize>,
}

impl RunScan {
    fn new(width: usize) -> Self {
        Self {
            prev: vec![0; width + 1],
            curr: vec![0; width + 1],
        }
    }

    /// Longest common run inside the window, `None` if there is none.
    ///
    /// Ties keep the first run found in scan order: earliest in `s1`,
    /// then earliest in `s2`.
    fn longest<T: PartialEq>(
        &mut self,
        s1: &[T],
        s2: &[T],
        lo1: usize,
        lo2: usize,
        hi1: usize,
        hi2: usize,
    ) -> Option<MatchBlock> {
        if lo1 >= hi1 || lo2 >= hi2 {
            return None;
        }

        let width = hi2 - lo2;
        let limit = (hi1 - lo1).min(width);
        self.prev[..=width].fill(0);
        self.curr[0] = 0;

        let mut best = MatchBlock {
            start1: lo1,
            start2: lo2,
            len: 0,
        };

        for i in lo1..hi1 {
            for j in 0..width {
                self.curr[j + 1] = if s1[i] == s2[lo2 + j] {
                    let run = self.prev[j] + 1;
                    if run > best.len {
                        best = MatchBlock {
                            start1: i + 1 - run,
                            start2: lo2 + j + 1 - run,
                            len: run,
                        };
                    }
                    run
                } else {
                    0
                };
            }
            if best.len == limit {
                break;
            }
            std::mem::swap(&mut self.prev, &mut self.curr);
        }

        (best.len > 0).then_some(best)
    }
}
