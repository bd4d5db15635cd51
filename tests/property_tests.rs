//! Property-based tests for the matcher, modifiers and pairwise engine.
//!
//! Reference implementations here are deliberately naive: brute-force window
//! scans and cell-by-cell matrices.

use fuzzydist::algorithms::{
    matching_blocks, Jaro, Levenshtein, RatcliffObershelp, Sequence, TextDistance,
};
use fuzzydist::modifiers::{Normalized, Partial, TokenMax, TokenSet, TokenSort};
use fuzzydist::pairwise::{pairwise, PairwiseOptions};
use fuzzydist::Distance;
use proptest::prelude::*;

/// Minimum distance over every equal-length window, without budgets.
fn partial_reference<D: Distance<char>>(dist: &D, a: &str, b: &str) -> f64 {
    let (a, b) = (Sequence::from(a), Sequence::from(b));
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    if short.len() == long.len() || short.is_empty() {
        return dist.distance(&short, &long, None);
    }
    (0..=long.len() - short.len())
        .map(|s| dist.distance(&short, &long.window(s, s + short.len()), None))
        .fold(f64::INFINITY, f64::min)
}

/// Short strings over a small alphabet, so matches are common.
fn word() -> impl Strategy<Value = String> {
    "[abc ]{0,12}"
}

fn phrase() -> impl Strategy<Value = String> {
    proptest::collection::vec("[a-d]{1,4}", 0..5).prop_map(|tokens| tokens.join(" "))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 200,
        ..ProptestConfig::default()
    })]

    // ─────────────────────────────────────────────────────────────────────────
    // Matching blocks
    // ─────────────────────────────────────────────────────────────────────────

    /// Blocks are ordered, disjoint in both inputs, equal, and bounded.
    #[test]
    fn blocks_are_disjoint_and_bounded(a in word(), b in word()) {
        let (a, b): (Vec<char>, Vec<char>) = (a.chars().collect(), b.chars().collect());
        let blocks = matching_blocks(&a, &b);

        for pair in blocks.windows(2) {
            prop_assert!(pair[0].start1 + pair[0].len <= pair[1].start1);
            prop_assert!(pair[0].start2 + pair[0].len <= pair[1].start2);
        }
        for block in &blocks {
            prop_assert!(block.len > 0);
            prop_assert_eq!(
                &a[block.start1..block.start1 + block.len],
                &b[block.start2..block.start2 + block.len]
            );
        }
        let total: usize = blocks.iter().map(|b| b.len).sum();
        prop_assert!(total <= a.len().min(b.len()));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Modifiers
    // ─────────────────────────────────────────────────────────────────────────

    /// Without a budget, a sliding-window partial is the true minimum.
    #[test]
    fn partial_matches_brute_force(a in word(), b in word()) {
        let lev = Partial::new(Levenshtein).evaluate(&a, &b);
        prop_assert_eq!(lev, partial_reference(&Levenshtein, &a, &b));

        let jaro = Partial::new(Jaro).evaluate(&a, &b);
        prop_assert!((jaro - partial_reference(&Jaro, &a, &b)).abs() < 1e-12);
    }

    /// A budgeted partial never reports a value under the budget that the
    /// unbudgeted call would not.
    #[test]
    fn partial_budget_has_no_false_positives(a in word(), b in word(), budget in 0.0f64..1.0) {
        let dist = Partial::new(Normalized::new(Levenshtein));
        let (sa, sb) = (Sequence::from(a.as_str()), Sequence::from(b.as_str()));
        let exact = dist.distance(&sa, &sb, None);
        let bounded = dist.distance(&sa, &sb, Some(budget));
        if exact <= budget {
            prop_assert!((bounded - exact).abs() < 1e-12);
        } else {
            prop_assert!(bounded > budget);
        }
    }

    /// Within budget TokenMax is exact; over budget it reports 1.0.
    #[test]
    fn token_max_budget_is_exact_or_maximal(a in phrase(), b in phrase(), budget in 0.0f64..1.0) {
        let (sa, sb) = (Sequence::from(a.as_str()), Sequence::from(b.as_str()));

        let lev = TokenMax::new(Levenshtein);
        let ro = TokenMax::new(RatcliffObershelp);
        let jaro = TokenMax::new(Jaro);
        let dists: [&dyn Distance<char>; 3] = [&lev, &ro, &jaro];

        for dist in dists {
            let exact = dist.distance(&sa, &sb, None);
            let bounded = dist.distance(&sa, &sb, Some(budget));
            if exact <= budget {
                prop_assert!((bounded - exact).abs() < 1e-12, "{exact} vs {bounded}");
            } else {
                prop_assert_eq!(bounded, 1.0);
            }
        }
    }

    #[test]
    fn identical_inputs_have_zero_distance(a in phrase()) {
        prop_assert_eq!(TokenMax::new(Levenshtein).evaluate(&a, &a), 0.0);
        prop_assert_eq!(TokenMax::new(RatcliffObershelp).evaluate(&a, &a), 0.0);
        prop_assert_eq!(Partial::new(RatcliffObershelp).evaluate(&a, &a), 0.0);
    }

    /// Shuffled tokens sort back to the same string.
    #[test]
    fn token_sort_ignores_order(tokens in proptest::collection::vec("[a-d]{1,4}", 1..5)) {
        let forward = tokens.join(" ");
        let backward: Vec<&str> = tokens.iter().rev().map(String::as_str).collect();
        let dist = TokenSort::new(Levenshtein);
        prop_assert_eq!(dist.evaluate(&forward, &backward.join(" ")), 0.0);
        prop_assert_eq!(dist.evaluate(&forward, "zz"), dist.evaluate("zz", &forward));
    }

    /// Token modifiers never do worse than the plain base on the token-sorted
    /// inputs, and TokenMax stays in the unit interval.
    #[test]
    fn token_max_is_normalized_and_not_worse(a in phrase(), b in phrase()) {
        let d = TokenMax::new(Levenshtein).evaluate(&a, &b);
        prop_assert!((0.0..=1.0).contains(&d));

        let base = Normalized::new(Levenshtein).evaluate(&a, &b);
        prop_assert!(d <= base + 1e-12);

        let set = TokenSet::new(Normalized::new(Levenshtein)).evaluate(&a, &b);
        prop_assert!((0.0..=1.0).contains(&set));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Pairwise
    // ─────────────────────────────────────────────────────────────────────────

    /// The symmetric fill equals cell-by-cell evaluation and its transpose.
    #[test]
    fn pairwise_matches_cells(xs in proptest::collection::vec(phrase(), 0..8)) {
        let dist = TokenSort::new(Levenshtein);
        let opts = PairwiseOptions::default().with_parallel_threshold(2);
        let m = pairwise(&dist, &xs, None, &opts);

        prop_assert!(m.is_symmetric());
        prop_assert_eq!(&m, &m.transpose());
        for (i, x) in xs.iter().enumerate() {
            for (j, y) in xs.iter().enumerate() {
                prop_assert_eq!(m[(i, j)], Some(dist.evaluate(x, y)));
            }
        }
    }
}
