//! Integration tests for modifier composition.
//!
//! Covers the reference scenarios on reordered team names and nesting of
//! modifiers over each other and over non-text symbols.

use fuzzydist::algorithms::{
    Cosine, Jaro, JaroWinkler, Levenshtein, RatcliffObershelp, Sequence, TextDistance,
};
use fuzzydist::modifiers::{Normalized, Partial, TokenMax, TokenSet, TokenSort};
use fuzzydist::{Distance, Metric};

const METS: &str = "New York Mets vs Atlanta Braves";
const BRAVES: &str = "Atlanta Braves vs New York Mets";

// =============================================================================
// Reference scenarios
// =============================================================================

#[test]
fn token_sort_of_reordered_words_is_zero() {
    assert_eq!(TokenSort::new(Levenshtein).evaluate(METS, BRAVES), 0.0);
}

#[test]
fn partial_ratcliff_obershelp_of_equal_lengths() {
    let d = Partial::new(RatcliffObershelp).evaluate(METS, BRAVES);
    assert!((d - 0.5483870967741935).abs() < 1e-12, "got {d}");
}

#[test]
fn token_set_of_token_subset_is_zero() {
    let d = TokenSet::new(RatcliffObershelp).evaluate("New York Mets vs Atlanta", BRAVES);
    assert_eq!(d, 0.0);
}

#[test]
fn token_max_of_identical_inputs_is_zero() {
    for s in ["", "x", METS, "  spaced   out  "] {
        assert_eq!(TokenMax::new(Levenshtein).evaluate(s, s), 0.0);
        assert_eq!(TokenMax::new(JaroWinkler::new()).evaluate(s, s), 0.0);
        assert_eq!(Partial::new(Normalized::new(Levenshtein)).evaluate(s, s), 0.0);
    }
}

// =============================================================================
// Composition
// =============================================================================

#[test]
fn modifiers_nest() {
    let dist = TokenSort::new(Partial::new(RatcliffObershelp));
    assert_eq!(dist.evaluate("mets new york", "the new york mets game"), 0.0);

    let dist = TokenSet::new(TokenSort::new(Normalized::new(Levenshtein)));
    assert_eq!(dist.evaluate("b a", "a b c"), 0.0);

    let dist = TokenMax::new(Partial::new(Jaro));
    assert_eq!(dist.evaluate("york", "new york"), 0.0);
}

#[test]
fn boxed_modifiers_are_interchangeable() {
    let dists: Vec<Box<dyn Distance<char>>> = vec![
        Box::new(TokenSort::new(Levenshtein)),
        Box::new(TokenSet::new(Levenshtein)),
        Box::new(Partial::new(Levenshtein)),
        Box::new(TokenMax::new(Levenshtein)),
    ];
    for dist in &dists {
        assert_eq!(dist.evaluate(METS, METS), 0.0, "{}", dist.name());
        assert_eq!(dist.call(None, Some(METS), None), None, "{}", dist.name());
    }
}

#[test]
fn token_sort_is_order_insensitive() {
    let dist = TokenSort::new(Levenshtein);
    let pairs = [("a b c", "c b a"), ("one two", "two one three")];
    for (a, b) in pairs {
        assert_eq!(dist.evaluate(a, b), dist.evaluate(b, a));
    }
}

#[test]
fn partial_works_on_grapheme_sequences() {
    let needle = Sequence::graphemes("cafe\u{0301}");
    let haystack = Sequence::graphemes("un cafe\u{0301} noir");
    assert_eq!(Partial::new(Levenshtein).distance(&needle, &haystack, None), 0.0);
}

#[test]
fn partial_works_on_token_sequences() {
    let needle = Sequence::new(vec!["new", "york"]);
    let haystack = Sequence::new(vec!["the", "new", "york", "mets"]);
    assert_eq!(Partial::new(RatcliffObershelp).distance(&needle, &haystack, None), 0.0);
}

#[test]
fn compare_is_similarity_with_cutoff() {
    let dist = TokenMax::new(Levenshtein);
    assert!((dist.compare(METS, BRAVES, 0.0) - 0.95).abs() < 1e-12);
    assert_eq!(dist.compare("abc", "xyz", 0.5), 0.0);
}

#[test]
fn qgram_metrics_compose_with_modifiers() {
    let dist = TokenSort::new(Cosine::new(2));
    assert!(dist.evaluate(METS, BRAVES).abs() < 1e-12);
}
