//! Symbol sequences with a length computed once.
//!
//! Text is decomposed into symbols (code points, grapheme clusters, bytes or
//! arbitrary tokens) a single time when the sequence is built. Every later
//! length query, window and comparison made by nested modifiers works on the
//! resulting slice, so no modifier ever re-walks the original string.

use std::borrow::Cow;
use std::hash::Hash;
use std::ops::Deref;

use unicode_segmentation::UnicodeSegmentation;

/// Element type that sequences can be built from.
///
/// Blanket-implemented: `char`, `u8`, `&str` grapheme clusters and any owned
/// token type with total ordering and hashing qualify.
pub trait Symbol: Eq + Ord + Hash + Clone + Send + Sync {}

impl<T> Symbol for T where T: Eq + Ord + Hash + Clone + Send + Sync {}

/// An ordered run of symbols, owned or borrowed.
///
/// Dereferences to `[T]`, so `len()`, indexing and iteration are those of a
/// slice and cost O(1) per length query.
///
/// # Examples
/// ```
/// use fuzzydist::algorithms::Sequence;
///
/// let s = Sequence::from("héllo");
/// assert_eq!(s.len(), 5);
/// assert_eq!(s.window(1, 3).to_text(), "él");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Sequence<'a, T: Clone = char> {
    symbols: Cow<'a, [T]>,
}

impl<'a, T: Clone> Sequence<'a, T> {
    /// Take ownership of already decomposed symbols.
    #[must_use]
    pub fn new(symbols: Vec<T>) -> Self {
        Self {
            symbols: Cow::Owned(symbols),
        }
    }

    /// Borrow a symbol slice without copying.
    #[must_use]
    pub fn from_slice(symbols: &'a [T]) -> Self {
        Self {
            symbols: Cow::Borrowed(symbols),
        }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.symbols
    }

    /// Borrowed view of `self[start..end]`.
    ///
    /// # Panics
    /// Panics if the range is out of bounds, like slice indexing.
    #[must_use]
    pub fn window(&self, start: usize, end: usize) -> Sequence<'_, T> {
        Sequence::from_slice(&self.symbols[start..end])
    }

    /// Borrowed view of the whole sequence. Rewrapping is free.
    #[must_use]
    pub fn view(&self) -> Sequence<'_, T> {
        Sequence::from_slice(&self.symbols)
    }

    #[must_use]
    pub fn into_owned(self) -> Sequence<'static, T>
    where
        T: 'static,
    {
        Sequence {
            symbols: Cow::Owned(self.symbols.into_owned()),
        }
    }
}

impl Sequence<'static, char> {
    /// Decompose text into Unicode scalar values.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self::new(text.chars().collect())
    }
}

impl Sequence<'_, char> {
    /// Rebuild the text the sequence was decomposed from.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.symbols.iter().collect()
    }
}

impl<'a> Sequence<'a, &'a str> {
    /// Decompose text into extended grapheme clusters.
    ///
    /// ```
    /// use fuzzydist::algorithms::Sequence;
    ///
    /// // One family emoji, seven code points
    /// assert_eq!(Sequence::graphemes("👨‍👩‍👧‍👦").len(), 1);
    /// ```
    #[must_use]
    pub fn graphemes(text: &'a str) -> Self {
        Self::new(text.graphemes(true).collect())
    }
}

impl<T: Clone> Deref for Sequence<'_, T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.symbols
    }
}

impl<T: Clone> AsRef<[T]> for Sequence<'_, T> {
    fn as_ref(&self) -> &[T] {
        &self.symbols
    }
}

impl From<&str> for Sequence<'static, char> {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl From<&String> for Sequence<'static, char> {
    fn from(text: &String) -> Self {
        Self::from_text(text)
    }
}

impl From<String> for Sequence<'static, char> {
    fn from(text: String) -> Self {
        Self::from_text(&text)
    }
}

impl<'a, T: Clone> From<&'a Sequence<'_, T>> for Sequence<'a, T> {
    fn from(seq: &'a Sequence<'_, T>) -> Self {
        seq.view()
    }
}

/// Put the shorter sequence first.
///
/// Length-asymmetric modifiers call this before interpreting any window or
/// block coordinates.
#[inline]
#[must_use]
pub fn reorder<'s, 'a, 'b, T: Clone>(
    a: &'s Sequence<'a, T>,
    b: &'s Sequence<'b, T>,
) -> (Sequence<'s, T>, Sequence<'s, T>) {
    if a.len() <= b.len() {
        (a.view(), b.view())
    } else {
        (b.view(), a.view())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_counts_chars_not_bytes() {
        let s = Sequence::from("日本語");
        assert_eq!(s.len(), 3);
        assert_eq!(s.to_text(), "日本語");
    }

    #[test]
    fn test_window_borrows_subrange() {
        let s = Sequence::from("abcdef");
        let w = s.window(2, 5);
        assert_eq!(w.as_slice(), &['c', 'd', 'e']);
        assert!(matches!(w.symbols, Cow::Borrowed(_)));
    }

    #[test]
    fn test_rewrap_is_a_view() {
        let s = Sequence::from("abc");
        let again: Sequence<'_, char> = Sequence::from(&s);
        assert_eq!(again, s);
        assert!(matches!(again.symbols, Cow::Borrowed(_)));
    }

    #[test]
    fn test_graphemes() {
        let s = Sequence::graphemes("cafe\u{0301}");
        assert_eq!(s.len(), 4);
        assert_eq!(s[3], "e\u{0301}");
    }

    #[test]
    fn test_reorder_puts_shorter_first() {
        let long = Sequence::from("abcdef");
        let short = Sequence::from("xy");
        let (a, b) = reorder(&long, &short);
        assert_eq!(a.len(), 2);
        assert_eq!(b.len(), 6);

        // Equal lengths keep argument order
        let other = Sequence::from("uv");
        let (a, _) = reorder(&short, &other);
        assert_eq!(a.to_text(), "xy");
    }
}
