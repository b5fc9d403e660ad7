//! Text selection ranges over a widget's plain-text content.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A selection between two character offsets.
///
/// `anchor` is where the selection started, `focus` where it ends; either
/// may be the larger one. Offsets count `char`s, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextSelection {
    /// Where the selection started
    pub anchor: usize,
    /// Where the selection ends
    pub focus: usize,
}

impl TextSelection {
    /// Select `start..end`.
    #[must_use]
    pub const fn new(anchor: usize, focus: usize) -> Self {
        Self { anchor, focus }
    }

    /// Select every character of `text`.
    #[must_use]
    pub fn all(text: &str) -> Self {
        Self::new(0, text.chars().count())
    }

    /// Ordered character range.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.anchor.min(self.focus)..self.anchor.max(self.focus)
    }

    /// Number of selected characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.range().len()
    }

    /// True when nothing is selected (a caret).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.anchor == self.focus
    }

    /// The selected slice of `text`. Offsets past the end are clamped.
    #[must_use]
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        let range = self.range();
        let byte_at = |chars: usize| {
            text.char_indices()
                .nth(chars)
                .map_or(text.len(), |(byte, _)| byte)
        };
        &text[byte_at(range.start)..byte_at(range.end)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_all() {
        let s = TextSelection::all("hello");
        assert_eq!(s.range(), 0..5);
        assert_eq!(s.len(), 5);
        assert!(!s.is_empty());
        assert_eq!(s.slice("hello"), "hello");
    }

    #[test]
    fn test_selection_all_counts_chars() {
        let text = "naïve café";
        let s = TextSelection::all(text);
        assert_eq!(s.len(), 10);
        assert_eq!(s.slice(text), text);
    }

    #[test]
    fn test_selection_backwards() {
        let s = TextSelection::new(4, 1);
        assert_eq!(s.range(), 1..4);
        assert_eq!(s.slice("abcdef"), "bcd");
    }

    #[test]
    fn test_selection_multibyte_slice() {
        let s = TextSelection::new(1, 3);
        assert_eq!(s.slice("éàüö"), "àü");
    }

    #[test]
    fn test_selection_clamps_past_end() {
        let s = TextSelection::new(2, 50);
        assert_eq!(s.slice("abc"), "c");
    }

    #[test]
    fn test_selection_empty() {
        let s = TextSelection::default();
        assert!(s.is_empty());
        assert_eq!(s.slice("abc"), "");
        assert!(TextSelection::all("").is_empty());
    }
}
