use alloc::sync::Arc;

use crate::types::ErrorLocationProvider;

/// A span of the original LaTeX source.
///
/// Every token carries one of these so that lexer and parser failures can
/// point back at the offending characters. The input is shared through an
/// [`Arc`] so cloning a location never copies the source text.
///
/// # Cross-references
///
/// - Rendered by [`ParseError`](crate::types::ParseError) and
///   [`LexError`](crate::types::LexError) as a short underlined excerpt.
/// - Exposed generically through [`ErrorLocationProvider`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceLocation {
    /// Reference-counted input string that was tokenized.
    pub input: Arc<str>,

    /// Zero-based inclusive byte offset where the span begins.
    pub start: usize,

    /// Zero-based exclusive byte offset where the span ends.
    ///
    /// The range `[start, end)` is the exact span; `start == end` marks a
    /// position rather than a span (the end-of-input token uses this).
    pub end: usize,
}

impl SourceLocation {
    /// Creates a new `SourceLocation` over `input[start..end]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mathwords::types::SourceLocation;
    /// use std::sync::Arc;
    ///
    /// let input: Arc<str> = Arc::from("x^2");
    /// let loc = SourceLocation::new(input, 0, 1);
    /// assert_eq!(loc.text(), "x");
    /// ```
    #[must_use]
    pub const fn new(input: Arc<str>, start: usize, end: usize) -> Self {
        Self { input, start, end }
    }

    /// Convenience constructor that allocates a fresh shared copy of `input`.
    #[must_use]
    pub fn from_str(input: &str, start: usize, end: usize) -> Self {
        Self::new(Arc::from(input), start, end)
    }

    /// Inclusive start offset.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Exclusive end offset.
    #[must_use]
    pub const fn end(&self) -> usize {
        self.end
    }

    /// The full source this location points into.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The covered slice of the source, or `""` if the offsets are not on
    /// character boundaries.
    #[must_use]
    pub fn text(&self) -> &str {
        self.input.get(self.start..self.end).unwrap_or_default()
    }

    /// Merges two optional locations into one spanning from the start of
    /// `first` to the end of `second`.
    ///
    /// Locations from different inputs never merge; `None` is returned in
    /// that case. A missing side yields the other side unchanged.
    #[must_use]
    pub fn range(first: Option<&Self>, second: Option<&Self>) -> Option<Self> {
        match (first, second) {
            (Some(fp), None) => Some(fp.clone()),
            (None, Some(sp)) => Some(sp.clone()),
            (Some(fp), Some(sp)) => Arc::ptr_eq(&fp.input, &sp.input).then(|| Self {
                input: Arc::clone(&fp.input),
                start: fp.start,
                end: sp.end,
            }),
            (None, None) => None,
        }
    }
}

impl ErrorLocationProvider for SourceLocation {
    fn loc(&self) -> Option<&SourceLocation> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_location_text() {
        let loc = SourceLocation::from_str(r"\frac{a}{b}", 0, 5);
        assert_eq!(loc.start(), 0);
        assert_eq!(loc.end(), 5);
        assert_eq!(loc.text(), r"\frac");
    }

    #[test]
    fn test_range_merges_same_input_only() {
        let input: Arc<str> = Arc::from("a + b = c");
        let left = SourceLocation::new(Arc::clone(&input), 0, 1);
        let right = SourceLocation::new(Arc::clone(&input), 4, 5);

        let merged = SourceLocation::range(Some(&left), Some(&right));
        assert_eq!(merged.map(|loc| (loc.start, loc.end)), Some((0, 5)));

        let other = SourceLocation::from_str("a + b = c", 8, 9);
        assert!(SourceLocation::range(Some(&left), Some(&other)).is_none());
        assert_eq!(
            SourceLocation::range(None, Some(&right)).map(|loc| loc.start),
            Some(4)
        );
    }
}
