/// A byte range `[start, end)` into a document's text.
///
/// Templates record spans instead of owned copies of their source so that
/// edits can be spliced back into the exact original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Borrows the spanned text out of `text`.
    ///
    /// Spans produced by the parser always sit on ASCII delimiters, so they
    /// are valid char boundaries for the text they were parsed from.
    pub fn slice(self, text: &str) -> &str {
        &text[self.start..self.end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_returns_spanned_text() {
        let text = "{{Stub}}";
        assert_eq!(Span::new(2, 6).slice(text), "Stub");
    }

    #[test]
    fn inverted_span_is_empty() {
        let sp = Span::new(5, 3);
        assert_eq!(sp.len(), 0);
        assert!(sp.is_empty());
    }
}
