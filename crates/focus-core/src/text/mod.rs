//! Annotated text: a text buffer paired with labeled character spans.
//!
//! Every operation returns a new value whose spans are valid against its own
//! buffer. Offsets count characters, not bytes, matching the entity tagger.

mod algebra;

use serde::{Deserialize, Serialize};

use crate::error::TextError;

/// Half-open character interval `[begin, end)` tagged with a category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Start offset (inclusive).
    pub begin: usize,
    /// End offset (exclusive).
    pub end: usize,
    /// Category label.
    pub category: String,
}

impl Span {
    /// Create a new span.
    pub fn new(begin: usize, end: usize, category: impl Into<String>) -> Self {
        Self {
            begin,
            end,
            category: category.into(),
        }
    }

    /// Number of characters covered.
    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    /// Whether the span covers no characters.
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Same category, new bounds.
    fn with_bounds(&self, begin: usize, end: usize) -> Self {
        Self::new(begin, end, self.category.clone())
    }
}

/// Text with an ordered, non-overlapping list of spans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotatedText {
    text: String,
    spans: Vec<Span>,
    /// Length in characters.
    len: usize,
}

impl AnnotatedText {
    /// Build annotated text, validating the spans against the text.
    ///
    /// Spans must be in non-decreasing `begin` order, must not overlap and
    /// must lie within the text.
    pub fn new(text: impl Into<String>, spans: Vec<Span>) -> Result<Self, TextError> {
        let text = text.into();
        let len = text.chars().count();

        let mut prev_end = 0;
        for span in &spans {
            if span.begin > span.end || span.end > len {
                return Err(TextError::InvalidSpan {
                    begin: span.begin,
                    end: span.end,
                    len,
                });
            }
            if span.begin < prev_end {
                return Err(TextError::OverlappingSpans {
                    begin: span.begin,
                    prev_end,
                });
            }
            prev_end = span.end;
        }

        Ok(Self { text, spans, len })
    }

    /// Text without annotations.
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        let len = text.chars().count();
        Self {
            text,
            spans: Vec::new(),
            len,
        }
    }

    /// Internal constructor for operations that preserve the invariant.
    fn from_parts(text: String, spans: Vec<Span>) -> Self {
        debug_assert!(Self::new(text.clone(), spans.clone()).is_ok());
        let len = text.chars().count();
        Self { text, spans, len }
    }

    /// The text buffer.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The spans, ordered by position.
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Text covered by `span`.
    ///
    /// Offsets past the end are clamped, so a span from another buffer never
    /// panics but yields meaningless text.
    pub fn span_text(&self, span: &Span) -> &str {
        let start = byte_offset(&self.text, span.begin);
        let end = byte_offset(&self.text, span.end);
        &self.text[start..end.max(start)]
    }

    /// Consume into the text and the spans.
    pub fn into_parts(self) -> (String, Vec<Span>) {
        (self.text, self.spans)
    }
}

/// Byte offset of the character at `index`, or the text length past the end.
pub(crate) fn byte_offset(text: &str, index: usize) -> usize {
    text.char_indices()
        .nth(index)
        .map(|(b, _)| b)
        .unwrap_or(text.len())
}

/// Byte offsets of every character boundary, including the end of the text.
pub(crate) fn char_boundaries(text: &str) -> Vec<usize> {
    text.char_indices()
        .map(|(b, _)| b)
        .chain(std::iter::once(text.len()))
        .collect()
}
