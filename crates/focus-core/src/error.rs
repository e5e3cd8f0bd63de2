//! Error types for the focus-core library.

use thiserror::Error;

use crate::template::TemplateId;

/// Main error type for the focus library.
#[derive(Error, Debug)]
pub enum FocusError {
    /// Annotated text contract violation.
    #[error("text error: {0}")]
    Text(#[from] TextError),

    /// Template parsing error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error from an external model.
    #[error("inference error: {0}")]
    Inference(#[from] focus_inference::InferenceError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised by annotated text operations.
///
/// These indicate a defect in the calling code (stale or invalid offsets),
/// never a property of the input message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TextError {
    /// Split index is outside the text.
    #[error("index {index} out of range for text of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Split index does not point at a space or newline.
    #[error("character at {index} is not a delimiter: {found:?}")]
    InvalidSplitPoint { index: usize, found: char },

    /// Split indices are not strictly ascending.
    #[error("split indices must be strictly ascending: {0:?}")]
    UnsortedIndices(Vec<usize>),

    /// Span offsets are invalid for the text.
    #[error("span [{begin}, {end}) is invalid for text of length {len}")]
    InvalidSpan { begin: usize, end: usize, len: usize },

    /// Spans are out of order or overlap.
    #[error("span starting at {begin} overlaps or precedes span ending at {prev_end}")]
    OverlappingSpans { begin: usize, prev_end: usize },
}

/// Errors raised by template field parsers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// An anchor expected by the template is missing from the message.
    #[error("anchor {anchor:?} not found in {template} message")]
    AnchorNotFound { template: TemplateId, anchor: String },
}

/// Result type for the focus library.
pub type Result<T> = std::result::Result<T, FocusError>;
