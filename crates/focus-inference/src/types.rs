//! Data exchanged with the external models.

use serde::{Deserialize, Serialize};

/// A labeled span produced by the entity tagger.
///
/// Offsets are character offsets into the tagged text. The wire names follow
/// the tagger service contract (`beg`, `end`, `cat`, `p`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedSpan {
    /// Start offset (inclusive).
    #[serde(rename = "beg")]
    pub begin: usize,

    /// End offset (exclusive).
    pub end: usize,

    /// Entity category label, e.g. `card` or `corp_info`.
    #[serde(rename = "cat")]
    pub category: String,

    /// Tagger confidence (0.0 - 1.0).
    #[serde(rename = "p", default)]
    pub confidence: f32,
}

impl TaggedSpan {
    /// Create a new tagged span.
    pub fn new(begin: usize, end: usize, category: impl Into<String>, confidence: f32) -> Self {
        Self {
            begin,
            end,
            category: category.into(),
            confidence,
        }
    }
}

/// Output of a text classifier.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Classification {
    /// Predicted label.
    pub label: String,

    /// Score of the predicted label.
    #[serde(default)]
    pub score: f32,
}

impl Classification {
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }

    /// Strip the `<code>_` prefix used by subtopic model labels.
    ///
    /// `"3_Начисление баллов"` becomes `"Начисление баллов"`; a label without
    /// an underscore becomes empty.
    pub fn without_code_prefix(self) -> Self {
        let label = match self.label.split_once('_') {
            Some((_, rest)) => rest.to_string(),
            None => String::new(),
        };
        Self {
            label,
            score: self.score,
        }
    }
}
