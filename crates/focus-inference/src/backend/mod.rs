//! Model backend traits and implementations.

#[cfg(feature = "remote")]
pub mod remote;

use crate::{Classification, Result, TaggedSpan};

/// Named-entity tagger.
///
/// Implementations must return spans in left-to-right order without
/// overlaps; callers do not re-sort them.
pub trait EntityTagger: Send + Sync {
    /// Tag entities in `text`.
    fn tag(&self, text: &str) -> Result<Vec<TaggedSpan>>;
}

/// First-stage classifier assigning a topic to a message.
pub trait TopicClassifier: Send + Sync {
    /// Classify the message text.
    fn classify(&self, text: &str) -> Result<Classification>;
}

/// Second-stage classifier, parameterized by the topic already chosen.
pub trait SubtopicClassifier: Send + Sync {
    /// Classify the message text within `topic`.
    fn classify(&self, topic: &str, text: &str) -> Result<Classification>;
}
