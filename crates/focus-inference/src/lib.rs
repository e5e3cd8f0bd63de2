//! Model abstraction layer for focus.
//!
//! The entity tagger and the topic/subtopic classifiers are external
//! statistical models. This crate defines the interfaces the extraction
//! pipeline consumes and provides clients for them:
//! - `remote` backend calling model servers over HTTP JSON (native)

mod backend;
mod error;
mod types;

pub use backend::{EntityTagger, SubtopicClassifier, TopicClassifier};
pub use error::InferenceError;
pub use types::{Classification, TaggedSpan};

#[cfg(feature = "remote")]
pub use backend::remote::{RemoteEndpoint, RemoteSubtopicClassifier, RemoteTagger, RemoteTopicClassifier};

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, InferenceError>;
