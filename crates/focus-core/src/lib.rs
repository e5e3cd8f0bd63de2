//! Core library for support message extraction.
//!
//! This crate provides:
//! - Annotated text with span bookkeeping under splitting and filtering
//! - Template recognition and anchor-based field parsing
//! - Field cleaners producing canonical card, station, pump, fuel and payment values
//! - Target text extraction for downstream topic classification
//! - The end-to-end message handler and its configuration

pub mod error;
pub mod fields;
pub mod handler;
pub mod models;
pub mod target;
pub mod template;
pub mod text;

pub use error::{FocusError, ParseError, Result, TextError};
pub use fields::{CanonicalFields, FieldCategory, FieldCleaner, FieldCollector};
pub use handler::{is_message_error, ExtractionResult, MessageHandler, MessageHandlerBuilder};
pub use models::{FocusConfig, MessageRequest, MessageResponse};
pub use target::{clear_text, extract_target_text};
pub use template::{classify, parse_message, ParsedField, ParsedFields, TemplateId};
pub use text::{AnnotatedText, Span};

/// Re-export model interfaces.
pub use focus_inference::{Classification, EntityTagger, SubtopicClassifier, TaggedSpan, TopicClassifier};

#[cfg(feature = "remote")]
pub use focus_inference::{RemoteEndpoint, RemoteSubtopicClassifier, RemoteTagger, RemoteTopicClassifier};
