//! Configuration and wire models.

pub mod config;
pub mod message;

pub use config::{ExtractionConfig, FocusConfig, ModelConfig, ServerConfig};
pub use message::{MessageRequest, MessageResponse};
