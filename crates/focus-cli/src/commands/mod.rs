//! Subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod process;
pub mod serve;

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use focus_core::models::FocusConfig;
use focus_core::{MessageHandler, RemoteEndpoint, RemoteSubtopicClassifier, RemoteTagger, RemoteTopicClassifier};

/// `<config_dir>/focus/config.json`.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("focus")
        .join("config.json")
}

/// The `--config` path if given, the default location otherwise.
pub fn resolve_config_path(config_path: Option<&str>) -> PathBuf {
    config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path)
}

/// Load configuration.
///
/// An explicit path must exist; a missing default file yields defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<FocusConfig> {
    match config_path {
        Some(path) => {
            let path = Path::new(path);
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            Ok(FocusConfig::from_file(path)?)
        }
        None => {
            let path = default_config_path();
            if path.exists() {
                debug!("Loading config from {}", path.display());
                Ok(FocusConfig::from_file(&path)?)
            } else {
                Ok(FocusConfig::default())
            }
        }
    }
}

/// Build a handler wired to the configured model servers.
///
/// Must not be called from an async context: the model clients block.
pub fn build_handler(config: &FocusConfig) -> anyhow::Result<MessageHandler> {
    let models = &config.models;
    let mut builder = MessageHandler::builder().with_config(config.extraction.clone());

    if let Some(url) = &models.tagger_url {
        info!("Entity tagger at {}", url);
        builder = builder.with_tagger(RemoteTagger::new(RemoteEndpoint::new(url, models.timeout())?));
    }
    if let Some(url) = &models.topic_url {
        info!("Topic classifier at {}", url);
        builder = builder.with_topic_classifier(RemoteTopicClassifier::new(RemoteEndpoint::new(
            url,
            models.timeout(),
        )?));
    }
    if let Some(url) = &models.subtopic_url {
        info!("Subtopic classifier at {}", url);
        builder = builder.with_subtopic_classifier(RemoteSubtopicClassifier::new(RemoteEndpoint::new(
            url,
            models.timeout(),
        )?));
    }

    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_config_must_exist() {
        let err = load_config(Some("/nonexistent/focus.json")).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_resolve_explicit_path() {
        assert_eq!(resolve_config_path(Some("a/b.json")), PathBuf::from("a/b.json"));
        assert!(resolve_config_path(None).ends_with("focus/config.json"));
    }
}
