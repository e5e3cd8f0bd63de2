//! HTTP backend for model servers exposing a JSON interface.
//!
//! Each model is a single `POST` endpoint:
//! - tagger: `{"text"}` -> `[{"beg", "end", "cat", "p"}]`
//! - topic: `{"text"}` -> `{"label", "score"}`
//! - subtopic: `{"topic", "text"}` -> `{"label", "score"}`

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::InferenceError;
use crate::{Classification, EntityTagger, Result, SubtopicClassifier, TaggedSpan, TopicClassifier};

#[derive(Serialize)]
struct TextRequest<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct SubtopicRequest<'a> {
    topic: &'a str,
    text: &'a str,
}

/// Blocking JSON client bound to one model endpoint.
#[derive(Clone)]
pub struct RemoteEndpoint {
    client: Client,
    url: String,
}

impl RemoteEndpoint {
    /// Create an endpoint client with the given request timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| InferenceError::ClientCreate(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    fn post<B: Serialize, R: DeserializeOwned>(&self, body: &B) -> Result<R> {
        let response = self
            .client
            .post(&self.url)
            .json(body)
            .send()
            .map_err(|e| InferenceError::Request(e.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .map_err(|e| InferenceError::Request(e.to_string()))?;

        if !status.is_success() {
            return Err(InferenceError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        debug!("{} answered with {} bytes", self.url, bytes.len());
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Entity tagger served over HTTP.
pub struct RemoteTagger {
    endpoint: RemoteEndpoint,
}

impl RemoteTagger {
    pub fn new(endpoint: RemoteEndpoint) -> Self {
        Self { endpoint }
    }
}

impl EntityTagger for RemoteTagger {
    fn tag(&self, text: &str) -> Result<Vec<TaggedSpan>> {
        if text.is_empty() {
            return Ok(Vec::new());
        }
        self.endpoint.post(&TextRequest { text })
    }
}

/// Topic classifier served over HTTP.
pub struct RemoteTopicClassifier {
    endpoint: RemoteEndpoint,
}

impl RemoteTopicClassifier {
    pub fn new(endpoint: RemoteEndpoint) -> Self {
        Self { endpoint }
    }
}

impl TopicClassifier for RemoteTopicClassifier {
    fn classify(&self, text: &str) -> Result<Classification> {
        self.endpoint.post(&TextRequest { text })
    }
}

/// Subtopic classifier served over HTTP.
///
/// Returned labels carry a `<code>_` prefix that is stripped here.
pub struct RemoteSubtopicClassifier {
    endpoint: RemoteEndpoint,
}

impl RemoteSubtopicClassifier {
    pub fn new(endpoint: RemoteEndpoint) -> Self {
        Self { endpoint }
    }
}

impl SubtopicClassifier for RemoteSubtopicClassifier {
    fn classify(&self, topic: &str, text: &str) -> Result<Classification> {
        let cls: Classification = self.endpoint.post(&SubtopicRequest { topic, text })?;
        Ok(cls.without_code_prefix())
    }
}
