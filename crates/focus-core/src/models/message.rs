//! Wire types of the extraction service.

use serde::{Deserialize, Serialize};

use crate::handler::ExtractionResult;

/// Incoming message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRequest {
    /// Caller's identifier, echoed back.
    #[serde(default)]
    pub req_id: Option<i64>,

    /// Raw message text.
    pub text: String,
}

/// Extraction answer for one message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub req_id: Option<i64>,
    pub card: String,
    #[serde(rename = "azs")]
    pub station: String,
    #[serde(rename = "trk")]
    pub pump: String,
    pub fuel: String,
    pub topic: String,
    #[serde(rename = "sub")]
    pub subtopic: String,
}

impl MessageResponse {
    pub fn from_result(req_id: Option<i64>, result: ExtractionResult) -> Self {
        let topic = result.topic.map(|c| c.label).unwrap_or_default();
        let subtopic = result.subtopic.map(|c| c.label).unwrap_or_default();
        Self {
            req_id,
            card: result.fields.card,
            station: result.fields.station,
            pump: result.fields.pump,
            fuel: result.fields.fuel,
            topic,
            subtopic,
        }
    }
}
