//! Boundary parser for prediction service responses.
//!
//! The service answers in two conventions. The CKD endpoint wraps its data
//! in a status envelope; the upload endpoints return the predictions map
//! directly. Both are parsed into [`ApiResponse`] so that nothing past this
//! module has to care which one arrived.

use serde_json::{Map, Value};

use crate::error::NormalizeError;

/// Key of the consensus label inside every predictions map.
pub const MAJORITY_VOTE_KEY: &str = "Majority Vote Result";

/// Key whose presence marks a response as an envelope.
pub const STATUS_KEY: &str = "status";

/// Envelope status that unlocks the predictions map.
pub const SUCCESS_STATUS: &str = "success";

/// `status` and `message` are kept as raw JSON; only a string status of
/// exactly `"success"` counts as success.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub status: Value,
    pub predictions: Option<Map<String, Value>>,
    pub message: Option<Value>,
}

impl Envelope {
    pub fn is_success(&self) -> bool {
        self.status.as_str() == Some(SUCCESS_STATUS)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// `{status, predictions?, message?}`
    Envelope(Envelope),
    /// `{<model>: {...}, "Majority Vote Result": "..."}`
    Bare(Map<String, Value>),
}

impl ApiResponse {
    /// Parse a decoded JSON body. Any object with a top-level `status` key
    /// is an envelope, whatever the types of its fields; any other object
    /// is a bare predictions map. Non-objects are rejected.
    pub fn from_value(value: Value) -> Result<Self, NormalizeError> {
        let Value::Object(mut map) = value else {
            return Err(NormalizeError::NotAnObject);
        };

        let Some(status) = map.remove(STATUS_KEY) else {
            return Ok(ApiResponse::Bare(map));
        };

        let predictions = match map.remove("predictions") {
            Some(Value::Object(predictions)) => Some(predictions),
            _ => None,
        };
        let message = map.remove("message").filter(|m| !m.is_null());

        Ok(ApiResponse::Envelope(Envelope {
            status,
            predictions,
            message,
        }))
    }

    /// The predictions map, or the server-reported failure for an envelope
    /// whose status is not `"success"`.
    pub fn predictions(&self) -> Result<&Map<String, Value>, NormalizeError> {
        match self {
            ApiResponse::Bare(map) => Ok(map),
            ApiResponse::Envelope(envelope) if envelope.is_success() => envelope
                .predictions
                .as_ref()
                .ok_or(NormalizeError::MissingPredictions),
            ApiResponse::Envelope(envelope) => Err(NormalizeError::ServerReported {
                status: json_text(&envelope.status),
                message: envelope
                    .message
                    .as_ref()
                    .map(json_text)
                    .unwrap_or_else(|| "no message".to_string()),
            }),
        }
    }
}

/// Strings as-is, anything else as compact JSON.
fn json_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Iterate the per-model entries of a predictions map, skipping the
/// majority vote.
pub fn per_model_entries(map: &Map<String, Value>) -> impl Iterator<Item = (&String, &Value)> {
    map.iter().filter(|(key, _)| key.as_str() != MAJORITY_VOTE_KEY)
}

/// The majority vote label, if present and a string.
pub fn majority_vote(map: &Map<String, Value>) -> Option<&str> {
    map.get(MAJORITY_VOTE_KEY).and_then(Value::as_str)
}
