use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::prediction::DiagnosisReport;

/// A user-facing failure, optionally carrying whatever the server sent
/// back so it can be shown verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorState {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[ts(optional)]
    pub raw_server_payload: Option<serde_json::Value>,
}

impl ErrorState {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            raw_server_payload: None,
        }
    }

    pub fn with_payload(message: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            message: message.into(),
            raw_server_payload: Some(payload),
        }
    }
}

/// What a page displays after a submission settles: a report or an
/// error, never both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum Outcome {
    Report(DiagnosisReport),
    Error(ErrorState),
}

impl Outcome {
    pub fn report(&self) -> Option<&DiagnosisReport> {
        match self {
            Outcome::Report(r) => Some(r),
            Outcome::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ErrorState> {
        match self {
            Outcome::Report(_) => None,
            Outcome::Error(e) => Some(e),
        }
    }
}
