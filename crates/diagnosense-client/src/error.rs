use diagnosense_core::error::FormError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Rejected locally; no request was sent.
    #[error("{0}")]
    Form(#[from] FormError),

    #[error("a request is already in flight")]
    Busy,

    #[error("HTTP client configuration error: {0}")]
    Config(String),
}

/// The request never produced a response: connection refused, DNS
/// failure, timeout, or a body that could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        TransportError::new(e.to_string())
    }
}
