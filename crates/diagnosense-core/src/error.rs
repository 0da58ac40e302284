use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown disease: {0}")]
    UnknownDisease(String),
}

/// Rejections raised while editing or submitting a form, before any
/// network call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("{field}: '{value}' is not one of {allowed:?}")]
    InvalidOption {
        field: String,
        value: String,
        allowed: &'static [&'static str],
    },

    /// The form needs a file and none is selected. The message is the
    /// user-facing text for the page.
    #[error("{0}")]
    MissingFile(&'static str),
}

/// Failures turning a 2xx response body into a diagnosis report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormalizeError {
    #[error("Server returned an error: {message}")]
    ServerReported { status: String, message: String },

    #[error("response is not a JSON object")]
    NotAnObject,

    #[error("envelope reported success without predictions")]
    MissingPredictions,

    #[error("model '{0}' missing from response")]
    MissingModel(String),

    #[error("majority vote missing from response")]
    MissingVote,

    #[error("invalid entry for model '{model}': {reason}")]
    InvalidEntry { model: String, reason: String },
}
