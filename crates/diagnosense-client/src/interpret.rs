//! Turns a settled exchange into what the page shows.

use diagnosense_core::disease::Disease;
use diagnosense_core::error::NormalizeError;
use diagnosense_core::models::outcome::{ErrorState, Outcome};
use diagnosense_core::response::ApiResponse;
use serde_json::Value;
use tracing::warn;

use crate::error::TransportError;
use crate::transport::HttpReply;

/// Map a transport result onto an [`Outcome`].
///
/// - no response: `"Error: <transport message>"`
/// - non-2xx: the body's `error` string, or the disease's fallback, with
///   the body attached verbatim
/// - envelope with a non-success status: the server's message
/// - anything the normalizer cannot read: `"Unexpected response: ..."`
pub fn interpret(disease: &dyn Disease, reply: Result<HttpReply, TransportError>) -> Outcome {
    let reply = match reply {
        Ok(reply) => reply,
        Err(e) => {
            warn!(disease = %disease.id(), error = %e, "request failed");
            return Outcome::Error(ErrorState::new(format!("Error: {e}")));
        }
    };

    let payload = decode_body(&reply.body);

    if !reply.is_success() {
        let message = payload
            .get("error")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| disease.http_failure_message(reply.status));
        warn!(disease = %disease.id(), status = reply.status, %message, "server rejected request");
        return Outcome::Error(ErrorState::with_payload(message, payload));
    }

    let response = match ApiResponse::from_value(payload.clone()) {
        Ok(response) => response,
        Err(e) => return unexpected(disease, e, payload),
    };

    match disease.normalize(&response) {
        Ok(report) => Outcome::Report(report),
        Err(e @ NormalizeError::ServerReported { .. }) => {
            warn!(disease = %disease.id(), error = %e, "server reported failure");
            Outcome::Error(ErrorState::with_payload(e.to_string(), payload))
        }
        Err(e) => unexpected(disease, e, payload),
    }
}

fn unexpected(disease: &dyn Disease, e: NormalizeError, payload: Value) -> Outcome {
    warn!(disease = %disease.id(), error = %e, "could not normalize response");
    Outcome::Error(ErrorState::with_payload(
        format!("Unexpected response: {e}"),
        payload,
    ))
}

/// Decode a body as JSON, falling back to its text. An empty body is
/// `null`.
fn decode_body(body: &[u8]) -> Value {
    if body.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
}
