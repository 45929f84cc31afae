//! Maps a raw `generateContent` answer onto success or a classified failure.

use super::types::{ErrorResponse, GenerateContentResponse};
use crate::error::{ApiError, ErrorKind};

/// Classify an HTTP status and body.
///
/// The HTTP status decides the outcome, except that a 200 whose
/// `promptFeedback.blockReason` is set is still a failure.
pub fn classify(status: u16, body: &str) -> Result<GenerateContentResponse, ApiError> {
    if status != 200 {
        return Err(parse_api_error(status, body));
    }

    let response: GenerateContentResponse = serde_json::from_str(body).map_err(|e| {
        tracing::error!("Failed to parse Gemini response: {}\nBody: {}", e, body);
        ApiError::new(ErrorKind::General, format!("parse response: {}", e), status)
    })?;

    if let Some(reason) = response.block_reason() {
        tracing::warn!("Gemini blocked the prompt: {}", reason);
        return Err(ApiError::new(
            ErrorKind::Api,
            format!("prompt blocked: {}", reason),
            0,
        ));
    }

    Ok(response)
}

fn parse_api_error(status: u16, body: &str) -> ApiError {
    let envelope: ErrorResponse = serde_json::from_str(body).unwrap_or_default();
    tracing::error!(
        "Gemini API error (status {}, {}): {}",
        status,
        envelope.error.status,
        body
    );

    let mut message = envelope.error.message;
    if message.is_empty() {
        message = format!("API error (HTTP {})", status);
    }

    let (kind, message) = match status {
        401 | 403 => (
            ErrorKind::Auth,
            format!(
                "authentication failed: {}\n\nSet GEMINI_API_KEY or run: naba config set api_key <your-key>",
                message
            ),
        ),
        429 => (
            ErrorKind::RateLimit,
            format!("rate limit exceeded: {}\n\nWait a moment and try again.", message),
        ),
        s if s >= 500 => (
            ErrorKind::Api,
            format!(
                "Gemini server error: {}\n\nThis is a temporary issue. Try again shortly.",
                message
            ),
        ),
        _ => (ErrorKind::Api, message),
    };

    ApiError::new(kind, message, status)
}
