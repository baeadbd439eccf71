use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure of a single provider attempt.
///
/// The orchestrator treats every variant the same way (fall back, then
/// degrade); the categories exist for logging and for callers that inspect
/// [`ExtractionResult::failed_attempts`](crate::ExtractionResult::failed_attempts).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("authentication rejected: {0}")]
    AuthFailure(String),

    #[error("resource not found: {0}")]
    NotFound(String),

    /// Cold start on the provider side. Retrying is the caller's decision.
    #[error("provider is warming up: {0}")]
    ProviderWarmingUp(String),

    #[error("deadline exceeded: {0}")]
    Timeout(String),

    #[error("transport error: {0}")]
    TransportError(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// Field-less tag for a [`ProviderError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    AuthFailure,
    NotFound,
    ProviderWarmingUp,
    Timeout,
    TransportError,
    MalformedResponse,
}

impl ProviderError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ProviderError::AuthFailure(_) => ErrorCategory::AuthFailure,
            ProviderError::NotFound(_) => ErrorCategory::NotFound,
            ProviderError::ProviderWarmingUp(_) => ErrorCategory::ProviderWarmingUp,
            ProviderError::Timeout(_) => ErrorCategory::Timeout,
            ProviderError::TransportError(_) => ErrorCategory::TransportError,
            ProviderError::MalformedResponse(_) => ErrorCategory::MalformedResponse,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ProviderError::AuthFailure(msg)
            | ProviderError::NotFound(msg)
            | ProviderError::ProviderWarmingUp(msg)
            | ProviderError::Timeout(msg)
            | ProviderError::TransportError(msg)
            | ProviderError::MalformedResponse(msg) => msg,
        }
    }

    /// Whether a later identical call could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ProviderError::ProviderWarmingUp(_) | ProviderError::Timeout(_) | ProviderError::TransportError(_)
        )
    }

    /// Classify a non-success HTTP status.
    ///
    /// `body` is inspected only to recognise cold-start responses, which some
    /// providers send with a 503 and others with a generic 5xx plus a
    /// "loading" message.
    pub fn from_status(provider: &str, status: reqwest::StatusCode, body: &str) -> Self {
        let detail = format!("{provider} returned {status}: {}", truncate(body, 200));
        match status.as_u16() {
            401 | 403 => ProviderError::AuthFailure(detail),
            404 => ProviderError::NotFound(detail),
            503 => ProviderError::ProviderWarmingUp(detail),
            _ if looks_like_loading(body) => ProviderError::ProviderWarmingUp(detail),
            _ => ProviderError::TransportError(detail),
        }
    }

    /// Classify a transport-level failure from reqwest.
    pub fn from_transport(provider: &str, err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            ProviderError::Timeout(format!("{provider} request timed out: {err}"))
        } else if err.is_decode() {
            ProviderError::MalformedResponse(format!("{provider} response could not be decoded: {err}"))
        } else {
            ProviderError::TransportError(format!("{provider} request failed: {err}"))
        }
    }
}

pub(crate) fn looks_like_loading(body: &str) -> bool {
    let lower = body.to_lowercase();
    lower.contains("currently loading") || lower.contains("is loading") || lower.contains("warming up")
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
