//! Remote extraction providers.
//!
//! A provider turns an [`ExtractionRequest`] into raw text with a single
//! outbound call. Providers never retry and never fall back on their own; that
//! policy lives in [`Extractor`](crate::core::extractor::Extractor), which owns
//! two providers and decides what happens after each attempt.
//!
//! # Implementing a provider
//!
//! ```rust
//! use async_trait::async_trait;
//! use docsift::providers::{ExtractionProvider, ExtractionRequest, ProviderError};
//!
//! struct StaticText(&'static str);
//!
//! #[async_trait]
//! impl ExtractionProvider for StaticText {
//!     fn name(&self) -> &str {
//!         "static-text"
//!     }
//!
//!     async fn extract(&self, _request: &ExtractionRequest) -> Result<String, ProviderError> {
//!         Ok(self.0.to_string())
//!     }
//! }
//! ```

pub mod error;
pub mod gradio;
pub mod inference;

pub use error::{ErrorCategory, ProviderError};
pub use gradio::GradioProvider;
pub use inference::InferenceProvider;

use crate::core::mime::{ContentType, sniff_content_type};
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};

/// Outcome of a single provider attempt.
pub type ProviderOutcome = std::result::Result<String, ProviderError>;

/// Raw document bytes plus the sniffed content type.
///
/// Built once per extraction call and shared read-only by both attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    bytes: Vec<u8>,
    content_type: ContentType,
}

impl ExtractionRequest {
    /// Sniff the content type and wrap the bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        let bytes = bytes.into();
        let content_type = sniff_content_type(&bytes);
        Self { bytes, content_type }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn content_type(&self) -> ContentType {
        self.content_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Encode the payload as a `data:` URL, the form both providers accept.
    pub fn to_data_url(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.content_type.mime_type(),
            general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}

/// A single remote text-extraction endpoint.
#[async_trait]
pub trait ExtractionProvider: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Issue exactly one call and return the raw text.
    ///
    /// Implementations classify every failure into one of the
    /// [`ProviderError`] categories and must not panic on unexpected responses.
    async fn extract(&self, request: &ExtractionRequest) -> ProviderOutcome;
}

/// Reject provider output that carries no text.
pub(crate) fn non_empty_text(provider: &str, text: String) -> ProviderOutcome {
    if text.trim().is_empty() {
        return Err(ProviderError::MalformedResponse(format!(
            "{provider} returned an empty text"
        )));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_sniffs_content_type() {
        let request = ExtractionRequest::new(b"%PDF-1.5\n...".to_vec());
        assert_eq!(request.content_type(), ContentType::Pdf);
        assert_eq!(request.len(), 12);
        assert!(!request.is_empty());
    }

    #[test]
    fn test_empty_request_defaults_to_png() {
        let request = ExtractionRequest::new(Vec::new());
        assert_eq!(request.content_type(), ContentType::Png);
        assert!(request.is_empty());
        assert_eq!(request.to_data_url(), "data:image/png;base64,");
    }

    #[test]
    fn test_data_url_encoding() {
        let request = ExtractionRequest::new(vec![0xFF, 0xD8, 0xFF, 0xE0]);
        assert_eq!(request.to_data_url(), "data:image/jpeg;base64,/9j/4A==");
    }

    #[test]
    fn test_non_empty_text() {
        assert_eq!(non_empty_text("p", "hello".to_string()).unwrap(), "hello");
        let err = non_empty_text("p", "  \n ".to_string()).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::MalformedResponse);
    }
}
