//! Error types for Docsift.
//!
//! Extraction itself never fails from the caller's point of view: provider
//! failures are absorbed by the fallback chain and surface only as a zero
//! confidence on the returned [`ExtractionResult`](crate::ExtractionResult).
//! `DocsiftError` therefore only covers the paths that run *before* a request
//! exists:
//!
//! - Loading and validating an [`ExtractorConfig`](crate::ExtractorConfig)
//! - Building the HTTP-backed providers
//!
//! **System errors bubble up unchanged:** `DocsiftError::Io` wraps
//! `std::io::Error` as-is so file permission and missing-file problems stay
//! visible. Everything else carries a message and, where available, the
//! underlying source.
//!
//! # Example
//!
//! ```rust
//! use docsift::{DocsiftError, Result};
//!
//! fn check_endpoint(endpoint: &str) -> Result<()> {
//!     if endpoint.is_empty() {
//!         return Err(DocsiftError::validation("endpoint must not be empty"));
//!     }
//!     Ok(())
//! }
//! ```
use thiserror::Error;

/// Result type alias using `DocsiftError`.
pub type Result<T> = std::result::Result<T, DocsiftError>;

/// Error type for configuration and construction failures.
#[derive(Debug, Error)]
pub enum DocsiftError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("HTTP client error: {message}")]
    Http {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

macro_rules! error_constructor {
    ($name:ident, $variant:ident) => {
        pastey::paste! {
            #[doc = "Create a " $variant " error"]
            pub fn $name<S: Into<String>>(message: S) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: None,
                }
            }

            #[doc = "Create a " $variant " error with source"]
            pub fn [<$name _with_source>]<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
                message: S,
                source: E,
            ) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: Some(Box::new(source)),
                }
            }
        }
    };
}

impl DocsiftError {
    error_constructor!(validation, Validation);
    error_constructor!(http, Http);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DocsiftError = io_err.into();
        assert!(matches!(err, DocsiftError::Io(_)));
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_validation_error() {
        let err = DocsiftError::validation("invalid endpoint");
        assert_eq!(err.to_string(), "Validation error: invalid endpoint");
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn test_validation_error_with_source() {
        let source = std::io::Error::new(std::io::ErrorKind::InvalidInput, "bad param");
        let err = DocsiftError::validation_with_source("invalid endpoint", source);
        assert_eq!(err.to_string(), "Validation error: invalid endpoint");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_http_error_keeps_source() {
        let source = std::io::Error::other("no TLS backend");
        let err = DocsiftError::http_with_source("Failed to build inference HTTP client", source);
        assert_eq!(err.to_string(), "HTTP client error: Failed to build inference HTTP client");
        assert!(std::error::Error::source(&err).is_some());
    }
}
