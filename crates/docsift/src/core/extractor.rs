//! Main extraction entry points.
//!
//! [`Extractor`] owns two providers and runs the fallback chain:
//!
//! ```text
//! Idle -> PrimaryAttempt -> Succeeded
//!                        \-> FallbackAttempt -> Succeeded
//!                                            \-> Degraded
//! ```
//!
//! Any primary failure moves to the fallback, whatever its category. Output
//! that is empty once cleaned and normalized counts as a malformed response.
//! The primary attempt runs under a hard deadline; when it expires the in-flight
//! future is dropped, which cancels the HTTP request, and the chain moves on
//! immediately. A fallback failure ends in the degraded result. None of these
//! transitions produce an error for the caller.
//!
//! # Functions
//!
//! - [`Extractor::extract_bytes`] - run the chain over raw bytes
//! - [`Extractor::extract_from_image`] / [`Extractor::extract_from_pdf`] - same pipeline, named per input
//! - `*_sync` variants of the above for non-async callers

use crate::core::config::{ExtractorConfig, TextCleanupConfig};
use crate::core::pipeline::run_pipeline;
use crate::providers::{
    ErrorCategory, ExtractionProvider, ExtractionRequest, GradioProvider, InferenceProvider, ProviderError,
    ProviderOutcome,
};
use crate::Result;
use crate::types::{ExtractionResult, ExtractionSource};
use once_cell::sync::Lazy;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Deadline for the primary attempt when none is configured.
pub const DEFAULT_PRIMARY_TIMEOUT: Duration = Duration::from_secs(45);

/// Global Tokio runtime for synchronous operations.
///
/// Lazily initialized on first use and shared across all sync wrappers.
///
/// # Safety
///
/// The `.expect()` here is justified because runtime creation only fails on
/// resource exhaustion, at which point no extraction can run anyway.
static GLOBAL_RUNTIME: Lazy<tokio::runtime::Runtime> = Lazy::new(|| {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to create global Tokio runtime - system may be out of resources")
});

enum ChainState {
    PrimaryAttempt,
    FallbackAttempt,
    Succeeded(Box<ExtractionResult>),
    Degraded,
}

/// Document extractor with a primary and a fallback provider.
///
/// Holds no mutable state; share one instance across concurrent requests.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use docsift::providers::{ExtractionProvider, ExtractionRequest, ProviderError};
/// use docsift::Extractor;
/// use std::sync::Arc;
///
/// struct Offline;
///
/// #[async_trait]
/// impl ExtractionProvider for Offline {
///     fn name(&self) -> &str {
///         "offline"
///     }
///
///     async fn extract(&self, _request: &ExtractionRequest) -> Result<String, ProviderError> {
///         Err(ProviderError::TransportError("connection refused".to_string()))
///     }
/// }
///
/// let extractor = Extractor::new(Arc::new(Offline), Arc::new(Offline));
/// let result = extractor.extract_from_image_sync(b"\x89PNG\r\n\x1a\n");
/// assert!(result.is_degraded());
/// assert_eq!(result.confidence, 0.0);
/// ```
#[derive(Clone)]
pub struct Extractor {
    primary: Arc<dyn ExtractionProvider>,
    fallback: Arc<dyn ExtractionProvider>,
    primary_timeout: Duration,
    cleanup: TextCleanupConfig,
}

impl std::fmt::Debug for Extractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Extractor")
            .field("primary", &self.primary.name())
            .field("fallback", &self.fallback.name())
            .field("primary_timeout", &self.primary_timeout)
            .field("cleanup", &self.cleanup)
            .finish()
    }
}

impl Extractor {
    /// Build an extractor from two providers, with the default deadline and cleanup.
    pub fn new(primary: Arc<dyn ExtractionProvider>, fallback: Arc<dyn ExtractionProvider>) -> Self {
        Self {
            primary,
            fallback,
            primary_timeout: DEFAULT_PRIMARY_TIMEOUT,
            cleanup: TextCleanupConfig::default(),
        }
    }

    /// Build the HTTP-backed pair described by `config`.
    ///
    /// The API token is read from the environment once, here.
    ///
    /// # Errors
    ///
    /// - `DocsiftError::Validation` if the config fails [`ExtractorConfig::validate`]
    /// - `DocsiftError::Http` if an HTTP client cannot be built
    pub fn from_config(config: &ExtractorConfig) -> Result<Self> {
        config.validate()?;

        let token = config.api_token();
        if token.is_none() {
            tracing::debug!(env = %config.api_token_env, "No API token found in environment");
        }

        let primary = InferenceProvider::new(&config.primary, token.clone())?;
        let fallback = GradioProvider::new(&config.fallback, token)?;

        tracing::debug!(
            primary = primary.endpoint(),
            fallback = fallback.endpoint(),
            primary_timeout_secs = config.primary.timeout_secs,
            "Extractor configured"
        );

        Ok(Self::new(Arc::new(primary), Arc::new(fallback))
            .with_primary_timeout(config.primary.timeout())
            .with_cleanup(config.cleanup.clone()))
    }

    /// Replace the deadline applied to the primary attempt.
    pub fn with_primary_timeout(mut self, timeout: Duration) -> Self {
        self.primary_timeout = timeout;
        self
    }

    pub fn with_cleanup(mut self, cleanup: TextCleanupConfig) -> Self {
        self.cleanup = cleanup;
        self
    }

    pub fn primary_timeout(&self) -> Duration {
        self.primary_timeout
    }

    /// Run the provider chain over `bytes` and enrich whatever comes back.
    ///
    /// Never fails. When both providers fail the result is the degraded form
    /// (see [`ExtractionResult::degraded`]) with the failure categories in
    /// `failed_attempts`.
    #[tracing::instrument(
        skip(self, bytes),
        fields(
            size_bytes = bytes.len(),
            content_type = tracing::field::Empty,
        )
    )]
    pub async fn extract_bytes(&self, bytes: &[u8]) -> ExtractionResult {
        let started = Instant::now();
        let request = ExtractionRequest::new(bytes);
        tracing::Span::current().record("content_type", request.content_type().as_str());

        let mut failed_attempts = Vec::new();
        let mut state = ChainState::PrimaryAttempt;

        let mut result = loop {
            state = match state {
                ChainState::PrimaryAttempt => match self
                    .attempt_primary(&request)
                    .await
                    .and_then(|text| self.enrich(self.primary.name(), &text, ExtractionSource::Primary))
                {
                    Ok(result) => ChainState::Succeeded(Box::new(result)),
                    Err(error) => {
                        failed_attempts.push(record_failure(self.primary.name(), &error));
                        ChainState::FallbackAttempt
                    }
                },
                ChainState::FallbackAttempt => match self
                    .fallback
                    .extract(&request)
                    .await
                    .and_then(|text| self.enrich(self.fallback.name(), &text, ExtractionSource::Fallback))
                {
                    Ok(result) => ChainState::Succeeded(Box::new(result)),
                    Err(error) => {
                        failed_attempts.push(record_failure(self.fallback.name(), &error));
                        ChainState::Degraded
                    }
                },
                ChainState::Succeeded(result) => break *result,
                ChainState::Degraded => {
                    tracing::warn!(
                        attempts = ?failed_attempts,
                        "All providers failed, returning degraded result"
                    );
                    break ExtractionResult::degraded(0, Vec::new());
                }
            };
        };

        result.processing_time_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        result.failed_attempts = failed_attempts;

        if !result.is_degraded() {
            tracing::info!(
                source = ?result.source,
                language = %result.language,
                confidence = result.confidence,
                processing_time_ms = result.processing_time_ms,
                "Extraction complete"
            );
        }

        result
    }

    /// Extract text from an image. Same pipeline as [`Self::extract_bytes`].
    pub async fn extract_from_image(&self, bytes: &[u8]) -> ExtractionResult {
        self.extract_bytes(bytes).await
    }

    /// Extract text from a PDF. The document is sent whole; pages are not split.
    pub async fn extract_from_pdf(&self, bytes: &[u8]) -> ExtractionResult {
        self.extract_bytes(bytes).await
    }

    /// Synchronous wrapper for [`Self::extract_bytes`].
    ///
    /// Uses the global Tokio runtime. Must not be called from inside an
    /// async context.
    pub fn extract_bytes_sync(&self, bytes: &[u8]) -> ExtractionResult {
        GLOBAL_RUNTIME.block_on(self.extract_bytes(bytes))
    }

    /// Synchronous wrapper for [`Self::extract_from_image`].
    pub fn extract_from_image_sync(&self, bytes: &[u8]) -> ExtractionResult {
        GLOBAL_RUNTIME.block_on(self.extract_from_image(bytes))
    }

    /// Synchronous wrapper for [`Self::extract_from_pdf`].
    pub fn extract_from_pdf_sync(&self, bytes: &[u8]) -> ExtractionResult {
        GLOBAL_RUNTIME.block_on(self.extract_from_pdf(bytes))
    }

    /// Enrich one provider's output, rejecting text that cleanup leaves empty.
    fn enrich(
        &self,
        provider: &str,
        raw_text: &str,
        source: ExtractionSource,
    ) -> std::result::Result<ExtractionResult, ProviderError> {
        let result = run_pipeline(raw_text, source, &self.cleanup);
        if result.text.is_empty() {
            return Err(ProviderError::MalformedResponse(format!(
                "{provider} returned no text after cleanup"
            )));
        }
        Ok(result)
    }

    async fn attempt_primary(&self, request: &ExtractionRequest) -> ProviderOutcome {
        match tokio::time::timeout(self.primary_timeout, self.primary.extract(request)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(ProviderError::Timeout(format!(
                "{} did not respond within {}ms",
                self.primary.name(),
                self.primary_timeout.as_millis()
            ))),
        }
    }
}

fn record_failure(provider: &str, error: &ProviderError) -> ErrorCategory {
    tracing::warn!(
        provider,
        category = ?error.category(),
        retryable = error.is_retryable(),
        "Provider attempt failed: {}",
        error
    );
    error.category()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Scripted {
        outcome: ProviderOutcome,
        calls: AtomicUsize,
    }

    impl Scripted {
        fn new(outcome: ProviderOutcome) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ExtractionProvider for Scripted {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn extract(&self, _request: &ExtractionRequest) -> ProviderOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    #[tokio::test]
    async fn test_primary_success_skips_fallback() {
        let primary = Scripted::new(Ok("The invoice for the order was paid on time".to_string()));
        let fallback = Scripted::new(Ok("unused".to_string()));
        let extractor = Extractor::new(primary.clone(), fallback.clone());

        let result = extractor.extract_from_image(b"\xFF\xD8\xFF\xE0").await;

        assert_eq!(result.source, ExtractionSource::Primary);
        assert_eq!(result.language, "en");
        assert!(result.failed_attempts.is_empty());
        assert_eq!(primary.calls(), 1);
        assert_eq!(fallback.calls(), 0);
    }

    #[tokio::test]
    async fn test_every_primary_failure_category_falls_back() {
        let failures = [
            ProviderError::AuthFailure("401".to_string()),
            ProviderError::NotFound("404".to_string()),
            ProviderError::ProviderWarmingUp("loading".to_string()),
            ProviderError::Timeout("slow".to_string()),
            ProviderError::TransportError("reset".to_string()),
            ProviderError::MalformedResponse("garbage".to_string()),
        ];

        for failure in failures {
            let category = failure.category();
            let primary = Scripted::new(Err(failure));
            let fallback = Scripted::new(Ok("Fallback text for the document".to_string()));
            let extractor = Extractor::new(primary, fallback.clone());

            let result = extractor.extract_bytes(b"%PDF-1.7").await;

            assert_eq!(result.source, ExtractionSource::Fallback, "Failed for {category:?}");
            assert_eq!(result.failed_attempts, vec![category]);
            assert_eq!(fallback.calls(), 1);
        }
    }

    #[tokio::test]
    async fn test_double_failure_degrades() {
        let primary = Scripted::new(Err(ProviderError::AuthFailure("401".to_string())));
        let fallback = Scripted::new(Err(ProviderError::TransportError("refused".to_string())));
        let extractor = Extractor::new(primary, fallback);

        let result = extractor.extract_from_pdf(b"%PDF-1.4").await;

        assert!(result.is_degraded());
        assert_eq!(result.text, "");
        assert_eq!(result.language, "en");
        assert_eq!(
            result.failed_attempts,
            vec![ErrorCategory::AuthFailure, ErrorCategory::TransportError]
        );
    }

    #[tokio::test]
    async fn test_primary_output_empty_after_cleanup_falls_back() {
        let primary = Scripted::new(Ok("\u{FFFD}\u{FFFD}\x00".to_string()));
        let fallback = Scripted::new(Ok("Real text from the fallback provider".to_string()));
        let extractor = Extractor::new(primary, fallback.clone());

        let result = extractor.extract_from_image(b"\x89PNG\r\n\x1a\n").await;

        assert_eq!(result.source, ExtractionSource::Fallback);
        assert_eq!(result.text, "Real text from the fallback provider");
        assert_eq!(result.failed_attempts, vec![ErrorCategory::MalformedResponse]);
        assert_eq!(fallback.calls(), 1);
    }

    #[tokio::test]
    async fn test_fallback_output_empty_after_cleanup_degrades() {
        let primary = Scripted::new(Err(ProviderError::NotFound("404".to_string())));
        let fallback = Scripted::new(Ok("\x01\x02 \u{FFFD}".to_string()));
        let extractor = Extractor::new(primary, fallback);

        let result = extractor.extract_from_pdf(b"%PDF-1.7").await;

        assert!(result.is_degraded());
        assert!(result.metadata.is_none());
        assert_eq!(
            result.failed_attempts,
            vec![ErrorCategory::NotFound, ErrorCategory::MalformedResponse]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_primary_deadline_is_enforced() {
        struct Hanging;

        #[async_trait]
        impl ExtractionProvider for Hanging {
            fn name(&self) -> &str {
                "hanging"
            }

            async fn extract(&self, _request: &ExtractionRequest) -> ProviderOutcome {
                std::future::pending().await
            }
        }

        let fallback = Scripted::new(Ok("Recovered by the fallback provider".to_string()));
        let extractor = Extractor::new(Arc::new(Hanging), fallback).with_primary_timeout(Duration::from_secs(45));

        let result = extractor.extract_bytes(b"GIF89a").await;

        assert_eq!(result.source, ExtractionSource::Fallback);
        assert_eq!(result.failed_attempts, vec![ErrorCategory::Timeout]);
    }

    #[test]
    fn test_from_config_rejects_invalid_endpoints() {
        let config = ExtractorConfig::default();
        assert!(Extractor::from_config(&config).is_err());
    }

    #[test]
    fn test_from_config_applies_deadline() {
        let mut config = ExtractorConfig::default();
        config.primary.endpoint = "https://inference.example.com/models/ocr".to_string();
        config.fallback.endpoint = "https://space.example.com/run/predict".to_string();
        config.primary.timeout_secs = 7;

        let extractor = Extractor::from_config(&config).unwrap();
        assert_eq!(extractor.primary_timeout(), Duration::from_secs(7));
        assert!(format!("{extractor:?}").contains("inference"));
    }

    #[test]
    fn test_sync_wrapper() {
        let primary = Scripted::new(Ok("Le contrat est signé pour une durée de trois ans".to_string()));
        let fallback = Scripted::new(Ok("unused".to_string()));
        let extractor = Extractor::new(primary, fallback);

        let result = extractor.extract_from_image_sync(b"");
        assert_eq!(result.language, "fr");
    }
}
