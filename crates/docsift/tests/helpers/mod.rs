//! Shared fixtures for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use docsift::providers::{ExtractionProvider, ExtractionRequest, ProviderError, ProviderOutcome};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

pub const PNG_HEADER: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
pub const JPEG_HEADER: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];
pub const PDF_HEADER: &[u8] = b"%PDF-1.7\n%\xE2\xE3\xCF\xD3\n";

/// Install a test subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Provider that answers every call with the same outcome.
pub struct FakeProvider {
    name: &'static str,
    outcome: ProviderOutcome,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl FakeProvider {
    pub fn succeeding(name: &'static str, text: &str) -> Arc<Self> {
        Self::build(name, Ok(text.to_string()), None)
    }

    pub fn failing(name: &'static str, error: ProviderError) -> Arc<Self> {
        Self::build(name, Err(error), None)
    }

    /// Succeeds, but only after `delay`.
    pub fn slow(name: &'static str, text: &str, delay: Duration) -> Arc<Self> {
        Self::build(name, Ok(text.to_string()), Some(delay))
    }

    fn build(name: &'static str, outcome: ProviderOutcome, delay: Option<Duration>) -> Arc<Self> {
        Arc::new(Self {
            name,
            outcome,
            delay,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExtractionProvider for FakeProvider {
    fn name(&self) -> &str {
        self.name
    }

    async fn extract(&self, _request: &ExtractionRequest) -> ProviderOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.outcome.clone()
    }
}

/// Provider that never answers.
pub struct NeverResponds;

#[async_trait]
impl ExtractionProvider for NeverResponds {
    fn name(&self) -> &str {
        "never-responds"
    }

    async fn extract(&self, _request: &ExtractionRequest) -> ProviderOutcome {
        std::future::pending().await
    }
}
