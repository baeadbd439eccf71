//! Core extraction orchestration.
//!
//! - **Entry points**: [`Extractor`](extractor::Extractor) and its
//!   `extract_*` methods
//! - **Content sniffing**: magic-number detection of the payload type
//! - **Pipeline**: cleanup, normalization, language detection and metadata
//! - **Configuration**: loading and validating [`ExtractorConfig`]
//!
//! # Example
//!
//! ```rust,no_run
//! use docsift::core::config::ExtractorConfig;
//! use docsift::core::extractor::Extractor;
//!
//! # async fn example() -> docsift::Result<()> {
//! let config = ExtractorConfig::discover()?.unwrap_or_default();
//! let extractor = Extractor::from_config(&config)?;
//!
//! let bytes = std::fs::read("scan.png")?;
//! let result = extractor.extract_from_image(&bytes).await;
//! println!("{} ({}, {:.2})", result.text, result.language, result.confidence);
//! # Ok(())
//! # }
//! ```

pub mod capabilities;
pub mod config;
pub mod extractor;
pub mod mime;
pub mod pipeline;

pub use capabilities::get_capabilities;
pub use config::{ExtractorConfig, GradioProviderConfig, InferenceProviderConfig, TextCleanupConfig};
pub use extractor::Extractor;
pub use mime::{ContentType, sniff_content_type};
