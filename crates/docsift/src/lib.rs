//! Docsift - document text extraction with provider fallback
//!
//! Docsift sends scanned documents (images or PDFs) to a remote extraction
//! provider, falls back to a second provider when the first one fails, and
//! enriches the returned text with a markdown rendering, a language guess and
//! lightweight document metadata.
//!
//! Extraction never returns an error. When every provider fails the result is
//! fully populated but empty, with a confidence of `0.0`.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use docsift::{Extractor, ExtractorConfig};
//!
//! # fn main() -> docsift::Result<()> {
//! let mut config = ExtractorConfig::default();
//! config.primary.endpoint = "https://inference.example.com/models/ocr".to_string();
//! config.fallback.endpoint = "https://space.example.com/run/predict".to_string();
//!
//! let extractor = Extractor::from_config(&config)?;
//! let bytes = std::fs::read("diploma.jpg")?;
//! let result = extractor.extract_from_image_sync(&bytes);
//!
//! if result.confidence == 0.0 {
//!     eprintln!("no usable extraction");
//! } else {
//!     println!("[{}] {}", result.language, result.text);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Core** (`core`): orchestrator, content sniffing, enrichment pipeline, config
//! - **Providers** (`providers`): the provider trait and the two HTTP clients
//! - **Text** (`text`): cleanup and plain/markdown normalization
//! - **Language detection** (`language_detection`): script and keyword heuristics
//! - **Metadata** (`metadata`): equations, tables, page estimate, document type

#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod language_detection;
pub mod metadata;
pub mod providers;
pub mod text;
pub mod types;

pub use error::{DocsiftError, Result};
pub use types::*;

pub use core::capabilities::get_capabilities;
pub use core::config::ExtractorConfig;
pub use core::extractor::Extractor;
pub use core::mime::{ContentType, sniff_content_type};
pub use language_detection::detect_language;
pub use providers::{ErrorCategory, ExtractionProvider, ExtractionRequest, ProviderError};
