use serde::{Deserialize, Serialize};

use crate::providers::ErrorCategory;

/// Language code reported when nothing better is known.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Result returned by every extraction entry point.
///
/// Always fully populated. When no provider produced usable text the result is
/// the degraded form: empty `text` and `markdown`, the default language, and
/// both confidences at `0.0`. Callers should treat `confidence == 0.0` as "no
/// usable extraction" rather than expecting an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Normalized plain text.
    pub text: String,
    /// Markdown rendering of the provider output.
    pub markdown: String,
    /// Detected language code (ISO 639-1).
    pub language: String,
    /// Confidence of the language guess, in `[0, 1]`.
    pub language_confidence: f64,
    /// Overall confidence of the extraction, in `[0, 1]`.
    pub confidence: f64,
    /// Wall-clock time spent on the whole chain, including failed attempts.
    pub processing_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<DocumentMetadata>,
    /// Which stage of the provider chain produced this result.
    pub source: ExtractionSource,
    /// Failure categories of the attempts that did not succeed, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed_attempts: Vec<ErrorCategory>,
}

impl ExtractionResult {
    /// Build the terminal result used when every provider failed.
    pub fn degraded(processing_time_ms: u64, failed_attempts: Vec<ErrorCategory>) -> Self {
        Self {
            text: String::new(),
            markdown: String::new(),
            language: DEFAULT_LANGUAGE.to_string(),
            language_confidence: 0.0,
            confidence: 0.0,
            processing_time_ms,
            metadata: None,
            source: ExtractionSource::Degraded,
            failed_attempts,
        }
    }

    /// `true` when this result carries no usable extraction.
    pub fn is_degraded(&self) -> bool {
        self.source == ExtractionSource::Degraded
    }
}

/// Stage of the provider chain that produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionSource {
    Primary,
    Fallback,
    Degraded,
}

/// Auxiliary descriptors derived from the extracted text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Rough page estimate, never below 1.
    pub estimated_page_count: usize,
    pub has_equations: bool,
    pub has_tables: bool,
    pub document_type: DocumentType,
}

/// Keyword-driven document classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Certificate,
    Financial,
    Legal,
    Academic,
    Report,
    Document,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Certificate => "certificate",
            DocumentType::Financial => "financial",
            DocumentType::Legal => "legal",
            DocumentType::Academic => "academic",
            DocumentType::Report => "report",
            DocumentType::Document => "document",
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of the heuristic language detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageScore {
    pub language: String,
    pub confidence: f64,
}

impl LanguageScore {
    pub(crate) fn new(language: &str, confidence: f64) -> Self {
        Self {
            language: language.to_string(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }
}

/// Static description of what this crate can do.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Capabilities {
    pub supported_languages: Vec<&'static str>,
    pub supported_content_types: Vec<&'static str>,
    pub features: CapabilityFeatures,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CapabilityFeatures {
    pub ocr: bool,
    pub pdf: bool,
    pub markdown: bool,
    pub language_detection: bool,
    pub equation_detection: bool,
    pub table_detection: bool,
    pub document_classification: bool,
    pub provider_fallback: bool,
}
