//! Enrichment pipeline.
//!
//! Turns raw provider text into a populated [`ExtractionResult`]:
//!
//! 1. Cleanup (control characters, whitespace, optional confusables)
//! 2. Markdown rendering of the cleaned text
//! 3. Plain text from the markdown rendering
//! 4. Language detection over the plain text
//! 5. Metadata scan over plain text and markdown
//!
//! Timing and failed attempts belong to the orchestrator, which fills them in
//! after this runs.

use crate::core::config::TextCleanupConfig;
use crate::language_detection::detect_language;
use crate::metadata::extract_metadata;
use crate::text::{clean_extracted_text, markdown_to_plain, plain_to_markdown};
use crate::types::{ExtractionResult, ExtractionSource};

/// Run the enrichment steps over one provider's output.
pub fn run_pipeline(raw_text: &str, source: ExtractionSource, cleanup: &TextCleanupConfig) -> ExtractionResult {
    let cleaned = clean_extracted_text(raw_text, cleanup);
    let markdown = plain_to_markdown(&cleaned);
    let text = markdown_to_plain(&markdown);

    let language = detect_language(&text);
    let confidence = if text.is_empty() { 0.0 } else { language.confidence };
    let metadata = extract_metadata(&text, &markdown);

    tracing::debug!(
        language = %language.language,
        language_confidence = language.confidence,
        document_type = %metadata.document_type,
        chars = text.chars().count(),
        "Enrichment pipeline complete"
    );

    ExtractionResult {
        text,
        markdown,
        language: language.language,
        language_confidence: language.confidence,
        confidence,
        processing_time_ms: 0,
        metadata: Some(metadata),
        source,
        failed_attempts: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DocumentType;

    #[test]
    fn test_pipeline_populates_every_field() {
        let raw = "# Фактура\n\nУниверзитет во Скопје\n\n| Ставка | Износ |\n|---|---|\n| Школарина | 100 |";
        let result = run_pipeline(raw, ExtractionSource::Primary, &TextCleanupConfig::default());

        assert_eq!(result.markdown, raw);
        assert!(result.text.starts_with("Фактура\n\nУниверзитет"));
        assert_eq!(result.language, "mk");
        assert_eq!(result.confidence, result.language_confidence);
        assert_eq!(result.source, ExtractionSource::Primary);

        let metadata = result.metadata.unwrap();
        assert!(metadata.has_tables);
        assert_eq!(metadata.estimated_page_count, 1);
        assert_eq!(metadata.document_type, DocumentType::Financial);
    }

    #[test]
    fn test_cleanup_runs_before_normalization() {
        let raw = "Invoice\u{FFFD}  42\x00 for the order";
        let result = run_pipeline(raw, ExtractionSource::Fallback, &TextCleanupConfig::default());
        assert_eq!(result.text, "Invoice 42 for the order");
    }

    #[test]
    fn test_text_emptied_by_cleanup_has_zero_confidence() {
        let result = run_pipeline("\u{FFFD}\u{FFFD}", ExtractionSource::Primary, &TextCleanupConfig::default());
        assert_eq!(result.text, "");
        assert_eq!(result.confidence, 0.0);
        assert!((0.0..=1.0).contains(&result.language_confidence));
    }
}
