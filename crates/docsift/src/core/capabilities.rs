//! Static capability descriptor.

use crate::core::mime::ContentType;
use crate::types::{Capabilities, CapabilityFeatures};

/// Language codes the detector can return.
pub const SUPPORTED_LANGUAGES: &[&str] = &["en", "mk", "sr", "ru", "fr", "de", "es", "it"];

/// Describe what this build supports. Pure; performs no I/O.
pub fn get_capabilities() -> Capabilities {
    Capabilities {
        supported_languages: SUPPORTED_LANGUAGES.to_vec(),
        supported_content_types: ContentType::ALL.iter().map(|content_type| content_type.mime_type()).collect(),
        features: CapabilityFeatures {
            ocr: true,
            pdf: true,
            markdown: true,
            language_detection: true,
            equation_detection: true,
            table_detection: true,
            document_classification: true,
            provider_fallback: true,
        },
    }
}
