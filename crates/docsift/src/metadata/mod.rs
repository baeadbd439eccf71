//! Lightweight descriptors derived from extracted text.
//!
//! Everything here is a pattern scan. Equations and tables are looked for in
//! the markdown rendering, where their syntax survives; document-type keywords
//! and the page estimate use the plain text.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{DocumentMetadata, DocumentType};

/// Characters per page assumed by [`estimate_page_count`].
pub const CHARS_PER_PAGE: usize = 2000;

static EQUATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\$\$[^$]+\$\$|\\\(|\\\[|\\begin\{(?:equation|align|gather|multline|eqnarray)\*?\}|\\frac|\\sum|\\int|[∑∫∏∂√∞≈≠≤≥±×÷∆∇]",
    )
    .expect("Equation regex pattern is valid and should compile")
});

static TABLE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?m)^[ \t]*\|[^\n]*\|[ \t]*\n[ \t]*\|?[ \t]*:?-{3,}:?[ \t]*(?:\|[ \t]*:?-{3,}:?[ \t]*)+\|?[ \t]*$",
    )
    .expect("Table regex pattern is valid and should compile")
});

/// Keyword buckets in precedence order. Matching is case-insensitive
/// substring containment; the first bucket with any hit wins.
const KEYWORD_BUCKETS: &[(DocumentType, &[&str])] = &[
    (
        DocumentType::Certificate,
        &[
            "certificate",
            "certification",
            "certify",
            "diploma",
            "сертификат",
            "диплома",
            "свидетелство",
            "уверение",
        ],
    ),
    (
        DocumentType::Financial,
        &[
            "invoice",
            "receipt",
            "payment",
            "balance",
            "amount due",
            "total due",
            "bank statement",
            "фактура",
            "сметка",
            "плаќање",
        ],
    ),
    (
        DocumentType::Legal,
        &[
            "contract",
            "agreement",
            "hereby",
            "pursuant",
            "plaintiff",
            "defendant",
            "clause",
            "договор",
            "закон",
        ],
    ),
];

/// Build the metadata block for one extraction.
///
/// # Example
///
/// ```rust
/// use docsift::metadata::extract_metadata;
/// use docsift::types::DocumentType;
///
/// let markdown = "Invoice 2024-001\n\nTotal: $$\\sum_i p_i$$";
/// let metadata = extract_metadata(markdown, markdown);
/// assert!(metadata.has_equations);
/// assert_eq!(metadata.document_type, DocumentType::Financial);
/// ```
pub fn extract_metadata(plain: &str, markdown: &str) -> DocumentMetadata {
    let has_equations = has_equations(markdown);
    let has_tables = has_tables(markdown);

    DocumentMetadata {
        estimated_page_count: estimate_page_count(plain),
        has_equations,
        has_tables,
        document_type: classify_document_type(plain, has_equations, has_tables),
    }
}

pub fn has_equations(text: &str) -> bool {
    EQUATION_PATTERN.is_match(text)
}

/// A pipe row directly followed by a `---` separator row.
pub fn has_tables(text: &str) -> bool {
    TABLE_PATTERN.is_match(text)
}

/// `max(1, ceil(chars / 2000))`.
pub fn estimate_page_count(text: &str) -> usize {
    text.chars().count().div_ceil(CHARS_PER_PAGE).max(1)
}

/// Resolve the document type.
///
/// Order: certificate, financial, legal keywords, then equations (academic),
/// then tables (report), then the generic bucket.
pub fn classify_document_type(text: &str, has_equations: bool, has_tables: bool) -> DocumentType {
    let lowered = text.to_lowercase();

    let keyword_match = KEYWORD_BUCKETS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| lowered.contains(*keyword)))
        .map(|(document_type, _)| *document_type);

    match keyword_match {
        Some(document_type) => document_type,
        None if has_equations => DocumentType::Academic,
        None if has_tables => DocumentType::Report,
        None => DocumentType::Document,
    }
}
