//! Metadata classification through the public API.

use docsift::DocumentType;
use docsift::metadata::{classify_document_type, extract_metadata};
use docsift::text::{markdown_to_plain, plain_to_markdown};

fn metadata_for(raw: &str) -> docsift::DocumentMetadata {
    let markdown = plain_to_markdown(raw);
    let plain = markdown_to_plain(&markdown);
    extract_metadata(&plain, &markdown)
}

#[test]
fn test_invoice_with_equations_resolves_to_financial() {
    let metadata = metadata_for("INVOICE #2024-17\n\nInterest: $$I = P \\times r \\times t$$\nTotal ≈ 1,204.50");
    assert!(metadata.has_equations);
    assert_eq!(metadata.document_type, DocumentType::Financial);
}

#[test]
fn test_academic_and_report_fallbacks() {
    let academic = metadata_for("Lemma 2. For all n, \\sum_{k=1}^{n} k = \\frac{n(n+1)}{2}.");
    assert_eq!(academic.document_type, DocumentType::Academic);

    let report = metadata_for("Quarterly figures\n\n| Region | Units |\n| --- | --- |\n| North | 120 |");
    assert!(report.has_tables);
    assert_eq!(report.document_type, DocumentType::Report);
}

#[test]
fn test_certificate_outranks_everything() {
    let metadata = metadata_for("DIPLOMA\n\nThis certifies completion. Payment received per contract.\n\n$$x^2$$");
    assert_eq!(metadata.document_type, DocumentType::Certificate);
}

#[test]
fn test_page_estimate_from_long_text() {
    let text = "The report of the committee was read. ".repeat(200);
    let metadata = metadata_for(&text);
    assert_eq!(metadata.estimated_page_count, 4);
}

#[test]
fn test_each_input_gets_exactly_one_type() {
    let samples = [
        "Certificate of completion",
        "Invoice and agreement",
        "Agreement only",
        "Plain letter to a friend",
    ];
    let expected = [
        DocumentType::Certificate,
        DocumentType::Financial,
        DocumentType::Legal,
        DocumentType::Document,
    ];
    for (text, document_type) in samples.iter().zip(expected) {
        assert_eq!(classify_document_type(text, false, false), document_type, "Failed for {text}");
    }
}
