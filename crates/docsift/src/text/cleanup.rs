//! Light cleanup of raw provider output.
//!
//! Runs before normalization. The default pass only removes characters that
//! never belong in extracted text (control characters, replacement characters)
//! and tidies horizontal whitespace. Digit/letter confusable substitution is
//! opt-in because it corrupts invoice numbers, dates and amounts.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

use crate::core::config::TextCleanupConfig;

static CONTROL_CHARS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F-\x9F]").expect("Control chars regex pattern is valid and should compile")
});
static REPLACEMENT_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\u{FFFD}+").expect("Replacement chars regex pattern is valid and should compile"));
static HORIZONTAL_WHITESPACE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[ \t\u{00A0}\u{2000}-\u{200B}\u{3000}]{2,}")
        .expect("Horizontal whitespace regex pattern is valid and should compile")
});

/// Apply the configured cleanup steps.
pub fn clean_extracted_text<'a>(text: &'a str, config: &TextCleanupConfig) -> Cow<'a, str> {
    if !config.enabled {
        return Cow::Borrowed(text);
    }

    let mut text = Cow::Borrowed(text);
    for (pattern, replacement) in [
        (&*CONTROL_CHARS, ""),
        (&*REPLACEMENT_CHARS, ""),
        (&*HORIZONTAL_WHITESPACE, " "),
    ] {
        if pattern.is_match(&text) {
            text = Cow::Owned(pattern.replace_all(&text, replacement).into_owned());
        }
    }

    if config.substitute_confusables {
        text = Cow::Owned(substitute_confusables(&text));
    }

    text
}

/// Replace `0`, `1` and `5` with `O`, `I` and `S` when the digit sits
/// between two letters (`C0MPANY` → `COMPANY`). Digits with a digit or
/// non-letter neighbour are left alone, so `2024`, `INV-1001` and `A1` keep
/// their value.
pub fn substitute_confusables(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());

    for (idx, &ch) in chars.iter().enumerate() {
        let replacement = match ch {
            '0' => Some('O'),
            '1' => Some('I'),
            '5' => Some('S'),
            _ => None,
        };

        let between_letters = idx > 0
            && chars[idx - 1].is_alphabetic()
            && chars.get(idx + 1).is_some_and(|next| next.is_alphabetic());

        match replacement {
            Some(letter) if between_letters => out.push(letter),
            _ => out.push(ch),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(enabled: bool, substitute: bool) -> TextCleanupConfig {
        TextCleanupConfig {
            enabled,
            substitute_confusables: substitute,
        }
    }

    #[test]
    fn test_disabled_cleanup_is_identity() {
        let text = "a\x07b   c\u{FFFD}";
        assert!(matches!(clean_extracted_text(text, &config(false, true)), Cow::Borrowed(_)));
    }

    #[test]
    fn test_removes_control_and_replacement_chars() {
        let cleaned = clean_extracted_text("In\x00voice\u{FFFD}\u{FFFD} 42\x1b", &config(true, false));
        assert_eq!(cleaned, "Invoice 42");
    }

    #[test]
    fn test_keeps_newlines_and_collapses_spaces() {
        let cleaned = clean_extracted_text("Line  one\n\nLine\t\ttwo", &config(true, false));
        assert_eq!(cleaned, "Line one\n\nLine two");
    }

    #[test]
    fn test_clean_text_is_borrowed() {
        let cleaned = clean_extracted_text("already clean", &config(true, false));
        assert!(matches!(cleaned, Cow::Borrowed(_)));
    }

    #[test]
    fn test_confusables_off_by_default() {
        let cleaned = clean_extracted_text("C0MPANY INV-1001", &TextCleanupConfig::default());
        assert_eq!(cleaned, "C0MPANY INV-1001");
    }

    #[test]
    fn test_confusables_only_between_letters() {
        assert_eq!(substitute_confusables("C0MPANY"), "COMPANY");
        assert_eq!(substitute_confusables("BAS1C"), "BASIC");
        assert_eq!(substitute_confusables("Invoice 2024-0501"), "Invoice 2024-0501");
        assert_eq!(substitute_confusables("INV-1001"), "INV-1001");
        assert_eq!(substitute_confusables("A1"), "A1");
    }
}
