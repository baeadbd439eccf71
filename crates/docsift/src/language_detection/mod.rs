//! Heuristic language detection.
//!
//! A priority chain, not a vote: the first branch that fires decides.
//!
//! 1. Fewer than 10 characters: `en` at 0.5.
//! 2. More than 10% Cyrillic: Macedonian markers, then Serbian markers, else `ru`.
//! 3. French vocabulary or French accents.
//! 4. German, Spanish, Italian stop words, in that order, when more than two hit.
//! 5. English.
//!
//! The vocabulary overlaps across languages, so reordering branches changes
//! results. The tables live in [`lexicon`] and can be swapped for the Latin
//! stop-word stage through [`detect_language_with_profiles`].

pub mod lexicon;

pub use lexicon::LEXICAL_PROFILES;

use crate::types::{DEFAULT_LANGUAGE, LanguageScore};
use lexicon::{ENGLISH, FRENCH, FRENCH_ACCENTS, MACEDONIAN, SERBIAN};

/// Texts shorter than this (in characters) are not classified.
pub const MIN_TEXT_CHARS: usize = 10;

const SHORT_TEXT_CONFIDENCE: f64 = 0.5;
const CYRILLIC_RATIO_THRESHOLD: f64 = 0.10;
const FRENCH_ACCENT_THRESHOLD: f64 = 0.02;
const STOP_WORD_THRESHOLD: usize = 2;

/// How a profile's terms are matched against text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// Each term counts once if it occurs anywhere in the lowercased text.
    Substring,
    /// Each whitespace token equal to a term counts once.
    Token,
}

/// A language code and the vocabulary that signals it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageProfile {
    pub code: &'static str,
    pub mode: MatchMode,
    pub terms: &'static [&'static str],
}

impl LanguageProfile {
    /// Count matches in `lowered`, pre-split into `tokens` for token mode.
    pub fn count_matches(&self, lowered: &str, tokens: &[&str]) -> usize {
        match self.mode {
            MatchMode::Substring => self.terms.iter().filter(|term| lowered.contains(**term)).count(),
            MatchMode::Token => tokens.iter().filter(|token| self.terms.contains(*token)).count(),
        }
    }
}

/// Detect the language of `text` with the built-in tables.
///
/// # Example
///
/// ```rust
/// use docsift::language_detection::detect_language;
///
/// let score = detect_language("Универзитет Св. Кирил и Методиј во Скопје");
/// assert_eq!(score.language, "mk");
/// assert!(score.confidence >= 0.7);
///
/// let short = detect_language("Hi there");
/// assert_eq!((short.language.as_str(), short.confidence), ("en", 0.5));
/// ```
pub fn detect_language(text: &str) -> LanguageScore {
    detect_language_with_profiles(text, LEXICAL_PROFILES)
}

/// Detect the language of `text`, using `lexical` for the stop-word stage.
///
/// Profiles are tried in slice order; the first with more than two token
/// matches wins. The script and French stages are fixed.
pub fn detect_language_with_profiles(text: &str, lexical: &[LanguageProfile]) -> LanguageScore {
    let total_chars = text.chars().count();
    if total_chars < MIN_TEXT_CHARS {
        return LanguageScore::new(DEFAULT_LANGUAGE, SHORT_TEXT_CONFIDENCE);
    }

    let lowered = text.to_lowercase();

    let cyrillic = cyrillic_ratio(text, total_chars);
    if cyrillic > CYRILLIC_RATIO_THRESHOLD {
        return classify_cyrillic(&lowered, cyrillic);
    }

    let tokens = tokenize(&lowered);

    let french_terms = FRENCH.count_matches(&lowered, &tokens);
    let accent_ratio = french_accent_ratio(&lowered, total_chars);
    if french_terms > 0 || accent_ratio > FRENCH_ACCENT_THRESHOLD {
        let confidence = (0.6 + 0.1 * french_terms as f64 + 10.0 * accent_ratio).min(0.9);
        return LanguageScore::new(FRENCH.code, confidence);
    }

    for profile in lexical {
        let count = profile.count_matches(&lowered, &tokens);
        if count > STOP_WORD_THRESHOLD {
            return LanguageScore::new(profile.code, (0.5 + 0.05 * count as f64).min(0.8));
        }
    }

    let english = ENGLISH.count_matches(&lowered, &tokens);
    LanguageScore::new(ENGLISH.code, (0.4 + 0.05 * english as f64).min(0.8))
}

fn classify_cyrillic(lowered: &str, ratio: f64) -> LanguageScore {
    let macedonian = MACEDONIAN.count_matches(lowered, &[]);
    if macedonian > 0 {
        return LanguageScore::new(MACEDONIAN.code, (0.7 + 0.1 * macedonian as f64).min(0.9));
    }

    if SERBIAN.count_matches(lowered, &[]) > 0 {
        return LanguageScore::new(SERBIAN.code, 0.8);
    }

    LanguageScore::new("ru", (0.5 + ratio).min(0.8))
}

fn is_cyrillic(c: char) -> bool {
    ('\u{0400}'..='\u{052F}').contains(&c)
}

fn cyrillic_ratio(text: &str, total_chars: usize) -> f64 {
    if total_chars == 0 {
        return 0.0;
    }
    text.chars().filter(|c| is_cyrillic(*c)).count() as f64 / total_chars as f64
}

fn french_accent_ratio(lowered: &str, total_chars: usize) -> f64 {
    if total_chars == 0 {
        return 0.0;
    }
    lowered.chars().filter(|c| FRENCH_ACCENTS.contains(c)).count() as f64 / total_chars as f64
}

/// Whitespace tokens with surrounding punctuation removed.
fn tokenize(lowered: &str) -> Vec<&str> {
    lowered
        .split_whitespace()
        .map(|token| token.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|token| !token.is_empty())
        .collect()
}
