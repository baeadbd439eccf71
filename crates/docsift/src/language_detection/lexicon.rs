//! Vocabulary tables used by the heuristic detector.
//!
//! Terms are stored lowercase. Cyrillic-script tables use substring matching
//! so inflected forms still hit (`македонија` inside `македонијата`). Latin-script
//! tables match whole tokens so short stop words do not fire inside longer
//! words.

use super::{LanguageProfile, MatchMode};

/// Markers that only occur in Macedonian among Cyrillic-script languages.
///
/// Function words shared with Russian (`од`, `се`, `на`) do not belong here:
/// they pull ordinary Russian text into `mk`.
pub const MACEDONIAN: LanguageProfile = LanguageProfile {
    code: "mk",
    mode: MatchMode::Substring,
    terms: &[
        "универзитет",
        "македонија",
        "македонски",
        "македонска",
        "скопје",
        "свидетелство",
        "потврда",
        "оваа",
        "овој",
        "ќе",
        "ѓ",
        "ќ",
        "ѕ",
    ],
};

pub const SERBIAN: LanguageProfile = LanguageProfile {
    code: "sr",
    mode: MatchMode::Substring,
    terms: &["београд", "србија", "српски", "српска", "нови сад", "који", "ђ", "ћ"],
};

pub const FRENCH: LanguageProfile = LanguageProfile {
    code: "fr",
    mode: MatchMode::Token,
    terms: &[
        "le",
        "les",
        "des",
        "et",
        "est",
        "une",
        "du",
        "pour",
        "dans",
        "avec",
        "nous",
        "vous",
        "être",
        "été",
        "sont",
        "cette",
        "aux",
        "université",
        "français",
        "française",
    ],
};

/// Accented letters counted towards the French accent ratio.
pub const FRENCH_ACCENTS: &[char] = &[
    'à', 'â', 'ç', 'é', 'è', 'ê', 'ë', 'î', 'ï', 'ô', 'û', 'ù', 'ÿ', 'œ', 'æ',
];

pub const GERMAN: LanguageProfile = LanguageProfile {
    code: "de",
    mode: MatchMode::Token,
    terms: &[
        "der", "die", "das", "und", "ist", "nicht", "ein", "eine", "mit", "von", "zu", "den", "auf", "für", "sich", "dem",
        "des", "im", "auch", "wird",
    ],
};

pub const SPANISH: LanguageProfile = LanguageProfile {
    code: "es",
    mode: MatchMode::Token,
    terms: &[
        "el", "los", "las", "de", "que", "y", "en", "por", "para", "es", "se", "al", "como", "más", "pero", "su", "lo",
        "este", "esta", "está",
    ],
};

pub const ITALIAN: LanguageProfile = LanguageProfile {
    code: "it",
    mode: MatchMode::Token,
    terms: &[
        "il", "gli", "della", "di", "che", "e", "è", "per", "non", "sono", "nel", "alla", "dei", "delle", "questo",
        "questa", "anche", "con", "una", "un", "del", "la",
    ],
};

pub const ENGLISH: LanguageProfile = LanguageProfile {
    code: "en",
    mode: MatchMode::Token,
    terms: &[
        "the", "and", "of", "to", "in", "is", "that", "for", "it", "with", "as", "was", "on", "be", "this", "by", "are",
        "from", "at", "or",
    ],
};

/// Latin-script stop-word profiles, checked in this order after French.
pub const LEXICAL_PROFILES: &[LanguageProfile] = &[GERMAN, SPANISH, ITALIAN];
