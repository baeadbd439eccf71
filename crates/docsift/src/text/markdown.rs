//! Plain text ⇄ markdown normalization.
//!
//! Providers return something close to prose, sometimes with markdown mixed
//! in. [`plain_to_markdown`] keeps that structure as-is; [`markdown_to_plain`]
//! removes markdown syntax while keeping every word of content.
//!
//! The strip order in [`markdown_to_plain`] is fixed. Emphasis markers are
//! removed before blank lines are collapsed, otherwise markers split across
//! the collapse survive. An ordered list marker is one to three digits and
//! `.` or `)` followed by a word, so a line opening with a year or an amount
//! (`2024. godina`, `15.000 dinara`) keeps its number.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;

static ATX_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*#{1,6}[ \t]+(.*?)(?:[ \t]+#+)?[ \t]*$")
        .expect("ATX header regex pattern is valid and should compile")
});
static BOLD_STARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*([^*\n]+?)\*\*").expect("Bold stars regex pattern is valid and should compile"));
static BOLD_UNDERSCORES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"__([^_\n]+?)__").expect("Bold underscores regex pattern is valid and should compile"));
static ITALIC_STAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*([^*\s][^*\n]*?)\*").expect("Italic star regex pattern is valid and should compile"));
static ITALIC_UNDERSCORE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"_([^_\s][^_\n]*?)_").expect("Italic underscore regex pattern is valid and should compile")
});
static LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!?\[([^\]\n]*)\]\([^)\n]*\)").expect("Link regex pattern is valid and should compile"));
static CODE_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*(```|~~~).*$").expect("Code fence regex pattern is valid and should compile"));
static INLINE_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`([^`\n]*)`").expect("Inline code regex pattern is valid and should compile"));
static HORIZONTAL_RULE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*([-*_])([ \t]*[-*_]){2,}[ \t]*$")
        .expect("Horizontal rule regex pattern is valid and should compile")
});
static BULLET_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^([ \t]*)[-*+][ \t]+").expect("Bullet marker regex pattern is valid and should compile"));
static ORDERED_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^([ \t]*)\d{1,3}[.)][ \t]+(\p{L})").expect("Ordered marker regex pattern is valid and should compile")
});
static TRAILING_SPACES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)[ \t]+$").expect("Trailing spaces regex pattern is valid and should compile"));
static BLANK_RUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("Blank line runs regex pattern is valid and should compile"));

/// Render provider text as markdown.
///
/// Line structure, including paragraph breaks, is kept. Only line endings
/// and outer whitespace are normalized; no escaping is applied.
pub fn plain_to_markdown(text: &str) -> String {
    normalize_line_endings(text).trim().to_string()
}

/// Strip markdown syntax, keeping the text it wraps.
///
/// # Example
///
/// ```rust
/// use docsift::text::markdown_to_plain;
///
/// let plain = markdown_to_plain("# Title\n\nSome **bold** and a [link](https://example.com).");
/// assert_eq!(plain, "Title\n\nSome bold and a link.");
/// ```
pub fn markdown_to_plain(markdown: &str) -> String {
    let text = normalize_line_endings(markdown);

    let text = ATX_HEADER.replace_all(&text, "$1");

    let text = strip_emphasis(&text, &BOLD_STARS);
    let text = strip_emphasis(&text, &BOLD_UNDERSCORES);
    let text = strip_emphasis(&text, &ITALIC_STAR);
    let text = strip_emphasis(&text, &ITALIC_UNDERSCORE);

    let text = LINK.replace_all(&text, "$1");
    let text = CODE_FENCE.replace_all(&text, "");
    let text = INLINE_CODE.replace_all(&text, "$1");
    let text = HORIZONTAL_RULE.replace_all(&text, "");
    let text = BULLET_MARKER.replace_all(&text, "$1");
    let text = ORDERED_MARKER.replace_all(&text, "$1$2");

    let text = TRAILING_SPACES.replace_all(&text, "");
    let text = BLANK_RUNS.replace_all(&text, "\n\n");

    text.trim().to_string()
}

fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Remove a delimiter pair, but only when it is not glued to a word on
/// either side (`snake_case_name` and `2*3*4` are left alone).
fn strip_emphasis<'a>(text: &'a str, pattern: &Regex) -> Cow<'a, str> {
    pattern.replace_all(text, |caps: &Captures| {
        let whole = &caps[0];
        let start = caps.get(0).map_or(0, |m| m.start());
        let end = start + whole.len();

        let before_is_word = text[..start].chars().next_back().is_some_and(char::is_alphanumeric);
        let after_is_word = text[end..].chars().next().is_some_and(char::is_alphanumeric);

        if before_is_word || after_is_word {
            whole.to_string()
        } else {
            caps[1].to_string()
        }
    })
}
