//! Cleanup applied to every free-text field before it lands in the schema.

use once_cell::sync::Lazy;
use regex::Regex;

static SCRIPT_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)<script\b[^>]*>.*?</script\s*>").expect("script block regex")
});

static HTML_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)</?[A-Za-z][^<>]*>").expect("html tag regex"));

/// Removes script blocks, markup tags and ASCII control characters.
///
/// Script blocks go first so their bodies do not survive as plain text once
/// the surrounding tags are stripped.
pub fn sanitize_text(raw: &str) -> String {
    let without_scripts = SCRIPT_BLOCK.replace_all(raw, "");
    let without_tags = HTML_TAG.replace_all(&without_scripts, "");
    without_tags
        .chars()
        .filter(|ch| !ch.is_ascii_control())
        .collect()
}
