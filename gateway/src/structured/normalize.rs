//! Text normalization ahead of strict JSON parsing.
//!
//! Generation backends wrap JSON in prose, markdown fences and stray control
//! characters. [`normalize`] peels those layers off without ever failing; a
//! result that still does not parse is the repair engine's problem.

use regex::Regex;
use serde::de::IgnoredAny;
use std::sync::LazyLock;

static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)```(?:json)?(.*?)(?:```|\z)").expect("FENCED_BLOCK regex should be valid")
});

/// Removes C0 control characters other than tab.
#[must_use]
pub fn strip_control_chars(text: &str) -> String {
    text.chars()
        .filter(|&c| c == '\t' || !matches!(c, '\u{0}'..='\u{1f}'))
        .collect()
}

/// Returns the inner content of the first fenced block, if any.
///
/// An opening fence with no closing fence yields everything after it, which
/// is how truncated generations usually look.
#[must_use]
pub fn extract_fenced_block(text: &str) -> Option<&str> {
    FENCED_BLOCK
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Normalizes raw generation output into text that is likely to be JSON.
///
/// Text that already is a JSON object or array is returned as is, so fences
/// inside its string values are never mistaken for a wrapper. Returns the
/// input trimmed when no `{` or `[` can be found.
#[must_use]
pub fn normalize(raw: &str) -> String {
    let cleaned = strip_control_chars(raw);
    let trimmed = cleaned.trim();
    if trimmed.starts_with(['{', '[']) && serde_json::from_str::<IgnoredAny>(trimmed).is_ok() {
        return trimmed.to_string();
    }

    let working = extract_fenced_block(&cleaned).unwrap_or(&cleaned).trim();

    if working.starts_with(['{', '[']) {
        return working.to_string();
    }

    match working.find(['{', '[']) {
        Some(start) => working[start..].trim_end().to_string(),
        None => raw.trim().to_string(),
    }
}
