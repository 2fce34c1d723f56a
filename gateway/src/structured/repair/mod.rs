//! Best-effort JSON repair.
//!
//! [`repair`] never fails: it returns its best transformation of the input,
//! which may still be invalid. Callers detect that with their own parse.
//!
//! Passes run in a fixed order:
//! 1. trailing comma removal
//! 2. unterminated string repair
//! 3. bracket balancing
//! 4. missing comma insertion
//! 5. validation, then truncation recovery if the text still does not parse

mod passes;
mod scanner;
mod truncate;

pub use passes::LONG_STRING_THRESHOLD;

use passes::{
    balance_brackets, close_unterminated_strings, insert_missing_commas, remove_trailing_commas,
};
use scanner::is_valid_json;
use std::fmt;
use tracing::debug;
use truncate::truncation_fallback;

/// A repair step that changed the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepairPass {
    /// Commas before `}` or `]` were removed
    TrailingCommas,
    /// An open string was closed
    UnterminatedStrings,
    /// Missing closers were appended
    BracketBalance,
    /// Commas were inserted between adjacent values
    MissingCommas,
    /// The text was cut back to a parseable prefix
    Truncation,
}

impl RepairPass {
    /// Stable name used in logs and metric labels.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TrailingCommas => "trailing_commas",
            Self::UnterminatedStrings => "unterminated_strings",
            Self::BracketBalance => "bracket_balance",
            Self::MissingCommas => "missing_commas",
            Self::Truncation => "truncation",
        }
    }
}

impl fmt::Display for RepairPass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one repair invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairReport {
    /// The repaired text
    pub text: String,
    /// Passes that changed the text, in the order they ran
    pub applied: Vec<RepairPass>,
    /// Whether `text` is strictly valid JSON
    pub valid: bool,
}

type Pass = fn(&str) -> String;

const STRUCTURAL_PASSES: [(RepairPass, Pass); 4] = [
    (RepairPass::TrailingCommas, remove_trailing_commas),
    (RepairPass::UnterminatedStrings, close_unterminated_strings),
    (RepairPass::BracketBalance, balance_brackets),
    (RepairPass::MissingCommas, insert_missing_commas),
];

/// Repairs `text` so that it is more likely to parse as JSON.
///
/// Valid JSON is returned unchanged.
#[must_use]
pub fn repair(text: &str) -> String {
    repair_with_report(text).text
}

/// Like [`repair`], also reporting which passes fired.
#[must_use]
pub fn repair_with_report(text: &str) -> RepairReport {
    if is_valid_json(text) {
        return RepairReport {
            text: text.to_string(),
            applied: Vec::new(),
            valid: true,
        };
    }

    let mut applied = Vec::new();
    let mut current = text.to_string();
    for (pass, apply) in STRUCTURAL_PASSES {
        let next = apply(&current);
        if next != current {
            applied.push(pass);
            current = next;
        }
    }

    if is_valid_json(&current) {
        debug!(passes = ?applied, "JSON repaired");
        return RepairReport {
            text: current,
            applied,
            valid: true,
        };
    }

    if let Some(truncated) = truncation_fallback(&current) {
        applied.push(RepairPass::Truncation);
        debug!(passes = ?applied, dropped_bytes = current.len().saturating_sub(truncated.len()), "JSON repaired by truncation");
        return RepairReport {
            text: truncated,
            applied,
            valid: true,
        };
    }

    debug!(passes = ?applied, "JSON repair exhausted");
    RepairReport {
        text: current,
        applied,
        valid: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn repaired(text: &str) -> Value {
        serde_json::from_str(&repair(text)).unwrap()
    }

    #[test]
    fn test_valid_json_is_untouched() {
        let text = r#"{ "a" : [1, 2.5, "x"], "b": {"c": null} }"#;
        let report = repair_with_report(text);
        assert_eq!(report.text, text);
        assert!(report.applied.is_empty());
        assert!(report.valid);
    }

    #[test]
    fn test_single_unclosed_brace() {
        assert_eq!(repaired(r#"{"a":1"#), json!({"a": 1}));
        assert_eq!(repaired("[1, 2"), json!([1, 2]));
    }

    #[test]
    fn test_trailing_comma() {
        let report = repair_with_report(r#"{"a":1,}"#);
        assert_eq!(report.applied, vec![RepairPass::TrailingCommas]);
        assert_eq!(serde_json::from_str::<Value>(&report.text).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_adjacent_objects_in_array() {
        assert_eq!(
            repaired(r#"[{"id":1}{"id":2}]"#),
            json!([{"id": 1}, {"id": 2}])
        );
    }

    #[test]
    fn test_fenced_itinerary_tail() {
        let report = repair_with_report(r#"{"days":[{"day":1},{"day":2}"#);
        assert_eq!(report.applied, vec![RepairPass::BracketBalance]);
        assert_eq!(report.text, r#"{"days":[{"day":1},{"day":2}]}"#);
    }

    #[test]
    fn test_truncated_string_value() {
        assert_eq!(
            repaired(r#"{"city":"Lisbon","note":"Try the pastel de na"#),
            json!({"city": "Lisbon", "note": "Try the pastel de na"})
        );
    }

    #[test]
    fn test_combined_defects() {
        assert_eq!(
            repaired(r#"{"days":[{"day":1,"stops":["a","b",]}{"day":2"#),
            json!({"days": [{"day": 1, "stops": ["a", "b"]}, {"day": 2}]})
        );
    }

    #[test]
    fn test_trailing_junk_after_document_is_cut() {
        let report = repair_with_report(r#"{"a":1} and {"b":"#);
        assert!(report.valid);
        assert_eq!(report.applied.last(), Some(&RepairPass::Truncation));
        assert_eq!(serde_json::from_str::<Value>(&report.text).unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_dangling_key_is_left_invalid() {
        let report = repair_with_report(r#"{"a":"#);
        assert!(!report.valid);
        assert!(!report.applied.contains(&RepairPass::Truncation));
    }

    #[test]
    fn test_unescaped_inner_quotes_are_not_emptied() {
        let report = repair_with_report(r#"{"title":"The "Best" trip","days":[1,2]}"#);
        assert!(!report.valid);
        assert_ne!(report.text, "{}");
    }

    #[test]
    fn test_raw_tab_in_string_is_not_emptied() {
        let report = repair_with_report("{\"title\":\"x\ty\"}");
        assert!(!report.valid);
        assert_eq!(report.text, "{\"title\":\"x\ty\"}");
    }

    #[test]
    fn test_prose_is_returned_invalid() {
        let report = repair_with_report("no structure here");
        assert!(!report.valid);
        assert_eq!(report.text, "no structure here");
    }

    #[test]
    fn test_repair_is_stable_on_its_own_output() {
        let once = repair(r#"[{"a":"x"}{"b":[1,2,"#);
        assert_eq!(repair(&once), once);
    }
}
