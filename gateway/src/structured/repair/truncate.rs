//! Truncation recovery for documents the structural passes could not fix.
//!
//! A depth-zero comma or colon, or a closer with nothing to close, marks an
//! incomplete top-level construct. Recovery cuts the text there, re-balances
//! it and tries one more parse. It never sheds members from inside the value
//! it keeps, so a document broken in the middle stays invalid.

use super::passes::balance_brackets;
use super::scanner::{is_valid_json, Lexeme, StringTracker};

/// Byte offset of the last valid structural position in `text`.
///
/// The scan stops at a comma or colon at depth zero, at a closer that would
/// underflow, or just after the first complete top-level value.
pub(crate) fn last_valid_structural_position(text: &str) -> usize {
    let mut tracker = StringTracker::default();
    let mut depth: usize = 0;

    for (i, c) in text.char_indices() {
        if tracker.feed(c) != Lexeme::Code {
            continue;
        }
        match c {
            '{' | '[' => depth += 1,
            '}' | ']' => {
                if depth == 0 {
                    return i;
                }
                depth -= 1;
                if depth == 0 {
                    return i + 1;
                }
            }
            ',' | ':' if depth == 0 => return i,
            _ => {}
        }
    }
    text.len()
}

/// Cuts `text` back to its last valid structural position and re-balances.
///
/// Returns `None` when the cut document still does not parse. Nothing inside
/// the retained top-level value is discarded.
pub(crate) fn truncation_fallback(text: &str) -> Option<String> {
    let balanced = balance_brackets(&text[..last_valid_structural_position(text)]);
    is_valid_json(&balanced).then_some(balanced)
}
