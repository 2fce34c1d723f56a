//! The structural repair passes, applied in order by [`super::repair`].
//!
//! Every pass is string-aware: characters inside string literals are copied
//! through untouched and never interpreted as structure. A pass given valid
//! JSON returns it unchanged.

use super::scanner::{
    closer_for, next_significant, opener_for, starts_value, Lexeme, StringTracker,
};

/// Open strings at least this long are assumed to be truncated generations.
pub const LONG_STRING_THRESHOLD: usize = 100;

/// Deletes commas directly followed (ignoring whitespace) by `}` or `]`.
pub(crate) fn remove_trailing_commas(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut tracker = StringTracker::default();

    for (i, c) in text.char_indices() {
        if tracker.feed(c) == Lexeme::Code
            && c == ','
            && matches!(next_significant(text, i + 1), Some('}' | ']'))
        {
            continue;
        }
        out.push(c);
    }
    out
}

/// Closes strings cut off by a raw control character or by the end of text.
pub(crate) fn close_unterminated_strings(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 1);
    let mut tracker = StringTracker::default();
    let mut content_start = 0;

    for c in text.chars() {
        if tracker.in_string() && breaks_string(c) {
            if tracker.escape_next() {
                out.pop();
            }
            out.push('"');
            tracker.close_string();
            continue;
        }

        let lexeme = tracker.feed(c);
        out.push(c);
        if lexeme == Lexeme::Quote && tracker.in_string() {
            content_start = out.len();
        }
    }

    if tracker.in_string() {
        if tracker.escape_next() {
            out.pop();
        }
        if out[content_start..].chars().count() < LONG_STRING_THRESHOLD {
            let escaped = escape_literal_whitespace(&out[content_start..]);
            out.truncate(content_start);
            out.push_str(&escaped);
        }
        out.push('"');
    }
    out
}

/// Appends closers for every bracket still open at the end of the text.
///
/// A closer that skips over inner open brackets first closes them. A
/// dangling comma before the appended closers is dropped.
pub(crate) fn balance_brackets(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut stack: Vec<char> = Vec::new();
    let mut tracker = StringTracker::default();

    for c in text.chars() {
        if tracker.feed(c) == Lexeme::Code {
            match c {
                '{' | '[' => stack.push(c),
                '}' | ']' => close_through(&mut stack, &mut out, c),
                _ => {}
            }
        }
        out.push(c);
    }

    if !stack.is_empty() {
        if !tracker.in_string() {
            drop_dangling_comma(&mut out);
        }
        out.extend(stack.iter().rev().filter_map(|&open| closer_for(open)));
    }
    out
}

/// Inserts a comma between a closing bracket and a following value, except
/// at depth zero.
pub(crate) fn insert_missing_commas(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 4);
    let mut tracker = StringTracker::default();
    let mut depth: usize = 0;

    for (i, c) in text.char_indices() {
        out.push(c);
        if tracker.feed(c) != Lexeme::Code {
            continue;
        }
        match c {
            '{' | '[' => depth += 1,
            '}' | ']' => {
                depth = depth.saturating_sub(1);
                if depth > 0 && next_significant(text, i + 1).is_some_and(starts_value) {
                    out.push(',');
                }
            }
            _ => {}
        }
    }
    out
}

fn breaks_string(c: char) -> bool {
    c != '\t' && matches!(c, '\u{0}'..='\u{1f}')
}

fn escape_literal_whitespace(content: &str) -> String {
    let mut escaped = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn close_through(stack: &mut Vec<char>, out: &mut String, close: char) {
    let Some(open) = opener_for(close) else {
        return;
    };
    if stack.last() == Some(&open) {
        stack.pop();
        return;
    }
    // Unmatched closers are left for the truncation fallback
    if let Some(pos) = stack.iter().rposition(|&o| o == open) {
        out.extend(stack[pos + 1..].iter().rev().filter_map(|&o| closer_for(o)));
        stack.truncate(pos);
    }
}

fn drop_dangling_comma(out: &mut String) {
    let end = out.trim_end().len();
    if out[..end].ends_with(',') {
        out.truncate(end - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_commas_are_removed() {
        assert_eq!(remove_trailing_commas(r#"{"a":1,}"#), r#"{"a":1}"#);
        assert_eq!(remove_trailing_commas("[1, 2 ,\n ]"), "[1, 2 \n ]");
    }

    #[test]
    fn commas_inside_strings_are_kept() {
        let text = r#"{"a":",}"}"#;
        assert_eq!(remove_trailing_commas(text), text);
    }

    #[test]
    fn raw_newline_closes_open_string() {
        assert_eq!(
            close_unterminated_strings("{\"a\":\"cut off\n,\"b\":1}"),
            r#"{"a":"cut off","b":1}"#
        );
    }

    #[test]
    fn short_open_string_is_escaped_and_closed() {
        assert_eq!(close_unterminated_strings("{\"a\":\"x\ty"), "{\"a\":\"x\\ty\"");
    }

    #[test]
    fn long_open_string_is_closed_verbatim() {
        let body = "\t".repeat(LONG_STRING_THRESHOLD);
        let repaired = close_unterminated_strings(&format!("[\"{body}"));
        assert_eq!(repaired, format!("[\"{body}\""));
    }

    #[test]
    fn dangling_backslash_is_dropped() {
        assert_eq!(close_unterminated_strings(r#"["abc\"#), r#"["abc""#);
    }

    #[test]
    fn escaped_quote_does_not_terminate() {
        assert_eq!(close_unterminated_strings(r#"["say \"hi"#), r#"["say \"hi""#);
    }

    #[test]
    fn open_brackets_are_closed_innermost_first() {
        assert_eq!(balance_brackets(r#"{"a":[{"b":1"#), r#"{"a":[{"b":1}]}"#);
    }

    #[test]
    fn brackets_inside_strings_are_ignored() {
        assert_eq!(balance_brackets(r#"{"a":"[{""#), r#"{"a":"[{"}"#);
    }

    #[test]
    fn skipped_inner_brackets_are_closed() {
        assert_eq!(balance_brackets(r#"[{"a":1]"#), r#"[{"a":1}]"#);
    }

    #[test]
    fn dangling_comma_is_dropped_before_closing() {
        assert_eq!(balance_brackets(r#"{"a":1, "#), r#"{"a":1}"#);
    }

    #[test]
    fn missing_comma_between_objects() {
        assert_eq!(
            insert_missing_commas(r#"[{"id":1} {"id":2}]"#),
            r#"[{"id":1}, {"id":2}]"#
        );
        assert_eq!(insert_missing_commas(r#"[[1]"x"]"#), r#"[[1],"x"]"#);
    }

    #[test]
    fn top_level_values_are_not_bridged() {
        let text = r#"{"a":1} {"b":2}"#;
        assert_eq!(insert_missing_commas(text), text);
    }

    #[test]
    fn passes_leave_valid_json_alone() {
        let text = r#"{"a":[1,{"b":"x,]}"}],"c":"\"q\"","d":-1}"#;
        assert_eq!(remove_trailing_commas(text), text);
        assert_eq!(close_unterminated_strings(text), text);
        assert_eq!(balance_brackets(text), text);
        assert_eq!(insert_missing_commas(text), text);
    }
}
