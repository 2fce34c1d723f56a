//! String-context tracking shared by every repair pass.

/// What a character means given the string context it appears in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Lexeme {
    /// Outside any string literal
    Code,
    /// An unescaped quote opening or closing a string
    Quote,
    /// Inside a string literal, including escape sequences
    StringContent,
}

/// Tracks whether the scan is inside a string and whether the next character
/// is escaped.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct StringTracker {
    in_string: bool,
    escape_next: bool,
}

impl StringTracker {
    pub(crate) fn feed(&mut self, c: char) -> Lexeme {
        if !self.in_string {
            if c == '"' {
                self.in_string = true;
                return Lexeme::Quote;
            }
            return Lexeme::Code;
        }

        if self.escape_next {
            self.escape_next = false;
            return Lexeme::StringContent;
        }

        match c {
            '\\' => {
                self.escape_next = true;
                Lexeme::StringContent
            }
            '"' => {
                self.in_string = false;
                Lexeme::Quote
            }
            _ => Lexeme::StringContent,
        }
    }

    pub(crate) const fn in_string(self) -> bool {
        self.in_string
    }

    pub(crate) const fn escape_next(self) -> bool {
        self.escape_next
    }

    /// Forces the current string closed.
    pub(crate) fn close_string(&mut self) {
        self.in_string = false;
        self.escape_next = false;
    }
}

/// Returns the matching opener for a closing bracket.
pub(crate) const fn opener_for(close: char) -> Option<char> {
    match close {
        '}' => Some('{'),
        ']' => Some('['),
        _ => None,
    }
}

/// Returns the matching closer for an opening bracket.
pub(crate) const fn closer_for(open: char) -> Option<char> {
    match open {
        '{' => Some('}'),
        '[' => Some(']'),
        _ => None,
    }
}

/// Characters that can begin a JSON value after a closing bracket.
pub(crate) fn starts_value(c: char) -> bool {
    matches!(c, '{' | '[' | '"' | '-') || c.is_ascii_digit()
}

/// Returns `true` if `text` is strictly valid JSON.
pub(crate) fn is_valid_json(text: &str) -> bool {
    serde_json::from_str::<serde::de::IgnoredAny>(text).is_ok()
}

/// First non-whitespace character at or after byte offset `from`.
pub(crate) fn next_significant(text: &str, from: usize) -> Option<char> {
    text[from..].chars().find(|c| !c.is_whitespace())
}
