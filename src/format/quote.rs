//! Scalar quoting policy for block-style output.

use crate::parser::scalar::is_plain_string;

/// Characters that may not start a bare string.
const INDICATOR_START: &[char] = &['!', '&', '%', '*', '?', ',', '|', '>', '@', '[', '{', '}', ']', '-', '`'];

/// Words that readers would take for booleans or null.
const RESERVED_WORDS: &[&str] = &["yes", "no", "y", "n", "true", "false", "null"];

/// How a string is written in block style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringStyle {
    /// Bare text
    Plain,
    /// `"..."` with JSON-compatible escapes
    DoubleQuoted,
    /// A `|` block with the given chomping indicator (`-`, empty or `+`)
    Literal(&'static str),
}

/// Pick the style for string value `s`.
#[must_use]
pub fn string_style(s: &str) -> StringStyle {
    if s.contains('\n') {
        return literal_style(s).unwrap_or(StringStyle::DoubleQuoted);
    }
    if needs_quotes(s) {
        StringStyle::DoubleQuoted
    } else {
        StringStyle::Plain
    }
}

/// Whether single-line string `s` must be quoted to read back as the same string.
#[must_use]
pub fn needs_quotes(s: &str) -> bool {
    let Some(first) = s.chars().next() else {
        return true;
    };
    let last = s.chars().next_back().unwrap_or(first);

    first.is_whitespace()
        || last.is_whitespace()
        || first.is_ascii_digit()
        || INDICATOR_START.contains(&first)
        || RESERVED_WORDS.iter().any(|word| s.eq_ignore_ascii_case(word))
        || s.chars().any(|c| matches!(c, '`' | '"' | '\'' | ':' | '#') || c.is_control())
        || s.contains('\u{feff}')
        || !is_plain_string(s)
}

/// Whether mapping key `key` must be quoted.
///
/// Keys are read back as raw text, so only what would break the syntax matters.
#[must_use]
pub fn key_needs_quotes(key: &str) -> bool {
    let Some(first) = key.chars().next() else {
        return true;
    };
    let last = key.chars().next_back().unwrap_or(first);

    first.is_whitespace()
        || last.is_whitespace()
        || last == ':'
        || INDICATOR_START.contains(&first)
        || matches!(first, '#' | '\'' | '"' | ':' | '~')
        || key.starts_with("...")
        || key.contains(": ")
        || key.contains(" #")
        || key.chars().any(char::is_control)
        || key.contains('\u{feff}')
}

/// Longest key, as written, that may use the implicit `key: value` form.
///
/// Implicit keys are capped at 1024 characters up to the `:` indicator.
const IMPLICIT_KEY_LIMIT: usize = 1000;

/// Whether the written key `repr` needs the explicit `? key` form.
#[must_use]
pub fn key_needs_explicit(repr: &str) -> bool {
    repr.chars().count() > IMPLICIT_KEY_LIMIT
}

/// Double-quoted form of `s`.
#[must_use]
pub fn double_quoted(s: &str) -> String {
    // A string always serializes
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{}\"", s.escape_default()))
}

fn literal_style(s: &str) -> Option<StringStyle> {
    if s.chars().any(|c| c.is_control() && c != '\n' && c != '\t') || s.contains('\u{feff}') {
        return None;
    }

    let body = s.trim_end_matches('\n');
    let first_line = body.lines().next()?;
    if first_line.is_empty() || first_line.starts_with([' ', '\t']) {
        return None;
    }
    if body.split('\n').any(|line| !line.is_empty() && line.trim().is_empty()) {
        return None;
    }

    let chomping = match s.len() - body.len() {
        0 => "-",
        1 => "",
        _ => "+",
    };
    Some(StringStyle::Literal(chomping))
}

/// Lines of a literal block for `s`, without indentation.
///
/// The final line break is implied by the chomping indicator; extra trailing
/// breaks become empty lines.
pub fn literal_lines(s: &str) -> Vec<&str> {
    let body = s.trim_end_matches('\n');
    let extra = (s.len() - body.len()).saturating_sub(1);
    let mut lines: Vec<&str> = body.split('\n').collect();
    lines.extend(std::iter::repeat_n("", extra));
    lines
}
