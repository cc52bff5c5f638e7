//! Plain-scalar type resolution.
//!
//! Only unquoted block/flow scalars go through [`resolve_plain`]; quoted,
//! literal and folded scalars are strings without inspection. The formatter
//! uses the same function to decide whether a string can be written bare.

use regex::Regex;
use serde_json::Number;
use std::sync::LazyLock;

use crate::template::Scalar;

static INTEGER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-+]?[0-9]+$").unwrap_or_else(|e| unreachable!("integer pattern: {e}"))
});

static FLOAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-+]?(\.[0-9]+|[0-9]+(\.[0-9]*)?)([eE][-+]?[0-9]+)?$")
        .unwrap_or_else(|e| unreachable!("float pattern: {e}"))
});

/// Resolve the raw text of a plain scalar to a typed [`Scalar`].
///
/// Numeric-looking text with a leading zero (`0123`, `0x1F`, `007`) stays a
/// string, as do dates and anything that is not exactly a null, boolean,
/// integer or finite float.
#[must_use]
pub fn resolve_plain(text: &str) -> Scalar {
    match text {
        "" | "~" | "null" | "Null" | "NULL" => return Scalar::Null,
        "true" | "True" | "TRUE" => return Scalar::Bool(true),
        "false" | "False" | "FALSE" => return Scalar::Bool(false),
        _ => {}
    }

    if has_leading_zero(text) {
        return Scalar::String(text.to_string());
    }

    if INTEGER.is_match(text) {
        let digits = text.strip_prefix('+').unwrap_or(text);
        if let Ok(n) = digits.parse::<i64>() {
            return Scalar::Number(n.into());
        }
        if let Ok(n) = digits.parse::<u64>() {
            return Scalar::Number(n.into());
        }
        // Out of integer range: keep the digits rather than lose precision
        return Scalar::String(text.to_string());
    }

    if FLOAT.is_match(text)
        && let Ok(f) = text.parse::<f64>()
        && let Some(n) = Number::from_f64(f)
    {
        return Scalar::Number(n);
    }

    Scalar::String(text.to_string())
}

/// Whether `s`, written as a plain scalar, would come back as the same string.
#[must_use]
pub fn is_plain_string(s: &str) -> bool {
    matches!(resolve_plain(s), Scalar::String(ref back) if back == s)
}

fn has_leading_zero(text: &str) -> bool {
    let mut chars = text.chars();
    matches!((chars.next(), chars.next()), (Some('0'), Some(second)) if second != '.')
}
