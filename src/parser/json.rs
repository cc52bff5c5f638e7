//! JSON decoding through `serde_json`.

use crate::core::{CfnError, CfnResult};
use crate::template::Node;

/// Decode `text` as a single JSON value, keeping object key order.
pub(super) fn decode(text: &str) -> CfnResult<Node> {
    serde_json::from_str::<serde_json::Value>(text)
        .map(Node::from)
        .map_err(|e| CfnError::Syntax {
            message: e.to_string(),
        })
}

/// Whether `text` looks like JSON: its first non-whitespace character opens an object or array.
pub(super) fn looks_like_json(text: &str) -> bool {
    matches!(text.trim_start().chars().next(), Some('{' | '['))
}
