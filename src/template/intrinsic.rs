//! Recognition of intrinsic function calls.
//!
//! An intrinsic is not a separate node type. It is a mapping with exactly one
//! key, where the key is `Ref` or `Fn::<Name>` for one of the names in
//! [`INTRINSIC_FUNCTIONS`].

use super::{Mapping, Node};
use crate::constants::{INTRINSIC_FUNCTIONS, INTRINSIC_PREFIX};

/// A single-key mapping recognized as an intrinsic function call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intrinsic<'a> {
    /// Short name as used in tags (`Ref`, `GetAtt`, `Sub`, ...)
    pub name: &'static str,
    /// The argument
    pub value: &'a Node,
}

impl<'a> Intrinsic<'a> {
    /// Recognize `mapping` as an intrinsic call.
    #[must_use]
    pub fn from_mapping(mapping: &'a Mapping) -> Option<Self> {
        if mapping.len() != 1 {
            return None;
        }
        let (key, value) = mapping.iter().next()?;
        short_name(key).map(|name| Self { name, value })
    }

    /// The explicit mapping key for this call.
    #[must_use]
    pub fn key(&self) -> String {
        explicit_key(self.name)
    }
}

/// Map an intrinsic key (`Ref`, `Fn::GetAtt`) to its short tag name.
#[must_use]
pub fn short_name(key: &str) -> Option<&'static str> {
    let name = if key == "Ref" {
        key
    } else {
        key.strip_prefix(INTRINSIC_PREFIX)?
    };
    // `Fn::Ref` is not a thing
    if name == "Ref" && key != "Ref" {
        return None;
    }
    INTRINSIC_FUNCTIONS.iter().copied().find(|known| *known == name)
}

/// Map a short tag name to its explicit mapping key.
#[must_use]
pub fn explicit_key(name: &str) -> String {
    if name == "Ref" {
        name.to_string()
    } else {
        format!("{INTRINSIC_PREFIX}{name}")
    }
}

/// Whether `name` is a recognized short tag name.
#[must_use]
pub fn is_short_tag(name: &str) -> bool {
    INTRINSIC_FUNCTIONS.contains(&name)
}
