//! Structural comparison of template trees.
//!
//! [`compare`] walks two nodes in parallel and produces a [`Diff`] that mirrors
//! their shape, with a [`Mode`] on every node. Sequences are compared by index
//! and mappings by key; there is no move detection.
//!
//! The aggregate mode of a sequence or mapping diff is derived from its
//! children without regard to their order:
//!
//! - no children, or every child unchanged: [`Mode::Unchanged`]
//! - every child carries the same mode `M`: `M`
//! - anything else: [`Mode::Changed`]
//!
//! # Examples
//!
//! ```rust
//! use cfnkit::diff::{compare, Mode};
//! use cfnkit::template::Node;
//! use serde_json::json;
//!
//! let old = Node::from(json!({"foo": "bar"}));
//! let new = Node::from(json!({"foo": "bar", "baz": "quux"}));
//! let diff = compare(&old, &new);
//! assert_eq!(diff.mode(), Mode::Changed);
//! assert_eq!(diff.value(), Some(new));
//! ```

use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

use crate::template::{Mapping, Node};

/// How a node changed between the old and new tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Present only in the new tree
    Added,
    /// Present only in the old tree
    Removed,
    /// Present in both with different content
    Changed,
    /// Present in both and equal
    Unchanged,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added => write!(f, "added"),
            Self::Removed => write!(f, "removed"),
            Self::Changed => write!(f, "changed"),
            Self::Unchanged => write!(f, "unchanged"),
        }
    }
}

/// A diff tree mirroring the compared nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Diff {
    /// A leaf: the new value, or the old value when removed
    Value {
        /// Mode of this leaf
        mode: Mode,
        /// The carried value
        value: Node,
    },
    /// Index-wise comparison of two sequences
    Sequence {
        /// Aggregate mode
        mode: Mode,
        /// One diff per index of the longer sequence
        items: Vec<Diff>,
    },
    /// Key-wise comparison of two mappings
    Mapping {
        /// Aggregate mode
        mode: Mode,
        /// One diff per key in the union of both key sets
        entries: IndexMap<String, Diff>,
    },
}

impl Diff {
    /// The mode of this node.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        match self {
            Self::Value { mode, .. } | Self::Sequence { mode, .. } | Self::Mapping { mode, .. } => {
                *mode
            }
        }
    }

    /// Whether nothing changed anywhere below this node.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.mode() == Mode::Unchanged
    }

    /// Reassemble the new side of the comparison.
    ///
    /// Removed entries are skipped; `None` only for a removed leaf. Sequence and
    /// mapping diffs always have a new side, possibly empty.
    #[must_use]
    pub fn value(&self) -> Option<Node> {
        match self {
            Self::Value { mode: Mode::Removed, .. } => None,
            Self::Value { value, .. } => Some(value.clone()),
            Self::Sequence { items, .. } => {
                Some(Node::Sequence(items.iter().filter_map(Self::value).collect()))
            }
            Self::Mapping { entries, .. } => Some(Node::Mapping(
                entries
                    .iter()
                    .filter_map(|(key, diff)| diff.value().map(|v| (key.clone(), v)))
                    .collect(),
            )),
        }
    }
}

/// Compare `old` against `new`.
#[must_use]
pub fn compare(old: &Node, new: &Node) -> Diff {
    match (old, new) {
        (Node::Sequence(old_items), Node::Sequence(new_items)) => compare_sequences(old_items, new_items),
        (Node::Mapping(old_map), Node::Mapping(new_map)) => compare_mappings(old_map, new_map),
        (Node::Scalar(a), Node::Scalar(b)) if a == b => Diff::Value {
            mode: Mode::Unchanged,
            value: new.clone(),
        },
        _ => Diff::Value {
            mode: Mode::Changed,
            value: new.clone(),
        },
    }
}

fn compare_sequences(old: &[Node], new: &[Node]) -> Diff {
    let len = old.len().max(new.len());
    let items: Vec<Diff> = (0..len)
        .map(|i| match (old.get(i), new.get(i)) {
            (Some(a), Some(b)) => compare(a, b),
            (None, Some(b)) => leaf(Mode::Added, b),
            (Some(a), None) => leaf(Mode::Removed, a),
            (None, None) => unreachable!("index below the longer length"),
        })
        .collect();
    let mode = aggregate(items.iter().map(Diff::mode));
    Diff::Sequence { mode, items }
}

fn compare_mappings(old: &Mapping, new: &Mapping) -> Diff {
    let mut entries = IndexMap::new();
    for (key, a) in old {
        let diff = match new.get(key) {
            Some(b) => compare(a, b),
            None => leaf(Mode::Removed, a),
        };
        entries.insert(key.clone(), diff);
    }
    for (key, b) in new {
        if !old.contains_key(key) {
            entries.insert(key.clone(), leaf(Mode::Added, b));
        }
    }
    let mode = aggregate(entries.values().map(Diff::mode));
    Diff::Mapping { mode, entries }
}

fn leaf(mode: Mode, value: &Node) -> Diff {
    Diff::Value {
        mode,
        value: value.clone(),
    }
}

fn aggregate(mut modes: impl Iterator<Item = Mode>) -> Mode {
    let Some(first) = modes.next() else {
        return Mode::Unchanged;
    };
    if modes.all(|m| m == first) { first } else { Mode::Changed }
}
