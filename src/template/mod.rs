//! In-memory document model for infrastructure templates.
//!
//! Every engine component operates on the same tree: a [`Node`] is exactly one
//! of a [`Scalar`], a sequence of nodes or a [`Mapping`] from string keys to
//! nodes. A [`Template`] is a node whose root is guaranteed to be a mapping.
//!
//! Trees are produced by the [`parser`](crate::parser) (and by the
//! [`builder`](crate::builder)) and are never mutated afterwards, so a parsed
//! template can be shared freely between readers.
//!
//! # Invariants
//!
//! - Mapping keys are strings; equality of mappings ignores key order.
//! - Indexing a node with the wrong shape (`node["Type"]` on a sequence, an
//!   out-of-range index) signals a broken upstream guarantee and panics. Use
//!   [`Node::get`] or [`Node::get_index`] to probe.

pub mod intrinsic;
pub mod path;

pub use intrinsic::Intrinsic;
pub use path::{Path, Segment};

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::Number;
use std::fmt;
use std::ops::Index;

use crate::core::{CfnError, CfnResult};

/// String-keyed mapping that remembers source order but compares as a set.
pub type Mapping = IndexMap<String, Node>;

/// A leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// `null`, `~` or an empty plain scalar
    Null,
    /// `true` / `false`
    Bool(bool),
    /// Integer or finite float
    Number(Number),
    /// Any string, including numeric-looking strings the parser refused to re-type
    String(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s}"),
        }
    }
}

/// A template tree node.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A leaf value
    Scalar(Scalar),
    /// An ordered list of nodes
    Sequence(Vec<Node>),
    /// String-keyed children
    Mapping(Mapping),
}

impl Node {
    /// The null scalar.
    #[must_use]
    pub const fn null() -> Self {
        Self::Scalar(Scalar::Null)
    }

    /// A string scalar.
    pub fn string(value: impl Into<String>) -> Self {
        Self::Scalar(Scalar::String(value.into()))
    }

    /// Short name of the node's shape, for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Sequence(_) => "sequence",
            Self::Mapping(_) => "mapping",
        }
    }

    /// The string value, if this node is a string scalar.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    /// The scalar, if this node is one.
    #[must_use]
    pub const fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }

    /// The children, if this node is a sequence.
    #[must_use]
    pub fn as_sequence(&self) -> Option<&[Node]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// The entries, if this node is a mapping.
    #[must_use]
    pub const fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Recognize this node as an intrinsic function call.
    #[must_use]
    pub fn as_intrinsic(&self) -> Option<Intrinsic<'_>> {
        self.as_mapping().and_then(Intrinsic::from_mapping)
    }

    /// Look up a mapping key; `None` for missing keys and non-mappings.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    /// Look up a sequence element; `None` when out of range or not a sequence.
    #[must_use]
    pub fn get_index(&self, index: usize) -> Option<&Node> {
        self.as_sequence().and_then(|items| items.get(index))
    }

    /// Whether this node is an empty sequence or mapping.
    #[must_use]
    pub fn is_empty_collection(&self) -> bool {
        match self {
            Self::Scalar(_) => false,
            Self::Sequence(items) => items.is_empty(),
            Self::Mapping(map) => map.is_empty(),
        }
    }
}

impl Index<&str> for Node {
    type Output = Node;

    fn index(&self, key: &str) -> &Node {
        match self {
            Self::Mapping(map) => match map.get(key) {
                Some(node) => node,
                None => panic!("mapping has no key '{key}'"),
            },
            other => panic!("cannot index a {} with key '{key}'", other.kind()),
        }
    }
}

impl Index<usize> for Node {
    type Output = Node;

    fn index(&self, index: usize) -> &Node {
        match self {
            Self::Sequence(items) => match items.get(index) {
                Some(node) => node,
                None => panic!("index {index} out of range for sequence of length {}", items.len()),
            },
            other => panic!("cannot index a {} with index {index}", other.kind()),
        }
    }
}

impl From<Scalar> for Node {
    fn from(value: Scalar) -> Self {
        Self::Scalar(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Self::string(value)
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Self::string(value)
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Self::Scalar(Scalar::Bool(value))
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Self::Scalar(Scalar::Number(value.into()))
    }
}

impl From<Vec<Node>> for Node {
    fn from(value: Vec<Node>) -> Self {
        Self::Sequence(value)
    }
}

impl From<Mapping> for Node {
    fn from(value: Mapping) -> Self {
        Self::Mapping(value)
    }
}

impl From<serde_json::Value> for Node {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Self::null(),
            Value::Bool(b) => Self::Scalar(Scalar::Bool(b)),
            Value::Number(n) => Self::Scalar(Scalar::Number(n)),
            Value::String(s) => Self::string(s),
            Value::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                Self::Mapping(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => n.serialize(serializer),
            Self::String(s) => serializer.serialize_str(s),
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Scalar(scalar) => scalar.serialize(serializer),
            Self::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Mapping(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
        }
    }
}

/// A parsed template: a node whose root is a mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    node: Node,
}

impl Template {
    /// Wrap a node, rejecting anything but a mapping root.
    ///
    /// # Errors
    ///
    /// Returns [`CfnError::Structure`] when `node` is not a mapping.
    pub fn from_node(node: Node) -> CfnResult<Self> {
        match node {
            Node::Mapping(_) => Ok(Self { node }),
            other => Err(CfnError::Structure {
                reason: format!("template root must be a mapping, found a {}", other.kind()),
            }),
        }
    }

    /// Wrap a mapping.
    #[must_use]
    pub const fn from_mapping(root: Mapping) -> Self {
        Self {
            node: Node::Mapping(root),
        }
    }

    /// The root mapping.
    #[must_use]
    pub fn root(&self) -> &Mapping {
        match &self.node {
            Node::Mapping(map) => map,
            _ => unreachable!("template root is always a mapping"),
        }
    }

    /// The whole template as a node.
    #[must_use]
    pub const fn as_node(&self) -> &Node {
        &self.node
    }

    /// Unwrap into the root node.
    #[must_use]
    pub fn into_node(self) -> Node {
        self.node
    }

    /// Look up a top-level key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.root().get(key)
    }

    /// A top-level section when it is a mapping (`Parameters`, `Resources`, ...).
    #[must_use]
    pub fn section(&self, key: &str) -> Option<&Mapping> {
        self.get(key).and_then(Node::as_mapping)
    }
}

impl Default for Template {
    fn default() -> Self {
        Self::from_mapping(Mapping::new())
    }
}
