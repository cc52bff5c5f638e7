//! Generators for template trees.

use cfnkit::template::{Mapping, Node, Scalar, Template};
use proptest::prelude::*;
use serde_json::Number;

/// Mapping keys: mostly identifiers, some with characters that force quoting.
pub fn key() -> impl Strategy<Value = String> {
    prop_oneof![
        4 => "[a-z][a-z0-9_]{0,7}",
        1 => "[a-z .:#/-]{1,10}",
    ]
}

/// Leaf values, biased toward strings that look like other types.
pub fn scalar() -> impl Strategy<Value = Scalar> {
    prop_oneof![
        Just(Scalar::Null),
        any::<bool>().prop_map(Scalar::Bool),
        any::<i64>().prop_map(|n| Scalar::Number(n.into())),
        (-4000i32..4000).prop_filter_map("finite", |n| {
            Number::from_f64(f64::from(n) / 4.0).map(Scalar::Number)
        }),
        r"[ -~\n\t]{0,30}".prop_map(Scalar::String),
        prop::sample::select(vec![
            "", "Yes", "no", "N", "TRUE", "null", "~", "0123", "007", "1.0", "1e5", ".5", "+1",
            "2024-01-01", "-", "- a", "a: b", "#x", "!Ref", "*", "@", "`", "foo", "...", "a\n",
            "a\n\n", "a\nb", "\nlead", "x\n  y\n",
        ])
        .prop_map(|s| Scalar::String(s.to_string())),
    ]
}

/// Arbitrary nodes up to a small depth.
pub fn node() -> impl Strategy<Value = Node> {
    scalar().prop_map(Node::Scalar).prop_recursive(3, 32, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Node::Sequence),
            mapping(inner).prop_map(Node::Mapping),
        ]
    })
}

fn mapping(values: impl Strategy<Value = Node>) -> impl Strategy<Value = Mapping> {
    prop::collection::vec((key(), values), 0..5).prop_map(|entries| entries.into_iter().collect())
}

/// Templates with an arbitrary mapping root.
pub fn template() -> impl Strategy<Value = Template> {
    mapping(node()).prop_map(Template::from_mapping)
}

/// Logical names usable in references.
pub fn logical_name() -> impl Strategy<Value = String> {
    "[A-Z][A-Za-z0-9]{0,10}"
}
