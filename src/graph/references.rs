//! Reference extraction from template bodies.
//!
//! [`collect`] walks a node eagerly and returns the names it references
//! through intrinsic functions:
//!
//! - `Ref: Name`
//! - `Fn::GetAtt: [Name, Attribute]` or `Fn::GetAtt: Name.Attribute`
//! - `${Name}` and `${Name.Attribute}` interpolations inside `Fn::Sub`
//!
//! `${!Literal}` is an escape and references nothing. In the two-argument
//! form of `Fn::Sub`, interpolations naming a key of the variable map are
//! local bindings.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::template::{Intrinsic, Node};

static INTERPOLATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([^}]*)\}").unwrap_or_else(|e| unreachable!("interpolation pattern: {e}"))
});

/// Names referenced anywhere under `node`, in first-seen order and without duplicates.
#[must_use]
pub fn collect(node: &Node) -> Vec<String> {
    let mut collector = Collector::default();
    collector.visit(node);
    collector.names
}

/// Names interpolated by a `Fn::Sub` template string, in order, without duplicates.
#[must_use]
pub fn interpolations(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    INTERPOLATION
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|inner| !inner.is_empty() && !inner.starts_with('!'))
        .map(|inner| inner.split_once('.').map_or(inner, |(name, _)| name).to_string())
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

#[derive(Default)]
struct Collector {
    names: Vec<String>,
    seen: HashSet<String>,
}

impl Collector {
    fn push(&mut self, name: &str) {
        if self.seen.insert(name.to_string()) {
            self.names.push(name.to_string());
        }
    }

    fn visit(&mut self, node: &Node) {
        if let Some(intrinsic) = node.as_intrinsic() {
            self.visit_intrinsic(intrinsic);
            return;
        }
        match node {
            Node::Scalar(_) => {}
            Node::Sequence(items) => items.iter().for_each(|item| self.visit(item)),
            Node::Mapping(map) => map.values().for_each(|value| self.visit(value)),
        }
    }

    fn visit_intrinsic(&mut self, intrinsic: Intrinsic<'_>) {
        match (intrinsic.name, intrinsic.value) {
            ("Ref", Node::Scalar(_)) => {
                if let Some(name) = intrinsic.value.as_str() {
                    self.push(name);
                }
            }
            ("GetAtt", Node::Scalar(_)) => {
                if let Some(text) = intrinsic.value.as_str() {
                    self.push(text.split_once('.').map_or(text, |(name, _)| name));
                }
            }
            ("GetAtt", Node::Sequence(items)) => {
                let mut rest = items.iter();
                match rest.next() {
                    Some(Node::Scalar(_)) => {
                        if let Some(name) = items[0].as_str() {
                            self.push(name);
                        }
                    }
                    Some(other) => self.visit(other),
                    None => {}
                }
                rest.for_each(|item| self.visit(item));
            }
            ("Sub", Node::Scalar(_)) => {
                if let Some(text) = intrinsic.value.as_str() {
                    for name in interpolations(text) {
                        self.push(&name);
                    }
                }
            }
            ("Sub", Node::Sequence(items)) => self.visit_sub_with_variables(items),
            (_, value) => self.visit(value),
        }
    }

    /// `Fn::Sub: [template, {Var: value, ...}]`
    fn visit_sub_with_variables(&mut self, items: &[Node]) {
        let variables = items.get(1).and_then(Node::as_mapping);
        match items.first() {
            Some(Node::Scalar(_)) => {
                if let Some(text) = items[0].as_str() {
                    for name in interpolations(text) {
                        if !variables.is_some_and(|vars| vars.contains_key(&name)) {
                            self.push(&name);
                        }
                    }
                }
            }
            Some(other) => self.visit(other),
            None => {}
        }
        items.iter().skip(1).for_each(|item| self.visit(item));
    }
}
