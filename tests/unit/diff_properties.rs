//! Structural properties of `compare`.

use cfnkit::diff::{Diff, Mode, compare};
use cfnkit::template::Node;
use proptest::prelude::*;
use std::collections::BTreeSet;

use crate::strategies::node;

fn all_unchanged(diff: &Diff) -> bool {
    match diff {
        Diff::Value { mode, .. } => *mode == Mode::Unchanged,
        Diff::Sequence { mode, items } => *mode == Mode::Unchanged && items.iter().all(all_unchanged),
        Diff::Mapping { mode, entries } => {
            *mode == Mode::Unchanged && entries.values().all(all_unchanged)
        }
    }
}

proptest! {
    /// A tree compared against itself is unchanged at every node
    #[test]
    fn prop_diff_identity(x in node()) {
        prop_assert!(all_unchanged(&compare(&x, &x)));
    }

    /// The new side can always be rebuilt from the diff
    #[test]
    fn prop_value_mirrors_new(a in node(), b in node()) {
        prop_assert_eq!(compare(&a, &b).value(), Some(b));
    }

    /// Mapping diffs cover the union of keys, each tagged by where it appears
    #[test]
    fn prop_mapping_key_coverage(a in node(), b in node()) {
        let (Node::Mapping(old), Node::Mapping(new)) = (&a, &b) else {
            return Ok(());
        };
        let Diff::Mapping { entries, .. } = compare(&a, &b) else {
            return Err(TestCaseError::fail("mappings must compare as a mapping diff"));
        };

        let expected: BTreeSet<&str> = old.keys().chain(new.keys()).map(String::as_str).collect();
        let actual: BTreeSet<&str> = entries.keys().map(String::as_str).collect();
        prop_assert_eq!(&actual, &expected);

        for (key, diff) in &entries {
            let mode = match (old.get(key), new.get(key)) {
                (None, Some(_)) => Mode::Added,
                (Some(_), None) => Mode::Removed,
                (Some(o), Some(n)) => compare(o, n).mode(),
                (None, None) => unreachable!("key came from one of the inputs"),
            };
            prop_assert_eq!(diff.mode(), mode, "key {}", key);
        }
    }

    /// Aggregate modes do not depend on entry order
    #[test]
    fn prop_aggregate_order_independent(a in node(), b in node()) {
        let reversed = |node: &Node| match node {
            Node::Mapping(map) => Node::Mapping(map.iter().rev().map(|(k, v)| (k.clone(), v.clone())).collect()),
            other => other.clone(),
        };
        prop_assert_eq!(compare(&a, &b).mode(), compare(&reversed(&a), &reversed(&b)).mode());
    }

    /// Unchanged exactly when the trees are equal
    #[test]
    fn prop_unchanged_iff_equal(a in node(), b in node()) {
        prop_assert_eq!(compare(&a, &b).is_unchanged(), a == b);
    }
}
