//! Ordering properties of the dependency graph.

use cfnkit::core::Element;
use cfnkit::graph::Graph;
use proptest::prelude::*;
use std::collections::HashSet;

fn name(i: usize) -> Element {
    Element::resource(format!("R{i:02}"))
}

proptest! {
    /// Arbitrary edges, cycles included, still yield every vertex exactly once
    #[test]
    fn prop_nodes_cover_every_vertex(
        edges in prop::collection::vec((0usize..12, 0usize..12), 0..40)
    ) {
        let mut graph = Graph::new();
        let mut vertices = HashSet::new();
        for (from, to) in &edges {
            graph.add(name(*from), [name(*to)]);
            vertices.insert(name(*from));
            vertices.insert(name(*to));
        }

        let nodes = graph.nodes();
        prop_assert_eq!(nodes.len(), vertices.len());
        let unique: HashSet<Element> = nodes.into_iter().collect();
        prop_assert_eq!(unique, vertices);
    }

    /// In an acyclic graph every dependency sorts before its dependents
    #[test]
    fn prop_dependencies_first(
        edges in prop::collection::vec((1usize..12, 0usize..11), 0..40)
    ) {
        let mut graph = Graph::new();
        let edges: Vec<(usize, usize)> = edges.into_iter().filter(|(from, to)| to < from).collect();
        for (from, to) in &edges {
            graph.add(name(*from), [name(*to)]);
        }

        let nodes = graph.nodes();
        let position = |element: &Element| nodes.iter().position(|n| n == element);
        for (from, to) in &edges {
            prop_assert!(position(&name(*to)) < position(&name(*from)));
        }
    }

    /// Sorting is recomputed from the edges, not from insertion order
    #[test]
    fn prop_insertion_order_irrelevant(
        edges in prop::collection::vec((0usize..8, 0usize..8), 0..20)
    ) {
        let mut forward = Graph::new();
        for (from, to) in &edges {
            forward.add(name(*from), [name(*to)]);
        }
        let mut backward = Graph::new();
        for (from, to) in edges.iter().rev() {
            backward.add(name(*from), [name(*to)]);
        }
        prop_assert_eq!(forward.nodes(), backward.nodes());
    }
}

#[test]
fn test_two_cycle_terminates() {
    let mut graph = Graph::new();
    graph.add(Element::resource("A"), [Element::resource("B")]);
    graph.add(Element::resource("B"), [Element::resource("A")]);

    let nodes = graph.nodes();
    assert_eq!(nodes, vec![Element::resource("A"), Element::resource("B")]);
    assert_eq!(graph.get(&Element::resource("A")), vec![Element::resource("B")]);
    assert_eq!(graph.get_reverse(&Element::resource("A")), vec![Element::resource("B")]);
}

#[test]
fn test_self_reference() {
    let mut graph = Graph::new();
    graph.add(Element::resource("A"), [Element::resource("A")]);
    assert_eq!(graph.nodes(), vec![Element::resource("A")]);
}
