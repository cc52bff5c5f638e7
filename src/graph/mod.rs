//! Reference dependency graph over template elements.
//!
//! Vertices are [`Element`]s (Parameters, Resources, Outputs and the
//! pseudo-parameters they use); an edge `a -> b` means the body of `a`
//! references `b`. The graph is used to order the Resources section when
//! formatting and by the `tree` command.
//!
//! Cycles are tolerated. Ordering is by reachability count rather than a
//! topological sort, so a cyclic template still gets a deterministic order.
//!
//! # Examples
//!
//! ```rust
//! use cfnkit::graph::Graph;
//! use cfnkit::parser::parse;
//!
//! let template = parse(
//!     "Parameters:\n  Name:\n    Type: String\nResources:\n  Bucket:\n    Type: AWS::S3::Bucket\n    Properties:\n      BucketName: !Ref Name\n",
//! )
//! .unwrap();
//! let graph = Graph::build(&template).unwrap();
//! let names: Vec<String> = graph.nodes().iter().map(ToString::to_string).collect();
//! assert_eq!(names, vec!["Parameters/Name", "Resources/Bucket"]);
//! ```

pub mod references;

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Dfs;
use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::constants::{
    DEPENDS_ON_KEY, OUTPUTS_KEY, PARAMETERS_KEY, PSEUDO_PARAMETER_PREFIX, RESOURCES_KEY,
};
use crate::core::{CfnError, CfnResult, Element, suggest_similar};
use crate::template::{Node, Template};

/// Directed graph of references between template elements.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    /// The underlying directed graph.
    graph: DiGraph<Element, ()>,
    /// Map from elements to their graph indices.
    node_map: HashMap<Element, NodeIndex>,
}

impl Graph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the reference graph of `template`.
    ///
    /// Every Parameter, Resource and Output becomes a vertex. Resource and
    /// Output bodies are scanned for references; resources also contribute
    /// their `DependsOn` entries.
    ///
    /// # Errors
    ///
    /// Returns [`CfnError::UnresolvedReference`] when a body references a name
    /// that is neither a Parameter, a Resource nor an `AWS::` pseudo-parameter.
    pub fn build(template: &Template) -> CfnResult<Self> {
        let mut index: HashMap<&str, Element> = HashMap::new();
        if let Some(parameters) = template.section(PARAMETERS_KEY) {
            for name in parameters.keys() {
                index.insert(name, Element::parameter(name.as_str()));
            }
        }
        if let Some(resources) = template.section(RESOURCES_KEY) {
            for name in resources.keys() {
                index.insert(name, Element::resource(name.as_str()));
            }
        }

        let mut graph = Self::new();
        if let Some(parameters) = template.section(PARAMETERS_KEY) {
            for name in parameters.keys() {
                graph.add(Element::parameter(name.as_str()), Vec::new());
            }
        }
        if let Some(resources) = template.section(RESOURCES_KEY) {
            for (name, body) in resources {
                let element = Element::resource(name.as_str());
                let mut names = references::collect(body);
                for dependency in depends_on(body) {
                    if !names.iter().any(|n| n == dependency) {
                        names.push(dependency.to_string());
                    }
                }
                let targets = resolve_all(&names, &element, &index)?;
                graph.add(element, targets);
            }
        }
        if let Some(outputs) = template.section(OUTPUTS_KEY) {
            for (name, body) in outputs {
                let element = Element::output(name.as_str());
                let targets = resolve_all(&references::collect(body), &element, &index)?;
                graph.add(element, targets);
            }
        }

        debug!(
            "Built dependency graph with {} elements and {} references",
            graph.node_count(),
            graph.edge_count()
        );
        Ok(graph)
    }

    /// Add a vertex if it doesn't already exist.
    fn ensure_node(&mut self, element: Element) -> NodeIndex {
        if let Some(&index) = self.node_map.get(&element) {
            index
        } else {
            let index = self.graph.add_node(element.clone());
            self.node_map.insert(element, index);
            index
        }
    }

    /// Add `element` with an edge to each of `edges`, creating vertices as needed.
    pub fn add(&mut self, element: Element, edges: impl IntoIterator<Item = Element>) {
        let from = self.ensure_node(element);
        for target in edges {
            let to = self.ensure_node(target);
            if !self.graph.contains_edge(from, to) {
                self.graph.add_edge(from, to, ());
            }
        }
    }

    /// All vertices ordered by ascending reachability count.
    ///
    /// The count of a vertex is the number of distinct other vertices reachable
    /// from it. Ties are broken by the rendered `Section/Name` form.
    #[must_use]
    pub fn nodes(&self) -> Vec<Element> {
        let mut ranked: Vec<(usize, String, &Element)> = self
            .graph
            .node_indices()
            .map(|idx| {
                let element = &self.graph[idx];
                (self.reachable_count(idx), element.display_name(), element)
            })
            .collect();
        ranked.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
        ranked.into_iter().map(|(_, _, element)| element.clone()).collect()
    }

    fn reachable_count(&self, start: NodeIndex) -> usize {
        let mut dfs = Dfs::new(&self.graph, start);
        let mut count = 0;
        while let Some(idx) = dfs.next(&self.graph) {
            if idx != start {
                count += 1;
            }
        }
        count
    }

    /// Elements `element` references directly, sorted by rendered form.
    #[must_use]
    pub fn get(&self, element: &Element) -> Vec<Element> {
        self.neighbors(element, Direction::Outgoing)
    }

    /// Elements that reference `element` directly, sorted by rendered form.
    #[must_use]
    pub fn get_reverse(&self, element: &Element) -> Vec<Element> {
        self.neighbors(element, Direction::Incoming)
    }

    fn neighbors(&self, element: &Element, direction: Direction) -> Vec<Element> {
        let Some(&idx) = self.node_map.get(element) else {
            return Vec::new();
        };
        let mut neighbors: Vec<Element> = self
            .graph
            .neighbors_directed(idx, direction)
            .map(|n| self.graph[n].clone())
            .collect();
        neighbors.sort_by_key(Element::display_name);
        neighbors.dedup();
        neighbors
    }

    /// Whether `element` is a vertex.
    #[must_use]
    pub fn contains(&self, element: &Element) -> bool {
        self.node_map.contains_key(element)
    }

    /// Check if the graph has no vertices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Number of vertices.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of reference edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Render the dependency tree rooted at `root` with box-drawing connectors.
    ///
    /// With `invert`, the tree follows incoming edges (what depends on `root`).
    /// A vertex that reappears on its own branch is marked `(circular reference)`
    /// instead of being expanded again.
    #[must_use]
    pub fn tree_string(&self, root: &Element, invert: bool) -> String {
        let direction = if invert { Direction::Incoming } else { Direction::Outgoing };
        let mut result = format!("{}\n", root.display_name());
        let mut ancestors = HashSet::from([root.clone()]);
        self.build_tree_string(root, direction, &mut result, "", &mut ancestors);
        result
    }

    fn build_tree_string(
        &self,
        element: &Element,
        direction: Direction,
        result: &mut String,
        prefix: &str,
        ancestors: &mut HashSet<Element>,
    ) {
        let children = self.neighbors(element, direction);
        for (i, child) in children.iter().enumerate() {
            let is_last = i == children.len() - 1;
            let connector = if is_last { "└── " } else { "├── " };
            let child_prefix =
                if is_last { format!("{prefix}    ") } else { format!("{prefix}│   ") };
            result.push_str(&format!("{prefix}{connector}{}\n", child.display_name()));

            if ancestors.insert(child.clone()) {
                self.build_tree_string(child, direction, result, &child_prefix, ancestors);
                ancestors.remove(child);
            } else {
                result.push_str(&format!("{child_prefix}└── (circular reference)\n"));
            }
        }
    }
}

/// Names listed by a resource's `DependsOn` attribute (a string or a list of strings).
fn depends_on(body: &Node) -> Vec<&str> {
    match body.get(DEPENDS_ON_KEY) {
        Some(Node::Sequence(items)) => items.iter().filter_map(Node::as_str).collect(),
        Some(node) => node.as_str().into_iter().collect(),
        None => Vec::new(),
    }
}

fn resolve_all(
    names: &[String],
    element: &Element,
    index: &HashMap<&str, Element>,
) -> CfnResult<Vec<Element>> {
    names.iter().map(|name| resolve(name, element, index)).collect()
}

fn resolve(name: &str, element: &Element, index: &HashMap<&str, Element>) -> CfnResult<Element> {
    if let Some(target) = index.get(name) {
        return Ok(target.clone());
    }
    if name.starts_with(PSEUDO_PARAMETER_PREFIX) {
        return Ok(Element::pseudo(name));
    }
    Err(CfnError::UnresolvedReference {
        name: name.to_string(),
        element: element.clone(),
        suggestions: suggest_similar(name, index.keys().copied()),
    })
}
