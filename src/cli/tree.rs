//! Display the reference dependencies of a template.
//!
//! Builds the dependency graph of a template and lists every element in
//! dependency order (elements with the fewest transitive dependencies first),
//! each followed by the elements it references directly. With `--invert` each
//! element is followed by the elements that reference it instead.
//!
//! # Examples
//!
//! ```bash
//! cfnkit tree template.yaml
//! cfnkit tree template.yaml --invert
//! cfnkit tree template.yaml --format json
//! cfnkit tree template.yaml --element Bucket
//! ```
//!
//! Example output:
//!
//! ```text
//! Parameters/Name
//! Resources/Bucket2
//! └── Parameters/Name
//! Resources/Bucket1
//! └── Resources/Bucket2
//! ```

use anyhow::{Context, Result, anyhow};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use super::common::Input;
use crate::core::{Element, Section};
use crate::graph::Graph;

/// Command to display template dependencies.
#[derive(Args, Debug)]
pub struct TreeCommand {
    /// Template to inspect; `-` reads stdin
    file: PathBuf,

    /// Output format (tree, json)
    #[arg(short = 'f', long, default_value = "tree")]
    format: String,

    /// Show what references each element instead of what it references
    #[arg(short = 'i', long)]
    invert: bool,

    /// Show the full transitive tree of one element (by logical name)
    #[arg(short = 'e', long)]
    element: Option<String>,
}

impl TreeCommand {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Fails on invalid arguments, unreadable templates, unresolved
    /// references, or an `--element` that the template does not declare.
    pub async fn execute(self) -> Result<()> {
        self.validate_arguments()?;

        let input = Input::from_arg(Some(&self.file));
        let template = input.load().await?;
        let graph = Graph::build(&template)
            .with_context(|| format!("Failed to build dependency graph for {}", input.display_name()))?;

        if let Some(name) = &self.element {
            let element = find_element(&graph, name)?;
            match self.format.as_str() {
                "json" => println!(
                    "{}",
                    serde_json::to_string_pretty(&self.element_json(&graph, &element))?
                ),
                _ => print!("{}", graph.tree_string(&element, self.invert)),
            }
            return Ok(());
        }

        match self.format.as_str() {
            "json" => self.output_json(&graph)?,
            _ => print!("{}", self.render_tree(&graph)),
        }
        Ok(())
    }

    fn validate_arguments(&self) -> Result<()> {
        match self.format.as_str() {
            "tree" | "json" => Ok(()),
            _ => Err(anyhow!(
                "Invalid format '{}'. Valid formats are: tree, json",
                self.format
            )),
        }
    }

    fn neighbors(&self, graph: &Graph, element: &Element) -> Vec<Element> {
        if self.invert {
            graph.get_reverse(element)
        } else {
            graph.get(element)
        }
    }

    fn render_tree(&self, graph: &Graph) -> String {
        if graph.is_empty() {
            return "Template declares no elements\n".to_string();
        }
        let mut out = String::new();
        for element in graph.nodes() {
            out.push_str(&format!("{}\n", colorize(&element)));
            let neighbors = self.neighbors(graph, &element);
            for (i, neighbor) in neighbors.iter().enumerate() {
                let connector = if i + 1 == neighbors.len() { "└── " } else { "├── " };
                out.push_str(&format!("{connector}{}\n", neighbor.display_name()));
            }
        }
        out
    }

    fn output_json(&self, graph: &Graph) -> Result<()> {
        let elements: Vec<serde_json::Value> =
            graph.nodes().iter().map(|element| self.element_json(graph, element)).collect();
        println!("{}", serde_json::to_string_pretty(&elements)?);
        Ok(())
    }

    fn element_json(&self, graph: &Graph, element: &Element) -> serde_json::Value {
        let key = if self.invert { "referenced_by" } else { "references" };
        serde_json::json!({
            "name": element.name,
            "section": element.section,
            key: self.neighbors(graph, element),
        })
    }
}

/// The element named `name`, preferring Resources over Parameters and Outputs.
fn find_element(graph: &Graph, name: &str) -> Result<Element> {
    [Section::Resources, Section::Parameters, Section::Outputs, Section::Pseudo]
        .into_iter()
        .map(|section| Element::new(section, name))
        .find(|element| graph.contains(element))
        .ok_or_else(|| anyhow!("Element '{name}' is not declared in the template"))
}

fn colorize(element: &Element) -> String {
    let name = element.display_name();
    match element.section {
        Section::Resources => name.cyan().bold().to_string(),
        Section::Parameters => name.green().to_string(),
        Section::Outputs => name.yellow().to_string(),
        Section::Pseudo => name.bright_black().to_string(),
    }
}
