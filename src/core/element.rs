//! Named top-level template entities.
//!
//! An [`Element`] identifies a Parameter, Resource or Output by name and section.
//! It is the vertex identity of the dependency graph and the unit the `tree`
//! command reports on.

use serde::Serialize;
use std::fmt;

use crate::constants::{OUTPUTS_KEY, PARAMETERS_KEY, RESOURCES_KEY};

/// The template section an [`Element`] is declared in.
///
/// `Pseudo` is synthetic: it holds built-in `AWS::` names that are valid
/// reference targets without a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Section {
    /// Declared under `Parameters`.
    Parameters,
    /// Declared under `Resources`.
    Resources,
    /// Declared under `Outputs`.
    Outputs,
    /// Built-in pseudo-parameters such as `AWS::Region`.
    Pseudo,
}

impl Section {
    /// The template key of this section, `None` for the synthetic pseudo section.
    #[must_use]
    pub const fn key(self) -> Option<&'static str> {
        match self {
            Self::Parameters => Some(PARAMETERS_KEY),
            Self::Resources => Some(RESOURCES_KEY),
            Self::Outputs => Some(OUTPUTS_KEY),
            Self::Pseudo => None,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parameters => write!(f, "Parameters"),
            Self::Resources => write!(f, "Resources"),
            Self::Outputs => write!(f, "Outputs"),
            Self::Pseudo => write!(f, "Pseudo"),
        }
    }
}

/// A named entity of a template: `(name, section)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Element {
    /// Logical name as written in the template.
    pub name: String,
    /// Section the name is declared in.
    pub section: Section,
}

impl Element {
    /// Create a new element.
    pub fn new(section: Section, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            section,
        }
    }

    /// Shorthand for a Parameters element.
    pub fn parameter(name: impl Into<String>) -> Self {
        Self::new(Section::Parameters, name)
    }

    /// Shorthand for a Resources element.
    pub fn resource(name: impl Into<String>) -> Self {
        Self::new(Section::Resources, name)
    }

    /// Shorthand for an Outputs element.
    pub fn output(name: impl Into<String>) -> Self {
        Self::new(Section::Outputs, name)
    }

    /// Shorthand for a pseudo-parameter element.
    pub fn pseudo(name: impl Into<String>) -> Self {
        Self::new(Section::Pseudo, name)
    }

    /// Rendered form `Section/Name`, used as the graph tie-breaker.
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{}/{}", self.section, self.name)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
