//! Canonical formatting of templates and diffs.
//!
//! [`format`] renders a [`Template`] in block style (YAML) or JSON with a
//! canonical key order, short-form intrinsic tags and a conservative quoting
//! policy. [`verify`] checks that the output parses back to the same tree, and
//! [`format_diff`] renders a [`Diff`] with a change gutter.
//!
//! # Key order
//!
//! Known contexts (the template root, Parameter/Resource/Output bodies, IAM
//! policy documents and statements) put their well-known keys first; all other
//! keys follow lexicographically. Resources are ordered by the dependency
//! graph so that referenced resources come before the resources using them.
//!
//! # Examples
//!
//! ```rust
//! use cfnkit::format::{format, Options};
//! use cfnkit::parser::parse;
//!
//! let template = parse(r#"{"foo": {"Ref": "bar"}}"#).unwrap();
//! assert_eq!(format(&template, &Options::default()), "foo: !Ref bar\n");
//! ```

pub mod comments;
mod diff;
mod json;
pub mod order;
pub mod quote;
mod yaml;

pub use comments::CommentStore;
pub use diff::gutter;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::constants::RESOURCES_KEY;
use crate::core::{CfnError, CfnResult, Section};
use crate::diff::{Diff, compare};
use crate::graph::Graph;
use crate::parser::parse;
use crate::template::Template;
use order::Ordering;

/// Output encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    /// Human-oriented block style
    #[default]
    Yaml,
    /// Two-space indented JSON
    Json,
}

/// Formatting options.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options<'a> {
    /// Output encoding
    pub style: Style,
    /// No blank-line separation; diffs also drop unchanged entries
    pub compact: bool,
    /// Keep source key order instead of the canonical order
    pub unsorted: bool,
    /// Colorize diff output
    pub color: bool,
    /// Comments to render alongside the template
    pub comments: Option<&'a CommentStore>,
}

impl<'a> Options<'a> {
    /// Set the output style.
    #[must_use]
    pub const fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Set compact output.
    #[must_use]
    pub const fn compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// Keep source key order.
    #[must_use]
    pub const fn unsorted(mut self, unsorted: bool) -> Self {
        self.unsorted = unsorted;
        self
    }

    /// Colorize diff output.
    #[must_use]
    pub const fn color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Attach a comment store.
    #[must_use]
    pub const fn comments(mut self, comments: Option<&'a CommentStore>) -> Self {
        self.comments = comments;
        self
    }
}

/// Render `template` in canonical form.
#[must_use]
pub fn format(template: &Template, options: &Options<'_>) -> String {
    let ordering = Ordering {
        unsorted: options.unsorted,
        resources: if options.unsorted { None } else { resource_order(template) },
    };

    match options.style {
        Style::Yaml => {
            let mut writer = yaml::YamlWriter::new(&ordering, options.comments, options.compact);
            writer.document(template.as_node());
            writer.finish()
        }
        Style::Json => {
            let mut writer = json::JsonWriter::new(&ordering, options.comments);
            writer.document(template.as_node());
            writer.finish()
        }
    }
}

/// Render `diff` with a two-character mode gutter, or as JSON.
#[must_use]
pub fn format_diff(diff: &Diff, options: &Options<'_>) -> String {
    diff::render(diff, options)
}

/// Check that formatting `template` with `options` and parsing the output
/// reproduces `template`.
///
/// Comments are not part of the comparison. JSON output is verified without
/// them since `//` lines are not JSON.
///
/// # Errors
///
/// Returns [`CfnError::RoundTrip`] with the offending diff, or with just a
/// reason when the output does not parse.
pub fn verify(template: &Template, options: &Options<'_>) -> CfnResult<()> {
    let options = match options.style {
        Style::Json => options.comments(None),
        Style::Yaml => *options,
    };
    let text = format(template, &options);

    let reparsed = parse(&text).map_err(|e| CfnError::RoundTrip {
        reason: format!("formatted output does not parse: {e}"),
        diff: None,
    })?;

    let diff = compare(template.as_node(), reparsed.as_node());
    if diff.is_unchanged() {
        debug!("Round-trip verification passed");
        Ok(())
    } else {
        Err(CfnError::RoundTrip {
            reason: "formatted output differs from the input".to_string(),
            diff: Some(Box::new(diff)),
        })
    }
}

/// Resource names in dependency order, or `None` to fall back to name order.
fn resource_order(template: &Template) -> Option<Vec<String>> {
    template.section(RESOURCES_KEY)?;
    match Graph::build(template) {
        Ok(graph) => Some(
            graph
                .nodes()
                .into_iter()
                .filter(|element| element.section == Section::Resources)
                .map(|element| element.name)
                .collect(),
        ),
        Err(e) => {
            warn!("Cannot order resources by dependency, sorting by name: {e}");
            None
        }
    }
}
