//! Compare two templates.
//!
//! Both files are parsed, compared structurally and the resulting diff is
//! printed with a two-character gutter per line:
//!
//! | Gutter | Meaning |
//! |---|---|
//! | `+ ` | only in the new template |
//! | `- ` | only in the old template |
//! | `> ` | changed value (new value shown) |
//! | `  ` | unchanged |
//!
//! `--json` prints the diff tree instead, for scripting.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;
use tracing::debug;

use super::common::{Input, style_for};
use crate::config::Config;
use crate::diff::compare;
use crate::format::{Options, format_diff};

/// Command to compare two templates.
#[derive(Args, Debug)]
pub struct DiffCommand {
    /// The old template
    old: PathBuf,

    /// The new template
    new: PathBuf,

    /// Print the diff tree as JSON
    #[arg(short, long)]
    json: bool,

    /// Only show what changed
    #[arg(long)]
    compact: bool,

    /// Color added, removed and changed lines
    #[arg(long)]
    color: bool,
}

impl DiffCommand {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Fails when either template cannot be read or parsed.
    pub async fn execute(self, settings: &Config) -> Result<()> {
        let old = Input::from_arg(Some(&self.old)).load().await?;
        let new = Input::from_arg(Some(&self.new)).load().await?;

        let diff = compare(old.as_node(), new.as_node());
        debug!("Templates compare as {}", diff.mode());

        if self.color {
            colored::control::set_override(true);
        }
        let options = Options::default()
            .style(style_for(self.json, settings.format.style))
            .compact(self.compact || settings.format.compact)
            .unsorted(settings.format.unsorted)
            .color(self.color);
        print!("{}", format_diff(&diff, &options));
        Ok(())
    }
}
