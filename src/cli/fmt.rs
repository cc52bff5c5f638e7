//! Format templates in canonical form.
//!
//! Reads a template from a file or stdin and writes its canonical rendering to
//! stdout, or back to the file with `--write`. With `--verify` nothing is
//! written: the command formats the template, parses the output again and
//! fails if the result differs from the input.
//!
//! # Examples
//!
//! ```bash
//! cfnkit fmt template.yaml                 # canonical YAML on stdout
//! cat template.json | cfnkit fmt --json    # canonical JSON from stdin
//! cfnkit fmt template.yaml --write         # rewrite in place
//! cfnkit fmt template.yaml --verify        # check the round trip only
//! ```

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use tracing::debug;

use super::common::{Input, options_for};
use crate::config::Config;
use crate::format::{format, verify};

/// Command to format a template.
#[derive(Args, Debug)]
pub struct FmtCommand {
    /// Template to format; `-` or absent reads stdin
    file: Option<PathBuf>,

    /// Write JSON instead of block-style YAML
    #[arg(short, long)]
    json: bool,

    /// Omit blank lines between sections and entries
    #[arg(long)]
    compact: bool,

    /// Keep the source key order instead of sorting
    #[arg(long)]
    unsorted: bool,

    /// Only check that the formatted output parses back to the same template
    #[arg(long, conflicts_with = "write")]
    verify: bool,

    /// Rewrite the file in place instead of printing
    #[arg(short, long)]
    write: bool,
}

impl FmtCommand {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Fails when the input cannot be read or parsed, when `--write` is used
    /// without a file, or when `--verify` detects a difference.
    pub async fn execute(self, settings: &Config) -> Result<()> {
        let input = Input::from_arg(self.file.as_deref());
        if self.write && input == Input::Stdin {
            bail!("--write requires a template file, not stdin");
        }

        let template = input.load().await?;
        let options = options_for(self.json, self.compact, self.unsorted, settings);

        if self.verify {
            verify(&template, &options)
                .with_context(|| format!("Verification failed for {}", input.display_name()))?;
            println!("{} {}", "✓".green(), input.display_name());
            return Ok(());
        }

        let text = format(&template, &options);
        match &input {
            Input::File(path) if self.write => {
                tokio::fs::write(path, &text)
                    .await
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                debug!("Wrote {} bytes to {}", text.len(), path.display());
            }
            _ => print!("{text}"),
        }
        Ok(())
    }
}
