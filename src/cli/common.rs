//! Input helpers shared by the commands.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;

use crate::format::{Options, Style};
use crate::parser::parse;
use crate::template::Template;

/// Where a template is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Standard input
    Stdin,
    /// A file on disk
    File(PathBuf),
}

impl Input {
    /// `None` and `-` mean stdin; anything else is a file path.
    #[must_use]
    pub fn from_arg(arg: Option<&Path>) -> Self {
        match arg {
            None => Self::Stdin,
            Some(path) if path.as_os_str() == "-" => Self::Stdin,
            Some(path) => Self::File(path.to_path_buf()),
        }
    }

    /// Name used in messages.
    #[must_use]
    pub fn display_name(&self) -> String {
        match self {
            Self::Stdin => "<stdin>".to_string(),
            Self::File(path) => path.display().to_string(),
        }
    }

    /// Read the whole input as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or stdin cannot be read.
    pub async fn read(&self) -> Result<String> {
        match self {
            Self::Stdin => {
                let mut text = String::new();
                tokio::io::stdin()
                    .read_to_string(&mut text)
                    .await
                    .context("Failed to read template from stdin")?;
                Ok(text)
            }
            Self::File(path) => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read template {}", path.display())),
        }
    }

    /// Read and parse the template.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or the text is not a template.
    pub async fn load(&self) -> Result<Template> {
        let text = self.read().await?;
        let template =
            parse(&text).with_context(|| format!("Failed to parse {}", self.display_name()))?;
        Ok(template)
    }
}

/// Style selected by a `--json` flag, falling back to the configured default.
#[must_use]
pub const fn style_for(json: bool, default: Style) -> Style {
    if json { Style::Json } else { default }
}

/// Formatter options from command flags layered over configured defaults.
#[must_use]
pub fn options_for<'a>(
    json: bool,
    compact: bool,
    unsorted: bool,
    settings: &crate::config::Config,
) -> Options<'a> {
    Options::default()
        .style(style_for(json, settings.format.style))
        .compact(compact || settings.format.compact)
        .unsorted(unsorted || settings.format.unsorted)
}
