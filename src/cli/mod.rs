//! Command-line interface for cfnkit.
//!
//! Every command is a thin wrapper around the template engine: it reads one or
//! two template files (or stdin), calls into [`parser`](crate::parser),
//! [`format`](crate::format), [`diff`](crate::diff), [`graph`](crate::graph) or
//! [`builder`](crate::builder), and writes the result to stdout.
//!
//! # Available Commands
//!
//! - `fmt` - Rewrite a template in canonical form, or verify the round trip
//! - `diff` - Compare two templates structurally
//! - `tree` - Show the reference dependencies between template elements
//! - `build` - Synthesize a placeholder template from a resource specification
//!
//! # Global Options
//!
//! - `--verbose` - Enable debug logging
//! - `--quiet` - Only log errors
//! - `--config` - Path to a custom configuration file
//!
//! # Example
//!
//! ```bash
//! cfnkit fmt template.yaml --write
//! cfnkit diff old.yaml new.yaml --compact
//! cfnkit tree template.yaml --invert
//! cfnkit build --spec spec.json AWS::S3::Bucket
//! ```

mod build;
pub mod common;
mod diff;
mod fmt;
mod tree;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Runtime configuration derived from the global flags.
///
/// Kept separate from [`Cli`] so tests and programmatic callers can run a
/// command with an explicit log level and configuration file.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter used when `RUST_LOG` is not set
    pub log_level: Option<String>,
    /// Configuration file overriding the default location
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Create a configuration with no overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the global tracing subscriber, writing to stderr.
    ///
    /// `RUST_LOG` wins over the configured level. Calling this more than once
    /// is harmless; only the first subscriber is installed.
    pub fn init_logging(&self) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(self.log_level.as_deref().unwrap_or("warn"))
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Top-level command-line interface.
#[derive(Parser, Debug)]
#[command(
    name = "cfnkit",
    about = "Format, diff and inspect infrastructure templates",
    version,
    long_about = "cfnkit rewrites YAML/JSON infrastructure templates in a canonical form, \
                  compares templates structurally and shows the references between their resources."
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging.
    ///
    /// Equivalent to `RUST_LOG=debug`. Mutually exclusive with `--quiet`.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to a custom configuration file.
    ///
    /// Overrides `CFNKIT_CONFIG` and the platform default
    /// (`<config_dir>/cfnkit/config.toml`).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Format a template in canonical form.
    ///
    /// See [`fmt::FmtCommand`] for options.
    Fmt(fmt::FmtCommand),

    /// Show the structural differences between two templates.
    ///
    /// See [`diff::DiffCommand`] for options.
    Diff(diff::DiffCommand),

    /// Show the dependencies between template elements.
    ///
    /// See [`tree::TreeCommand`] for options.
    Tree(tree::TreeCommand),

    /// Build a placeholder template from a resource specification.
    ///
    /// See [`build::BuildCommand`] for options.
    Build(build::BuildCommand),
}

impl Cli {
    /// Execute the parsed command line.
    ///
    /// # Errors
    ///
    /// Returns the command's error, with context, for display by `main`.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Translate the global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
        }
    }

    /// Execute with an explicit runtime configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration file is invalid or the command fails.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        let settings = Config::load_with_optional(config.config_path.clone()).await?;
        debug!("Using format defaults: {:?}", settings.format);

        match self.command {
            Commands::Fmt(cmd) => cmd.execute(&settings).await,
            Commands::Diff(cmd) => cmd.execute(&settings).await,
            Commands::Tree(cmd) => cmd.execute().await,
            Commands::Build(cmd) => cmd.execute(&settings).await,
        }
    }
}
