//! Configuration for cfnkit.
//!
//! A small TOML file supplies defaults for the formatter so that a team can
//! agree on one output style without passing flags every time. Command-line
//! flags always win over file values.
//!
//! # Location
//!
//! The file is resolved in this order:
//!
//! 1. The `--config PATH` flag
//! 2. The `CFNKIT_CONFIG` environment variable
//! 3. `<config_dir>/cfnkit/config.toml` (e.g. `~/.config/cfnkit/config.toml`
//!    on Linux, `~/Library/Application Support/cfnkit/config.toml` on macOS)
//!
//! A missing file yields the defaults; a file with invalid TOML is an error.
//!
//! # Format
//!
//! ```toml
//! [format]
//! style = "yaml"     # or "json"
//! compact = false
//! unsorted = false
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use crate::constants::CONFIG_ENV_VAR;
use crate::format::Style;

/// Top-level configuration file contents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Formatter defaults
    #[serde(default)]
    pub format: FormatConfig,
}

/// The `[format]` table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatConfig {
    /// Output encoding used when no `--json` flag is given
    pub style: Style,
    /// Compact output by default
    pub compact: bool,
    /// Keep source key order by default
    pub unsorted: bool,
}

impl Config {
    /// Load the configuration from `path`, or from the default location when `None`.
    ///
    /// Returns the defaults when the resolved file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or is not valid
    /// configuration TOML.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => match Self::default_path() {
                Some(path) => path,
                None => {
                    debug!("No configuration directory on this platform, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        if fs::try_exists(&path).await.unwrap_or(false) {
            Self::load_from(&path).await
        } else {
            debug!("No configuration file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load the configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not parse.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config = Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse configuration TOML.
    ///
    /// # Errors
    ///
    /// Returns the TOML error for malformed text or unknown keys.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// The configuration file used when `--config` is not given.
    ///
    /// `CFNKIT_CONFIG` takes precedence over the platform configuration
    /// directory. `None` when neither is available.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR)
            && !path.is_empty()
        {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join("cfnkit").join("config.toml"))
    }
}
