//! Synthesize placeholder templates.
//!
//! Reads a resource specification file and writes a template declaring one
//! resource per requested type, with placeholder values for its properties.
//! Each type argument is either a bare type name (`AWS::S3::Bucket`), named
//! after its last segment (`Bucket`, then `Bucket2`, ...), or `Name=Type`.
//!
//! # Examples
//!
//! ```bash
//! cfnkit build --spec spec.json AWS::S3::Bucket
//! cfnkit build --spec spec.json Logs=AWS::S3::Bucket AWS::SNS::Topic --bare
//! ```

use anyhow::{Context, Result, bail};
use clap::Args;
use std::collections::HashSet;
use std::path::PathBuf;

use super::common::options_for;
use crate::builder::{Builder, Specification};
use crate::config::Config;
use crate::format::format;

/// Command to build a placeholder template.
#[derive(Args, Debug)]
pub struct BuildCommand {
    /// Resource specification JSON file
    #[arg(short, long)]
    spec: PathBuf,

    /// Resource types to declare, as `Type` or `Name=Type`
    #[arg(required = true)]
    types: Vec<String>,

    /// Only include required properties
    #[arg(short, long)]
    bare: bool,

    /// Write JSON instead of block-style YAML
    #[arg(short, long)]
    json: bool,
}

impl BuildCommand {
    /// Execute the command.
    ///
    /// # Errors
    ///
    /// Fails when the specification cannot be loaded, a logical name is used
    /// twice, or a type is not in the specification.
    pub async fn execute(self, settings: &Config) -> Result<()> {
        let spec = Specification::load(&self.spec)
            .await
            .with_context(|| format!("Failed to load specification {}", self.spec.display()))?;

        let resources = logical_names(&self.types)?;
        let pairs: Vec<(&str, &str)> =
            resources.iter().map(|(name, type_name)| (name.as_str(), type_name.as_str())).collect();
        let template = Builder::new(&spec).build(&pairs, self.bare)?;

        let options = options_for(self.json, false, false, settings);
        print!("{}", format(&template, &options));
        Ok(())
    }
}

/// Pair each type argument with a logical name.
fn logical_names(args: &[String]) -> Result<Vec<(String, String)>> {
    let mut used = HashSet::new();
    let mut resources = Vec::with_capacity(args.len());

    for arg in args {
        let (name, type_name) = match arg.split_once('=') {
            Some((name, type_name)) => {
                if !used.insert(name.to_string()) {
                    bail!("Logical name '{name}' is used more than once");
                }
                (name.to_string(), type_name.to_string())
            }
            None => {
                let base: String = arg
                    .rsplit("::")
                    .next()
                    .unwrap_or(arg)
                    .chars()
                    .filter(char::is_ascii_alphanumeric)
                    .collect();
                let base = if base.is_empty() { "Resource".to_string() } else { base };
                let mut name = base.clone();
                let mut n = 1;
                while used.contains(&name) {
                    n += 1;
                    name = format!("{base}{n}");
                }
                used.insert(name.clone());
                (name, arg.clone())
            }
        };
        resources.push((name, type_name));
    }
    Ok(resources)
}
