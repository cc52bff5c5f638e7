//! cfnkit CLI entry point
//!
//! Parses the command line, runs the selected command and turns any failure
//! into a user-friendly message with a suggestion before exiting with status 1.
//!
//! Commands:
//! - `fmt` - Format a template in canonical form
//! - `diff` - Compare two templates
//! - `tree` - Show reference dependencies
//! - `build` - Synthesize a placeholder template

use anyhow::Result;
use cfnkit::cli;
use cfnkit::core::error::user_friendly_error;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
