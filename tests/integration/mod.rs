//! Integration test suite for cfnkit
//!
//! These tests drive the `cfnkit` binary end to end: reading templates from
//! files and stdin, writing to stdout and files, and reporting errors with
//! the right exit status.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **fmt**: Canonical formatting, `--write`, `--verify`, styles
//! - **diff**: Template comparison output
//! - **tree**: Dependency listing
//! - **build**: Placeholder template synthesis
//! - **config**: Configuration file handling
//! - **error_scenarios**: Exit codes and error messages

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod build;
mod config;
mod error_scenarios;
mod fmt;
