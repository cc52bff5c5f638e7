//! cfnkit - canonical formatting, structural diff and dependency analysis for
//! infrastructure templates.
//!
//! Templates are YAML or JSON documents describing cloud resources, parameters
//! and outputs, with a small set of intrinsic functions (`!Ref`, `!Sub`,
//! `!GetAtt`, ...). cfnkit parses them into one in-memory model and builds
//! every operation on top of it.
//!
//! # Architecture Overview
//!
//! ```text
//! text ──parser──▶ Template ──┬──▶ format  ──▶ text
//!                             ├──▶ diff    ──▶ Diff ──▶ format_diff
//!                             └──▶ graph   ──▶ dependency order
//! ```
//!
//! The formatter asks the dependency graph for the order of the Resources
//! section, so resources appear after the resources they reference.
//!
//! # Core Modules
//!
//! - [`template`] - The document model: [`template::Node`], [`template::Template`], paths
//! - [`parser`] - YAML/JSON decoding, scalar typing and intrinsic tag rewriting
//! - [`diff`] - Structural comparison producing a mode-annotated tree
//! - [`format`] - Canonical block-style and JSON rendering, diff rendering, round-trip verification
//! - [`graph`] - Reference graph between Parameters, Resources and Outputs
//! - [`builder`] - Placeholder templates from a resource specification
//!
//! ## Supporting Modules
//!
//! - [`core`] - Error taxonomy and element identities
//! - [`config`] - Formatter defaults from `config.toml`
//! - [`cli`] - The `cfnkit` command-line interface
//! - [`constants`] - Section and intrinsic names shared across modules
//!
//! # Example
//!
//! ```rust
//! use cfnkit::format::{Options, format, verify};
//! use cfnkit::parser::parse;
//!
//! let template = parse(r#"{"Resources": {"Bucket": {"Type": "AWS::S3::Bucket"}}}"#).unwrap();
//! let text = format(&template, &Options::default());
//! assert_eq!(text, "Resources:\n  Bucket:\n    Type: \"AWS::S3::Bucket\"\n");
//! verify(&template, &Options::default()).unwrap();
//! ```
//!
//! # Command-Line Usage
//!
//! ```bash
//! cfnkit fmt template.yaml --write
//! cfnkit fmt template.yaml --verify
//! cfnkit diff old.yaml new.yaml --color
//! cfnkit tree template.yaml --format json
//! cfnkit build --spec spec.json AWS::S3::Bucket
//! ```

// Engine
pub mod builder;
pub mod diff;
pub mod format;
pub mod graph;
pub mod parser;
pub mod template;

// Supporting modules
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
