//! Error handling for cfnkit
//!
//! This module provides the error taxonomy of the template engine and the
//! user-friendly error reporting used by the CLI. The error system follows two
//! principles:
//! 1. **Strongly-typed errors** for precise handling in code
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`CfnError`] - Enumerated error types for every recoverable failure
//! - [`ErrorContext`] - Wrapper that adds details and a suggestion for display
//!
//! # Error Categories
//!
//! - **Decoding**: [`CfnError::Syntax`], [`CfnError::Structure`]
//! - **Graph construction**: [`CfnError::UnresolvedReference`]
//! - **Verification**: [`CfnError::RoundTrip`]
//! - **Builder**: [`CfnError::UnknownResourceType`]
//! - **Configuration and I/O**: [`CfnError::ConfigError`], [`CfnError::Io`], ...
//!
//! Invariant violations on an already-parsed template (indexing a sequence with
//! a key, reading past its end) are programmer errors and panic instead.
//!
//! # Examples
//!
//! ```rust,no_run
//! use cfnkit::core::{CfnError, user_friendly_error};
//!
//! fn load() -> anyhow::Result<()> {
//!     Err(CfnError::Structure { reason: "root is a sequence".to_string() }.into())
//! }
//!
//! if let Err(e) = load() {
//!     user_friendly_error(e).display();
//! }
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

use crate::core::Element;
use crate::diff::Diff;

/// The main error type for template operations.
#[derive(Error, Debug)]
pub enum CfnError {
    /// The source text does not decode as YAML or JSON.
    #[error("Template syntax error: {message}")]
    Syntax {
        /// Decoder message, including the position when known
        message: String,
    },

    /// The text decodes but does not have the shape of a template.
    #[error("Invalid template structure: {reason}")]
    Structure {
        /// What was wrong with the decoded shape
        reason: String,
    },

    /// A reference names something that is neither declared nor a pseudo-parameter.
    ///
    /// Fatal for graph construction: the dependency ordering is meaningless
    /// when any edge target is unknown.
    #[error("Unresolved reference '{name}' in {element}")]
    UnresolvedReference {
        /// The referenced name
        name: String,
        /// The element whose body contains the reference
        element: Element,
        /// Declared names close to `name`
        suggestions: Vec<String>,
    },

    /// Re-parsing the formatted output did not reproduce the template.
    #[error("Round-trip verification failed: {reason}")]
    RoundTrip {
        /// Summary of the failure
        reason: String,
        /// The offending difference, when the output could be parsed at all
        diff: Option<Box<Diff>>,
    },

    /// The builder was asked for a resource type the specification lacks.
    #[error("Unknown resource type: {name}")]
    UnknownResourceType {
        /// The requested type name
        name: String,
        /// Known type names close to `name`
        suggestions: Vec<String>,
    },

    /// Configuration file problems.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the problem
        message: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Any other failure, carried as its message
    #[error("{message}")]
    Other {
        /// The error message
        message: String,
    },
}

/// Result type alias for engine operations.
pub type CfnResult<T> = Result<T, CfnError>;

/// Error context wrapper that adds details and a suggestion to a [`CfnError`].
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: CfnError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no details or suggestion.
    #[must_use]
    pub const fn new(error: CfnError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors.
    ///
    /// - Error message: Red and bold
    /// - Details: Yellow
    /// - Suggestion: Green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions.
///
/// Recognizes [`CfnError`] variants (directly or as the root cause of a context
/// chain), [`std::io::Error`] and TOML errors; anything else is wrapped with
/// its full context chain as details.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    // Outer context messages, innermost (root cause) excluded.
    let mut chain: Vec<String> = error.chain().map(ToString::to_string).collect();
    chain.pop();

    let error = match error.downcast::<ErrorContext>() {
        Ok(ctx) => return ctx,
        Err(error) => error,
    };

    let error = match error.downcast::<CfnError>() {
        Ok(cfn_error) => {
            let message = cfn_error.to_string();
            chain.retain(|m| *m != message);
            let ctx = create_error_context(cfn_error);
            return if chain.is_empty() || ctx.details.is_some() {
                ctx
            } else {
                ctx.with_details(chain.join("\n"))
            };
        }
        Err(error) => error,
    };

    if let Some(io_error) = error.root_cause().downcast_ref::<std::io::Error>() {
        let suggestion = match io_error.kind() {
            std::io::ErrorKind::NotFound => {
                Some("Check that the file exists and the path is correct")
            }
            std::io::ErrorKind::PermissionDenied => Some("Check the file permissions"),
            _ => None,
        };
        if let Some(suggestion) = suggestion {
            return ErrorContext::new(CfnError::Other {
                message: error.to_string(),
            })
            .with_details(io_error.to_string())
            .with_suggestion(suggestion);
        }
    }

    if let Some(toml_error) = error.root_cause().downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(CfnError::ConfigError {
            message: error.to_string(),
        })
        .with_details(toml_error.to_string())
        .with_suggestion("Check the TOML syntax of your cfnkit configuration file");
    }

    let ctx = ErrorContext::new(CfnError::Other {
        message: error.to_string(),
    });
    if chain.is_empty() {
        ctx
    } else {
        ctx.with_details(error.root_cause().to_string())
    }
}

/// Attach the suggestion and details appropriate for each [`CfnError`] variant.
fn create_error_context(error: CfnError) -> ErrorContext {
    match &error {
        CfnError::Syntax { .. } => ErrorContext::new(error)
            .with_suggestion("Check the YAML/JSON syntax: indentation, quotes and brackets"),
        CfnError::Structure { .. } => ErrorContext::new(error)
            .with_suggestion("A template must be a mapping with string keys at its root"),
        CfnError::UnresolvedReference { suggestions, .. } => {
            let suggestion = if suggestions.is_empty() {
                "Declare the name under Parameters or Resources, or use an AWS:: pseudo-parameter"
                    .to_string()
            } else {
                format!("Did you mean: {}?", suggestions.join(", "))
            };
            ErrorContext::new(error).with_suggestion(suggestion)
        }
        CfnError::RoundTrip { diff, .. } => {
            let details = diff.as_ref().map(|diff| {
                crate::format::format_diff(diff, &crate::format::Options::default().compact(true))
            });
            let ctx = ErrorContext::new(error)
                .with_suggestion("Please report this template; formatting changed its meaning");
            match details {
                Some(details) => ctx.with_details(details),
                None => ctx,
            }
        }
        CfnError::UnknownResourceType { suggestions, .. } => {
            let suggestion = if suggestions.is_empty() {
                "Check the resource type name against the specification file".to_string()
            } else {
                format!("Did you mean: {}?", suggestions.join(", "))
            };
            ErrorContext::new(error).with_suggestion(suggestion)
        }
        CfnError::ConfigError { .. } | CfnError::Toml(_) => ErrorContext::new(error)
            .with_suggestion("Check your cfnkit configuration file"),
        CfnError::Io(_) | CfnError::Json(_) | CfnError::Other { .. } => ErrorContext::new(error),
    }
}

/// Rank `candidates` by edit distance to `target` and keep up to three close matches.
///
/// A candidate qualifies when its Levenshtein distance is within
/// [`SIMILARITY_THRESHOLD_PERCENT`](crate::constants::SIMILARITY_THRESHOLD_PERCENT)
/// of the target length.
pub fn suggest_similar<'a>(target: &str, candidates: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let limit = target.len() * crate::constants::SIMILARITY_THRESHOLD_PERCENT / 100;
    let mut scored: Vec<(&str, usize)> = candidates
        .into_iter()
        .map(|candidate| (candidate, strsim::levenshtein(target, candidate)))
        .filter(|(_, distance)| *distance <= limit)
        .collect();

    scored.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
    scored.into_iter().take(3).map(|(candidate, _)| candidate.to_string()).collect()
}
