//! Core types for cfnkit
//!
//! This module holds the vocabulary shared by every engine component:
//!
//! - [`error`] - [`CfnError`], the recoverable error taxonomy, plus
//!   [`ErrorContext`] and [`user_friendly_error`] for CLI display
//! - [`element`] - [`Element`] and [`Section`], the identity of named
//!   template entities used by the dependency graph

pub mod element;
pub mod error;

pub use element::{Element, Section};
pub use error::{CfnError, CfnResult, ErrorContext, suggest_similar, user_friendly_error};
