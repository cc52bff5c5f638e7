//! Test utilities for cfnkit
//!
//! Helpers shared by unit tests and the integration suites: one-time logging
//! initialization and sample templates.
//!
//! # Example
//!
//! ```rust,no_run
//! use cfnkit::test_utils::{TemplateFixture, init_test_logging};
//!
//! init_test_logging(None);
//! let template = TemplateFixture::web_app().parse();
//! assert!(template.section("Resources").is_some());
//! ```

pub mod fixtures;

pub use fixtures::{SpecFixture, TemplateFixture};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. The provided level wins; otherwise
/// `RUST_LOG` is honored, and without either nothing is logged.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}
