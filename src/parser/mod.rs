//! Template parsing and canonicalization.
//!
//! [`parse`] turns YAML or JSON text into a [`Template`]. Along the way it:
//!
//! - types plain scalars itself (see [`scalar::resolve_plain`]) so that
//!   ambiguous text such as `0123` or `2010-09-09` is never silently re-typed
//! - rewrites short-form intrinsic tags into explicit single-key mappings
//!   (`!Ref X` becomes `{"Ref": "X"}`, `!GetAtt A.B` becomes
//!   `{"Fn::GetAtt": ["A", "B"]}`)
//! - rejects documents whose root is not a mapping
//!
//! # Examples
//!
//! ```rust
//! use cfnkit::parser::parse;
//!
//! let template = parse("Resources:\n  Bucket:\n    Type: AWS::S3::Bucket\n").unwrap();
//! assert!(template.section("Resources").is_some());
//! ```

mod json;
pub mod scalar;
mod yaml;

use tracing::debug;

use crate::core::CfnResult;
use crate::template::Template;

pub use scalar::resolve_plain;

/// Parse YAML or JSON `text` into a template.
///
/// Text starting with `{` or `[` is tried as JSON first; when that fails it
/// is retried as YAML, and the JSON error is reported if both fail.
///
/// # Errors
///
/// - [`CfnError::Syntax`](crate::core::CfnError::Syntax) when the text does not decode
/// - [`CfnError::Structure`](crate::core::CfnError::Structure) when the root is not a
///   mapping or a mapping key is not a scalar
pub fn parse(text: &str) -> CfnResult<Template> {
    let node = if json::looks_like_json(text) {
        match json::decode(text) {
            Ok(node) => node,
            Err(json_error) => {
                debug!("JSON decoding failed, retrying as YAML: {json_error}");
                yaml::decode(text).map_err(|_| json_error)?
            }
        }
    } else {
        yaml::decode(text)?
    };

    let template = Template::from_node(node)?;
    debug!("Parsed template with {} top-level keys", template.root().len());
    Ok(template)
}
