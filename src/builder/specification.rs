//! Resource specification model.
//!
//! The specification is the published JSON document describing every resource
//! type and its property types. Only the fields the builder needs are read;
//! everything else in the document is ignored.

use indexmap::IndexMap;
use serde::Deserialize;
use std::path::Path;

use crate::core::CfnResult;

/// A resource specification document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Specification {
    /// Property types by name: `Resource::Type.Name` or a global name such as `Tag`
    #[serde(default)]
    pub property_types: IndexMap<String, PropertyType>,
    /// Resource types by name, e.g. `AWS::S3::Bucket`
    #[serde(default)]
    pub resource_types: IndexMap<String, ResourceType>,
}

/// A resource type: its top-level properties.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceType {
    /// Properties by name
    #[serde(default)]
    pub properties: IndexMap<String, Property>,
}

/// A named structure used as the type of a property.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PropertyType {
    /// Properties by name
    #[serde(default)]
    pub properties: IndexMap<String, Property>,
}

/// One property of a resource or property type.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Property {
    /// Whether templates must set the property
    #[serde(default)]
    pub required: bool,
    /// Scalar type (`String`, `Integer`, `Boolean`, `Json`, ...)
    pub primitive_type: Option<String>,
    /// `List`, `Map` or a property type name
    #[serde(rename = "Type")]
    pub type_name: Option<String>,
    /// Property type name of list or map items
    pub item_type: Option<String>,
    /// Scalar type of list or map items
    pub primitive_item_type: Option<String>,
}

impl Specification {
    /// Parse a specification from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`CfnError::Json`](crate::core::CfnError::Json) when the text is
    /// not a specification document.
    pub fn from_json(text: &str) -> CfnResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load a specification file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the file cannot be read, or a JSON error when
    /// it does not parse.
    pub async fn load(path: &Path) -> CfnResult<Self> {
        let text = tokio::fs::read_to_string(path).await?;
        Self::from_json(&text)
    }

    /// Resolve a property type referenced from `resource_type`.
    ///
    /// Names qualified by the resource type (`AWS::S3::Bucket.Rule`) win over
    /// global names (`Tag`). Returns the qualified key that matched along with
    /// the type.
    #[must_use]
    pub fn property_type(&self, resource_type: &str, name: &str) -> Option<(String, &PropertyType)> {
        let qualified = format!("{resource_type}.{name}");
        if let Some(found) = self.property_types.get(&qualified) {
            return Some((qualified, found));
        }
        self.property_types.get(name).map(|found| (name.to_string(), found))
    }
}
