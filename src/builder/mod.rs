//! Placeholder template synthesis from a resource specification.
//!
//! The [`Builder`] walks the [`Specification`] for each requested resource type
//! and writes a property skeleton with placeholder values. Property types that
//! contain themselves (directly or through other property types) are cut off
//! with the literal `CIRCULAR` once a type reappears in its own ancestry.
//!
//! # Examples
//!
//! ```rust
//! use cfnkit::builder::{Builder, Specification};
//!
//! let spec = Specification::from_json(
//!     r#"{"ResourceTypes": {"AWS::SNS::Topic": {"Properties": {"TopicName": {"PrimitiveType": "String"}}}}}"#,
//! )
//! .unwrap();
//! let template = Builder::new(&spec).build(&[("Topic", "AWS::SNS::Topic")], false).unwrap();
//! let topic = &template.as_node()["Resources"]["Topic"];
//! assert_eq!(topic["Properties"]["TopicName"].as_str(), Some("CHANGEME"));
//! ```

pub mod specification;

pub use specification::{Property, PropertyType, ResourceType, Specification};

use tracing::debug;

use crate::constants::{
    CIRCULAR_MARKER, DEFAULT_FORMAT_VERSION, FORMAT_VERSION_KEY, PLACEHOLDER_STRING, RESOURCES_KEY,
};
use crate::core::{CfnError, CfnResult, suggest_similar};
use crate::template::{Mapping, Node, Template};

/// Synthesizes placeholder templates from a borrowed specification.
#[derive(Debug, Clone, Copy)]
pub struct Builder<'a> {
    spec: &'a Specification,
}

impl<'a> Builder<'a> {
    /// Create a builder over `spec`.
    #[must_use]
    pub const fn new(spec: &'a Specification) -> Self {
        Self { spec }
    }

    /// Build a template declaring each `(logical_name, type_name)` resource.
    ///
    /// With `bare`, only required properties are written.
    ///
    /// # Errors
    ///
    /// Returns [`CfnError::UnknownResourceType`] for a type the specification lacks.
    pub fn build(&self, resources: &[(&str, &str)], bare: bool) -> CfnResult<Template> {
        let mut section = Mapping::new();
        for (logical_name, type_name) in resources {
            section.insert((*logical_name).to_string(), self.resource(type_name, bare)?);
        }
        debug!("Built {} placeholder resources", section.len());

        let mut root = Mapping::new();
        root.insert(FORMAT_VERSION_KEY.to_string(), Node::string(DEFAULT_FORMAT_VERSION));
        root.insert(RESOURCES_KEY.to_string(), Node::Mapping(section));
        Ok(Template::from_mapping(root))
    }

    fn resource(&self, type_name: &str, bare: bool) -> CfnResult<Node> {
        let Some(resource_type) = self.spec.resource_types.get(type_name) else {
            return Err(CfnError::UnknownResourceType {
                name: type_name.to_string(),
                suggestions: suggest_similar(type_name, self.spec.resource_types.keys().map(String::as_str)),
            });
        };

        let mut ancestors = Vec::new();
        let properties = self.properties(&resource_type.properties, type_name, bare, &mut ancestors);

        let mut body = Mapping::new();
        body.insert("Type".to_string(), Node::string(type_name));
        if !properties.is_empty() {
            body.insert("Properties".to_string(), Node::Mapping(properties));
        }
        Ok(Node::Mapping(body))
    }

    fn properties(
        &self,
        properties: &indexmap::IndexMap<String, Property>,
        resource_type: &str,
        bare: bool,
        ancestors: &mut Vec<String>,
    ) -> Mapping {
        properties
            .iter()
            .filter(|(_, property)| !bare || property.required)
            .map(|(name, property)| (name.clone(), self.property(property, resource_type, bare, ancestors)))
            .collect()
    }

    fn property(&self, property: &Property, resource_type: &str, bare: bool, ancestors: &mut Vec<String>) -> Node {
        if let Some(primitive) = &property.primitive_type {
            return placeholder(primitive);
        }

        match property.type_name.as_deref() {
            Some("List") => Node::Sequence(vec![self.item(property, resource_type, bare, ancestors)]),
            Some("Map") => {
                let mut map = Mapping::new();
                map.insert("Key".to_string(), self.item(property, resource_type, bare, ancestors));
                Node::Mapping(map)
            }
            Some(name) => self.property_type(name, resource_type, bare, ancestors),
            None => Node::string(PLACEHOLDER_STRING),
        }
    }

    /// The element of a `List` or `Map` property.
    fn item(&self, property: &Property, resource_type: &str, bare: bool, ancestors: &mut Vec<String>) -> Node {
        if let Some(primitive) = &property.primitive_item_type {
            return placeholder(primitive);
        }
        match &property.item_type {
            Some(name) => self.property_type(name, resource_type, bare, ancestors),
            None => Node::string(PLACEHOLDER_STRING),
        }
    }

    fn property_type(&self, name: &str, resource_type: &str, bare: bool, ancestors: &mut Vec<String>) -> Node {
        let Some((key, property_type)) = self.spec.property_type(resource_type, name) else {
            debug!("Property type {name} of {resource_type} is not in the specification");
            return Node::string(PLACEHOLDER_STRING);
        };
        if ancestors.contains(&key) {
            return Node::string(CIRCULAR_MARKER);
        }

        ancestors.push(key);
        let properties = self.properties(&property_type.properties, resource_type, bare, ancestors);
        ancestors.pop();
        Node::Mapping(properties)
    }
}

/// Placeholder value for a primitive type name.
fn placeholder(primitive: &str) -> Node {
    match primitive {
        "Integer" | "Long" | "Double" => Node::from(0i64),
        "Boolean" => Node::from(false),
        "Json" => Node::Mapping(Mapping::new()),
        _ => Node::string(PLACEHOLDER_STRING),
    }
}
