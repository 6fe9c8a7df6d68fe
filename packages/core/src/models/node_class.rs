//! Node Class Schemas
//!
//! A [`NodeClass`] is the static schema of a mapped node type: its name, its
//! ordered declared properties, and the class-level attribute names (methods and
//! other non-property members) that free-form properties must not shadow.
//!
//! Node classes are built in code with [`NodeClass::builder`] or loaded from JSON
//! through [`NodeClassDefinition`].
//!
//! ## Example Definition
//!
//! ```json
//! {
//!   "name": "Person",
//!   "properties": [
//!     { "name": "name", "type": "string" },
//!     { "name": "age", "type": "integer", "default": 0 },
//!     { "name": "uid", "type": "string", "default_factory": "uuid" },
//!     { "name": "full_name", "alias_of": "name" }
//!   ],
//!   "attributes": ["hello"]
//! }
//! ```

use crate::models::{DefaultValue, PropertyDescriptor, PropertyMap};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

/// Attribute names every mapped node exposes regardless of its schema
///
/// Free-form properties with one of these names are rejected on inflate and
/// deflate, and declared properties may not use them.
pub const BASE_NODE_ATTRIBUTES: &[&str] = &[
    "id",
    "element_id",
    "labels",
    "inherited_labels",
    "save",
    "delete",
    "refresh",
    "create",
    "create_or_update",
    "get_or_create",
    "inflate",
    "deflate",
    "nodes",
    "cypher",
    "pre_save",
    "post_save",
    "post_create",
    "pre_delete",
    "post_delete",
    "defined_properties",
    "class",
    "record",
    "properties",
    "get",
    "set",
    "remove",
];

/// Errors raised while building a node class
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Node class name must not be empty")]
    EmptyClassName,

    #[error("Node class {class_name} has a property with an empty name")]
    EmptyPropertyName { class_name: String },

    #[error("Node class {class_name} declares property '{name}' more than once")]
    DuplicateProperty { class_name: String, name: String },

    #[error("Node class {class_name} declares property '{name}' which shadows a class attribute")]
    ReservedName { class_name: String, name: String },

    #[error("Alias '{alias}' on node class {class_name} points at unknown property '{target}'")]
    UnknownAliasTarget {
        class_name: String,
        alias: String,
        target: String,
    },

    #[error("Alias '{alias}' on node class {class_name} points at another alias '{target}'")]
    AliasToAlias {
        class_name: String,
        alias: String,
        target: String,
    },

    #[error("Unknown default factory '{factory}' for property '{name}'")]
    UnknownDefaultFactory { name: String, factory: String },
}

/// Property as written in a JSON node class definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDefinition {
    /// Property name
    pub name: String,

    /// Informational type name (e.g. "string", "integer"); ignored for aliases
    #[serde(rename = "type", default = "default_property_type")]
    pub property_type: String,

    /// Stored property this entry aliases
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias_of: Option<String>,

    /// Fixed default value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Named default generator ("uuid", "now"); wins over `default`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_factory: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_property_type() -> String {
    "any".to_string()
}

impl TryFrom<PropertyDefinition> for PropertyDescriptor {
    type Error = SchemaError;

    fn try_from(def: PropertyDefinition) -> Result<Self, Self::Error> {
        let mut descriptor = match def.alias_of {
            Some(target) => PropertyDescriptor::alias(def.name.clone(), target),
            None => PropertyDescriptor::stored(def.name.clone(), def.property_type),
        };

        if let Some(factory) = def.default_factory {
            let default = DefaultValue::from_factory_name(&factory).ok_or_else(|| {
                SchemaError::UnknownDefaultFactory {
                    name: def.name.clone(),
                    factory,
                }
            })?;
            descriptor = descriptor.with_default(default);
        } else if let Some(value) = def.default {
            descriptor = descriptor.with_default(DefaultValue::Value(value));
        }

        if let Some(description) = def.description {
            descriptor = descriptor.with_description(description);
        }

        Ok(descriptor)
    }
}

/// Complete node class definition as loaded from configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeClassDefinition {
    /// Class name used in diagnostics
    pub name: String,

    /// Declared properties, in order
    #[serde(default)]
    pub properties: Vec<PropertyDefinition>,

    /// Class-level attribute names that are not properties (methods etc.)
    #[serde(default)]
    pub attributes: Vec<String>,
}

/// Static schema of a mapped node type
#[derive(Debug, Clone)]
pub struct NodeClass {
    name: String,
    properties: Vec<PropertyDescriptor>,
    index: HashMap<String, usize>,
    attributes: BTreeSet<String>,
}

impl NodeClass {
    /// Start building a node class
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nodespace_mapper::models::NodeClass;
    ///
    /// let person = NodeClass::builder("Person")
    ///     .property("name", "string")
    ///     .property("age", "integer")
    ///     .attribute("hello")
    ///     .build()?;
    ///
    /// assert!(person.is_declared("name"));
    /// assert!(person.has_attribute("hello"));
    /// assert!(person.has_attribute("save"));
    /// assert!(!person.has_attribute("weight"));
    /// # Ok::<(), nodespace_mapper::models::SchemaError>(())
    /// ```
    pub fn builder(name: impl Into<String>) -> NodeClassBuilder {
        NodeClassBuilder {
            name: name.into(),
            properties: Vec::new(),
            attributes: Vec::new(),
        }
    }

    /// Build a node class from a configuration definition
    pub fn from_definition(def: NodeClassDefinition) -> Result<Self, SchemaError> {
        let mut builder = Self::builder(def.name);
        for prop in def.properties {
            builder = builder.descriptor(PropertyDescriptor::try_from(prop)?);
        }
        for attr in def.attributes {
            builder = builder.attribute(attr);
        }
        builder.build()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// All declared properties, aliases included, in declaration order
    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.properties
    }

    /// Declared non-alias properties in declaration order
    pub fn declared_properties(&self) -> impl Iterator<Item = &PropertyDescriptor> {
        self.properties.iter().filter(|p| !p.is_alias())
    }

    /// Get a declared property (alias or stored) by name
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.index.get(name).map(|&i| &self.properties[i])
    }

    /// True if `name` is a declared property (alias or stored)
    pub fn is_declared(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// True if `name` is a stored, non-alias property
    pub fn is_stored(&self, name: &str) -> bool {
        self.property(name).is_some_and(|p| !p.is_alias())
    }

    /// Class-level attribute names registered on this class
    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(String::as_str)
    }

    /// True if the class exposes any member called `name`
    ///
    /// Covers declared properties (aliases included), class attributes, and
    /// [`BASE_NODE_ATTRIBUTES`]. A free-form property with such a name would
    /// shadow the member, so inflate and deflate reject it.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.is_declared(name)
            || self.attributes.contains(name)
            || BASE_NODE_ATTRIBUTES.contains(&name)
    }

    /// Map an alias to its stored target; other names map to themselves
    pub fn resolve_alias<'a>(&'a self, name: &'a str) -> &'a str {
        self.property(name)
            .and_then(PropertyDescriptor::alias_target)
            .unwrap_or(name)
    }

    /// Read declared non-alias properties out of stored data
    ///
    /// Present values are copied; missing ones fall back to the declared default
    /// or `null`. Shared by every mapper's inflate.
    pub fn inflate_declared(&self, data: &PropertyMap) -> PropertyMap {
        self.declared_properties()
            .map(|prop| {
                let value = match data.get(prop.name()) {
                    Some(value) => value.clone(),
                    None => prop.missing_value(),
                };
                (prop.name().to_string(), value)
            })
            .collect()
    }
}

impl TryFrom<NodeClassDefinition> for NodeClass {
    type Error = SchemaError;

    fn try_from(def: NodeClassDefinition) -> Result<Self, Self::Error> {
        Self::from_definition(def)
    }
}

/// Builder for [`NodeClass`]
#[derive(Debug, Clone)]
pub struct NodeClassBuilder {
    name: String,
    properties: Vec<PropertyDescriptor>,
    attributes: Vec<String>,
}

impl NodeClassBuilder {
    /// Declare a stored property
    pub fn property(self, name: impl Into<String>, property_type: impl Into<String>) -> Self {
        self.descriptor(PropertyDescriptor::stored(name, property_type))
    }

    /// Declare a stored property with a default
    pub fn property_with_default(
        self,
        name: impl Into<String>,
        property_type: impl Into<String>,
        default: DefaultValue,
    ) -> Self {
        self.descriptor(PropertyDescriptor::stored(name, property_type).with_default(default))
    }

    /// Declare an alias for a stored property
    pub fn alias(self, name: impl Into<String>, target: impl Into<String>) -> Self {
        self.descriptor(PropertyDescriptor::alias(name, target))
    }

    /// Declare a fully configured property descriptor
    pub fn descriptor(mut self, descriptor: PropertyDescriptor) -> Self {
        self.properties.push(descriptor);
        self
    }

    /// Register a class-level attribute (method or other member)
    pub fn attribute(mut self, name: impl Into<String>) -> Self {
        self.attributes.push(name.into());
        self
    }

    pub fn build(self) -> Result<NodeClass, SchemaError> {
        if self.name.is_empty() {
            return Err(SchemaError::EmptyClassName);
        }

        let attributes: BTreeSet<String> = self.attributes.into_iter().collect();
        let mut index = HashMap::with_capacity(self.properties.len());

        for (i, prop) in self.properties.iter().enumerate() {
            if prop.name().is_empty() {
                return Err(SchemaError::EmptyPropertyName {
                    class_name: self.name,
                });
            }
            if attributes.contains(prop.name()) || BASE_NODE_ATTRIBUTES.contains(&prop.name()) {
                return Err(SchemaError::ReservedName {
                    class_name: self.name,
                    name: prop.name().to_string(),
                });
            }
            if index.insert(prop.name().to_string(), i).is_some() {
                return Err(SchemaError::DuplicateProperty {
                    class_name: self.name,
                    name: prop.name().to_string(),
                });
            }
        }

        for prop in &self.properties {
            let Some(target) = prop.alias_target() else {
                continue;
            };
            match index.get(target).map(|&i| &self.properties[i]) {
                None => {
                    return Err(SchemaError::UnknownAliasTarget {
                        class_name: self.name,
                        alias: prop.name().to_string(),
                        target: target.to_string(),
                    })
                }
                Some(target_prop) if target_prop.is_alias() => {
                    return Err(SchemaError::AliasToAlias {
                        class_name: self.name,
                        alias: prop.name().to_string(),
                        target: target.to_string(),
                    })
                }
                Some(_) => {}
            }
        }

        Ok(NodeClass {
            name: self.name,
            properties: self.properties,
            index,
            attributes,
        })
    }
}
