//! Property Descriptors
//!
//! A node class declares its schema as an ordered list of [`PropertyDescriptor`]s.
//! Each descriptor is either a stored property (persisted under its own name) or
//! an alias that reads and writes another stored property.
//!
//! # Examples
//!
//! ```rust
//! use nodespace_mapper::models::{DefaultValue, PropertyDescriptor};
//! use serde_json::json;
//!
//! let name = PropertyDescriptor::stored("name", "string");
//! let age = PropertyDescriptor::stored("age", "integer")
//!     .with_default(DefaultValue::value(json!(0)));
//! let full_name = PropertyDescriptor::alias("full_name", "name");
//!
//! assert!(!name.has_default());
//! assert_eq!(age.default_value(), Some(json!(0)));
//! assert!(full_name.is_alias());
//! ```

use chrono::Utc;
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

/// Ordered mapping from property name to raw JSON value
///
/// Insertion order is preserved (`serde_json` is built with `preserve_order`),
/// so declared properties come first in declaration order followed by free-form
/// properties in the order the stored record listed them.
pub type PropertyMap = serde_json::Map<String, Value>;

/// Default value for a declared property
///
/// Mirrors the two shapes of defaults a node schema can carry: a fixed JSON
/// value, or a generator evaluated each time a default is needed.
#[derive(Clone)]
pub enum DefaultValue {
    /// Fixed value, cloned for every instance
    Value(Value),

    /// Generated value (e.g. fresh UUID, current timestamp)
    Factory(fn() -> Value),
}

impl DefaultValue {
    /// Fixed default value
    pub fn value(value: impl Into<Value>) -> Self {
        Self::Value(value.into())
    }

    /// Default generated by a function on every use
    pub fn factory(f: fn() -> Value) -> Self {
        Self::Factory(f)
    }

    /// Fresh UUID v4 string on every use
    pub fn uuid() -> Self {
        Self::Factory(|| Value::String(Uuid::new_v4().to_string()))
    }

    /// Current UTC time as an RFC 3339 string on every use
    pub fn now() -> Self {
        Self::Factory(|| Value::String(Utc::now().to_rfc3339()))
    }

    /// Look up a named generator as used in JSON node class definitions
    ///
    /// Returns `None` for unknown names.
    pub fn from_factory_name(name: &str) -> Option<Self> {
        match name {
            "uuid" | "uuid4" => Some(Self::uuid()),
            "now" | "timestamp" => Some(Self::now()),
            _ => None,
        }
    }

    /// Produce the default value
    pub fn produce(&self) -> Value {
        match self {
            Self::Value(value) => value.clone(),
            Self::Factory(f) => f(),
        }
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

/// What a declared property is backed by
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyKind {
    /// Persisted under the property's own name
    ///
    /// `property_type` is informational only (e.g. "string", "integer");
    /// values are passed through without coercion.
    Stored { property_type: String },

    /// Reads and writes the stored property named `target`
    Alias { target: String },
}

/// Declared property on a node class
#[derive(Debug, Clone)]
pub struct PropertyDescriptor {
    name: String,
    kind: PropertyKind,
    default: Option<DefaultValue>,
    description: Option<String>,
}

impl PropertyDescriptor {
    /// Stored property with the given informational type name
    pub fn stored(name: impl Into<String>, property_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: PropertyKind::Stored {
                property_type: property_type.into(),
            },
            default: None,
            description: None,
        }
    }

    /// Alias for another stored property
    pub fn alias(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: PropertyKind::Alias {
                target: target.into(),
            },
            default: None,
            description: None,
        }
    }

    /// Attach a default value (ignored for aliases)
    pub fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &PropertyKind {
        &self.kind
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_alias(&self) -> bool {
        matches!(self.kind, PropertyKind::Alias { .. })
    }

    /// Target property name if this descriptor is an alias
    pub fn alias_target(&self) -> Option<&str> {
        match &self.kind {
            PropertyKind::Alias { target } => Some(target),
            PropertyKind::Stored { .. } => None,
        }
    }

    /// Informational type name for stored properties
    pub fn property_type(&self) -> Option<&str> {
        match &self.kind {
            PropertyKind::Stored { property_type } => Some(property_type),
            PropertyKind::Alias { .. } => None,
        }
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Evaluate the default, if one is declared
    pub fn default_value(&self) -> Option<Value> {
        self.default.as_ref().map(DefaultValue::produce)
    }

    /// Value used when a stored record or constructor omits this property
    ///
    /// The declared default if there is one, `null` otherwise.
    pub fn missing_value(&self) -> Value {
        self.default_value().unwrap_or(Value::Null)
    }
}

/// One property of a mapped node, tagged by where it comes from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyEntry<'a> {
    /// Property declared on the node class
    Declared { name: &'a str, value: &'a Value },

    /// Property carried by the node but absent from the class schema
    Freeform { name: &'a str, value: &'a Value },
}

impl<'a> PropertyEntry<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            Self::Declared { name, .. } | Self::Freeform { name, .. } => name,
        }
    }

    pub fn value(&self) -> &'a Value {
        match self {
            Self::Declared { value, .. } | Self::Freeform { value, .. } => value,
        }
    }

    pub fn is_declared(&self) -> bool {
        matches!(self, Self::Declared { .. })
    }
}
