//! Mapper Error Types
//!
//! Conflict errors raised when a free-form property name collides with a
//! member of the node class. Both variants carry enough context to locate the
//! offending node and property.

use serde_json::Value;
use thiserror::Error;

/// Identifier reported for nodes that have not been saved yet
pub const UNSAVED_NODE_ID: &str = "(unsaved)";

/// Free-form property collides with a class attribute
///
/// Fatal to the inflate or deflate call that raised it; nothing is partially
/// applied.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConflictError {
    /// Loading a record whose free-form key shadows a class attribute
    #[error("Found conflict with node {node_id}, has property '{property_name}' with value '{value}' although class {class_name} already has a property '{property_name}'")]
    Inflate {
        class_name: String,
        property_name: String,
        value: Value,
        node_id: String,
    },

    /// Saving a node whose free-form key shadows a class attribute
    #[error("Found trying to set property '{property_name}' with value '{value}' on node {node_id} although class {class_name} already has a property '{property_name}'")]
    Deflate {
        class_name: String,
        property_name: String,
        value: Value,
        node_id: String,
    },
}

impl ConflictError {
    /// Create an inflate conflict error
    pub fn inflate(
        class_name: impl Into<String>,
        property_name: impl Into<String>,
        value: Value,
        node_id: impl Into<String>,
    ) -> Self {
        Self::Inflate {
            class_name: class_name.into(),
            property_name: property_name.into(),
            value,
            node_id: node_id.into(),
        }
    }

    /// Create a deflate conflict error
    ///
    /// `node_id` is `None` for unsaved nodes and reported as [`UNSAVED_NODE_ID`].
    pub fn deflate(
        class_name: impl Into<String>,
        property_name: impl Into<String>,
        value: Value,
        node_id: Option<&str>,
    ) -> Self {
        Self::Deflate {
            class_name: class_name.into(),
            property_name: property_name.into(),
            value,
            node_id: node_id.unwrap_or(UNSAVED_NODE_ID).to_string(),
        }
    }

    pub fn class_name(&self) -> &str {
        match self {
            Self::Inflate { class_name, .. } | Self::Deflate { class_name, .. } => class_name,
        }
    }

    pub fn property_name(&self) -> &str {
        match self {
            Self::Inflate { property_name, .. } | Self::Deflate { property_name, .. } => {
                property_name
            }
        }
    }

    pub fn value(&self) -> &Value {
        match self {
            Self::Inflate { value, .. } | Self::Deflate { value, .. } => value,
        }
    }

    pub fn node_id(&self) -> &str {
        match self {
            Self::Inflate { node_id, .. } | Self::Deflate { node_id, .. } => node_id,
        }
    }
}
