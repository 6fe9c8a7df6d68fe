//! Semi-Structured Node Mapper
//!
//! Lets a node type persist properties that are not declared in its schema.
//! Free-form properties ride along with the declared ones, but a free-form name
//! that matches any member of the class (declared property or alias, class
//! attribute, base node attribute) is rejected so it can never shadow it.
//!
//! # Examples
//!
//! ```rust
//! use nodespace_mapper::mapper::{ConflictError, NodeMapper, SemiStructuredNode};
//! use nodespace_mapper::models::{MappedNode, NodeClass, PropertyMap};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let person = NodeClass::builder("Person")
//!     .property("name", "string")
//!     .property("age", "integer")
//!     .attribute("hello")
//!     .build()?;
//! let mapper = SemiStructuredNode::new(Arc::new(person));
//!
//! let mut tim = MappedNode::new(mapper.class().clone(), PropertyMap::new());
//! tim.set("name", "Tim");
//! tim.set("weight", 11);
//! assert_eq!(mapper.deflate_node(&tim).unwrap()["weight"], json!(11));
//!
//! tim.set("hello", "Hi");
//! assert!(matches!(
//!     mapper.deflate_node(&tim),
//!     Err(ConflictError::Deflate { .. })
//! ));
//! # Ok::<(), nodespace_mapper::models::SchemaError>(())
//! ```

use crate::mapper::{ConflictError, NodeMapper, StructuredNode};
use crate::models::{MappedNode, NodeClass, NodeRecord, PropertyMap};
use std::sync::Arc;

/// Mapper accepting free-form properties alongside the declared schema
#[derive(Debug, Clone)]
pub struct SemiStructuredNode {
    base: StructuredNode,
}

impl SemiStructuredNode {
    pub fn new(class: Arc<NodeClass>) -> Self {
        Self {
            base: StructuredNode::new(class),
        }
    }

    /// Base mapper handling the declared properties
    pub fn base(&self) -> &StructuredNode {
        &self.base
    }
}

impl NodeMapper for SemiStructuredNode {
    fn class(&self) -> &Arc<NodeClass> {
        self.base.class()
    }

    fn inflate(&self, record: Arc<NodeRecord>) -> Result<MappedNode, ConflictError> {
        let class = self.class();
        let mut props = class.inflate_declared(&record.data);
        let mut freeform = 0usize;

        for (key, value) in &record.data {
            if props.contains_key(key) {
                continue;
            }
            if class.has_attribute(key) {
                tracing::warn!(
                    class = class.name(),
                    node_id = %record.id,
                    key = %key,
                    "Stored property conflicts with class attribute"
                );
                return Err(ConflictError::inflate(
                    class.name(),
                    key.as_str(),
                    value.clone(),
                    record.id.as_str(),
                ));
            }
            tracing::trace!(class = class.name(), key = %key, "Free-form property");
            props.insert(key.clone(), value.clone());
            freeform += 1;
        }

        tracing::debug!(
            class = class.name(),
            node_id = %record.id,
            freeform,
            "Inflated semi-structured node"
        );

        Ok(MappedNode::new(class.clone(), props).with_record(record))
    }

    fn deflate(
        &self,
        properties: &PropertyMap,
        instance: Option<&MappedNode>,
    ) -> Result<PropertyMap, ConflictError> {
        let class = self.class();
        let deflated = self.base.deflate(properties, instance)?;
        let node_id = instance.and_then(MappedNode::id);
        let mut freeform = 0usize;

        for (key, value) in properties {
            if deflated.contains_key(key) {
                continue;
            }
            freeform += 1;
            if class.has_attribute(key) {
                tracing::warn!(
                    class = class.name(),
                    node_id = node_id.unwrap_or_default(),
                    key = %key,
                    "Free-form property conflicts with class attribute"
                );
                return Err(ConflictError::deflate(
                    class.name(),
                    key.as_str(),
                    value.clone(),
                    node_id,
                ));
            }
        }

        let mut merged = properties.clone();
        for (key, value) in deflated {
            merged.insert(key, value);
        }

        tracing::debug!(
            class = class.name(),
            node_id = node_id.unwrap_or_default(),
            freeform,
            "Deflated semi-structured node"
        );

        Ok(merged)
    }
}

// Comprehensive tests in separate module
#[cfg(test)]
#[path = "semi_structured_test.rs"]
mod semi_structured_test;
