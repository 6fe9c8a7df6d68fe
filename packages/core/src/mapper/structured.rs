//! Base mapper for nodes with a fixed schema.

use crate::mapper::{ConflictError, NodeMapper};
use crate::models::{MappedNode, NodeClass, NodeRecord, PropertyMap};
use serde_json::Value;
use std::sync::Arc;

/// Mapper that only knows declared properties
///
/// Stored keys outside the schema are dropped on inflate, and deflate emits one
/// entry per declared non-alias property. Never returns a conflict.
#[derive(Debug, Clone)]
pub struct StructuredNode {
    class: Arc<NodeClass>,
}

impl StructuredNode {
    pub fn new(class: Arc<NodeClass>) -> Self {
        Self { class }
    }

    /// Deflate declared properties
    ///
    /// Values are copied from `properties`; absent or null values become `null`.
    pub fn deflate_declared(&self, properties: &PropertyMap) -> PropertyMap {
        self.class
            .declared_properties()
            .map(|prop| {
                let value = properties
                    .get(prop.name())
                    .filter(|value| !value.is_null())
                    .cloned()
                    .unwrap_or(Value::Null);
                (prop.name().to_string(), value)
            })
            .collect()
    }
}

impl NodeMapper for StructuredNode {
    fn class(&self) -> &Arc<NodeClass> {
        &self.class
    }

    fn inflate(&self, record: Arc<NodeRecord>) -> Result<MappedNode, ConflictError> {
        let props = self.class.inflate_declared(&record.data);

        for key in record.data.keys().filter(|key| !props.contains_key(*key)) {
            tracing::trace!(
                class = self.class.name(),
                node_id = %record.id,
                key = %key,
                "Ignoring undeclared property"
            );
        }

        Ok(MappedNode::new(self.class.clone(), props).with_record(record))
    }

    fn deflate(
        &self,
        properties: &PropertyMap,
        _instance: Option<&MappedNode>,
    ) -> Result<PropertyMap, ConflictError> {
        Ok(self.deflate_declared(properties))
    }
}
