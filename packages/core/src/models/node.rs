//! Mapped Node Instances
//!
//! A [`MappedNode`] is the in-memory side of a stored node: an ordered property
//! map holding declared and free-form values, the [`NodeClass`] it belongs to,
//! and (once saved or loaded) a shared back-reference to its [`NodeRecord`].
//!
//! # Examples
//!
//! ```rust
//! use nodespace_mapper::models::{MappedNode, NodeClass, PropertyMap};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! let person = Arc::new(
//!     NodeClass::builder("Person")
//!         .property("name", "string")
//!         .property("age", "integer")
//!         .build()?,
//! );
//!
//! let mut props = PropertyMap::new();
//! props.insert("name".to_string(), json!("Tim"));
//! props.insert("weight".to_string(), json!(11));
//!
//! let mut tim = MappedNode::new(person, props);
//! tim.set("mood", json!("happy"));
//!
//! assert_eq!(tim.get("age"), Some(&json!(null)));
//! assert_eq!(tim.freeform().count(), 2);
//! assert!(!tim.is_saved());
//! # Ok::<(), nodespace_mapper::models::SchemaError>(())
//! ```

use crate::models::{NodeClass, NodeRecord, PropertyEntry, PropertyMap};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;

/// In-memory node carrying declared and free-form properties
#[derive(Debug, Clone)]
pub struct MappedNode {
    class: Arc<NodeClass>,
    properties: PropertyMap,
    record: Option<Arc<NodeRecord>>,
}

impl MappedNode {
    /// Build a node from a merged property map
    ///
    /// Alias keys are stored under their target property. Declared properties
    /// missing from `properties` receive their default, or `null`. Every other
    /// key is kept as a free-form property; collisions with class attributes
    /// are checked by the mapper, not here.
    pub fn new(class: Arc<NodeClass>, properties: PropertyMap) -> Self {
        let mut merged = PropertyMap::with_capacity(properties.len());

        for prop in class.declared_properties() {
            merged.insert(prop.name().to_string(), Value::Null);
        }
        let mut seen = HashSet::new();

        for (key, value) in properties {
            let target = class.resolve_alias(&key).to_string();
            if class.is_stored(&target) {
                seen.insert(target.clone());
            }
            merged.insert(target, value);
        }

        for prop in class.declared_properties() {
            if !seen.contains(prop.name()) {
                merged.insert(prop.name().to_string(), prop.missing_value());
            }
        }

        Self {
            class,
            properties: merged,
            record: None,
        }
    }

    /// Attach the backing record (after a save, or on inflate)
    pub fn with_record(mut self, record: Arc<NodeRecord>) -> Self {
        self.record = Some(record);
        self
    }

    pub fn class(&self) -> &Arc<NodeClass> {
        &self.class
    }

    /// Backing record, if this node has been persisted or loaded
    pub fn record(&self) -> Option<&Arc<NodeRecord>> {
        self.record.as_ref()
    }

    /// Database identifier, `None` while unsaved
    pub fn id(&self) -> Option<&str> {
        self.record.as_deref().map(|record| record.id.as_str())
    }

    pub fn is_saved(&self) -> bool {
        self.record.is_some()
    }

    /// Get a property value, resolving aliases
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.properties.get(self.class.resolve_alias(name))
    }

    /// Set a property value, resolving aliases
    ///
    /// Any name is accepted. A free-form name that collides with a class
    /// attribute is reported when the node is deflated.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        let target = self.class.resolve_alias(&name).to_string();
        self.properties.insert(target, value.into());
    }

    /// Remove a property
    ///
    /// Free-form properties are dropped; declared properties are reset to
    /// `null` and stay on the node. Returns the previous value.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        let target = self.class.resolve_alias(name).to_string();
        if self.class.is_stored(&target) {
            self.properties
                .get_mut(&target)
                .map(|value| std::mem::replace(value, Value::Null))
        } else {
            self.properties.shift_remove(&target)
        }
    }

    /// All properties, declared first then free-form
    pub fn properties(&self) -> &PropertyMap {
        &self.properties
    }

    /// Consume the node, returning its property map
    pub fn into_properties(self) -> PropertyMap {
        self.properties
    }

    /// Iterate properties tagged as declared or free-form
    pub fn entries(&self) -> impl Iterator<Item = PropertyEntry<'_>> {
        self.properties.iter().map(|(name, value)| {
            if self.class.is_stored(name) {
                PropertyEntry::Declared {
                    name: name.as_str(),
                    value,
                }
            } else {
                PropertyEntry::Freeform {
                    name: name.as_str(),
                    value,
                }
            }
        })
    }

    /// Declared properties only
    pub fn declared(&self) -> impl Iterator<Item = PropertyEntry<'_>> {
        self.entries().filter(PropertyEntry::is_declared)
    }

    /// Free-form properties only
    pub fn freeform(&self) -> impl Iterator<Item = PropertyEntry<'_>> {
        self.entries().filter(|entry| !entry.is_declared())
    }
}

// Comprehensive tests in separate module
#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
