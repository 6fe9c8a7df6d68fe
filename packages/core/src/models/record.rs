//! Stored Node Records
//!
//! A [`NodeRecord`] is what the database layer hands to a mapper: the node's
//! identifier, its labels, and a flat mapping of property name to raw value.
//! Mapped nodes keep a shared reference to the record they were inflated from.

use crate::models::PropertyMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Node as stored in the graph database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Database identifier
    pub id: String,

    /// Labels attached to the node
    #[serde(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,

    /// Flat property data
    #[serde(default)]
    pub data: PropertyMap,
}

impl NodeRecord {
    pub fn new(id: impl Into<String>, data: PropertyMap) -> Self {
        Self {
            id: id.into(),
            labels: Vec::new(),
            data,
        }
    }

    /// Build a record from a JSON object literal
    ///
    /// Non-object values produce a record with no data.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nodespace_mapper::models::NodeRecord;
    /// use serde_json::json;
    ///
    /// let record = NodeRecord::from_json("42", json!({ "name": "Tim", "weight": 11 }));
    /// assert_eq!(record.get("weight"), Some(&json!(11)));
    /// ```
    pub fn from_json(id: impl Into<String>, data: Value) -> Self {
        let data = match data {
            Value::Object(map) => map,
            _ => PropertyMap::new(),
        };
        Self::new(id, data)
    }

    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }
}
