//! Tests for SemiStructuredNode
//!
//! Covers inflate and deflate with free-form properties, every flavour of
//! attribute collision, and identifier reporting for saved and unsaved nodes.

#[cfg(test)]
mod tests {
    use crate::mapper::{ConflictError, NodeMapper, SemiStructuredNode, UNSAVED_NODE_ID};
    use crate::models::{DefaultValue, MappedNode, NodeClass, NodeRecord, PropertyMap};
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn person_mapper() -> SemiStructuredNode {
        let class = NodeClass::builder("Person")
            .property("name", "string")
            .property_with_default("age", "integer", DefaultValue::value(0))
            .alias("full_name", "name")
            .attribute("hello")
            .build()
            .unwrap();
        SemiStructuredNode::new(Arc::new(class))
    }

    fn record(id: &str, data: Value) -> Arc<NodeRecord> {
        Arc::new(NodeRecord::from_json(id, data))
    }

    fn props(value: Value) -> PropertyMap {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected JSON object"),
        }
    }

    // ========================================================================
    // inflate() Tests
    // ========================================================================

    #[test]
    fn test_inflate_declared_only() {
        let node = person_mapper()
            .inflate(record("1", json!({ "name": "Tim", "age": 8 })))
            .unwrap();

        assert_eq!(node.get("name"), Some(&json!("Tim")));
        assert_eq!(node.get("age"), Some(&json!(8)));
        assert_eq!(node.freeform().count(), 0);
    }

    #[test]
    fn test_inflate_missing_declared_uses_default_or_null() {
        let node = person_mapper().inflate(record("1", json!({}))).unwrap();

        assert_eq!(node.get("name"), Some(&Value::Null));
        assert_eq!(node.get("age"), Some(&json!(0)));
        assert_eq!(node.properties().len(), 2);
    }

    #[test]
    fn test_inflate_keeps_freeform_properties() {
        let node = person_mapper()
            .inflate(record("1", json!({ "name": "Tim", "weight": 11, "tags": ["a"] })))
            .unwrap();

        assert_eq!(node.get("weight"), Some(&json!(11)));
        assert_eq!(node.get("tags"), Some(&json!(["a"])));
        let freeform: Vec<&str> = node.freeform().map(|e| e.name()).collect();
        assert_eq!(freeform, vec!["weight", "tags"]);
    }

    #[test]
    fn test_inflate_attaches_record() {
        let rec = record("node-9", json!({ "name": "Tim" }));
        let node = person_mapper().inflate(rec.clone()).unwrap();

        assert!(node.is_saved());
        assert_eq!(node.id(), Some("node-9"));
        assert!(Arc::ptr_eq(node.record().unwrap(), &rec));
    }

    #[test]
    fn test_inflate_conflict_with_class_attribute() {
        let err = person_mapper()
            .inflate(record("42", json!({ "name": "Tim", "hello": "Hi" })))
            .unwrap_err();

        assert_eq!(
            err,
            ConflictError::Inflate {
                class_name: "Person".to_string(),
                property_name: "hello".to_string(),
                value: json!("Hi"),
                node_id: "42".to_string(),
            }
        );
    }

    #[test]
    fn test_inflate_conflict_with_alias() {
        let err = person_mapper()
            .inflate(record("42", json!({ "full_name": "Tim" })))
            .unwrap_err();

        assert!(matches!(err, ConflictError::Inflate { .. }));
        assert_eq!(err.property_name(), "full_name");
    }

    #[test]
    fn test_inflate_conflict_with_base_attribute() {
        for key in ["save", "delete", "id", "labels"] {
            let mut data = PropertyMap::new();
            data.insert(key.to_string(), json!(1));

            let err = person_mapper()
                .inflate(Arc::new(NodeRecord::new("5", data)))
                .unwrap_err();
            assert_eq!(err.property_name(), key);
            assert_eq!(err.node_id(), "5");
        }
    }

    // ========================================================================
    // deflate() Tests
    // ========================================================================

    #[test]
    fn test_deflate_merges_freeform_properties() {
        let deflated = person_mapper()
            .deflate(&props(json!({ "name": "Tim", "age": 8, "weight": 11 })), None)
            .unwrap();

        assert_eq!(
            Value::Object(deflated),
            json!({ "name": "Tim", "age": 8, "weight": 11 })
        );
    }

    #[test]
    fn test_deflate_adds_missing_declared_as_null() {
        let deflated = person_mapper()
            .deflate(&props(json!({ "weight": 11 })), None)
            .unwrap();

        let keys: Vec<&str> = deflated.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["weight", "name", "age"]);
        assert_eq!(deflated["name"], Value::Null);
        assert_eq!(deflated["age"], Value::Null);
    }

    #[test]
    fn test_deflate_conflict_on_unsaved_node() {
        let mapper = person_mapper();
        let mut node = MappedNode::new(mapper.class().clone(), props(json!({ "name": "Tim" })));
        node.set("hello", "Hi");

        let err = mapper.deflate_node(&node).unwrap_err();
        assert_eq!(
            err,
            ConflictError::Deflate {
                class_name: "Person".to_string(),
                property_name: "hello".to_string(),
                value: json!("Hi"),
                node_id: UNSAVED_NODE_ID.to_string(),
            }
        );
    }

    #[test]
    fn test_deflate_conflict_on_saved_node_reports_id() {
        let mapper = person_mapper();
        let mut node = mapper
            .inflate(record("node-3", json!({ "name": "Tim" })))
            .unwrap();
        node.set("refresh", true);

        let err = mapper.deflate_node(&node).unwrap_err();
        assert!(matches!(err, ConflictError::Deflate { .. }));
        assert_eq!(err.node_id(), "node-3");
        assert_eq!(err.property_name(), "refresh");
    }

    #[test]
    fn test_deflate_without_instance_is_unsaved() {
        let err = person_mapper()
            .deflate(&props(json!({ "hello": 1 })), None)
            .unwrap_err();

        assert_eq!(err.node_id(), UNSAVED_NODE_ID);
        assert_eq!(err.value(), &json!(1));
    }

    #[test]
    fn test_deflate_conflict_with_alias_key() {
        let err = person_mapper()
            .deflate(&props(json!({ "full_name": "Tim" })), None)
            .unwrap_err();

        assert_eq!(err.property_name(), "full_name");
    }

    #[test]
    fn test_deflate_does_not_mutate_input() {
        let input = props(json!({ "weight": 11 }));
        let _ = person_mapper().deflate(&input, None).unwrap();

        assert_eq!(input.len(), 1);
    }

    // ========================================================================
    // Round-Trip Tests
    // ========================================================================

    #[test]
    fn test_round_trip_restores_record_data() {
        let mapper = person_mapper();
        let data = json!({ "name": "Tim", "age": 8, "weight": 11, "nickname": "T" });
        let rec = record("1", data.clone());

        let node = mapper.inflate(rec).unwrap();
        let deflated = mapper.deflate_node(&node).unwrap();

        assert_eq!(Value::Object(deflated), data);
    }

    #[test]
    fn test_round_trip_after_removing_freeform() {
        let mapper = person_mapper();
        let mut node = mapper
            .inflate(record("1", json!({ "name": "Tim", "age": 8, "weight": 11 })))
            .unwrap();
        node.remove("weight");

        let deflated = mapper.deflate_node(&node).unwrap();
        assert_eq!(Value::Object(deflated), json!({ "name": "Tim", "age": 8 }));
    }
}
