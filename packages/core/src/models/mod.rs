//! Data Models
//!
//! This module contains the data structures shared by every mapper:
//!
//! - `NodeClass` - Static schema of a node type (declared properties + class attributes)
//! - `PropertyDescriptor` - Declared property (stored or alias) with optional default
//! - `NodeRecord` - Node as stored in the graph database
//! - `MappedNode` - In-memory node holding declared and free-form properties

mod node;
mod node_class;
mod property;
mod record;

pub use node::MappedNode;
pub use node_class::{
    NodeClass, NodeClassBuilder, NodeClassDefinition, PropertyDefinition, SchemaError,
    BASE_NODE_ATTRIBUTES,
};
pub use property::{DefaultValue, PropertyDescriptor, PropertyEntry, PropertyKind, PropertyMap};
pub use record::NodeRecord;
