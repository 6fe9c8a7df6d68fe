//! Node Mappers
//!
//! A mapper turns stored records into in-memory nodes (inflate) and node
//! properties back into storage mappings (deflate). The persistence pipeline
//! only talks to the [`NodeMapper`] trait, so node types choose their mapping
//! behavior by picking a mapper:
//!
//! - [`StructuredNode`] - declared properties only; unknown stored keys are ignored
//! - [`SemiStructuredNode`] - declared properties plus free-form properties, with
//!   collision checks against class attributes

mod error;
mod semi_structured;
mod structured;

pub use error::{ConflictError, UNSAVED_NODE_ID};
pub use semi_structured::SemiStructuredNode;
pub use structured::StructuredNode;

use crate::models::{MappedNode, NodeClass, NodeRecord, PropertyMap};
use std::sync::Arc;

/// Inflate/deflate hooks used by the persistence pipeline
pub trait NodeMapper: Send + Sync {
    /// Node class this mapper serves
    fn class(&self) -> &Arc<NodeClass>;

    /// Build an in-memory node from a stored record
    fn inflate(&self, record: Arc<NodeRecord>) -> Result<MappedNode, ConflictError>;

    /// Turn node properties into a storage-ready mapping
    ///
    /// `instance` is the node being saved, if any; it supplies the identifier
    /// used in diagnostics.
    fn deflate(
        &self,
        properties: &PropertyMap,
        instance: Option<&MappedNode>,
    ) -> Result<PropertyMap, ConflictError>;

    /// Deflate a node's own properties
    fn deflate_node(&self, node: &MappedNode) -> Result<PropertyMap, ConflictError> {
        self.deflate(node.properties(), Some(node))
    }
}
