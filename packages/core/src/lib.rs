//! NodeSpace Node Mapper
//!
//! This crate maps graph-database node records to in-memory nodes and back,
//! including node types that carry properties their schema does not declare.
//!
//! # Architecture
//!
//! - **Schema as data**: Node classes are built in code or loaded from JSON definitions
//! - **Free-form properties**: `SemiStructuredNode` keeps undeclared stored keys on the node
//! - **Collision safety**: Free-form names may never shadow a class member
//! - **No I/O**: Mappers are pure transformations used by the persistence layer
//!
//! # Modules
//!
//! - [`models`] - Node classes, property descriptors, records and mapped nodes
//! - [`mapper`] - `NodeMapper` trait, `StructuredNode` and `SemiStructuredNode`

pub mod mapper;
pub mod models;

// Re-export commonly used types
pub use mapper::*;
pub use models::*;
