#![forbid(unsafe_code)]

//! Canonical menu tree model.
//!
//! This crate defines the single source of truth for the menu editor:
//!
//! - Monotonic, non-zero node identifiers ([`NodeId`], [`NodeIdAllocator`]).
//! - An owned, strictly acyclic tree ([`MenuTree`]) where each container
//!   exclusively owns its ordered children.
//! - Transactional structural operations ([`MenuOperation`]), including the
//!   drop mutator ([`MenuTree::apply_drop`]) that refuses self-nesting.
//! - The structure serializer ([`MenuRecord`], [`serialize`]) used by save
//!   sinks and initial loads.

pub mod error;
pub mod node;
pub mod operation;
pub mod serialize;
pub mod tree;

pub use error::{MenuModelError, MenuOperationError, MenuOperationFailure, MenuOperationKind};
pub use node::{MenuKind, MenuNode, NodeId, NodeIdAllocator};
pub use operation::{DropPosition, MenuOperation, MenuOperationOutcome};
pub use serialize::{MenuRecord, RecordsJsonError, serialize, to_json_pretty, tree_from_json};
pub use tree::{Iter, MenuTree, NodeLocation};
