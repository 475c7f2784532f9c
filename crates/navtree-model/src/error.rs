//! Validation and operation errors for the menu tree.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::node::NodeId;

/// Validation errors for menu tree construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuModelError {
    ZeroNodeId,
    NodeIdOverflow {
        current: NodeId,
    },
    DuplicateNodeId {
        node_id: NodeId,
    },
    NextIdNotGreaterThanExisting {
        next_id: NodeId,
        max_existing: NodeId,
    },
}

impl fmt::Display for MenuModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroNodeId => write!(f, "node id 0 is reserved"),
            Self::NodeIdOverflow { current } => write!(f, "node id overflow after {current}"),
            Self::DuplicateNodeId { node_id } => write!(f, "duplicate node id {node_id}"),
            Self::NextIdNotGreaterThanExisting {
                next_id,
                max_existing,
            } => write!(
                f,
                "next id {next_id} must be greater than existing id {max_existing}"
            ),
        }
    }
}

impl std::error::Error for MenuModelError {}

/// Stable operation discriminator used in logs and telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuOperationKind {
    MoveNode,
    RemoveNode,
    EditNode,
    AppendRoot,
}

/// Structured reasons for menu operation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuOperationFailure {
    MissingNode {
        node_id: NodeId,
    },
    SameNode {
        node_id: NodeId,
    },
    AncestorConflict {
        ancestor: NodeId,
        descendant: NodeId,
    },
    EmptyTitle {
        node_id: NodeId,
    },
    Validation(MenuModelError),
}

impl fmt::Display for MenuOperationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingNode { node_id } => write!(f, "node {node_id} not found"),
            Self::SameNode { node_id } => {
                write!(f, "node {node_id} cannot be placed relative to itself")
            }
            Self::AncestorConflict {
                ancestor,
                descendant,
            } => write!(
                f,
                "operation would create cycle: node {ancestor} is an ancestor of {descendant}"
            ),
            Self::EmptyTitle { node_id } => write!(f, "node {node_id} title must not be empty"),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for MenuOperationFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        if let Self::Validation(err) = self {
            return Some(err);
        }
        None
    }
}

/// Failure payload for transactional operation APIs.
///
/// The tree is untouched whenever this is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOperationError {
    pub operation_id: u64,
    pub kind: MenuOperationKind,
    pub touched_nodes: Vec<NodeId>,
    pub before_hash: u64,
    pub after_hash: u64,
    pub reason: MenuOperationFailure,
}

impl fmt::Display for MenuOperationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "menu op {} ({:?}) failed: {} [nodes={:?}, before_hash={:#x}, after_hash={:#x}]",
            self.operation_id,
            self.kind,
            self.reason,
            self.touched_nodes
                .iter()
                .map(|node_id| node_id.get())
                .collect::<Vec<_>>(),
            self.before_hash,
            self.after_hash
        )
    }
}

impl std::error::Error for MenuOperationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.reason)
    }
}
