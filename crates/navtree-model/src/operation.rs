//! Structural menu operations.
//!
//! Every mutation of a [`MenuTree`] after construction goes through
//! [`MenuTree::apply_operation`]. Operations run on a cloned working tree
//! which is validated before it replaces `self`, so a failed operation never
//! leaves the tree half-applied.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{MenuOperationError, MenuOperationFailure, MenuOperationKind};
use crate::node::{MenuNode, NodeId};
use crate::tree::MenuTree;

/// Where a dropped node lands relative to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropPosition {
    /// Immediately preceding sibling of the target.
    #[default]
    Before,
    /// Immediately following sibling of the target.
    After,
    /// Last child of the target.
    Inside,
}

impl DropPosition {
    /// Returns true for sibling insertions (`Before` or `After`).
    #[must_use]
    pub const fn is_sibling(self) -> bool {
        matches!(self, Self::Before | Self::After)
    }
}

/// Supported structural menu operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuOperation {
    /// Relocate `source` (with its subtree) relative to `target`.
    MoveNode {
        source: NodeId,
        target: NodeId,
        position: DropPosition,
    },
    /// Remove `target` and discard its entire subtree.
    RemoveNode { target: NodeId },
    /// Replace the title (and optionally the URL) of `target`.
    EditNode {
        target: NodeId,
        title: String,
        url: Option<String>,
    },
    /// Append a detached node as the last root.
    AppendRoot { node: MenuNode },
}

impl MenuOperation {
    /// Operation family.
    #[must_use]
    pub const fn kind(&self) -> MenuOperationKind {
        match self {
            Self::MoveNode { .. } => MenuOperationKind::MoveNode,
            Self::RemoveNode { .. } => MenuOperationKind::RemoveNode,
            Self::EditNode { .. } => MenuOperationKind::EditNode,
            Self::AppendRoot { .. } => MenuOperationKind::AppendRoot,
        }
    }

    #[must_use]
    fn referenced_nodes(&self) -> Vec<NodeId> {
        match self {
            Self::MoveNode { source, target, .. } => vec![*source, *target],
            Self::RemoveNode { target } | Self::EditNode { target, .. } => vec![*target],
            Self::AppendRoot { node } => vec![node.id()],
        }
    }
}

/// Successful transactional operation result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOperationOutcome {
    pub operation_id: u64,
    pub kind: MenuOperationKind,
    pub touched_nodes: Vec<NodeId>,
    pub before_hash: u64,
    pub after_hash: u64,
}

impl MenuTree {
    /// Apply one structural operation atomically.
    ///
    /// The operation is executed on a cloned working tree. On success, the
    /// mutated clone replaces `self`; on failure, `self` is unchanged.
    pub fn apply_operation(
        &mut self,
        operation_id: u64,
        operation: MenuOperation,
    ) -> Result<MenuOperationOutcome, MenuOperationError> {
        let kind = operation.kind();
        let before_hash = self.state_hash();
        let mut working = self.clone();
        let mut touched = operation
            .referenced_nodes()
            .into_iter()
            .collect::<BTreeSet<_>>();

        let result = working
            .apply_operation_inner(operation, &mut touched)
            .and_then(|()| working.validate().map_err(MenuOperationFailure::Validation));

        if let Err(reason) = result {
            let error = MenuOperationError {
                operation_id,
                kind,
                touched_nodes: touched.into_iter().collect(),
                before_hash,
                after_hash: before_hash,
                reason,
            };
            #[cfg(feature = "tracing")]
            tracing::debug!(
                message = "navtree.op.rejected",
                operation_id,
                kind = ?error.kind,
                reason = %error.reason
            );
            return Err(error);
        }

        let after_hash = working.state_hash();
        *self = working;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "navtree.op.applied",
            operation_id,
            kind = ?kind,
            before_hash,
            after_hash
        );

        Ok(MenuOperationOutcome {
            operation_id,
            kind,
            touched_nodes: touched.into_iter().collect(),
            before_hash,
            after_hash,
        })
    }

    /// Relocate `dragged` relative to `target`.
    ///
    /// `dragged` is detached first, so it ends with exactly one containment
    /// edge; no other node changes position. Dropping a node onto itself or
    /// into its own subtree fails without touching the tree.
    pub fn apply_drop(
        &mut self,
        operation_id: u64,
        dragged: NodeId,
        target: NodeId,
        position: DropPosition,
    ) -> Result<MenuOperationOutcome, MenuOperationError> {
        self.apply_operation(
            operation_id,
            MenuOperation::MoveNode {
                source: dragged,
                target,
                position,
            },
        )
    }

    fn apply_operation_inner(
        &mut self,
        operation: MenuOperation,
        touched: &mut BTreeSet<NodeId>,
    ) -> Result<(), MenuOperationFailure> {
        match operation {
            MenuOperation::MoveNode {
                source,
                target,
                position,
            } => self.apply_move_node(source, target, position, touched),
            MenuOperation::RemoveNode { target } => self.apply_remove_node(target, touched),
            MenuOperation::EditNode { target, title, url } => {
                self.apply_edit_node(target, title, url)
            }
            MenuOperation::AppendRoot { node } => self.apply_append_root(node),
        }
    }

    fn apply_move_node(
        &mut self,
        source: NodeId,
        target: NodeId,
        position: DropPosition,
        touched: &mut BTreeSet<NodeId>,
    ) -> Result<(), MenuOperationFailure> {
        if source == target {
            return Err(MenuOperationFailure::SameNode { node_id: source });
        }
        if !self.contains(source) {
            return Err(MenuOperationFailure::MissingNode { node_id: source });
        }
        if !self.contains(target) {
            return Err(MenuOperationFailure::MissingNode { node_id: target });
        }
        if self.is_ancestor(source, target) {
            return Err(MenuOperationFailure::AncestorConflict {
                ancestor: source,
                descendant: target,
            });
        }

        let (old_location, moved) = self
            .detach(source)
            .ok_or(MenuOperationFailure::MissingNode { node_id: source })?;
        if let Some(parent) = old_location.parent {
            let _ = touched.insert(parent);
        }

        match position {
            DropPosition::Inside => {
                let container = self
                    .container_mut(Some(target))
                    .ok_or(MenuOperationFailure::MissingNode { node_id: target })?;
                container.push(moved);
            }
            DropPosition::Before | DropPosition::After => {
                // Re-locate: detaching may have shifted the target's index.
                let location = self
                    .find_parent(target)
                    .ok_or(MenuOperationFailure::MissingNode { node_id: target })?;
                if let Some(parent) = location.parent {
                    let _ = touched.insert(parent);
                }
                let index = match position {
                    DropPosition::Before => location.index,
                    _ => location.index + 1,
                };
                let container = self
                    .container_mut(location.parent)
                    .ok_or(MenuOperationFailure::MissingNode { node_id: target })?;
                container.insert(index, moved);
            }
        }
        Ok(())
    }

    fn apply_remove_node(
        &mut self,
        target: NodeId,
        touched: &mut BTreeSet<NodeId>,
    ) -> Result<(), MenuOperationFailure> {
        let (location, removed) = self
            .detach(target)
            .ok_or(MenuOperationFailure::MissingNode { node_id: target })?;
        if let Some(parent) = location.parent {
            let _ = touched.insert(parent);
        }
        touched.extend(subtree_ids(&removed));
        Ok(())
    }

    fn apply_edit_node(
        &mut self,
        target: NodeId,
        title: String,
        url: Option<String>,
    ) -> Result<(), MenuOperationFailure> {
        if title.trim().is_empty() {
            return Err(MenuOperationFailure::EmptyTitle { node_id: target });
        }
        let node = self
            .node_mut(target)
            .ok_or(MenuOperationFailure::MissingNode { node_id: target })?;
        node.set_title(title);
        if let Some(url) = url {
            node.set_url(url);
        }
        Ok(())
    }

    fn apply_append_root(&mut self, node: MenuNode) -> Result<(), MenuOperationFailure> {
        self.roots.push(node);
        // Duplicate IDs surface as a validation failure after this returns.
        self.reserve_existing_ids()
            .map_err(MenuOperationFailure::Validation)
    }
}

fn subtree_ids(node: &MenuNode) -> Vec<NodeId> {
    let mut out = vec![node.id()];
    for child in node.children() {
        out.extend(subtree_ids(child));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MenuModelError;
    use crate::node::MenuKind;

    fn id(raw: u64) -> NodeId {
        NodeId::new(raw).expect("test ids are non-zero")
    }

    fn page(raw: u64, title: &str) -> MenuNode {
        MenuNode::new(id(raw), title, format!("/{title}"), MenuKind::Page)
    }

    /// `[A(1), B(2)[C(3), D(4)], E(5)]`
    fn fixture() -> MenuTree {
        MenuTree::from_roots(vec![
            page(1, "A"),
            page(2, "B").child(page(3, "C")).child(page(4, "D")),
            page(5, "E"),
        ])
        .expect("fixture ids are unique")
    }

    fn titles(nodes: &[MenuNode]) -> Vec<&str> {
        nodes.iter().map(MenuNode::title).collect()
    }

    #[test]
    fn inside_appends_after_existing_children() {
        let mut tree = fixture();
        tree.apply_drop(1, id(1), id(2), DropPosition::Inside)
            .expect("valid move");
        assert_eq!(titles(tree.roots()), vec!["B", "E"]);
        let b = tree.node(id(2)).expect("B exists");
        assert_eq!(titles(b.children()), vec!["C", "D", "A"]);
    }

    #[test]
    fn before_places_immediately_preceding() {
        let mut tree = fixture();
        tree.apply_drop(1, id(5), id(4), DropPosition::Before)
            .expect("valid move");
        assert_eq!(titles(tree.roots()), vec!["A", "B"]);
        let b = tree.node(id(2)).expect("B exists");
        assert_eq!(titles(b.children()), vec!["C", "E", "D"]);
    }

    #[test]
    fn after_places_immediately_following() {
        let mut tree = fixture();
        tree.apply_drop(1, id(1), id(5), DropPosition::After)
            .expect("valid move");
        assert_eq!(titles(tree.roots()), vec!["B", "E", "A"]);
    }

    #[test]
    fn sibling_move_within_same_container_accounts_for_detach_shift() {
        let mut tree = fixture();
        // A is before B; detaching A shifts B's index from 1 to 0.
        tree.apply_drop(1, id(1), id(2), DropPosition::After)
            .expect("valid move");
        assert_eq!(titles(tree.roots()), vec!["B", "A", "E"]);
    }

    #[test]
    fn moving_a_child_out_to_root_level() {
        let mut tree = fixture();
        tree.apply_drop(1, id(3), id(1), DropPosition::Before)
            .expect("valid move");
        assert_eq!(titles(tree.roots()), vec!["C", "A", "B", "E"]);
        assert_eq!(titles(tree.node(id(2)).expect("B").children()), vec!["D"]);
    }

    #[test]
    fn dropping_into_own_descendant_is_rejected_and_tree_unchanged() {
        let mut tree = fixture();
        let before = tree.clone();
        let err = tree
            .apply_drop(7, id(2), id(4), DropPosition::Inside)
            .expect_err("cycle must be rejected");
        assert_eq!(
            err.reason,
            MenuOperationFailure::AncestorConflict {
                ancestor: id(2),
                descendant: id(4)
            }
        );
        assert_eq!(err.operation_id, 7);
        assert_eq!(err.before_hash, err.after_hash);
        assert_eq!(tree, before);
    }

    #[test]
    fn sibling_drop_next_to_own_descendant_is_rejected() {
        let mut tree = fixture();
        let before = tree.clone();
        for position in [DropPosition::Before, DropPosition::After] {
            let err = tree
                .apply_drop(1, id(2), id(3), position)
                .expect_err("descendant target must be rejected");
            assert!(matches!(
                err.reason,
                MenuOperationFailure::AncestorConflict { .. }
            ));
        }
        assert_eq!(tree, before);
    }

    #[test]
    fn dropping_onto_self_is_rejected() {
        let mut tree = fixture();
        let err = tree
            .apply_drop(1, id(3), id(3), DropPosition::Inside)
            .expect_err("self drop must be rejected");
        assert_eq!(err.reason, MenuOperationFailure::SameNode { node_id: id(3) });
    }

    #[test]
    fn missing_nodes_are_rejected() {
        let mut tree = fixture();
        let err = tree
            .apply_drop(1, id(40), id(1), DropPosition::After)
            .expect_err("missing source");
        assert_eq!(err.reason, MenuOperationFailure::MissingNode { node_id: id(40) });
        let err = tree
            .apply_drop(1, id(1), id(41), DropPosition::After)
            .expect_err("missing target");
        assert_eq!(err.reason, MenuOperationFailure::MissingNode { node_id: id(41) });
    }

    #[test]
    fn remove_discards_entire_subtree() {
        let mut tree = fixture();
        let outcome = tree
            .apply_operation(3, MenuOperation::RemoveNode { target: id(2) })
            .expect("remove");
        assert_eq!(titles(tree.roots()), vec!["A", "E"]);
        assert!(!tree.contains(id(3)));
        assert!(!tree.contains(id(4)));
        assert_eq!(outcome.touched_nodes, vec![id(2), id(3), id(4)]);
        assert_ne!(outcome.before_hash, outcome.after_hash);
    }

    #[test]
    fn edit_replaces_title_and_optional_url() {
        let mut tree = fixture();
        tree.apply_operation(
            1,
            MenuOperation::EditNode {
                target: id(3),
                title: "Contact".into(),
                url: None,
            },
        )
        .expect("edit title");
        let node = tree.node(id(3)).expect("C exists");
        assert_eq!(node.title(), "Contact");
        assert_eq!(node.url(), "/C");

        tree.apply_operation(
            2,
            MenuOperation::EditNode {
                target: id(3),
                title: "Contact".into(),
                url: Some("https://example.com/contact".into()),
            },
        )
        .expect("edit url");
        assert_eq!(
            tree.node(id(3)).map(MenuNode::url),
            Some("https://example.com/contact")
        );
    }

    #[test]
    fn edit_rejects_blank_title() {
        let mut tree = fixture();
        let err = tree
            .apply_operation(
                1,
                MenuOperation::EditNode {
                    target: id(1),
                    title: "   ".into(),
                    url: None,
                },
            )
            .expect_err("blank title");
        assert_eq!(err.reason, MenuOperationFailure::EmptyTitle { node_id: id(1) });
        assert_eq!(tree.node(id(1)).map(MenuNode::title), Some("A"));
    }

    #[test]
    fn append_root_reserves_ids_and_rejects_duplicates() {
        let mut tree = fixture();
        tree.apply_operation(
            1,
            MenuOperation::AppendRoot {
                node: page(10, "Late"),
            },
        )
        .expect("append");
        assert_eq!(tree.next_id(), id(11));
        assert_eq!(tree.roots().last().map(MenuNode::title), Some("Late"));

        let err = tree
            .apply_operation(
                2,
                MenuOperation::AppendRoot {
                    node: page(3, "Dup"),
                },
            )
            .expect_err("duplicate id");
        assert_eq!(
            err.reason,
            MenuOperationFailure::Validation(MenuModelError::DuplicateNodeId { node_id: id(3) })
        );
    }
}
