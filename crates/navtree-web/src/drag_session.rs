#![forbid(unsafe_code)]

//! Deterministic drag session controller for menu reordering.
//!
//! The session tracks three fields (dragged node, live drop target, resolved
//! drop position) through four transitions:
//!
//! ```text
//!            start            hover*            drop
//!   Idle ----------> Active --------> Active ----------> Idle
//!     ^                 |                                 ^
//!     |                 |              end                |
//!     +-----------------+---------------------------------+
//! ```
//!
//! Every transition returns a [`DragDispatch`] carrying a structured
//! [`DragLogEntry`]. Invalid input (no session, unknown node, self or
//! descendant candidate) is reported as [`DragLogOutcome::Ignored`] instead
//! of an error; nothing here is fatal.
//!
//! # Invariants
//! 1. At most one session is active: `start` while dragging is ignored.
//! 2. `drop` always leaves the session idle, whether or not the tree changed.
//! 3. A candidate equal to the dragged node never becomes the drop target.
//! 4. A candidate inside the dragged subtree clears the drop target.

use navtree_core::geometry::{Point, Rect};
use navtree_model::{DropPosition, MenuOperationError, MenuOperationOutcome, MenuTree, NodeId};
use navtree_widgets::{DropZoneConfig, IndicatorTarget, resolve_drop_position};

/// Lifecycle phase recorded for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Start,
    Hover,
    Drop,
    End,
}

/// Why an incoming drag signal was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragIgnoredReason {
    /// `start` while another drag is in progress.
    SessionAlreadyActive,
    /// Signal arrived with no drag in progress.
    NoActiveSession,
    /// Node id is not in the tree.
    UnknownNode,
    /// Pointer is not over any node.
    NoCandidate,
    /// Pointer is over the dragged node itself.
    CandidateIsDragged,
    /// Pointer is over a descendant of the dragged node.
    CandidateInsideDragged,
    /// `drop` with no resolved target.
    NoDropTarget,
    /// The tree rejected the move; see [`DragDispatch::mutation`].
    MutationRejected,
}

/// Outcome category for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragLogOutcome {
    /// A session began.
    Started,
    /// A hover resolved a new target and position.
    Resolved,
    /// A drop relocated the dragged node.
    Applied,
    /// The session ended and visual residue was cleared.
    Cleared,
    Ignored(DragIgnoredReason),
}

/// Structured log record for one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragLogEntry {
    pub phase: DragPhase,
    /// Monotonic sequence for dispatches that changed session state.
    pub sequence: Option<u64>,
    pub dragged: Option<NodeId>,
    pub target: Option<NodeId>,
    pub position: Option<DropPosition>,
    pub outcome: DragLogOutcome,
}

/// Result of one drag signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragDispatch {
    /// Tree mutation attempted by a drop, if any.
    pub mutation: Option<Result<MenuOperationOutcome, MenuOperationError>>,
    pub log: DragLogEntry,
}

impl DragDispatch {
    fn ignored(
        phase: DragPhase,
        reason: DragIgnoredReason,
        dragged: Option<NodeId>,
        target: Option<NodeId>,
    ) -> Self {
        Self {
            mutation: None,
            log: DragLogEntry {
                phase,
                sequence: None,
                dragged,
                target,
                position: None,
                outcome: DragLogOutcome::Ignored(reason),
            },
        }
    }

    /// Whether the dispatch changed session or tree state.
    #[must_use]
    pub const fn is_ignored(&self) -> bool {
        matches!(self.log.outcome, DragLogOutcome::Ignored(_))
    }
}

/// Explicit drag session state, owned by one controller instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    dragged: Option<NodeId>,
    drop_target: Option<NodeId>,
    drop_position: DropPosition,
    next_sequence: u64,
}

impl Default for DragSession {
    fn default() -> Self {
        Self::new()
    }
}

impl DragSession {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            dragged: None,
            drop_target: None,
            drop_position: DropPosition::Before,
            next_sequence: 1,
        }
    }

    #[must_use]
    pub const fn dragged(&self) -> Option<NodeId> {
        self.dragged
    }

    #[must_use]
    pub const fn drop_target(&self) -> Option<NodeId> {
        self.drop_target
    }

    /// Last resolved position (`Before` until the first hover).
    #[must_use]
    pub const fn drop_position(&self) -> DropPosition {
        self.drop_position
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.dragged.is_some()
    }

    /// Live indicator, if a target is resolved.
    #[must_use]
    pub fn indicator(&self) -> Option<IndicatorTarget> {
        self.drop_target.map(|node_id| IndicatorTarget {
            node_id,
            position: self.drop_position,
        })
    }

    /// Begin dragging `node`.
    pub fn start(&mut self, tree: &MenuTree, node: NodeId) -> DragDispatch {
        if let Some(active) = self.dragged {
            return self.finish(DragDispatch::ignored(
                DragPhase::Start,
                DragIgnoredReason::SessionAlreadyActive,
                Some(active),
                Some(node),
            ));
        }
        if !tree.contains(node) {
            return self.finish(DragDispatch::ignored(
                DragPhase::Start,
                DragIgnoredReason::UnknownNode,
                Some(node),
                None,
            ));
        }

        self.dragged = Some(node);
        self.drop_target = None;
        self.drop_position = DropPosition::Before;
        let dispatch = self.transition(DragPhase::Start, DragLogOutcome::Started, None);
        self.finish(dispatch)
    }

    /// A start signal that landed on no node.
    pub fn start_missed(&self) -> DragDispatch {
        let reason = if self.dragged.is_some() {
            DragIgnoredReason::SessionAlreadyActive
        } else {
            DragIgnoredReason::NoCandidate
        };
        self.finish(DragDispatch::ignored(
            DragPhase::Start,
            reason,
            self.dragged,
            None,
        ))
    }

    /// Re-resolve the drop target from the pointer over `candidate`.
    ///
    /// `candidate` is the node under the pointer together with its box, or
    /// `None` when the pointer is over no node (the previous target stays).
    pub fn hover(
        &mut self,
        tree: &MenuTree,
        candidate: Option<(NodeId, Rect)>,
        pointer: Point,
        config: &DropZoneConfig,
    ) -> DragDispatch {
        let Some(dragged) = self.dragged else {
            return self.finish(DragDispatch::ignored(
                DragPhase::Hover,
                DragIgnoredReason::NoActiveSession,
                None,
                candidate.map(|(id, _)| id),
            ));
        };
        let Some((target, bounds)) = candidate else {
            return self.finish(DragDispatch::ignored(
                DragPhase::Hover,
                DragIgnoredReason::NoCandidate,
                Some(dragged),
                None,
            ));
        };
        if target == dragged {
            return self.finish(DragDispatch::ignored(
                DragPhase::Hover,
                DragIgnoredReason::CandidateIsDragged,
                Some(dragged),
                Some(target),
            ));
        }
        if !tree.contains(target) {
            return self.finish(DragDispatch::ignored(
                DragPhase::Hover,
                DragIgnoredReason::UnknownNode,
                Some(dragged),
                Some(target),
            ));
        }
        if tree.is_ancestor(dragged, target) {
            // Dropping here would nest the node under itself; drop the stale
            // target so a release now is a no-op.
            self.drop_target = None;
            return self.finish(DragDispatch::ignored(
                DragPhase::Hover,
                DragIgnoredReason::CandidateInsideDragged,
                Some(dragged),
                Some(target),
            ));
        }

        let position = resolve_drop_position(bounds, pointer, config);
        self.drop_target = Some(target);
        self.drop_position = position;
        let dispatch = self.transition(DragPhase::Hover, DragLogOutcome::Resolved, None);
        self.finish(dispatch)
    }

    /// Apply the resolved drop to `tree` and end the session.
    pub fn drop(&mut self, tree: &mut MenuTree, operation_id: u64) -> DragDispatch {
        let Some(dragged) = self.dragged else {
            return self.finish(DragDispatch::ignored(
                DragPhase::Drop,
                DragIgnoredReason::NoActiveSession,
                None,
                self.drop_target,
            ));
        };
        let Some(target) = self.drop_target else {
            self.reset();
            return self.finish(DragDispatch::ignored(
                DragPhase::Drop,
                DragIgnoredReason::NoDropTarget,
                Some(dragged),
                None,
            ));
        };

        let result = tree.apply_drop(operation_id, dragged, target, self.drop_position);
        let outcome = match result {
            Ok(_) => DragLogOutcome::Applied,
            Err(_) => DragLogOutcome::Ignored(DragIgnoredReason::MutationRejected),
        };
        let dispatch = self.transition(DragPhase::Drop, outcome, Some(result));
        self.reset();
        self.finish(dispatch)
    }

    /// End the session (drop completed elsewhere, or drag aborted).
    pub fn end(&mut self) -> DragDispatch {
        if self.dragged.is_none() {
            self.drop_target = None;
            return self.finish(DragDispatch::ignored(
                DragPhase::End,
                DragIgnoredReason::NoActiveSession,
                None,
                None,
            ));
        }
        let dispatch = self.transition(DragPhase::End, DragLogOutcome::Cleared, None);
        self.reset();
        self.finish(dispatch)
    }

    fn reset(&mut self) {
        self.dragged = None;
        self.drop_target = None;
    }

    fn transition(
        &mut self,
        phase: DragPhase,
        outcome: DragLogOutcome,
        mutation: Option<Result<MenuOperationOutcome, MenuOperationError>>,
    ) -> DragDispatch {
        let sequence = self.next_sequence;
        self.next_sequence = self.next_sequence.saturating_add(1);
        DragDispatch {
            mutation,
            log: DragLogEntry {
                phase,
                sequence: Some(sequence),
                dragged: self.dragged,
                target: self.drop_target,
                position: self.drop_target.map(|_| self.drop_position),
                outcome,
            },
        }
    }

    fn finish(&self, dispatch: DragDispatch) -> DragDispatch {
        emit_log(&dispatch);
        dispatch
    }
}

fn emit_log(dispatch: &DragDispatch) {
    let log = &dispatch.log;
    let dragged = log.dragged.map(NodeId::get);
    let target = log.target.map(NodeId::get);
    match (log.phase, log.outcome) {
        (_, DragLogOutcome::Ignored(reason)) => tracing::debug!(
            message = "navtree.drag.ignored",
            phase = ?log.phase,
            ?reason,
            ?dragged,
            ?target
        ),
        (DragPhase::Start, _) => tracing::debug!(message = "navtree.drag.start", ?dragged),
        (DragPhase::Hover, _) => tracing::trace!(
            message = "navtree.drag.hover",
            ?dragged,
            ?target,
            position = ?log.position
        ),
        (DragPhase::Drop, _) => tracing::debug!(
            message = "navtree.drag.drop",
            ?dragged,
            ?target,
            position = ?log.position
        ),
        (DragPhase::End, _) => tracing::debug!(message = "navtree.drag.end", ?dragged),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use navtree_model::{MenuKind, MenuNode, MenuOperationFailure};

    fn id(raw: u64) -> NodeId {
        NodeId::new(raw).expect("test ids are non-zero")
    }

    /// `[A(1), B(2)[C(3)]]`
    fn tree() -> MenuTree {
        MenuTree::from_roots(vec![
            MenuNode::new(id(1), "A", "/a", MenuKind::Page),
            MenuNode::new(id(2), "B", "/b", MenuKind::Page)
                .child(MenuNode::new(id(3), "C", "/c", MenuKind::Page)),
        ])
        .expect("unique")
    }

    fn row(top: f64) -> Rect {
        Rect::new(0.0, top, 300.0, 40.0)
    }

    #[test]
    fn initial_state_is_idle_with_before_position() {
        let session = DragSession::new();
        assert_eq!(session.dragged(), None);
        assert_eq!(session.drop_target(), None);
        assert_eq!(session.drop_position(), DropPosition::Before);
        assert_eq!(session.indicator(), None);
    }

    #[test]
    fn full_inside_drop_relocates_and_ends() {
        let mut model = tree();
        let mut session = DragSession::new();
        let config = DropZoneConfig::default();

        let start = session.start(&model, id(1));
        assert_eq!(start.log.outcome, DragLogOutcome::Started);
        assert_eq!(start.log.sequence, Some(1));

        let hover = session.hover(&model, Some((id(2), row(40.0))), Point::new(120.0, 60.0), &config);
        assert_eq!(hover.log.outcome, DragLogOutcome::Resolved);
        assert_eq!(hover.log.position, Some(DropPosition::Inside));
        assert_eq!(
            session.indicator(),
            Some(IndicatorTarget {
                node_id: id(2),
                position: DropPosition::Inside
            })
        );

        let drop = session.drop(&mut model, 7);
        assert_eq!(drop.log.outcome, DragLogOutcome::Applied);
        assert!(matches!(drop.mutation, Some(Ok(ref outcome)) if outcome.operation_id == 7));
        assert!(!session.is_active());
        assert_eq!(session.indicator(), None);

        let b = model.node(id(2)).expect("B");
        let children: Vec<NodeId> = b.children().iter().map(MenuNode::id).collect();
        assert_eq!(children, vec![id(3), id(1)]);
    }

    #[test]
    fn second_start_is_ignored() {
        let model = tree();
        let mut session = DragSession::new();
        let _ = session.start(&model, id(1));
        let again = session.start(&model, id(2));
        assert_eq!(
            again.log.outcome,
            DragLogOutcome::Ignored(DragIgnoredReason::SessionAlreadyActive)
        );
        assert_eq!(again.log.sequence, None);
        assert_eq!(session.dragged(), Some(id(1)));
    }

    #[test]
    fn hover_without_session_or_over_self_is_ignored() {
        let model = tree();
        let mut session = DragSession::new();
        let config = DropZoneConfig::default();
        let idle = session.hover(&model, Some((id(2), row(40.0))), Point::new(10.0, 45.0), &config);
        assert!(idle.is_ignored());

        let _ = session.start(&model, id(1));
        let _ = session.hover(&model, Some((id(2), row(40.0))), Point::new(10.0, 45.0), &config);
        let over_self = session.hover(&model, Some((id(1), row(0.0))), Point::new(10.0, 5.0), &config);
        assert_eq!(
            over_self.log.outcome,
            DragLogOutcome::Ignored(DragIgnoredReason::CandidateIsDragged)
        );
        // Previous target survives a self hover.
        assert_eq!(session.drop_target(), Some(id(2)));
        assert_eq!(session.drop_position(), DropPosition::Before);
    }

    #[test]
    fn descendant_candidate_clears_target_and_drop_is_noop() {
        let mut model = tree();
        let before = model.clone();
        let mut session = DragSession::new();
        let config = DropZoneConfig::default();

        let _ = session.start(&model, id(2));
        let _ = session.hover(&model, Some((id(1), row(0.0))), Point::new(10.0, 5.0), &config);
        assert_eq!(session.drop_target(), Some(id(1)));

        let nested = session.hover(&model, Some((id(3), row(80.0))), Point::new(120.0, 100.0), &config);
        assert_eq!(
            nested.log.outcome,
            DragLogOutcome::Ignored(DragIgnoredReason::CandidateInsideDragged)
        );
        assert_eq!(session.indicator(), None);

        let drop = session.drop(&mut model, 1);
        assert_eq!(
            drop.log.outcome,
            DragLogOutcome::Ignored(DragIgnoredReason::NoDropTarget)
        );
        assert!(!session.is_active());
        assert_eq!(model, before);
    }

    #[test]
    fn rejected_mutation_still_ends_session() {
        let mut model = tree();
        let mut session = DragSession::new();
        let config = DropZoneConfig::default();
        let _ = session.start(&model, id(1));
        let _ = session.hover(&model, Some((id(3), row(80.0))), Point::new(10.0, 85.0), &config);
        // Target vanished between hover and drop.
        model
            .apply_operation(1, navtree_model::MenuOperation::RemoveNode { target: id(3) })
            .expect("remove C");

        let drop = session.drop(&mut model, 2);
        assert_eq!(
            drop.log.outcome,
            DragLogOutcome::Ignored(DragIgnoredReason::MutationRejected)
        );
        let Some(Err(err)) = drop.mutation else {
            panic!("expected rejected mutation");
        };
        assert_eq!(err.reason, MenuOperationFailure::MissingNode { node_id: id(3) });
        assert!(!session.is_active());
    }

    #[test]
    fn end_clears_and_is_idempotent() {
        let model = tree();
        let mut session = DragSession::new();
        let _ = session.start(&model, id(1));
        let end = session.end();
        assert_eq!(end.log.outcome, DragLogOutcome::Cleared);
        assert!(!session.is_active());
        let again = session.end();
        assert_eq!(
            again.log.outcome,
            DragLogOutcome::Ignored(DragIgnoredReason::NoActiveSession)
        );
    }

    #[test]
    fn sequences_increase_only_for_state_changes() {
        let model = tree();
        let mut session = DragSession::new();
        let config = DropZoneConfig::default();
        let a = session.start(&model, id(1));
        let ignored = session.hover(&model, None, Point::new(0.0, 0.0), &config);
        let b = session.hover(&model, Some((id(2), row(40.0))), Point::new(10.0, 75.0), &config);
        let c = session.end();
        assert_eq!(a.log.sequence, Some(1));
        assert_eq!(ignored.log.sequence, None);
        assert_eq!(b.log.sequence, Some(2));
        assert_eq!(b.log.position, Some(DropPosition::After));
        assert_eq!(c.log.sequence, Some(3));
    }

    #[test]
    fn missed_start_reports_no_candidate() {
        let model = tree();
        let mut session = DragSession::new();
        let missed = session.start_missed();
        assert_eq!(
            missed.log.outcome,
            DragLogOutcome::Ignored(DragIgnoredReason::NoCandidate)
        );
        let _ = session.start(&model, id(1));
        assert_eq!(
            session.start_missed().log.outcome,
            DragLogOutcome::Ignored(DragIgnoredReason::SessionAlreadyActive)
        );
    }

    #[test]
    fn unknown_start_node_is_ignored() {
        let model = tree();
        let mut session = DragSession::new();
        let dispatch = session.start(&model, id(42));
        assert_eq!(
            dispatch.log.outcome,
            DragLogOutcome::Ignored(DragIgnoredReason::UnknownNode)
        );
        assert!(!session.is_active());
    }
}
