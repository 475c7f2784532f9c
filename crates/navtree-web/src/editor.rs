#![forbid(unsafe_code)]

//! Host-facing menu editor.
//!
//! [`MenuEditor`] owns the authoritative [`MenuTree`], the drag session,
//! transient view state, and the add/edit forms. A browser host forwards
//! drag signals and button clicks; after each call it re-renders with
//! [`MenuEditor::render`] and, on demand, saves through a [`MenuSink`].
//!
//! All structural changes go through transactional tree operations, so a
//! rejected action leaves the menu exactly as it was.

use std::fmt;

use navtree_core::clock::{Clock, SystemClock};
use navtree_core::event::{DragEvent, DragEventKind};
use navtree_core::geometry::{Point, Rect};
use navtree_model::{
    MenuModelError, MenuOperation, MenuOperationError, MenuOperationOutcome, MenuRecord, MenuTree,
    NodeId, RecordsJsonError, tree_from_json,
};
use navtree_widgets::{
    CustomLinkField, CustomLinkForm, MenuLayout, NewEntry, NodeAction, PageOption, PageSelection,
    ViewState, VisualNode, layout, render_tree,
};

use crate::config::EditorConfig;
use crate::drag_session::{DragDispatch, DragSession};
use crate::sink::{MenuSink, SinkError};

/// Default viewport used for layout until the host reports one.
const DEFAULT_VIEWPORT: Rect = Rect::new(0.0, 0.0, 640.0, 0.0);

/// Errors from editor actions that create or change entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// ID allocation failed.
    Model(MenuModelError),
    /// The tree rejected the operation.
    Operation(MenuOperationError),
}

impl fmt::Display for EditorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Model(err) => write!(f, "{err}"),
            Self::Operation(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for EditorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Model(err) => Some(err),
            Self::Operation(err) => Some(err),
        }
    }
}

impl From<MenuModelError> for EditorError {
    fn from(err: MenuModelError) -> Self {
        Self::Model(err)
    }
}

impl From<MenuOperationError> for EditorError {
    fn from(err: MenuOperationError) -> Self {
        Self::Operation(err)
    }
}

/// Interactive menu editor over one authoritative tree.
#[derive(Debug, Clone)]
pub struct MenuEditor<C: Clock = SystemClock> {
    tree: MenuTree,
    view: ViewState,
    session: DragSession,
    config: EditorConfig,
    pages: PageSelection,
    custom_link: CustomLinkForm,
    viewport: Rect,
    clock: C,
    next_operation_id: u64,
}

impl MenuEditor<SystemClock> {
    /// Editor over `tree` using wall-clock time for input feedback.
    #[must_use]
    pub fn new(tree: MenuTree) -> Self {
        Self::with_clock(tree, SystemClock::new())
    }

    /// Editor over an initial nested structure.
    pub fn from_records(records: Vec<MenuRecord>) -> Result<Self, MenuModelError> {
        Ok(Self::new(MenuTree::from_records(records)?))
    }

    /// Editor over an initial JSON structure.
    pub fn from_json(json: &str) -> Result<Self, RecordsJsonError> {
        Ok(Self::new(tree_from_json(json)?))
    }
}

impl<C: Clock> MenuEditor<C> {
    /// Editor with an explicit clock (deterministic tests, host timers).
    #[must_use]
    pub fn with_clock(tree: MenuTree, clock: C) -> Self {
        let config = EditorConfig::default();
        Self {
            tree,
            view: ViewState::new(),
            session: DragSession::new(),
            custom_link: CustomLinkForm::new(config.invalid_marker_timeout()),
            config,
            pages: PageSelection::default(),
            viewport: DEFAULT_VIEWPORT,
            clock,
            next_operation_id: 1,
        }
    }

    /// Replace the configuration. Pending custom-link input is kept.
    #[must_use]
    pub fn with_config(mut self, config: EditorConfig) -> Self {
        let mut custom_link = CustomLinkForm::new(config.invalid_marker_timeout());
        for field in [CustomLinkField::Text, CustomLinkField::Url] {
            let value = self.custom_link.field(field).value();
            if !value.is_empty() {
                custom_link.input(field, value);
            }
        }
        self.custom_link = custom_link;
        self.config = config;
        self
    }

    /// Set the selectable pages for "add from selection".
    #[must_use]
    pub fn with_pages(mut self, pages: Vec<PageOption>) -> Self {
        self.pages = PageSelection::new(pages);
        self
    }

    /// Origin and width of the menu container in viewport pixels.
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    #[must_use]
    pub const fn tree(&self) -> &MenuTree {
        &self.tree
    }

    #[must_use]
    pub const fn view(&self) -> &ViewState {
        &self.view
    }

    #[must_use]
    pub const fn session(&self) -> &DragSession {
        &self.session
    }

    #[must_use]
    pub const fn config(&self) -> &EditorConfig {
        &self.config
    }

    #[must_use]
    pub const fn pages(&self) -> &PageSelection {
        &self.pages
    }

    pub fn pages_mut(&mut self) -> &mut PageSelection {
        &mut self.pages
    }

    #[must_use]
    pub const fn custom_link(&self) -> &CustomLinkForm {
        &self.custom_link
    }

    #[must_use]
    pub const fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Project the current tree and view state.
    #[must_use]
    pub fn render(&self) -> Vec<VisualNode> {
        render_tree(&self.tree, &self.view)
    }

    /// Lay out the current projection inside the viewport.
    #[must_use]
    pub fn layout(&self) -> MenuLayout {
        layout(&self.render(), self.viewport, &self.config.layout)
    }

    // -----------------------------------------------------------------
    // Drag and drop
    // -----------------------------------------------------------------

    /// Dispatch one host drag signal, hit testing its pointer position.
    pub fn handle_drag_event(&mut self, event: DragEvent) -> DragDispatch {
        match event.kind {
            DragEventKind::Start => {
                let hit = self.layout().hit_test(event.position);
                match hit {
                    Some(entry) => self.start_drag(entry.node_id),
                    None => self.session.start_missed(),
                }
            }
            DragEventKind::Over => self.hover_at(event.position),
            DragEventKind::Drop => self.drop_drag(),
            DragEventKind::End => self.end_drag(),
        }
    }

    /// Begin dragging `node`.
    pub fn start_drag(&mut self, node: NodeId) -> DragDispatch {
        let dispatch = self.session.start(&self.tree, node);
        self.sync_view();
        dispatch
    }

    /// Hover with the pointer at `pointer`, resolving the candidate by layout.
    pub fn hover_at(&mut self, pointer: Point) -> DragDispatch {
        let candidate = self
            .layout()
            .hit_test(pointer)
            .map(|entry| (entry.node_id, entry.bounds));
        self.hover(candidate, pointer)
    }

    /// Hover over an explicit candidate box reported by the host.
    pub fn hover(&mut self, candidate: Option<(NodeId, Rect)>, pointer: Point) -> DragDispatch {
        let dispatch = self
            .session
            .hover(&self.tree, candidate, pointer, &self.config.drop_zone);
        self.sync_view();
        dispatch
    }

    /// Apply the resolved drop and end the session.
    pub fn drop_drag(&mut self) -> DragDispatch {
        let operation_id = self.next_operation_id();
        let dispatch = self.session.drop(&mut self.tree, operation_id);
        self.sync_view();
        dispatch
    }

    /// End the drag session, clearing indicators and hidden containers.
    pub fn end_drag(&mut self) -> DragDispatch {
        let dispatch = self.session.end();
        self.sync_view();
        dispatch
    }

    // -----------------------------------------------------------------
    // Per-node actions
    // -----------------------------------------------------------------

    /// Handle an Edit/Cancel/Save/Remove click on `node`.
    ///
    /// Returns the applied operation for Save and Remove. Edit, Cancel, a
    /// Save with a blank title, and any action on an unknown node change no
    /// tree state and return `Ok(None)`.
    pub fn node_action(
        &mut self,
        node: NodeId,
        action: NodeAction,
    ) -> Result<Option<MenuOperationOutcome>, MenuOperationError> {
        match action {
            NodeAction::Edit => {
                if let Some(current) = self.tree.node(node) {
                    self.view.edit_form_mut(current).open(current);
                }
                Ok(None)
            }
            NodeAction::CancelEdit => {
                if let Some(current) = self.tree.node(node) {
                    self.view.edit_form_mut(current).cancel(current);
                }
                Ok(None)
            }
            NodeAction::SaveEdit => {
                let Some(form) = self
                    .view
                    .edit_forms
                    .get_mut(&node)
                    .filter(|form| form.is_open())
                else {
                    return Ok(None);
                };
                let Some(commit) = form.save() else {
                    return Ok(None);
                };
                let operation_id = self.next_operation_id();
                self.tree
                    .apply_operation(operation_id, commit.into_operation(node))
                    .map(Some)
            }
            NodeAction::Remove => {
                let operation_id = self.next_operation_id();
                let outcome = self
                    .tree
                    .apply_operation(operation_id, MenuOperation::RemoveNode { target: node })?;
                if self
                    .session
                    .dragged()
                    .is_some_and(|dragged| !self.tree.contains(dragged))
                {
                    let _ = self.session.end();
                }
                self.view.retain_existing(&self.tree);
                self.sync_view();
                Ok(Some(outcome))
            }
        }
    }

    /// Update the title draft of an open edit form.
    pub fn set_title_draft(&mut self, node: NodeId, title: impl Into<String>) {
        if let Some(form) = self.view.edit_forms.get_mut(&node) {
            form.set_title_draft(title);
        }
    }

    /// Update the URL draft of an open edit form (custom entries only).
    pub fn set_url_draft(&mut self, node: NodeId, url: impl Into<String>) {
        if let Some(form) = self.view.edit_forms.get_mut(&node) {
            form.set_url_draft(url);
        }
    }

    // -----------------------------------------------------------------
    // Adding entries
    // -----------------------------------------------------------------

    /// Append every checked page as a root entry, in option order.
    pub fn add_selected_pages(&mut self) -> Result<Vec<NodeId>, EditorError> {
        let entries = self.pages.take_checked();
        let mut added = Vec::with_capacity(entries.len());
        for entry in entries {
            added.push(self.append_entry(entry)?);
        }
        Ok(added)
    }

    /// Type into a custom-link field; clears its invalid marker.
    pub fn custom_link_input(&mut self, field: CustomLinkField, value: impl Into<String>) {
        self.custom_link.input(field, value);
    }

    /// Append a custom link from the form, or flag its empty fields.
    ///
    /// Returns `Ok(None)` when the input was rejected; the tree is unchanged
    /// and the empty fields are marked invalid until [`tick`](Self::tick)
    /// passes the configured timeout.
    pub fn add_custom_link(&mut self) -> Result<Option<NodeId>, EditorError> {
        let now = self.clock.now_mono();
        match self.custom_link.submit(now) {
            Ok(entry) => self.append_entry(entry).map(Some),
            Err(_rejection) => Ok(None),
        }
    }

    /// Expire invalid markers whose timeout has elapsed.
    pub fn tick(&mut self) -> bool {
        let now = self.clock.now_mono();
        self.custom_link.tick(now)
    }

    fn append_entry(&mut self, entry: NewEntry) -> Result<NodeId, EditorError> {
        let mut working = self.tree.clone();
        let node = working.create_node(entry.title, entry.url, Some(entry.kind))?;
        let id = node.id();
        let operation_id = self.next_operation_id();
        working.apply_operation(operation_id, MenuOperation::AppendRoot { node })?;
        self.tree = working;
        Ok(id)
    }

    // -----------------------------------------------------------------
    // Save
    // -----------------------------------------------------------------

    /// Serialized structure of the authoritative tree.
    #[must_use]
    pub fn structure(&self) -> Vec<MenuRecord> {
        self.tree.to_records()
    }

    /// Hand the current structure to `sink`.
    pub fn save(&self, sink: &mut dyn MenuSink) -> Result<(), SinkError> {
        let records = self.structure();
        tracing::info!(
            message = "navtree.save",
            roots = records.len(),
            nodes = self.tree.len(),
            state_hash = self.tree.state_hash()
        );
        sink.save(&records)
    }

    fn next_operation_id(&mut self) -> u64 {
        let id = self.next_operation_id;
        self.next_operation_id = self.next_operation_id.saturating_add(1);
        id
    }

    fn sync_view(&mut self) {
        self.view.dragged = self.session.dragged();
        self.view.indicator = self.session.indicator();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use navtree_core::clock::DeterministicClock;
    use navtree_model::{DropPosition, MenuKind, MenuNode};
    use navtree_widgets::IndicatorTarget;
    use std::time::Duration;

    fn id(raw: u64) -> NodeId {
        NodeId::new(raw).expect("test ids are non-zero")
    }

    /// `[A(1), B(2)[C(3)]]`
    fn editor() -> MenuEditor<DeterministicClock> {
        let tree = MenuTree::from_roots(vec![
            MenuNode::new(id(1), "A", "/a", MenuKind::Page),
            MenuNode::new(id(2), "B", "https://example.com/b", MenuKind::Custom)
                .child(MenuNode::new(id(3), "C", "/c", MenuKind::Page)),
        ])
        .expect("unique");
        MenuEditor::with_clock(tree, DeterministicClock::new())
    }

    #[test]
    fn pointer_drag_nests_inside() {
        let mut editor = editor();
        // Rows: A [0,40), B header [40,80), C [80,120).
        let start = editor.handle_drag_event(DragEvent::start(100.0, 20.0));
        assert!(!start.is_ignored());
        assert_eq!(editor.view().dragged, Some(id(1)));

        let hover = editor.handle_drag_event(DragEvent::over(200.0, 60.0));
        assert!(!hover.is_ignored());
        assert_eq!(
            editor.view().indicator,
            Some(IndicatorTarget {
                node_id: id(2),
                position: DropPosition::Inside
            })
        );

        let drop = editor.handle_drag_event(DragEvent::drop_at(200.0, 60.0));
        assert!(matches!(drop.mutation, Some(Ok(_))));
        let end = editor.handle_drag_event(DragEvent::end());
        assert!(end.is_ignored(), "drop already ended the session");

        let b = editor.tree().node(id(2)).expect("B");
        let children: Vec<NodeId> = b.children().iter().map(MenuNode::id).collect();
        assert_eq!(children, vec![id(3), id(1)]);
        assert_eq!(editor.view().indicator, None);
        assert_eq!(editor.view().dragged, None);
    }

    #[test]
    fn start_outside_any_row_is_ignored() {
        let mut editor = editor();
        let dispatch = editor.handle_drag_event(DragEvent::start(10.0, 900.0));
        assert!(dispatch.is_ignored());
        assert!(!editor.session().is_active());
    }

    #[test]
    fn edit_save_updates_title_and_url() {
        let mut editor = editor();
        editor.node_action(id(2), NodeAction::Edit).expect("edit opens");
        assert!(editor.render()[1].content.edit_form.visible);
        editor.set_title_draft(id(2), "  Blog ");
        editor.set_url_draft(id(2), "https://example.com/blog ");
        let outcome = editor
            .node_action(id(2), NodeAction::SaveEdit)
            .expect("valid edit");
        assert!(outcome.is_some());

        let node = editor.tree().node(id(2)).expect("B");
        assert_eq!(node.title(), "Blog");
        assert_eq!(node.url(), "https://example.com/blog");
        let visual = editor.render();
        assert_eq!(visual[1].content.short_path, "/blog");
        assert!(!visual[1].content.edit_form.visible);
    }

    #[test]
    fn blank_title_save_is_ignored() {
        let mut editor = editor();
        editor.node_action(id(1), NodeAction::Edit).expect("edit opens");
        editor.set_title_draft(id(1), "   ");
        let outcome = editor
            .node_action(id(1), NodeAction::SaveEdit)
            .expect("no-op");
        assert_eq!(outcome, None);
        assert_eq!(editor.tree().node(id(1)).map(MenuNode::title), Some("A"));
        assert!(editor.render()[0].content.edit_form.visible);
    }

    #[test]
    fn removing_dragged_node_ends_session() {
        let mut editor = editor();
        editor.start_drag(id(3));
        editor
            .node_action(id(2), NodeAction::Remove)
            .expect("remove B");
        assert!(!editor.session().is_active());
        assert_eq!(editor.view().dragged, None);
        assert_eq!(editor.tree().len(), 1);
    }

    #[test]
    fn custom_link_rejection_flags_and_expires() {
        let mut editor = editor();
        editor.custom_link_input(CustomLinkField::Url, "https://docs.rs");
        let before = editor.tree().clone();
        assert_eq!(editor.add_custom_link(), Ok(None));
        assert_eq!(editor.tree(), &before);
        assert!(editor.custom_link().is_invalid(CustomLinkField::Text));

        editor.clock_mut().advance(Duration::from_millis(1999));
        assert!(!editor.tick());
        editor.clock_mut().advance(Duration::from_millis(1));
        assert!(editor.tick());
        assert!(!editor.custom_link().is_invalid(CustomLinkField::Text));
    }

    #[test]
    fn add_custom_link_appends_custom_root_with_next_id() {
        let mut editor = editor();
        editor.custom_link_input(CustomLinkField::Text, "Docs");
        editor.custom_link_input(CustomLinkField::Url, "https://docs.rs");
        let added = editor.add_custom_link().expect("append");
        assert_eq!(added, Some(id(4)));
        let node = editor.tree().roots().last().expect("appended");
        assert_eq!(node.kind(), &MenuKind::Custom);
        assert_eq!(editor.custom_link().field(CustomLinkField::Text).value(), "");
    }

    #[test]
    fn with_config_applies_marker_timeout() {
        let config = EditorConfig {
            invalid_marker_timeout_ms: 10,
            ..EditorConfig::default()
        };
        let mut editor = editor().with_config(config);
        assert_eq!(editor.add_custom_link(), Ok(None));
        editor.clock_mut().advance(Duration::from_millis(10));
        assert!(editor.tick());
    }
}
