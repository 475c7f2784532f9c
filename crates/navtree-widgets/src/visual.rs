#![forbid(unsafe_code)]

//! Pure projection of the menu tree into interactive visual nodes.
//!
//! [`render`] reads a [`MenuNode`] plus transient [`ViewState`] (drag
//! session residue, open edit forms) and builds a [`VisualNode`] tree. The
//! projection owns no data: hosts re-render after every change and never
//! read fields back from it into the model.
//!
//! # Invariants
//! 1. Every visual node has a children container, even when it has no
//!    children, so it is always a valid `Inside` drop target.
//! 2. At most one drop indicator is shown across a rendered tree.
//! 3. Only the dragged node's children container is hidden.

use std::collections::BTreeMap;

use navtree_model::{DropPosition, MenuKind, MenuNode, MenuTree, NodeId};

use crate::edit::{EditForm, NodeAction};
use crate::short_path::short_path;

/// The live drop candidate highlighted during a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorTarget {
    pub node_id: NodeId,
    pub position: DropPosition,
}

/// Transient presentation state layered over the model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Node being dragged, if a drag session is active.
    pub dragged: Option<NodeId>,
    /// Single live indicator, if any.
    pub indicator: Option<IndicatorTarget>,
    /// Edit forms by node; absent entries render as a closed form.
    pub edit_forms: BTreeMap<NodeId, EditForm>,
}

impl ViewState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Edit form for `node`, created closed on first access.
    pub fn edit_form_mut(&mut self, node: &MenuNode) -> &mut EditForm {
        self.edit_forms
            .entry(node.id())
            .or_insert_with(|| EditForm::for_node(node))
    }

    /// Drop forms for nodes no longer present in `tree`.
    pub fn retain_existing(&mut self, tree: &MenuTree) {
        self.edit_forms.retain(|id, _| tree.contains(*id));
        if self.dragged.is_some_and(|id| !tree.contains(id)) {
            self.dragged = None;
        }
        if self
            .indicator
            .is_some_and(|indicator| !tree.contains(indicator.node_id))
        {
            self.indicator = None;
        }
    }
}

/// Drop-indicator slot of one visual node.
///
/// When shown, both `shown` and `drop_inside` are set regardless of the
/// resolved position; `position` carries the resolution for hosts that
/// want to draw Before/After/Inside differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DropIndicator {
    pub shown: bool,
    pub drop_inside: bool,
    pub position: Option<DropPosition>,
}

impl DropIndicator {
    pub const HIDDEN: Self = Self {
        shown: false,
        drop_inside: false,
        position: None,
    };

    #[must_use]
    pub const fn showing(position: DropPosition) -> Self {
        Self {
            shown: true,
            drop_inside: true,
            position: Some(position),
        }
    }
}

/// Rendered edit form: visibility plus the draft field values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditFormView {
    pub visible: bool,
    pub title_value: String,
    /// Present only for custom entries.
    pub url_value: Option<String>,
}

/// Content region: title, derived short path, and actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeContent {
    pub title: String,
    /// Display-only path derived from `full_url`.
    pub short_path: String,
    pub full_url: String,
    pub edit_form: EditFormView,
    pub actions: [NodeAction; 4],
}

/// Nested container for child visual nodes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChildrenContainer {
    /// Collapsed for the duration of a drag of the owning node.
    pub hidden: bool,
    pub nodes: Vec<VisualNode>,
}

/// Interactive projection of one menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualNode {
    pub node_id: NodeId,
    pub kind: MenuKind,
    pub dragging: bool,
    pub indicator: DropIndicator,
    pub content: NodeContent,
    pub children: ChildrenContainer,
}

impl VisualNode {
    /// Find a visual node by id within this subtree.
    #[must_use]
    pub fn find(&self, id: NodeId) -> Option<&VisualNode> {
        if self.node_id == id {
            return Some(self);
        }
        self.children.nodes.iter().find_map(|child| child.find(id))
    }

    /// Number of shown indicators in this subtree.
    #[must_use]
    pub fn shown_indicator_count(&self) -> usize {
        usize::from(self.indicator.shown)
            + self
                .children
                .nodes
                .iter()
                .map(VisualNode::shown_indicator_count)
                .sum::<usize>()
    }
}

const ACTIONS: [NodeAction; 4] = [
    NodeAction::Edit,
    NodeAction::CancelEdit,
    NodeAction::SaveEdit,
    NodeAction::Remove,
];

/// Project one node and its subtree.
#[must_use]
pub fn render(node: &MenuNode, view: &ViewState) -> VisualNode {
    let dragging = view.dragged == Some(node.id());
    let indicator = match view.indicator {
        Some(target) if target.node_id == node.id() => DropIndicator::showing(target.position),
        _ => DropIndicator::HIDDEN,
    };
    let edit_form = match view.edit_forms.get(&node.id()) {
        Some(form) => EditFormView {
            visible: form.is_open(),
            title_value: form.title_draft().to_owned(),
            url_value: form.url_draft().map(str::to_owned),
        },
        None => EditFormView {
            visible: false,
            title_value: node.title().to_owned(),
            url_value: node.kind().is_custom().then(|| node.url().to_owned()),
        },
    };

    VisualNode {
        node_id: node.id(),
        kind: node.kind().clone(),
        dragging,
        indicator,
        content: NodeContent {
            title: node.title().to_owned(),
            short_path: short_path(node.url()).into_owned(),
            full_url: node.url().to_owned(),
            edit_form,
            actions: ACTIONS,
        },
        children: ChildrenContainer {
            hidden: dragging,
            nodes: node
                .children()
                .iter()
                .map(|child| render(child, view))
                .collect(),
        },
    }
}

/// Project the whole root sequence.
#[must_use]
pub fn render_tree(tree: &MenuTree, view: &ViewState) -> Vec<VisualNode> {
    tree.roots().iter().map(|root| render(root, view)).collect()
}
