#![forbid(unsafe_code)]

//! Deterministic row layout of a rendered menu and pointer hit testing.
//!
//! Each visual node occupies a box spanning its header row, its open edit
//! form, and its (indented) children container. Child boxes therefore sit
//! inside their parent's box, which is what makes "deepest box containing
//! the pointer" the right hit-test rule.

use navtree_core::geometry::{Point, Rect};
use navtree_model::NodeId;

use crate::visual::VisualNode;

/// Row metrics for [`layout`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutConfig {
    /// Height of a node's header row.
    pub row_height: f64,
    /// Horizontal indent of a children container.
    pub indent: f64,
    /// Extra height while a node's edit form is open.
    pub edit_form_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            row_height: 40.0,
            indent: 24.0,
            edit_form_height: 120.0,
        }
    }
}

/// Laid-out box of one visible node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutEntry {
    pub node_id: NodeId,
    pub depth: usize,
    pub bounds: Rect,
}

/// Boxes for every visible node, in pre-order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MenuLayout {
    entries: Vec<LayoutEntry>,
    area: Rect,
}

impl MenuLayout {
    #[must_use]
    pub fn entries(&self) -> &[LayoutEntry] {
        &self.entries
    }

    /// Area covering all laid-out rows.
    #[must_use]
    pub const fn area(&self) -> Rect {
        self.area
    }

    #[must_use]
    pub fn bounds(&self, id: NodeId) -> Option<Rect> {
        self.entries
            .iter()
            .find(|entry| entry.node_id == id)
            .map(|entry| entry.bounds)
    }

    /// Deepest node whose box contains `point`.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<LayoutEntry> {
        // Pre-order puts descendants after ancestors and siblings never
        // overlap, so the last containing entry is the deepest one.
        self.entries
            .iter()
            .rev()
            .find(|entry| entry.bounds.contains(point))
            .copied()
    }
}

/// Lay out `nodes` top-down starting at `area`'s origin and width.
///
/// Only the horizontal extent of `area` constrains the result; the layout
/// grows downward as far as the content needs.
#[must_use]
pub fn layout(nodes: &[VisualNode], area: Rect, config: &LayoutConfig) -> MenuLayout {
    let mut entries = Vec::new();
    let bottom = layout_container(nodes, area.x, area.y, area.width, 0, config, &mut entries);
    MenuLayout {
        entries,
        area: Rect::new(area.x, area.y, area.width, bottom - area.y),
    }
}

fn layout_container(
    nodes: &[VisualNode],
    x: f64,
    mut y: f64,
    width: f64,
    depth: usize,
    config: &LayoutConfig,
    entries: &mut Vec<LayoutEntry>,
) -> f64 {
    for node in nodes {
        let index = entries.len();
        entries.push(LayoutEntry {
            node_id: node.node_id,
            depth,
            bounds: Rect::default(),
        });

        let top = y;
        y += config.row_height;
        if node.content.edit_form.visible {
            y += config.edit_form_height;
        }
        if !node.children.hidden {
            let child_width = (width - config.indent).max(0.0);
            y = layout_container(
                &node.children.nodes,
                x + config.indent,
                y,
                child_width,
                depth + 1,
                config,
                entries,
            );
        }

        entries[index].bounds = Rect::new(x, top, width, y - top);
    }
    y
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visual::{ViewState, render_tree};
    use navtree_model::{MenuKind, MenuNode, MenuTree};

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

    fn area() -> Rect {
        Rect::new(0.0, 0.0, 400.0, 0.0)
    }

    #[test]
    fn nested_boxes_span_their_children() {
        let visual = render_tree(&tree(), &ViewState::new());
        let layout = layout(&visual, area(), &LayoutConfig::default());
        assert_eq!(layout.bounds(id(1)), Some(Rect::new(0.0, 0.0, 400.0, 40.0)));
        assert_eq!(layout.bounds(id(2)), Some(Rect::new(0.0, 40.0, 400.0, 80.0)));
        assert_eq!(layout.bounds(id(3)), Some(Rect::new(24.0, 80.0, 376.0, 40.0)));
        assert_eq!(layout.area().height, 120.0);
    }

    #[test]
    fn hit_test_returns_deepest_node() {
        let visual = render_tree(&tree(), &ViewState::new());
        let layout = layout(&visual, area(), &LayoutConfig::default());
        let hit = |x, y| layout.hit_test(Point::new(x, y)).map(|entry| entry.node_id);
        assert_eq!(hit(100.0, 10.0), Some(id(1)));
        assert_eq!(hit(100.0, 50.0), Some(id(2)));
        assert_eq!(hit(100.0, 90.0), Some(id(3)));
        // Indent gutter of B's children container still belongs to B.
        assert_eq!(hit(10.0, 90.0), Some(id(2)));
        assert_eq!(hit(100.0, 500.0), None);
    }

    #[test]
    fn hidden_container_collapses_and_is_not_hit() {
        let view = ViewState {
            dragged: Some(id(2)),
            ..ViewState::default()
        };
        let visual = render_tree(&tree(), &view);
        let layout = layout(&visual, area(), &LayoutConfig::default());
        assert_eq!(layout.bounds(id(2)), Some(Rect::new(0.0, 40.0, 400.0, 40.0)));
        assert_eq!(layout.bounds(id(3)), None);
        assert_eq!(layout.entries().len(), 2);
    }

    #[test]
    fn open_edit_form_adds_height() {
        let model = tree();
        let mut view = ViewState::new();
        let a = model.node(id(1)).expect("A").clone();
        view.edit_form_mut(&a).open(&a);
        let visual = render_tree(&model, &view);
        let layout = layout(&visual, area(), &LayoutConfig::default());
        assert_eq!(layout.bounds(id(1)).map(|r| r.height), Some(160.0));
        assert_eq!(layout.bounds(id(2)).map(|r| r.y), Some(160.0));
    }
}
