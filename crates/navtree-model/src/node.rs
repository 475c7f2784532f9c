//! Menu entry identity, kinds, and the owned node type.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::MenuModelError;

/// Stable identifier for menu nodes.
///
/// `0` is reserved/invalid so IDs are always non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct NodeId(u64);

impl NodeId {
    /// Lowest valid node ID.
    pub const MIN: Self = Self(1);

    /// Create a new node ID, rejecting 0.
    pub fn new(raw: u64) -> Result<Self, MenuModelError> {
        if raw == 0 {
            return Err(MenuModelError::ZeroNodeId);
        }
        Ok(Self(raw))
    }

    /// Get the raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Return the next ID, or an error on overflow.
    pub fn checked_next(self) -> Result<Self, MenuModelError> {
        let Some(next) = self.0.checked_add(1) else {
            return Err(MenuModelError::NodeIdOverflow { current: self });
        };
        Self::new(next)
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u64> for NodeId {
    type Error = MenuModelError;

    fn try_from(raw: u64) -> Result<Self, Self::Error> {
        Self::new(raw)
    }
}

impl From<NodeId> for u64 {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

/// Monotonic allocator for node IDs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeIdAllocator {
    next: NodeId,
}

impl NodeIdAllocator {
    /// Start allocating from a known ID.
    #[must_use]
    pub const fn with_next(next: NodeId) -> Self {
        Self { next }
    }

    /// Peek at the next ID without consuming.
    #[must_use]
    pub const fn peek(&self) -> NodeId {
        self.next
    }

    /// Allocate the next ID and advance.
    pub fn allocate(&mut self) -> Result<NodeId, MenuModelError> {
        let current = self.next;
        self.next = self.next.checked_next()?;
        Ok(current)
    }
}

impl Default for NodeIdAllocator {
    fn default() -> Self {
        Self { next: NodeId::MIN }
    }
}

/// What a menu entry links to.
///
/// Only [`MenuKind::Custom`] entries carry a user-editable URL; page-like
/// kinds get theirs derived from the page title when added.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MenuKind {
    #[default]
    Custom,
    Page,
    /// Any other page-like kind reported by the page picker (e.g. `post`).
    Other(String),
}

impl MenuKind {
    /// Wire name of this kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Custom => "custom",
            Self::Page => "page",
            Self::Other(name) => name,
        }
    }

    /// Whether the URL of this kind is user-editable.
    #[must_use]
    pub const fn is_custom(&self) -> bool {
        matches!(self, Self::Custom)
    }

    /// Parse a kind name; empty names fall back to `custom`.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        let name = name.trim();
        if name.is_empty() || name.eq_ignore_ascii_case("custom") {
            Self::Custom
        } else if name.eq_ignore_ascii_case("page") {
            Self::Page
        } else {
            Self::Other(name.to_ascii_lowercase())
        }
    }
}

impl From<String> for MenuKind {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

impl From<&str> for MenuKind {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

impl From<MenuKind> for String {
    fn from(kind: MenuKind) -> Self {
        kind.as_str().to_owned()
    }
}

impl fmt::Display for MenuKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One menu entry and the subtree it exclusively owns.
///
/// `id` and `kind` never change after creation; `title` and `url` change
/// only through edit operations on the owning [`MenuTree`](crate::MenuTree).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuNode {
    id: NodeId,
    title: String,
    url: String,
    kind: MenuKind,
    /// Ordered children (crate-visible for tree operations).
    pub(crate) children: Vec<MenuNode>,
}

impl MenuNode {
    /// Create a childless node with an explicit ID.
    ///
    /// Use [`MenuTree::create_node`](crate::MenuTree::create_node) to get a
    /// fresh ID from the tree's allocator.
    #[must_use]
    pub fn new(id: NodeId, title: impl Into<String>, url: impl Into<String>, kind: MenuKind) -> Self {
        Self {
            id,
            title: title.into(),
            url: url.into(),
            kind,
            children: Vec::new(),
        }
    }

    /// Add a child node.
    #[must_use]
    pub fn child(mut self, node: MenuNode) -> Self {
        self.children.push(node);
        self
    }

    /// Set children from a vec.
    #[must_use]
    pub fn with_children(mut self, nodes: Vec<MenuNode>) -> Self {
        self.children = nodes;
        self
    }

    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn kind(&self) -> &MenuKind {
        &self.kind
    }

    /// Get the children.
    #[must_use]
    pub fn children(&self) -> &[MenuNode] {
        &self.children
    }

    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub(crate) fn set_title(&mut self, title: String) {
        self.title = title;
    }

    pub(crate) fn set_url(&mut self, url: String) {
        self.url = url;
    }

    /// Count this node and all descendants.
    #[must_use]
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(MenuNode::subtree_len)
            .sum::<usize>()
    }

    /// Whether `id` names this node or one of its descendants.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.id == id || self.children.iter().any(|child| child.contains(id))
    }

    /// Find a node by ID within this subtree.
    #[must_use]
    pub fn find(&self, id: NodeId) -> Option<&MenuNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    pub(crate) fn find_mut(&mut self, id: NodeId) -> Option<&mut MenuNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }
}
