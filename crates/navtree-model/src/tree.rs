//! The authoritative menu tree.
//!
//! A [`MenuTree`] owns an ordered sequence of root nodes; every node owns its
//! ordered children exclusively. Parents are not stored: upward navigation
//! goes through [`MenuTree::find_parent`], which walks the containment
//! structure.

use std::collections::BTreeSet;

use crate::error::MenuModelError;
use crate::node::{MenuKind, MenuNode, NodeId, NodeIdAllocator};

/// Where a node sits in the containment structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeLocation {
    /// Owning node, or `None` for the top-level sequence.
    pub parent: Option<NodeId>,
    /// Index within the owning container.
    pub index: usize,
}

/// Hierarchical menu: an ordered root sequence plus the ID allocator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MenuTree {
    pub(crate) roots: Vec<MenuNode>,
    pub(crate) allocator: NodeIdAllocator,
}

impl MenuTree {
    /// Create an empty tree whose first allocated ID is 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from existing roots.
    ///
    /// IDs must be unique across the whole forest. The allocator continues
    /// from the largest existing ID plus one.
    pub fn from_roots(roots: Vec<MenuNode>) -> Result<Self, MenuModelError> {
        let mut seen = BTreeSet::new();
        for root in &roots {
            collect_unique_ids(root, &mut seen)?;
        }
        let next = match seen.last() {
            Some(max) => max.checked_next()?,
            None => NodeId::MIN,
        };
        Ok(Self {
            roots,
            allocator: NodeIdAllocator::with_next(next),
        })
    }

    /// Create a detached node with a fresh ID.
    ///
    /// `kind` defaults to [`MenuKind::Custom`]. The URL is stored verbatim;
    /// well-formedness is the input boundary's concern.
    pub fn create_node(
        &mut self,
        title: impl Into<String>,
        url: impl Into<String>,
        kind: Option<MenuKind>,
    ) -> Result<MenuNode, MenuModelError> {
        let id = self.allocator.allocate()?;
        Ok(MenuNode::new(id, title, url, kind.unwrap_or_default()))
    }

    /// The ID the next [`create_node`](Self::create_node) call will hand out.
    #[must_use]
    pub const fn next_id(&self) -> NodeId {
        self.allocator.peek()
    }

    /// Top-level nodes in order.
    #[must_use]
    pub fn roots(&self) -> &[MenuNode] {
        &self.roots
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total node count across all depths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.roots.iter().map(MenuNode::subtree_len).sum()
    }

    /// Look up a node by ID.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&MenuNode> {
        self.roots.iter().find_map(|root| root.find(id))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Option<&mut MenuNode> {
        self.roots.iter_mut().find_map(|root| root.find_mut(id))
    }

    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Locate the container and index holding `id`.
    #[must_use]
    pub fn find_parent(&self, id: NodeId) -> Option<NodeLocation> {
        if let Some(index) = self.roots.iter().position(|node| node.id() == id) {
            return Some(NodeLocation {
                parent: None,
                index,
            });
        }
        self.roots.iter().find_map(|root| locate_in(root, id))
    }

    /// Children of `parent`, or the root sequence for `None`.
    #[must_use]
    pub fn children_of(&self, parent: Option<NodeId>) -> Option<&[MenuNode]> {
        match parent {
            None => Some(&self.roots),
            Some(id) => self.node(id).map(MenuNode::children),
        }
    }

    pub(crate) fn container_mut(&mut self, parent: Option<NodeId>) -> Option<&mut Vec<MenuNode>> {
        match parent {
            None => Some(&mut self.roots),
            Some(id) => self.node_mut(id).map(|node| &mut node.children),
        }
    }

    /// Whether `ancestor` strictly contains `node` in its subtree.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        ancestor != node
            && self
                .node(ancestor)
                .is_some_and(|subtree| subtree.contains(node))
    }

    /// Depth of `id` (roots are depth 0).
    #[must_use]
    pub fn depth(&self, id: NodeId) -> Option<usize> {
        let mut depth = 0;
        let mut cursor = self.find_parent(id)?.parent;
        while let Some(parent) = cursor {
            depth += 1;
            cursor = self.find_parent(parent)?.parent;
        }
        Some(depth)
    }

    /// Remove `id` from its container and return it with its subtree.
    pub(crate) fn detach(&mut self, id: NodeId) -> Option<(NodeLocation, MenuNode)> {
        let location = self.find_parent(id)?;
        let container = self.container_mut(location.parent)?;
        if location.index >= container.len() {
            return None;
        }
        Some((location, container.remove(location.index)))
    }

    /// Pre-order traversal over every node.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            stack: self.roots.iter().rev().collect(),
        }
    }

    /// All IDs in pre-order.
    #[must_use]
    pub fn ids(&self) -> Vec<NodeId> {
        self.iter().map(MenuNode::id).collect()
    }

    /// Check ID uniqueness and allocator monotonicity.
    pub fn validate(&self) -> Result<(), MenuModelError> {
        let mut seen = BTreeSet::new();
        for root in &self.roots {
            collect_unique_ids(root, &mut seen)?;
        }
        if let Some(max_existing) = seen.last().copied()
            && self.allocator.peek() <= max_existing
        {
            return Err(MenuModelError::NextIdNotGreaterThanExisting {
                next_id: self.allocator.peek(),
                max_existing,
            });
        }
        Ok(())
    }

    /// Raise the allocator past every ID currently in the tree.
    pub(crate) fn reserve_existing_ids(&mut self) -> Result<(), MenuModelError> {
        let Some(max) = self.iter().map(MenuNode::id).max() else {
            return Ok(());
        };
        if self.allocator.peek() <= max {
            self.allocator = NodeIdAllocator::with_next(max.checked_next()?);
        }
        Ok(())
    }

    /// Deterministic FNV-1a hash over content and shape.
    ///
    /// Two trees hash equal iff they serialize identically (modulo hash
    /// collisions); the allocator position is excluded.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
        const PRIME: u64 = 0x0000_0001_0000_01b3;

        fn mix(hash: &mut u64, byte: u8) {
            *hash ^= u64::from(byte);
            *hash = hash.wrapping_mul(PRIME);
        }

        fn mix_bytes(hash: &mut u64, bytes: &[u8]) {
            for byte in bytes {
                mix(hash, *byte);
            }
        }

        fn mix_str(hash: &mut u64, value: &str) {
            mix_bytes(hash, &(value.len() as u64).to_le_bytes());
            mix_bytes(hash, value.as_bytes());
        }

        fn mix_node(hash: &mut u64, node: &MenuNode) {
            mix(hash, b'(');
            mix_bytes(hash, &node.id().get().to_le_bytes());
            mix_str(hash, node.title());
            mix_str(hash, node.url());
            mix_str(hash, node.kind().as_str());
            for child in node.children() {
                mix_node(hash, child);
            }
            mix(hash, b')');
        }

        let mut hash = OFFSET_BASIS;
        for root in &self.roots {
            mix_node(&mut hash, root);
        }
        hash
    }
}

/// Pre-order iterator returned by [`MenuTree::iter`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    stack: Vec<&'a MenuNode>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a MenuNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

fn locate_in(node: &MenuNode, id: NodeId) -> Option<NodeLocation> {
    if let Some(index) = node.children().iter().position(|child| child.id() == id) {
        return Some(NodeLocation {
            parent: Some(node.id()),
            index,
        });
    }
    node.children().iter().find_map(|child| locate_in(child, id))
}

fn collect_unique_ids(node: &MenuNode, seen: &mut BTreeSet<NodeId>) -> Result<(), MenuModelError> {
    if !seen.insert(node.id()) {
        return Err(MenuModelError::DuplicateNodeId { node_id: node.id() });
    }
    for child in node.children() {
        collect_unique_ids(child, seen)?;
    }
    Ok(())
}
