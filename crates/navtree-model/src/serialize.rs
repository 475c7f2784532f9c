//! Structure serializer: authoritative tree <-> plain nested records.
//!
//! The record shape is the external wire format handed to save sinks and
//! accepted for the initial menu:
//!
//! ```json
//! [
//!   { "id": 2, "title": "About", "url": "/about", "type": "page",
//!     "children": [ { "id": 3, "title": "Team", "url": "/team", "type": "page" } ] }
//! ]
//! ```
//!
//! `children` is omitted for leaves. `type` may be omitted on input and
//! defaults to `custom`.

use serde::{Deserialize, Serialize};

use crate::error::MenuModelError;
use crate::node::{MenuKind, MenuNode, NodeId};
use crate::tree::MenuTree;

/// One serialized menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuRecord {
    pub id: NodeId,
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(rename = "type", default)]
    pub kind: MenuKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuRecord>,
}

/// Serialize a container's nodes in order, recursively.
#[must_use]
pub fn serialize(nodes: &[MenuNode]) -> Vec<MenuRecord> {
    nodes.iter().map(MenuRecord::from).collect()
}

impl From<&MenuNode> for MenuRecord {
    fn from(node: &MenuNode) -> Self {
        Self {
            id: node.id(),
            title: node.title().to_owned(),
            url: node.url().to_owned(),
            kind: node.kind().clone(),
            children: serialize(node.children()),
        }
    }
}

impl From<MenuRecord> for MenuNode {
    fn from(record: MenuRecord) -> Self {
        MenuNode::new(record.id, record.title, record.url, record.kind)
            .with_children(record.children.into_iter().map(MenuNode::from).collect())
    }
}

impl MenuTree {
    /// Serialize the whole tree from the root container.
    #[must_use]
    pub fn to_records(&self) -> Vec<MenuRecord> {
        serialize(self.roots())
    }

    /// Serialize the children of one node (empty if `parent` is unknown).
    #[must_use]
    pub fn records_under(&self, parent: NodeId) -> Vec<MenuRecord> {
        self.node(parent)
            .map(|node| serialize(node.children()))
            .unwrap_or_default()
    }

    /// Rebuild a tree from records; IDs must be unique.
    pub fn from_records(records: Vec<MenuRecord>) -> Result<Self, MenuModelError> {
        Self::from_roots(records.into_iter().map(MenuNode::from).collect())
    }
}

/// Errors for the JSON convenience layer.
#[derive(Debug)]
pub enum RecordsJsonError {
    Json(serde_json::Error),
    Model(MenuModelError),
}

impl std::fmt::Display for RecordsJsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "menu json: {err}"),
            Self::Model(err) => write!(f, "menu structure: {err}"),
        }
    }
}

impl std::error::Error for RecordsJsonError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::Model(err) => Some(err),
        }
    }
}

/// Render records as two-space indented JSON.
pub fn to_json_pretty(records: &[MenuRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(records)
}

/// Parse a JSON array of records into a validated tree.
pub fn tree_from_json(json: &str) -> Result<MenuTree, RecordsJsonError> {
    let records: Vec<MenuRecord> = serde_json::from_str(json).map_err(RecordsJsonError::Json)?;
    MenuTree::from_records(records).map_err(RecordsJsonError::Model)
}
