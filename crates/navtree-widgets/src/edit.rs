#![forbid(unsafe_code)]

//! Inline edit form for one menu entry.
//!
//! The form holds draft strings only. Committing produces an [`EditCommit`]
//! which the owner turns into a [`MenuOperation::EditNode`]; the form never
//! touches the tree itself.

use navtree_model::{MenuNode, MenuOperation, NodeId};

/// Per-node action buttons exposed by the projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeAction {
    /// Open the edit form, seeding drafts from the current values.
    Edit,
    /// Close the form and discard drafts.
    CancelEdit,
    /// Commit drafts (ignored when the trimmed title is empty).
    SaveEdit,
    /// Remove the entry and its whole subtree.
    Remove,
}

/// Validated edit ready to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditCommit {
    pub title: String,
    /// Replacement URL; `None` keeps the stored URL (non-custom entries).
    pub url: Option<String>,
}

impl EditCommit {
    /// Tree operation applying this edit to `target`.
    #[must_use]
    pub fn into_operation(self, target: NodeId) -> MenuOperation {
        MenuOperation::EditNode {
            target,
            title: self.title,
            url: self.url,
        }
    }
}

/// Draft state of an entry's edit form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditForm {
    open: bool,
    title_draft: String,
    /// Present only for custom entries; page-like URLs are not editable.
    url_draft: Option<String>,
}

impl EditForm {
    /// Closed form with drafts matching `node`.
    #[must_use]
    pub fn for_node(node: &MenuNode) -> Self {
        let mut form = Self::default();
        form.reset(node);
        form
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn title_draft(&self) -> &str {
        &self.title_draft
    }

    #[must_use]
    pub fn url_draft(&self) -> Option<&str> {
        self.url_draft.as_deref()
    }

    pub fn set_title_draft(&mut self, title: impl Into<String>) {
        self.title_draft = title.into();
    }

    /// Update the URL draft; ignored when the entry has no URL field.
    pub fn set_url_draft(&mut self, url: impl Into<String>) {
        if let Some(draft) = self.url_draft.as_mut() {
            *draft = url.into();
        }
    }

    pub fn open(&mut self, node: &MenuNode) {
        self.reset(node);
        self.open = true;
    }

    pub fn cancel(&mut self, node: &MenuNode) {
        self.reset(node);
        self.open = false;
    }

    /// Trim drafts and close the form, or stay open if the title is blank.
    pub fn save(&mut self) -> Option<EditCommit> {
        let title = self.title_draft.trim();
        if title.is_empty() {
            return None;
        }
        let commit = EditCommit {
            title: title.to_owned(),
            url: self.url_draft.as_deref().map(|url| url.trim().to_owned()),
        };
        self.title_draft.clone_from(&commit.title);
        if let (Some(draft), Some(url)) = (self.url_draft.as_mut(), commit.url.as_ref()) {
            draft.clone_from(url);
        }
        self.open = false;
        Some(commit)
    }

    fn reset(&mut self, node: &MenuNode) {
        self.title_draft = node.title().to_owned();
        self.url_draft = node.kind().is_custom().then(|| node.url().to_owned());
    }
}
