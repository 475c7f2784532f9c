#![forbid(unsafe_code)]

//! Presentation layer for the navtree menu editor.
//!
//! # Role in navtree
//! `navtree-widgets` projects the authoritative `MenuTree` into
//! [`VisualNode`]s, lays them out into pixel boxes for hit testing, and
//! resolves pointer geometry into drop positions. It also hosts the small
//! input forms (inline edit, page selection, custom link) that turn user
//! input into model operations.
//!
//! Nothing here mutates the tree: every widget either reads the model or
//! returns a value the owner applies.

pub mod drop_zone;
pub mod edit;
pub mod input;
pub mod layout;
pub mod short_path;
pub mod visual;

pub use drop_zone::{
    DEFAULT_EDGE_MARGIN, DEFAULT_INSIDE_OFFSET_X, DropZoneConfig, resolve_drop_position,
};
pub use edit::{EditCommit, EditForm, NodeAction};
pub use input::{
    CustomLinkField, CustomLinkForm, CustomLinkRejection, DEFAULT_INVALID_MARKER_TIMEOUT,
    FieldState, NewEntry, PageOption, PageSelection, page_slug_url,
};
pub use layout::{LayoutConfig, LayoutEntry, MenuLayout, layout};
pub use short_path::short_path;
pub use visual::{
    ChildrenContainer, DropIndicator, EditFormView, IndicatorTarget, NodeContent, ViewState,
    VisualNode, render, render_tree,
};
