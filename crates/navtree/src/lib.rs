#![forbid(unsafe_code)]

//! navtree public facade crate.
//!
//! Re-exports the menu model, the presentation layer, and the browser-host
//! editor from the internal crates, plus a crate-wide [`Error`] and a
//! [`prelude`] for day-to-day usage.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use navtree_core::clock::{Clock, DeterministicClock, SystemClock};
pub use navtree_core::event::{DragEvent, DragEventKind};
pub use navtree_core::geometry::{Point, Rect};

// --- Model re-exports ------------------------------------------------------

pub use navtree_model::{
    DropPosition, MenuKind, MenuModelError, MenuNode, MenuOperation, MenuOperationError,
    MenuOperationFailure, MenuOperationKind, MenuOperationOutcome, MenuRecord, MenuTree, NodeId,
    RecordsJsonError, to_json_pretty, tree_from_json,
};

// --- Widget re-exports -----------------------------------------------------

pub use navtree_widgets::{
    CustomLinkField, DropIndicator, DropZoneConfig, LayoutConfig, MenuLayout, NodeAction,
    PageOption, ViewState, VisualNode, render_tree, resolve_drop_position, short_path,
};

// --- Web re-exports --------------------------------------------------------

pub use navtree_web::{
    DragDispatch, DragLogOutcome, EditorConfig, EditorConfigError, EditorError, LogSink,
    MemorySink, MenuEditor, MenuSink, SinkError,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for navtree hosts.
#[derive(Debug)]
pub enum Error {
    /// Invalid tree construction or ID exhaustion.
    Model(MenuModelError),
    /// A structural operation was rejected.
    Operation(MenuOperationError),
    /// Initial structure could not be parsed.
    Json(RecordsJsonError),
    /// A save sink failed.
    Sink(SinkError),
    /// Editor policy could not be loaded.
    Config(EditorConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Model(err) => write!(f, "{err}"),
            Self::Operation(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "{err}"),
            Self::Sink(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Model(err) => Some(err),
            Self::Operation(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::Sink(err) => Some(err),
            Self::Config(err) => Some(err),
        }
    }
}

impl From<MenuModelError> for Error {
    fn from(err: MenuModelError) -> Self {
        Self::Model(err)
    }
}

impl From<MenuOperationError> for Error {
    fn from(err: MenuOperationError) -> Self {
        Self::Operation(err)
    }
}

impl From<RecordsJsonError> for Error {
    fn from(err: RecordsJsonError) -> Self {
        Self::Json(err)
    }
}

impl From<SinkError> for Error {
    fn from(err: SinkError) -> Self {
        Self::Sink(err)
    }
}

impl From<EditorConfigError> for Error {
    fn from(err: EditorConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<EditorError> for Error {
    fn from(err: EditorError) -> Self {
        match err {
            EditorError::Model(err) => Self::Model(err),
            EditorError::Operation(err) => Self::Operation(err),
        }
    }
}

/// Standard result type for navtree APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        DragEvent, DropPosition, EditorConfig, Error, LogSink, MenuEditor, MenuKind, MenuNode,
        MenuRecord, MenuSink, MenuTree, NodeAction, NodeId, Point, Rect, Result,
    };

    pub use crate::{core, model, web, widgets};
}

pub use navtree_core as core;
pub use navtree_model as model;
pub use navtree_web as web;
pub use navtree_widgets as widgets;
