#![forbid(unsafe_code)]

//! Browser-host surface for the navtree menu editor.
//!
//! # Role in navtree
//! `navtree-web` is the layer a host page talks to. It owns the drag session
//! state machine, the [`MenuEditor`] that routes drag signals and node
//! actions into transactional tree operations, the save [`MenuSink`]s, and
//! the policy-as-data [`EditorConfig`].
//!
//! # Host loop
//! ```rust,ignore
//! let mut editor = MenuEditor::from_json(initial_json)?;
//! editor.set_viewport(Rect::new(0.0, 0.0, container_width, 0.0));
//!
//! // dragstart / dragover / drop / dragend
//! editor.handle_drag_event(DragEvent::start(x, y));
//! editor.handle_drag_event(DragEvent::over(x, y));
//! editor.handle_drag_event(DragEvent::drop_at(x, y));
//!
//! paint(&editor.render(), &editor.layout());
//! editor.save(&mut LogSink)?;
//! ```

pub mod config;
pub mod drag_session;
pub mod editor;
pub mod sink;

pub use config::{EditorConfig, EditorConfigError};
pub use drag_session::{
    DragDispatch, DragIgnoredReason, DragLogEntry, DragLogOutcome, DragPhase, DragSession,
};
pub use editor::{EditorError, MenuEditor};
pub use sink::{LogSink, MemorySink, MenuSink, SinkError};
