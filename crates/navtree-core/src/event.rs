#![forbid(unsafe_code)]

//! Host drag-and-drop events.
//!
//! A browser host forwards the four document-level drag signals
//! (`dragstart`, `dragover`, `drop`, `dragend`) as [`DragEvent`] values.
//! Events carry only pointer geometry; resolving which menu entry lies under
//! the pointer is the job of the consumer's hit tester.
//!
//! # Invariants
//! 1. A well-formed sequence is `Start`, zero or more `Over`, optionally one
//!    `Drop`, then `End`. Hosts may omit `End` after `Drop`; consumers must
//!    treat `Drop` as terminal.
//! 2. `Over` events are processed strictly in dispatch order.

use crate::geometry::Point;

/// Drag lifecycle signal kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DragEventKind {
    /// Pointer-down drag began on a draggable region.
    Start,
    /// Pointer moved over a candidate region while dragging.
    Over,
    /// Pointer released over the current candidate.
    Drop,
    /// Drag finished or was aborted (released outside, Escape, focus loss).
    End,
}

/// One host drag signal with viewport-space pointer position.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DragEvent {
    pub kind: DragEventKind,
    pub position: Point,
}

impl DragEvent {
    /// Create a drag event.
    #[must_use]
    pub const fn new(kind: DragEventKind, position: Point) -> Self {
        Self { kind, position }
    }

    /// `dragstart` at `(x, y)`.
    #[must_use]
    pub const fn start(x: f64, y: f64) -> Self {
        Self::new(DragEventKind::Start, Point::new(x, y))
    }

    /// `dragover` at `(x, y)`.
    #[must_use]
    pub const fn over(x: f64, y: f64) -> Self {
        Self::new(DragEventKind::Over, Point::new(x, y))
    }

    /// `drop` at `(x, y)`.
    #[must_use]
    pub const fn drop_at(x: f64, y: f64) -> Self {
        Self::new(DragEventKind::Drop, Point::new(x, y))
    }

    /// `dragend`; position is irrelevant.
    #[must_use]
    pub const fn end() -> Self {
        Self::new(DragEventKind::End, Point::new(0.0, 0.0))
    }

    /// Returns true for events that terminate a drag session.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self.kind, DragEventKind::Drop | DragEventKind::End)
    }
}
