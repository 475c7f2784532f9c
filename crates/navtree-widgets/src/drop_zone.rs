#![forbid(unsafe_code)]

//! Hit-zone geometry: pointer position within a candidate box to a
//! [`DropPosition`].
//!
//! ```text
//!  +------------------------------------------+  top
//!  |  edge margin band      -> Before         |
//!  |- - - - - - - - -+- - - - - - - - - - - - |
//!  |  x <= offset    |  x > offset            |
//!  |  upper half     |                        |
//!  |   -> Before     |   -> Inside            |
//!  |  lower half     |                        |
//!  |   -> After      |                        |
//!  |- - - - - - - - -+- - - - - - - - - - - - |
//!  |  edge margin band      -> After          |
//!  +------------------------------------------+  bottom
//! ```

use navtree_core::geometry::{Point, Rect};
use navtree_model::DropPosition;

/// Default pixel band at the top/bottom edge that never resolves `Inside`.
pub const DEFAULT_EDGE_MARGIN: f64 = 5.0;

/// Default horizontal offset from the left edge beyond which `Inside` is possible.
pub const DEFAULT_INSIDE_OFFSET_X: f64 = 50.0;

/// Thresholds for drop-position resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DropZoneConfig {
    /// Pixels from the top and bottom edges where nesting is suppressed.
    pub edge_margin: f64,
    /// Pointer must be strictly further than this from the left edge to nest.
    pub inside_offset_x: f64,
}

impl Default for DropZoneConfig {
    fn default() -> Self {
        Self {
            edge_margin: DEFAULT_EDGE_MARGIN,
            inside_offset_x: DEFAULT_INSIDE_OFFSET_X,
        }
    }
}

impl DropZoneConfig {
    #[must_use]
    pub fn with_edge_margin(mut self, pixels: f64) -> Self {
        self.edge_margin = pixels;
        self
    }

    #[must_use]
    pub fn with_inside_offset(mut self, pixels: f64) -> Self {
        self.inside_offset_x = pixels;
        self
    }
}

/// Resolve where a drop at `pointer` lands relative to the box `bounds`.
///
/// `Inside` wins when the pointer is right of the inside offset and strictly
/// between the edge bands; otherwise the vertical half decides between
/// `Before` and `After`. Ties on the midline resolve `After`.
#[must_use]
pub fn resolve_drop_position(bounds: Rect, pointer: Point, config: &DropZoneConfig) -> DropPosition {
    let relative_y = bounds.relative_y(pointer);
    let past_offset = bounds.relative_x(pointer) > config.inside_offset_x;
    let between_edges =
        relative_y > config.edge_margin && relative_y < bounds.height - config.edge_margin;

    if past_offset && between_edges {
        DropPosition::Inside
    } else if relative_y < bounds.height / 2.0 {
        DropPosition::Before
    } else {
        DropPosition::After
    }
}
