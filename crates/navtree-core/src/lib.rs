#![forbid(unsafe_code)]

//! Core: geometry, host drag events, clocks, and logging for navtree.
//!
//! # Role in navtree
//! `navtree-core` is the leaf crate. It owns the pixel geometry used for
//! hit testing, the normalized drag events a browser host pushes in, and the
//! monotonic clocks that time transient feedback. It knows nothing about
//! menu trees; `navtree-model` and `navtree-widgets` build on top of it.

pub mod clock;
pub mod event;
pub mod geometry;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
