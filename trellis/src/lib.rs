//! Trellis: a flow layout engine.
//!
//! Trellis places boxes along lines that wrap, the way a flow container in a
//! UI toolkit does:
//! - Count-constrained lines (`arranged_count` boxes per line) or
//!   content-constrained lines (wrap when the next box does not fit)
//! - Fixed, wrap-to-content, weighted, percentage, and aspect sizing
//! - Container gravity, per-line alignment, and stretch
//! - Best-fit line selection and paging inside a scroll host
//!
//! # Usage
//!
//! ```
//! use trellis::layout::{FlowItem, FlowLayout};
//! use trellis::primitives::Size;
//!
//! let mut layout = FlowLayout::new()
//!     .arranged_count(3)
//!     .children((0..4).map(|_| FlowItem::fixed(100.0, 20.0)));
//! let out = layout.compute_layout(Size::new(300.0, 200.0), false, None);
//! assert_eq!(out.lines.len(), 2);
//! assert_eq!(layout.items()[2].frame.x, 200.0);
//! ```

// Core primitives
pub mod primitives;

// Layout engine
pub mod layout;

// Scene files
pub mod scene;

pub mod error;

pub use error::{ConfigError, SceneError};
pub use layout::{FlowItem, FlowLayout, LayoutOutput};
