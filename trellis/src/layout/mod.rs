//! Flow Layout Engine for Trellis
//!
//! Arranges boxes along lines that wrap, either after a fixed number of boxes
//! per line or when the next box no longer fits. A pass resolves every box's
//! frame and the container's own size in one synchronous call.
//!
//! # Architecture
//!
//! ```text
//! resolve sizes -> pack lines -> share weights -> place -> apply gravity
//! ```
//!
//! Nested containers are measured through the same entry point, and laid out
//! again at their final frame when the pass is not an estimate.

pub mod axis;
pub mod constraints;
pub mod context;
pub mod length;

pub mod auto_arrange;
pub mod config;
pub mod gravity;
pub mod item;
pub mod line;
pub mod paging;
pub mod sizing;
pub mod weight;

pub mod flow;

// Re-export core types
pub use axis::{Axis, Orientation};
pub use constraints::LayoutConstraints;
pub use context::{LayoutContext, LayoutWarning};
pub use length::{Alignment, CrossAxisAlignment, EPSILON, Gravity, Insets, Length, SizeRule};

pub use config::{FloatingSpacing, FlowConfig};
pub use item::{FlowItem, Intrinsic, Measure, MeasureFn, Reflow, measure_fn};
pub use line::{Line, greedy_lines};
pub use paging::ScrollHost;

pub use flow::{FlowLayout, LayoutOutput};
