//! Measurement constraints.
//!
//! Passed to [`Measure`](super::item::Measure) implementations when a box
//! wraps its content. The engine only bounds an axis it already knows; the
//! other stays unbounded.

use crate::primitives::Size;

/// Upper bounds handed to a measurement callback. `f32::INFINITY` means free.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConstraints {
    pub max_width: f32,
    pub max_height: f32,
}

impl LayoutConstraints {
    pub const UNBOUNDED: Self = Self {
        max_width: f32::INFINITY,
        max_height: f32::INFINITY,
    };

    /// Width bounded, height free (height-for-width measurement).
    #[inline]
    pub fn with_max_width(max_width: f32) -> Self {
        Self {
            max_width: max_width.max(0.0),
            ..Self::UNBOUNDED
        }
    }

    #[inline]
    pub fn has_bounded_width(&self) -> bool {
        self.max_width.is_finite()
    }

    /// The bounds as a size; free axes become zero so a self-sizing
    /// container measures from content.
    #[inline]
    pub fn biggest(&self) -> Size {
        let finite = |v: f32| if v.is_finite() { v } else { 0.0 };
        Size::new(finite(self.max_width), finite(self.max_height))
    }
}

impl Default for LayoutConstraints {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}
