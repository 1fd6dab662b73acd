//! Axis and orientation helpers.
//!
//! The four arrangement modes are two orientations of the same algorithm.
//! Passes are written once against a main/cross axis pair and these helpers
//! project geometry onto the physical x/y components.

use serde::{Deserialize, Serialize};

use crate::primitives::{Rect, Size};

use super::length::Insets;

/// A physical axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// The perpendicular axis.
    #[inline]
    pub fn cross(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    /// Component of `size` along this axis.
    #[inline]
    pub fn of(self, size: Size) -> f32 {
        match self {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        }
    }

    #[inline]
    pub fn set(self, size: &mut Size, value: f32) {
        match self {
            Axis::Horizontal => size.width = value,
            Axis::Vertical => size.height = value,
        }
    }

    /// Origin of `rect` along this axis.
    #[inline]
    pub fn offset(self, rect: &Rect) -> f32 {
        match self {
            Axis::Horizontal => rect.x,
            Axis::Vertical => rect.y,
        }
    }

    #[inline]
    pub fn set_offset(self, rect: &mut Rect, value: f32) {
        match self {
            Axis::Horizontal => rect.x = value,
            Axis::Vertical => rect.y = value,
        }
    }

    /// Extent of `rect` along this axis.
    #[inline]
    pub fn extent(self, rect: &Rect) -> f32 {
        match self {
            Axis::Horizontal => rect.width,
            Axis::Vertical => rect.height,
        }
    }

    #[inline]
    pub fn set_extent(self, rect: &mut Rect, value: f32) {
        match self {
            Axis::Horizontal => rect.width = value,
            Axis::Vertical => rect.height = value,
        }
    }

    /// Leading inset (left or top).
    #[inline]
    pub fn leading(self, insets: &Insets) -> f32 {
        match self {
            Axis::Horizontal => insets.left,
            Axis::Vertical => insets.top,
        }
    }

    /// Trailing inset (right or bottom).
    #[inline]
    pub fn trailing(self, insets: &Insets) -> f32 {
        match self {
            Axis::Horizontal => insets.right,
            Axis::Vertical => insets.bottom,
        }
    }

    /// Leading plus trailing inset.
    #[inline]
    pub fn total(self, insets: &Insets) -> f32 {
        self.leading(insets) + self.trailing(insets)
    }
}

/// Direction in which lines stack.
///
/// `Vertical` lays boxes left to right and stacks rows top to bottom.
/// `Horizontal` lays boxes top to bottom and stacks columns left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

impl Orientation {
    /// Axis along which boxes of one line are placed.
    #[inline]
    pub fn main_axis(self) -> Axis {
        match self {
            Orientation::Vertical => Axis::Horizontal,
            Orientation::Horizontal => Axis::Vertical,
        }
    }

    /// Axis along which lines stack.
    #[inline]
    pub fn cross_axis(self) -> Axis {
        self.main_axis().cross()
    }
}
