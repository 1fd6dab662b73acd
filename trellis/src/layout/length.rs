//! Layout sizing types and constants.
//!
//! Core types for specifying box extents, insets, and gravity.

use serde::{Deserialize, Serialize};

use super::axis::Axis;

/// Tolerance for every "fits" / "exceeds" decision.
///
/// Rounding noise must never flip a box onto the next line, so comparisons
/// against available space go through [`approx_le`] and [`approx_eq`].
pub const EPSILON: f32 = 0.0001;

/// `a <= b` within [`EPSILON`].
#[inline]
pub fn approx_le(a: f32, b: f32) -> bool {
    a - b <= EPSILON
}

/// `a == b` within [`EPSILON`].
#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() <= EPSILON
}

/// Sizing mode for one axis of a box.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Length {
    /// Wrap to content (intrinsic size from the item's measurement).
    #[default]
    Shrink,
    /// Share of leftover line space with weight 1.
    Fill,
    /// Share of leftover line space. `FillPortion(1.0)` == `Fill`.
    FillPortion(f32),
    /// Fixed size.
    Fixed(f32),
    /// Fraction of the container's content extent on the same axis.
    Percent(f32),
    /// Ratio of this box's extent on the other axis.
    Aspect(f32),
}

impl Length {
    /// Get the weight for this length, or 0 if not weighted.
    pub fn weight(&self) -> f32 {
        match self {
            Length::Fill => 1.0,
            Length::FillPortion(w) => *w,
            _ => 0.0,
        }
    }

    /// Whether this length takes a share of leftover space.
    pub fn is_weighted(&self) -> bool {
        matches!(self, Length::Fill | Length::FillPortion(_))
    }

    pub fn is_shrink(&self) -> bool {
        matches!(self, Length::Shrink)
    }

    pub fn is_aspect(&self) -> bool {
        matches!(self, Length::Aspect(_))
    }
}

/// A [`Length`] with optional min/max bounds.
///
/// Deserializes from either a bare length (`"fill"`, `{"fixed": 40}`) or
/// the full `{"length": ..., "min": ..., "max": ...}` form.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "SizeRuleRepr")]
pub struct SizeRule {
    pub length: Length,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f32>,
}

impl SizeRule {
    pub const fn new(length: Length) -> Self {
        Self { length, min: None, max: None }
    }

    /// Set the lower bound.
    pub fn min(mut self, min: f32) -> Self {
        self.min = Some(min);
        self
    }

    /// Set the upper bound.
    pub fn max(mut self, max: f32) -> Self {
        self.max = Some(max);
        self
    }

    /// Apply the bounds. Negative results clamp to zero; `min` wins over `max`.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        let mut result = value;
        if let Some(max) = self.max {
            result = result.min(max);
        }
        if let Some(min) = self.min {
            result = result.max(min);
        }
        result.max(0.0)
    }
}

impl From<Length> for SizeRule {
    fn from(length: Length) -> Self {
        Self::new(length)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SizeRuleRepr {
    Bare(Length),
    Full {
        #[serde(default)]
        length: Length,
        #[serde(default)]
        min: Option<f32>,
        #[serde(default)]
        max: Option<f32>,
    },
}

impl From<SizeRuleRepr> for SizeRule {
    fn from(repr: SizeRuleRepr) -> Self {
        match repr {
            SizeRuleRepr::Bare(length) => Self::new(length),
            SizeRuleRepr::Full { length, min, max } => Self { length, min, max },
        }
    }
}

/// Container gravity along one physical axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    /// Pack at the start.
    #[default]
    Start,
    /// Pack at the end.
    End,
    /// Center.
    Center,
    /// Widen the gaps so the first and last touch the edges.
    SpaceBetween,
    /// Stretch extents so the content fills the axis.
    Fill,
}

/// Alignment of a box against its line's thickest member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossAxisAlignment {
    #[default]
    Start,
    End,
    Center,
    /// Grow every box to the line's thickness.
    Stretch,
}

/// Container gravity on both physical axes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gravity {
    pub horizontal: Alignment,
    pub vertical: Alignment,
}

impl Gravity {
    pub const fn new(horizontal: Alignment, vertical: Alignment) -> Self {
        Self { horizontal, vertical }
    }

    /// Alignment along `axis`.
    #[inline]
    pub fn along(&self, axis: Axis) -> Alignment {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        }
    }
}

/// Insets around content (container padding or box margins).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Insets {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Insets {
    /// Create insets with explicit values for each side.
    pub fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self { top, right, bottom, left }
    }

    /// Uniform insets on all sides.
    pub fn all(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Symmetric insets (horizontal, vertical).
    pub fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Total horizontal inset.
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Total vertical inset.
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}
