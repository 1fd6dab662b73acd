//! Container configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

use super::axis::Orientation;
use super::length::{CrossAxisAlignment, Gravity, Insets, Length, SizeRule};

/// Spacing that adapts so fixed-size boxes fill each line evenly.
///
/// Content mode only. As many boxes of `item_size` as fit (each with at
/// least `min_spacing` between them) share a line and the leftover becomes
/// the spacing. If that exceeds `max_spacing`, the spacing is capped and the
/// boxes grow instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloatingSpacing {
    pub item_size: f32,
    #[serde(default)]
    pub min_spacing: f32,
    #[serde(default)]
    pub max_spacing: Option<f32>,
}

impl FloatingSpacing {
    pub fn new(item_size: f32, min_spacing: f32) -> Self {
        Self {
            item_size,
            min_spacing,
            max_spacing: None,
        }
    }

    pub fn max_spacing(mut self, max: f32) -> Self {
        self.max_spacing = Some(max);
        self
    }

    /// Spacing and box extent for a line of `available`.
    ///
    /// Returns `(spacing, item_size)`; `fallback` is used when fewer than two
    /// boxes fit.
    pub fn resolve(&self, available: f32, fallback: f32) -> (f32, f32) {
        let per_box = self.item_size + self.min_spacing;
        if self.item_size <= 0.0 || per_box <= 0.0 {
            return (fallback, self.item_size.max(0.0));
        }
        let count = ((available + self.min_spacing) / per_box).floor();
        if count <= 1.0 {
            return (fallback, self.item_size);
        }
        let spacing = (available - self.item_size * count) / (count - 1.0);
        match self.max_spacing {
            Some(max) if spacing > max => (max, (available - max * (count - 1.0)) / count),
            _ => (spacing, self.item_size),
        }
    }
}

/// Settings of one flow container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    pub orientation: Orientation,
    /// Boxes per line; 0 wraps by content.
    pub arranged_count: usize,
    /// Boxes per page; 0 disables paging. Must be a multiple of `arranged_count`.
    pub paged_count: usize,
    /// Best-fit line selection (content mode).
    pub auto_arrange: bool,
    pub padding: Insets,
    /// Gap between boxes of a line.
    pub spacing: f32,
    /// Gap between lines.
    pub line_spacing: f32,
    pub gravity: Gravity,
    pub arranged_gravity: CrossAxisAlignment,
    pub floating: Option<FloatingSpacing>,
    /// Own width rule; `Shrink` sizes the container from its content.
    pub width: SizeRule,
    pub height: SizeRule,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            orientation: Orientation::default(),
            arranged_count: 0,
            paged_count: 0,
            auto_arrange: false,
            padding: Insets::default(),
            spacing: 0.0,
            line_spacing: 0.0,
            gravity: Gravity::default(),
            arranged_gravity: CrossAxisAlignment::default(),
            floating: None,
            width: SizeRule::new(Length::Fill),
            height: SizeRule::new(Length::Fill),
        }
    }
}

impl FlowConfig {
    /// Check caller-side preconditions. Layout never calls this; it corrects
    /// what it can instead.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("spacing", self.spacing),
            ("line_spacing", self.line_spacing),
            ("padding.top", self.padding.top),
            ("padding.right", self.padding.right),
            ("padding.bottom", self.padding.bottom),
            ("padding.left", self.padding.left),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }

        if self.paged_count > 0 {
            if self.arranged_count == 0 {
                return Err(ConfigError::PagingWithoutCount);
            }
            if self.paged_count % self.arranged_count != 0 {
                return Err(ConfigError::UnevenPaging {
                    paged: self.paged_count,
                    arranged: self.arranged_count,
                });
            }
        }

        if let Some(floating) = &self.floating {
            if !floating.item_size.is_finite() || floating.item_size <= 0.0 {
                return Err(ConfigError::InvalidValue {
                    field: "floating.item_size",
                    value: floating.item_size,
                });
            }
            if let Some(max) = floating.max_spacing {
                if max < floating.min_spacing {
                    return Err(ConfigError::FloatingRange {
                        min: floating.min_spacing,
                        max,
                    });
                }
            }
        }
        Ok(())
    }
}
