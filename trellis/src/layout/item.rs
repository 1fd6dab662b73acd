//! Boxes arranged by a flow layout.
//!
//! A [`FlowItem`] carries its sizing rules, margins, and the frame the engine
//! writes back. Content that wraps is measured through the [`Measure`]
//! capability; a nested [`FlowLayout`] is just content whose
//! [`Measure::as_sub_layout`] answers `Some`.

use std::fmt;

use crate::primitives::{Rect, Size};

use super::axis::Axis;
use super::constraints::LayoutConstraints;
use super::flow::FlowLayout;
use super::length::{Insets, Length, SizeRule};

/// Intrinsic measurement of a box's content.
pub trait Measure {
    /// Content size within `constraints`. Unbounded axes are free.
    fn measure(&mut self, constraints: LayoutConstraints) -> Size;

    /// The nested container behind this content, if any.
    fn as_sub_layout(&mut self) -> Option<&mut FlowLayout> {
        None
    }
}

/// Adapts a closure into [`Measure`].
pub struct MeasureFn<F>(F);

/// Wrap a closure as a measurement callback.
pub fn measure_fn<F>(f: F) -> MeasureFn<F>
where
    F: FnMut(LayoutConstraints) -> Size,
{
    MeasureFn(f)
}

impl<F> Measure for MeasureFn<F>
where
    F: FnMut(LayoutConstraints) -> Size,
{
    fn measure(&mut self, constraints: LayoutConstraints) -> Size {
        (self.0)(constraints)
    }
}

/// Content with a fixed intrinsic size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intrinsic(pub Size);

impl Measure for Intrinsic {
    fn measure(&mut self, _constraints: LayoutConstraints) -> Size {
        self.0
    }
}

/// Content that reflows like a paragraph: a run of `length` units broken
/// into lines of `line_height` at whatever width it is given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reflow {
    pub length: f32,
    pub line_height: f32,
}

impl Measure for Reflow {
    fn measure(&mut self, constraints: LayoutConstraints) -> Size {
        let width = self.length.min(constraints.max_width).max(0.0);
        if width <= 0.0 {
            return Size::ZERO;
        }
        let lines = (self.length / width).ceil().max(1.0);
        Size::new(width, lines * self.line_height)
    }
}

/// A box to be arranged.
pub struct FlowItem {
    pub(crate) width: SizeRule,
    pub(crate) height: SizeRule,
    pub(crate) margin: Insets,
    /// Frame resolved by the last layout pass.
    pub frame: Rect,
    content: Option<Box<dyn Measure>>,
}

impl FlowItem {
    /// Create a box that wraps (empty) content on both axes.
    pub fn new() -> Self {
        Self {
            width: SizeRule::default(),
            height: SizeRule::default(),
            margin: Insets::default(),
            frame: Rect::ZERO,
            content: None,
        }
    }

    /// Create a box with fixed width and height.
    pub fn fixed(width: f32, height: f32) -> Self {
        Self::new()
            .width(Length::Fixed(width))
            .height(Length::Fixed(height))
    }

    /// Set the width rule.
    pub fn width(mut self, width: impl Into<SizeRule>) -> Self {
        self.width = width.into();
        self
    }

    /// Set the height rule.
    pub fn height(mut self, height: impl Into<SizeRule>) -> Self {
        self.height = height.into();
        self
    }

    /// Set custom margins.
    pub fn margin(mut self, margin: Insets) -> Self {
        self.margin = margin;
        self
    }

    /// Uniform margin on all sides.
    pub fn margin_all(mut self, margin: f32) -> Self {
        self.margin = Insets::all(margin);
        self
    }

    /// Attach measurable content.
    pub fn content(mut self, content: impl Measure + 'static) -> Self {
        self.content = Some(Box::new(content));
        self
    }

    /// Attach a nested flow layout.
    pub fn nested(self, layout: FlowLayout) -> Self {
        self.content(layout)
    }

    pub fn width_rule(&self) -> &SizeRule {
        &self.width
    }

    pub fn height_rule(&self) -> &SizeRule {
        &self.height
    }

    pub fn margins(&self) -> &Insets {
        &self.margin
    }

    /// Replace the width rule in place.
    pub fn set_width(&mut self, width: impl Into<SizeRule>) {
        self.width = width.into();
    }

    /// Replace the height rule in place.
    pub fn set_height(&mut self, height: impl Into<SizeRule>) {
        self.height = height.into();
    }

    /// Rule for `axis`.
    #[inline]
    pub fn rule(&self, axis: Axis) -> &SizeRule {
        match axis {
            Axis::Horizontal => &self.width,
            Axis::Vertical => &self.height,
        }
    }

    /// Margin before and after the box along `axis`.
    #[inline]
    pub(crate) fn margin_along(&self, axis: Axis) -> f32 {
        axis.total(&self.margin)
    }

    /// Extent along `axis` including margins.
    #[inline]
    pub(crate) fn outer_extent(&self, axis: Axis) -> f32 {
        axis.extent(&self.frame) + self.margin_along(axis)
    }

    /// Measure content; boxes without content are empty.
    pub(crate) fn measure(&mut self, constraints: LayoutConstraints) -> Size {
        match self.content.as_mut() {
            Some(content) => content.measure(constraints),
            None => Size::ZERO,
        }
    }

    /// The nested container, if this box is one.
    pub fn sub_layout(&mut self) -> Option<&mut FlowLayout> {
        self.content.as_mut().and_then(|content| content.as_sub_layout())
    }

    /// Whether this box hosts a nested container.
    pub fn is_container(&mut self) -> bool {
        self.sub_layout().is_some()
    }
}

impl Default for FlowItem {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FlowItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlowItem")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("margin", &self.margin)
            .field("frame", &self.frame)
            .field("has_content", &self.content.is_some())
            .finish()
    }
}
