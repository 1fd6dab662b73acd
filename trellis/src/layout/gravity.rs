//! Gravity and alignment.
//!
//! Two adjustments run after boxes are placed:
//! - per line: container gravity along the main axis, and arranged gravity
//!   of each box against the line's thickest member;
//! - across lines: container gravity along the cross axis, once the stack of
//!   lines is known.
//!
//! Both only move and grow boxes that are already placed.

use tracing::trace;

use super::axis::Axis;
use super::item::FlowItem;
use super::length::{Alignment, CrossAxisAlignment};
use super::line::Line;

/// Offsets for the k-th member of a group: `shift + (gap + grow) * k`, and
/// each member grows by `grow`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Spread {
    pub shift: f32,
    pub gap: f32,
    pub grow: f32,
}

impl Spread {
    /// Work out how `leftover` is spent on `count` members.
    ///
    /// `SpaceBetween` only widens gaps when `between` is allowed and there is
    /// more than one member; `Fill` only grows members when `grow` is allowed.
    pub fn new(gravity: Alignment, leftover: f32, count: usize, between: bool, grow: bool) -> Self {
        let none = Self::default();
        match gravity {
            Alignment::Start => none,
            Alignment::Center => Self {
                shift: leftover / 2.0,
                ..none
            },
            Alignment::End => Self {
                shift: leftover,
                ..none
            },
            Alignment::SpaceBetween if between && count > 1 => Self {
                gap: leftover / (count - 1) as f32,
                ..none
            },
            Alignment::Fill if grow && count > 0 => Self {
                grow: leftover / count as f32,
                ..none
            },
            Alignment::SpaceBetween | Alignment::Fill => none,
        }
    }

    #[inline]
    pub fn offset(&self, k: usize) -> f32 {
        self.shift + (self.gap + self.grow) * k as f32
    }

    pub fn is_noop(&self) -> bool {
        self.shift == 0.0 && self.gap == 0.0 && self.grow == 0.0
    }
}

/// Parameters for aligning one line.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LineAlign {
    pub main: Axis,
    pub gravity: Alignment,
    pub arranged: CrossAxisAlignment,
    /// Content extent along the main axis.
    pub available: f32,
    /// 0 in content mode.
    pub arranged_count: usize,
}

/// Apply main-axis gravity and arranged gravity to one line.
pub(crate) fn align_line(items: &mut [FlowItem], line: &Line, is_last: bool, align: &LineAlign) {
    let count = line.len();
    if count == 0 {
        return;
    }
    let main = align.main;
    let cross = main.cross();

    // A full count-mode line spreads even when it is the last one
    let between = !is_last || (align.arranged_count > 0 && count == align.arranged_count);
    // Uniform columns already fill count-mode lines; the last content line keeps its size
    let grow = align.arranged_count == 0 && !is_last;
    let spread = Spread::new(align.gravity, align.available - line.main_extent, count, between, grow);
    if !spread.is_noop() {
        trace!(?spread, count, "line gravity");
    }

    for (k, &index) in line.items.iter().enumerate() {
        let item = &mut items[index];
        let frame = &mut item.frame;

        if !spread.is_noop() {
            main.set_offset(frame, main.offset(frame) + spread.offset(k));
            main.set_extent(frame, main.extent(frame) + spread.grow);
        }

        let room = line.cross_extent - cross.total(&item.margin);
        match align.arranged {
            CrossAxisAlignment::Start => {}
            CrossAxisAlignment::Center => {
                let extent = cross.extent(frame);
                cross.set_offset(frame, cross.offset(frame) + (room - extent) / 2.0);
            }
            CrossAxisAlignment::End => {
                let extent = cross.extent(frame);
                cross.set_offset(frame, cross.offset(frame) + room - extent);
            }
            CrossAxisAlignment::Stretch => {
                let extent = item.rule(cross).clamp(room);
                cross.set_extent(&mut item.frame, extent);
            }
        }
    }
}

/// Apply cross-axis container gravity to the stack of lines.
///
/// `leftover` is the cross space not taken by lines and line spacing.
pub(crate) fn distribute_lines(items: &mut [FlowItem], lines: &mut [Line], cross: Axis, gravity: Alignment, leftover: f32) {
    let spread = Spread::new(gravity, leftover, lines.len(), true, true);
    if spread.is_noop() {
        return;
    }
    trace!(?spread, lines = lines.len(), "cross gravity");

    for (k, line) in lines.iter_mut().enumerate() {
        let offset = spread.offset(k);
        for &index in &line.items {
            let frame = &mut items[index].frame;
            cross.set_offset(frame, cross.offset(frame) + offset);
            cross.set_extent(frame, cross.extent(frame) + spread.grow);
        }
        line.cross_extent += spread.grow;
    }
}
