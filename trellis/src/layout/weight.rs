//! Weighted distribution of leftover line space.
//!
//! Boxes whose main-axis rule is `Fill`/`FillPortion` are left at zero while a
//! count-constrained line is sized. Once every other box on the line is known,
//! the leftover space is split in proportion to the weights.

use super::axis::Axis;
use super::item::FlowItem;
use super::sizing::Sizer;

/// Running totals for one line.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct LineWeights {
    /// Extents of unweighted boxes plus every box's margins.
    pub fixed: f32,
    pub total_weight: f32,
    pub count: usize,
}

impl LineWeights {
    /// Account for a resolved box.
    pub fn add(&mut self, item: &FlowItem, axis: Axis) {
        let length = item.rule(axis).length;
        if length.is_weighted() {
            self.total_weight += length.weight();
        } else {
            self.fixed += axis.extent(&item.frame);
        }
        self.fixed += item.margin_along(axis);
        self.count += 1;
    }

    /// Space left for weighted boxes once fixed extents and the gaps between
    /// `count` boxes are taken.
    pub fn leftover(&self, available: f32, spacing: f32) -> f32 {
        let gaps = self.count.saturating_sub(1) as f32 * spacing;
        available - self.fixed - gaps
    }
}

/// Split `leftover` among `weights`. A non-positive total gets nothing.
pub fn shares(weights: &[f32], leftover: f32) -> Vec<f32> {
    let total: f32 = weights.iter().sum();
    weights
        .iter()
        .map(|w| if total > 0.0 { leftover * w / total } else { 0.0 })
        .collect()
}

/// Size the weighted boxes of one line along `axis`.
///
/// `remeasure` is forwarded to [`Sizer::set_extent`].
#[allow(clippy::too_many_arguments)]
pub(crate) fn distribute(
    sizer: &mut Sizer<'_>,
    items: &mut [FlowItem],
    line: &[usize],
    axis: Axis,
    totals: LineWeights,
    available: f32,
    spacing: f32,
    remeasure: bool,
) {
    if totals.total_weight <= 0.0 {
        return;
    }
    let leftover = totals.leftover(available, spacing).max(0.0);
    let weights: Vec<f32> = line
        .iter()
        .map(|&index| items[index].rule(axis).length.weight())
        .collect();
    let portions = shares(&weights, leftover);
    for ((&index, weight), extent) in line.iter().zip(weights).zip(portions) {
        if weight > 0.0 {
            sizer.set_extent(index, &mut items[index], axis, extent, remeasure);
        }
    }
}
