//! Box size resolution.
//!
//! Turns a box's per-axis [`SizeRule`]s into concrete extents. The passes in
//! `flow` describe each axis with an [`AxisPlan`]; the resolver applies the
//! precedence forced > rule > seed > measurement and writes the result into
//! the box's frame.
//!
//! Resolution order is width then height, unless the width is a ratio of the
//! height. Weighted axes without a pool are deferred to the distributor and
//! left at zero.

use tracing::trace;

use crate::primitives::Size;

use super::axis::Axis;
use super::constraints::LayoutConstraints;
use super::context::{LayoutContext, LayoutWarning};
use super::item::FlowItem;
use super::length::{Length, SizeRule};

/// How one axis of a box is resolved in the current pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct AxisPlan {
    /// Overrides the rule (uniform columns).
    pub forced: Option<f32>,
    /// Used in place of measurement for `Shrink` (page cells, floating size).
    pub seed: Option<f32>,
    /// Space a weighted rule takes its share of. `None` defers the axis.
    pub weight_pool: Option<f32>,
}

impl AxisPlan {
    pub fn forced(value: f32) -> Self {
        Self {
            forced: Some(value),
            ..Self::default()
        }
    }

    pub fn seeded(seed: Option<f32>) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn with_pool(mut self, pool: f32) -> Self {
        self.weight_pool = Some(pool);
        self
    }
}

/// Resolves box extents against a container's content area.
pub(crate) struct Sizer<'a> {
    content: Size,
    ctx: &'a mut LayoutContext,
}

impl<'a> Sizer<'a> {
    /// `content` is the container size minus padding.
    pub fn new(content: Size, ctx: &'a mut LayoutContext) -> Self {
        Self { content, ctx }
    }

    pub fn ctx(&mut self) -> &mut LayoutContext {
        &mut *self.ctx
    }

    /// Resolve both axes of `item` and write them into its frame.
    pub fn resolve(&mut self, index: usize, item: &mut FlowItem, width: AxisPlan, height: AxisPlan) {
        let width_aspect = item.width.length.is_aspect() && width.forced.is_none();
        let height_aspect = item.height.length.is_aspect() && height.forced.is_none();

        if width_aspect && height_aspect {
            self.ctx.warn(LayoutWarning::AspectCycle { item: index });
            item.frame.width = 0.0;
            item.frame.height = 0.0;
            return;
        }

        let order = if width_aspect {
            [(Axis::Vertical, height), (Axis::Horizontal, width)]
        } else {
            [(Axis::Horizontal, width), (Axis::Vertical, height)]
        };

        let mut size = Size::ZERO;
        for (axis, plan) in order {
            let extent = self.resolve_axis(index, item, axis, plan, size);
            axis.set(&mut size, extent);
        }
        item.frame.width = size.width;
        item.frame.height = size.height;
        trace!(index, width = size.width, height = size.height, "resolved box");
    }

    fn resolve_axis(&mut self, index: usize, item: &mut FlowItem, axis: Axis, plan: AxisPlan, partial: Size) -> f32 {
        let rule = *item.rule(axis);
        if let Some(forced) = plan.forced {
            return rule.clamp(forced);
        }
        let raw = match rule.length {
            Length::Fixed(value) => value,
            Length::Percent(fraction) => axis.of(self.content) * fraction,
            Length::Aspect(ratio) => axis.cross().of(partial) * ratio,
            Length::Fill | Length::FillPortion(_) => match plan.weight_pool {
                Some(pool) => pool * rule.length.weight() - item.margin_along(axis),
                None => 0.0,
            },
            Length::Shrink => match plan.seed {
                Some(seed) => seed,
                None => self.measure_axis(index, item, axis, partial),
            },
        };
        rule.clamp(raw)
    }

    /// Measure content along `axis`. Height is measured for the width already
    /// resolved; width is measured against the content extent.
    fn measure_axis(&mut self, index: usize, item: &mut FlowItem, axis: Axis, partial: Size) -> f32 {
        let constraints = match axis {
            Axis::Vertical if !item.width.length.is_aspect() => {
                LayoutConstraints::with_max_width(partial.width)
            }
            Axis::Vertical => LayoutConstraints::UNBOUNDED,
            Axis::Horizontal => {
                let available = (self.content.width - item.margin_along(Axis::Horizontal)).max(0.0);
                LayoutConstraints::with_max_width(available)
            }
        };
        axis.of(self.measure_item(index, item, constraints))
    }

    /// Measure box `index`. A nested container runs as an estimate inside
    /// this pass's context; its warnings are kept only when no final round
    /// will lay it out again.
    fn measure_item(&mut self, index: usize, item: &mut FlowItem, constraints: LayoutConstraints) -> Size {
        if !item.is_container() {
            return item.measure(constraints);
        }
        self.ctx.mark_sub_layout();
        let keep = self.ctx.is_estimate();
        let Some(nested) = item.sub_layout() else {
            return Size::ZERO;
        };
        self.ctx.enter(true);
        let (size, _) = nested.run(&mut *self.ctx, constraints.biggest(), true);
        self.ctx.exit(index, keep);
        size
    }

    /// Set `axis` to `extent` (clamped) and refresh whatever derives from it.
    ///
    /// A ratio on the other axis is recomputed. A wrapped height is measured
    /// again when the width changed, unless `remeasure` is false (the height
    /// came from a page cell or floating size).
    pub fn set_extent(&mut self, index: usize, item: &mut FlowItem, axis: Axis, extent: f32, remeasure: bool) {
        let rule = *item.rule(axis);
        axis.set_extent(&mut item.frame, rule.clamp(extent));
        self.refresh_dependent(index, item, axis, remeasure);
    }

    /// Like [`set_extent`](Self::set_extent), but `cap` also overrides the
    /// rule's `min`: the box never ends up larger than `cap`.
    pub fn cap_extent(&mut self, index: usize, item: &mut FlowItem, axis: Axis, cap: f32) {
        let cap = cap.max(0.0);
        self.set_extent(index, item, axis, cap, true);
        if axis.extent(&item.frame) > cap {
            axis.set_extent(&mut item.frame, cap);
            self.refresh_dependent(index, item, axis, true);
        }
    }

    fn refresh_dependent(&mut self, index: usize, item: &mut FlowItem, changed: Axis, remeasure: bool) {
        let other = changed.cross();
        let rule: SizeRule = *item.rule(other);
        match rule.length {
            Length::Aspect(ratio) => {
                let value = rule.clamp(changed.extent(&item.frame) * ratio);
                other.set_extent(&mut item.frame, value);
            }
            Length::Shrink if remeasure && other == Axis::Vertical => {
                let width = item.frame.width;
                let measured = self.measure_item(index, item, LayoutConstraints::with_max_width(width)).height;
                item.frame.height = rule.clamp(measured);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::item::{Reflow, measure_fn};

    fn sizer(ctx: &mut LayoutContext) -> Sizer<'_> {
        Sizer::new(Size::new(200.0, 100.0), ctx)
    }

    #[test]
    fn test_fixed_and_percent() {
        let mut ctx = LayoutContext::new(false, None);
        let mut item = FlowItem::new()
            .width(Length::Fixed(30.0))
            .height(Length::Percent(0.5));
        sizer(&mut ctx).resolve(0, &mut item, AxisPlan::default(), AxisPlan::default());
        assert_eq!(item.frame.size(), Size::new(30.0, 50.0));
    }

    #[test]
    fn test_fixed_respects_bounds() {
        let mut ctx = LayoutContext::new(false, None);
        let mut item = FlowItem::new()
            .width(SizeRule::new(Length::Fixed(300.0)).max(120.0))
            .height(Length::Fixed(-5.0));
        sizer(&mut ctx).resolve(0, &mut item, AxisPlan::default(), AxisPlan::default());
        assert_eq!(item.frame.size(), Size::new(120.0, 0.0));
    }

    #[test]
    fn test_aspect_width_from_height() {
        let mut ctx = LayoutContext::new(false, None);
        let mut item = FlowItem::new()
            .width(Length::Aspect(2.0))
            .height(Length::Fixed(15.0));
        sizer(&mut ctx).resolve(0, &mut item, AxisPlan::default(), AxisPlan::default());
        assert_eq!(item.frame.size(), Size::new(30.0, 15.0));
    }

    #[test]
    fn test_aspect_cycle_collapses() {
        let mut ctx = LayoutContext::new(false, None);
        let mut item = FlowItem::new()
            .width(Length::Aspect(1.0))
            .height(Length::Aspect(1.0));
        sizer(&mut ctx).resolve(4, &mut item, AxisPlan::default(), AxisPlan::default());
        assert_eq!(item.frame.size(), Size::ZERO);
        assert_eq!(ctx.warnings(), &[LayoutWarning::AspectCycle { item: 4 }]);
    }

    #[test]
    fn test_shrink_height_measured_for_width() {
        let mut ctx = LayoutContext::new(false, None);
        let mut item = FlowItem::new()
            .width(Length::Fixed(50.0))
            .content(Reflow { length: 120.0, line_height: 10.0 });
        sizer(&mut ctx).resolve(0, &mut item, AxisPlan::default(), AxisPlan::default());
        assert_eq!(item.frame.size(), Size::new(50.0, 30.0));
    }

    #[test]
    fn test_shrink_width_bounded_by_content() {
        let mut ctx = LayoutContext::new(false, None);
        let mut item = FlowItem::new()
            .margin_all(5.0)
            .content(measure_fn(|c: LayoutConstraints| Size::new(c.max_width, 8.0)));
        sizer(&mut ctx).resolve(0, &mut item, AxisPlan::default(), AxisPlan::default());
        assert_eq!(item.frame.size(), Size::new(190.0, 8.0));
    }

    #[test]
    fn test_weight_deferred_without_pool() {
        let mut ctx = LayoutContext::new(false, None);
        let mut item = FlowItem::new().width(Length::Fill).height(Length::Fixed(10.0));
        let mut s = sizer(&mut ctx);
        s.resolve(0, &mut item, AxisPlan::default(), AxisPlan::default());
        assert_eq!(item.frame.width, 0.0);

        s.resolve(0, &mut item, AxisPlan::default().with_pool(80.0), AxisPlan::default());
        assert_eq!(item.frame.width, 80.0);
    }

    #[test]
    fn test_forced_beats_rule_and_seed_beats_measure() {
        let mut ctx = LayoutContext::new(false, None);
        let mut item = FlowItem::new()
            .width(Length::Fixed(10.0))
            .content(measure_fn(|_| Size::new(1.0, 1.0)));
        sizer(&mut ctx).resolve(0, &mut item, AxisPlan::forced(70.0), AxisPlan::seeded(Some(33.0)));
        assert_eq!(item.frame.size(), Size::new(70.0, 33.0));
    }

    #[test]
    fn test_set_extent_refreshes_dependents() {
        let mut ctx = LayoutContext::new(false, None);
        let mut s = sizer(&mut ctx);

        let mut square = FlowItem::new().width(Length::Fill).height(Length::Aspect(0.5));
        s.resolve(0, &mut square, AxisPlan::default(), AxisPlan::default());
        s.set_extent(0, &mut square, Axis::Horizontal, 60.0, true);
        assert_eq!(square.frame.size(), Size::new(60.0, 30.0));

        let mut text = FlowItem::new()
            .width(Length::Fill)
            .content(Reflow { length: 100.0, line_height: 10.0 });
        s.set_extent(1, &mut text, Axis::Horizontal, 25.0, true);
        assert_eq!(text.frame.height, 40.0);
        s.set_extent(1, &mut text, Axis::Horizontal, 50.0, false);
        assert_eq!(text.frame.height, 40.0);
    }

    #[test]
    fn test_cap_extent_overrides_min() {
        let mut ctx = LayoutContext::new(false, None);
        let mut s = sizer(&mut ctx);
        let mut item = FlowItem::new()
            .width(SizeRule::new(Length::Fixed(50.0)).min(300.0))
            .height(Length::Aspect(0.5));
        s.resolve(0, &mut item, AxisPlan::default(), AxisPlan::default());
        assert_eq!(item.frame.width, 300.0);

        s.cap_extent(0, &mut item, Axis::Horizontal, 200.0);
        assert_eq!(item.frame.size(), Size::new(200.0, 100.0));
    }
}
