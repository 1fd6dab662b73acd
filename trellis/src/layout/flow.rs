//! Flow layout - boxes placed along lines that wrap.
//!
//! Boxes are laid out along the main axis until a line is full, then a new
//! line starts along the cross axis. A line is full either after
//! `arranged_count` boxes (count mode) or when the next box no longer fits
//! (content mode). Both orientations run through the same passes; only the
//! axis pair differs.
//!
//! A pass is deterministic: frames are reset at the start, so laying out the
//! same boxes with the same inputs twice gives identical frames.

use tracing::{debug, trace};

use crate::primitives::{Rect, Size};

use super::auto_arrange;
use super::axis::{Axis, Orientation};
use super::config::{FloatingSpacing, FlowConfig};
use super::constraints::LayoutConstraints;
use super::context::{LayoutContext, LayoutWarning};
use super::gravity::{self, LineAlign};
use super::item::{FlowItem, Measure};
use super::length::{Alignment, CrossAxisAlignment, EPSILON, Gravity, Insets, Length, SizeRule, approx_le};
use super::line::{Line, LineCursor, chunk_by_count};
use super::paging::{PageInputs, PagePlan, ScrollHost};
use super::sizing::{AxisPlan, Sizer};
use super::weight::{self, LineWeights};

/// Result of one layout pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutOutput {
    /// Resolved container size.
    pub size: Size,
    /// Whether any box is itself a container.
    pub has_sub_layout: bool,
    /// Lines in stacking order.
    pub lines: Vec<Line>,
    /// Conditions corrected during the pass.
    pub warnings: Vec<LayoutWarning>,
}

/// A flow container and the boxes it arranges.
pub struct FlowLayout {
    config: FlowConfig,
    items: Vec<FlowItem>,
}

/// Which physical axes size themselves from content.
#[derive(Debug, Clone, Copy, Default)]
struct Wraps {
    width: bool,
    height: bool,
}

impl Wraps {
    fn along(self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }
}

/// Map main/cross values onto (width, height).
#[inline]
fn physical<T>(main: Axis, on_main: T, on_cross: T) -> (T, T) {
    match main {
        Axis::Horizontal => (on_main, on_cross),
        Axis::Vertical => (on_cross, on_main),
    }
}

impl FlowLayout {
    /// Create an empty container that takes the size it is given.
    pub fn new() -> Self {
        Self::with_config(FlowConfig::default())
    }

    pub fn with_config(config: FlowConfig) -> Self {
        Self {
            config,
            items: Vec::new(),
        }
    }

    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.config.orientation = orientation;
        self
    }

    /// Boxes per line; 0 wraps by content.
    pub fn arranged_count(mut self, count: usize) -> Self {
        self.config.arranged_count = count;
        self
    }

    /// Boxes per page when hosted by a scroll container.
    pub fn paged_count(mut self, count: usize) -> Self {
        self.config.paged_count = count;
        self
    }

    pub fn auto_arrange(mut self, enabled: bool) -> Self {
        self.config.auto_arrange = enabled;
        self
    }

    /// Set uniform padding.
    pub fn padding(mut self, padding: f32) -> Self {
        self.config.padding = Insets::all(padding);
        self
    }

    /// Set custom padding.
    pub fn padding_custom(mut self, padding: Insets) -> Self {
        self.config.padding = padding;
        self
    }

    /// Gap between boxes of a line.
    pub fn spacing(mut self, spacing: f32) -> Self {
        self.config.spacing = spacing;
        self
    }

    /// Gap between lines.
    pub fn line_spacing(mut self, spacing: f32) -> Self {
        self.config.line_spacing = spacing;
        self
    }

    pub fn gravity(mut self, gravity: Gravity) -> Self {
        self.config.gravity = gravity;
        self
    }

    pub fn horizontal_gravity(mut self, alignment: Alignment) -> Self {
        self.config.gravity.horizontal = alignment;
        self
    }

    pub fn vertical_gravity(mut self, alignment: Alignment) -> Self {
        self.config.gravity.vertical = alignment;
        self
    }

    /// Alignment of boxes within their line.
    pub fn arranged_gravity(mut self, alignment: CrossAxisAlignment) -> Self {
        self.config.arranged_gravity = alignment;
        self
    }

    pub fn floating(mut self, floating: FloatingSpacing) -> Self {
        self.config.floating = Some(floating);
        self
    }

    pub fn width(mut self, width: impl Into<SizeRule>) -> Self {
        self.config.width = width.into();
        self
    }

    pub fn height(mut self, height: impl Into<SizeRule>) -> Self {
        self.config.height = height.into();
        self
    }

    /// Add a box.
    pub fn child(mut self, item: FlowItem) -> Self {
        self.items.push(item);
        self
    }

    /// Add several boxes.
    pub fn children(mut self, items: impl IntoIterator<Item = FlowItem>) -> Self {
        self.items.extend(items);
        self
    }

    pub fn push(&mut self, item: FlowItem) {
        self.items.push(item);
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut FlowConfig {
        &mut self.config
    }

    pub fn items(&self) -> &[FlowItem] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [FlowItem] {
        &mut self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Lay out every box and resolve the container's size.
    ///
    /// `available` is the size offered by the parent; axes whose own rule is
    /// `Shrink` are computed from content instead. An estimate pass only
    /// measures nested containers; a final pass also lays each of them out
    /// at its resolved frame. `host` is the scroll container used for paging.
    pub fn compute_layout(&mut self, available: Size, estimate: bool, host: Option<ScrollHost>) -> LayoutOutput {
        let mut ctx = LayoutContext::new(estimate, host);
        let (size, lines) = self.run(&mut ctx, available, true);
        LayoutOutput {
            size,
            has_sub_layout: ctx.has_sub_layout(),
            lines,
            warnings: ctx.take_warnings(),
        }
    }

    /// One pass. `own_rules` is false when a parent already fixed our frame.
    pub(crate) fn run(&mut self, ctx: &mut LayoutContext, available: Size, own_rules: bool) -> (Size, Vec<Line>) {
        let (size, wraps) = self.initial_size(available, own_rules);

        for item in &mut self.items {
            item.frame = Rect::ZERO;
        }
        if self.items.iter_mut().any(|item| item.is_container()) {
            ctx.mark_sub_layout();
        }

        let count_mode = self.config.arranged_count > 0;
        debug!(
            mode = if count_mode { "count" } else { "content" },
            boxes = self.items.len(),
            width = size.width,
            height = size.height,
            estimate = ctx.is_estimate(),
            depth = ctx.depth(),
            "flow layout"
        );

        let (mut size, lines) = if self.items.is_empty() {
            (self.empty_size(size, wraps), Vec::new())
        } else if count_mode {
            self.arrange_by_count(ctx, size, wraps)
        } else {
            self.arrange_by_content(ctx, size, wraps)
        };

        if own_rules {
            size.width = self.config.width.clamp(size.width);
            size.height = self.config.height.clamp(size.height);
        }

        if !ctx.is_estimate() {
            for (index, item) in self.items.iter_mut().enumerate() {
                let frame = item.frame.size();
                if let Some(nested) = item.sub_layout() {
                    ctx.enter(false);
                    nested.run(ctx, frame, false);
                    ctx.exit(index, true);
                }
            }
        }

        debug!(width = size.width, height = size.height, lines = lines.len(), "flow layout done");
        (size, lines)
    }

    /// Size before content is known, and which axes size from content.
    fn initial_size(&self, available: Size, own_rules: bool) -> (Size, Wraps) {
        if !own_rules {
            return (available, Wraps::default());
        }
        let config = &self.config;
        let mut size = available;
        for axis in [Axis::Horizontal, Axis::Vertical] {
            let rule = match axis {
                Axis::Horizontal => &config.width,
                Axis::Vertical => &config.height,
            };
            match rule.length {
                Length::Fixed(value) => axis.set(&mut size, value),
                Length::Percent(fraction) => {
                    axis.set(&mut size, axis.of(available) * fraction)
                }
                _ => {}
            }
        }
        match (config.width.length, config.height.length) {
            (Length::Aspect(ratio), h) if !h.is_aspect() => size.width = size.height * ratio,
            (w, Length::Aspect(ratio)) if !w.is_aspect() => size.height = size.width * ratio,
            _ => {}
        }
        let wraps = Wraps {
            width: config.width.length.is_shrink(),
            height: config.height.length.is_shrink(),
        };
        (size, wraps)
    }

    /// An empty container shrinks to its padding on self-sizing axes.
    fn empty_size(&self, mut size: Size, wraps: Wraps) -> Size {
        let padding = &self.config.padding;
        if wraps.width {
            size.width = padding.horizontal();
        }
        if wraps.height {
            size.height = padding.vertical();
        }
        size
    }

    /// Count mode: every line holds `arranged_count` boxes.
    fn arrange_by_count(&mut self, ctx: &mut LayoutContext, size: Size, wraps: Wraps) -> (Size, Vec<Line>) {
        let FlowLayout { config, items } = self;
        let main = config.orientation.main_axis();
        let cross = main.cross();
        let pad = config.padding;
        let count = config.arranged_count;
        let content = content_size(size, &pad);

        let main_gravity = config.gravity.along(main);
        // Uniform columns take the container's main extent as given
        let uniform = main_gravity == Alignment::Fill;
        let main_wraps = wraps.along(main) && !uniform;
        let cross_wraps = wraps.along(cross);

        if config.paged_count > 0 && config.paged_count % count != 0 {
            ctx.warn(LayoutWarning::UnevenPaging {
                paged: config.paged_count,
                arranged: count,
            });
        }
        let pages = PagePlan::new(
            PageInputs {
                main,
                size,
                padding: pad,
                spacing: config.spacing,
                line_spacing: config.line_spacing,
                arranged_count: count,
                paged_count: config.paged_count,
                main_wraps,
            },
            ctx.host(),
        );
        let remeasure = pages.is_none();
        let uniform_extent =
            (main.of(content) - (count as f32 - 1.0) * config.spacing) / count as f32;

        let ranges = chunk_by_count(items.len(), count);
        let mut sizer = Sizer::new(content, ctx);

        // Extents, with main-axis weights shared per line
        for range in &ranges {
            let mut totals = LineWeights::default();
            for index in range.clone() {
                let item = &mut items[index];
                let on_main = if uniform {
                    AxisPlan::forced(uniform_extent - item.margin_along(main))
                } else {
                    AxisPlan::seeded(pages.map(|p| p.item_main))
                };
                let on_cross = AxisPlan::seeded(pages.map(|p| p.item_cross));
                let (width, height) = physical(main, on_main, on_cross);
                sizer.resolve(index, item, width, height);
                totals.add(item, main);
            }
            if !uniform {
                let line: Vec<usize> = range.clone().collect();
                weight::distribute(
                    &mut sizer,
                    items,
                    &line,
                    main,
                    totals,
                    main.of(content),
                    config.spacing,
                    remeasure,
                );
            }
        }

        // Positions
        let mut lines: Vec<Line> = Vec::with_capacity(ranges.len());
        let mut cross_pos = cross.leading(&pad);
        let mut page_offset = 0.0f32;
        let mut main_end = main.leading(&pad);

        for (line_no, range) in ranges.iter().enumerate() {
            if let Some(previous) = lines.last() {
                cross_pos += previous.cross_extent + config.line_spacing;
                if let Some(pages) = &pages {
                    if pages.is_page_start(range.start) {
                        pages.turn_page(&mut cross_pos, &mut page_offset, &pad, config.line_spacing);
                        trace!(line = line_no, page_offset, cross_pos, "page break");
                    }
                }
            }

            let line_start = main.leading(&pad) + page_offset;
            let mut cursor = LineCursor::new(main.of(content), config.spacing);
            let mut line = Line::default();
            for index in range.clone() {
                let item = &mut items[index];
                let cross_rule = item.rule(cross).length;
                if cross_rule.is_weighted() {
                    let pool = cross.of(size) - cross_pos - cross.trailing(&pad);
                    let extent = pool * cross_rule.weight() - item.margin_along(cross);
                    sizer.set_extent(index, item, cross, extent, remeasure);
                }
                place(item, main, line_start + cursor.push(item.outer_extent(main)), cross_pos);
                line.cross_extent = line.cross_extent.max(item.outer_extent(cross));
                line.items.push(index);
            }
            line.main_extent = cursor.used();
            main_end = main_end.max(line_start + line.main_extent);
            trace!(
                line = line_no,
                boxes = line.len(),
                main = line.main_extent,
                cross = line.cross_extent,
                "count line"
            );
            lines.push(line);
        }

        let align = LineAlign {
            main,
            gravity: main_gravity,
            arranged: config.arranged_gravity,
            available: if main_wraps { widest(&lines) } else { main.of(content) },
            arranged_count: count,
        };
        align_lines(items, &lines, &align);

        let mut size = size;
        settle_cross(items, &mut lines, &mut size, cross, &pad, config.gravity.along(cross), cross_pos, cross_wraps);
        if main_wraps {
            main.set(&mut size, main_end + main.trailing(&pad));
        }
        if let Some(pages) = &pages {
            pages.cover_pages(&mut size, items.len(), main_wraps, cross_wraps);
        }
        (size, lines)
    }

    /// Content mode: a line takes boxes while they fit.
    fn arrange_by_content(&mut self, ctx: &mut LayoutContext, size: Size, wraps: Wraps) -> (Size, Vec<Line>) {
        let FlowLayout { config, items } = self;
        let main = config.orientation.main_axis();
        let cross = main.cross();
        let pad = config.padding;
        let content = content_size(size, &pad);
        let main_wraps = wraps.along(main);
        let cross_wraps = wraps.along(cross);

        let (spacing, floating_size) = match &config.floating {
            Some(floating) => {
                let (spacing, item_size) = floating.resolve(main.of(content), config.spacing);
                (spacing, Some(item_size))
            }
            None => (config.spacing, None),
        };

        let mut sizer = Sizer::new(content, ctx);

        let order: Vec<usize> = if config.auto_arrange {
            // Stable extents against the full line for the search
            for (index, item) in items.iter_mut().enumerate() {
                let on_main = AxisPlan::seeded(floating_size).with_pool(main.of(content));
                let on_cross = AxisPlan::default().with_pool(cross.of(content));
                let (width, height) = physical(main, on_main, on_cross);
                sizer.resolve(index, item, width, height);
            }
            let extents: Vec<f32> = items
                .iter()
                .map(|item| item.outer_extent(main).min(main.of(content)))
                .collect();
            let arrangement = auto_arrange::plan(&extents, main.of(content), spacing);
            // Placement re-wraps the order, so report a capped line by its first box
            for &line in &arrangement.capped {
                if let Some(&item) = arrangement.lines[line].first() {
                    sizer.ctx().warn(LayoutWarning::SearchCapped { item });
                }
            }
            arrangement.order()
        } else {
            (0..items.len()).collect()
        };

        let mut lines: Vec<Line> = Vec::new();
        let mut line = Line::default();
        let mut cursor = LineCursor::new(main.of(content), spacing);
        let mut cross_pos = cross.leading(&pad);
        let line_spacing = config.line_spacing;

        for &index in &order {
            let item = &mut items[index];

            // A weighted box needs room on the line to take a share of
            if item.rule(main).length.is_weighted() && !cursor.is_empty() && cursor.remaining() <= EPSILON {
                close_line(&mut lines, &mut line, &mut cursor, &mut cross_pos, line_spacing);
            }

            let main_pool = if cursor.is_empty() { main.of(content) } else { cursor.remaining() };
            let on_main = AxisPlan::seeded(floating_size).with_pool(main_pool);
            let on_cross = AxisPlan::default().with_pool(cross.of(size) - cross_pos - cross.trailing(&pad));
            let (width, height) = physical(main, on_main, on_cross);
            sizer.resolve(index, item, width, height);

            let mut extent = item.outer_extent(main);
            if !cursor.fits(extent) {
                close_line(&mut lines, &mut line, &mut cursor, &mut cross_pos, line_spacing);
                let cross_rule = item.rule(cross).length;
                if cross_rule.is_weighted() {
                    let pool = cross.of(size) - cross_pos - cross.trailing(&pad);
                    let value = pool * cross_rule.weight() - item.margin_along(cross);
                    sizer.set_extent(index, item, cross, value, true);
                }
            }
            if cursor.is_empty() && !approx_le(extent, main.of(content)) {
                sizer.ctx().warn(LayoutWarning::Oversized {
                    item: index,
                    extent,
                    available: main.of(content),
                });
                let cap = main.of(content) - item.margin_along(main);
                sizer.cap_extent(index, item, main, cap);
                extent = item.outer_extent(main);
            }

            place(item, main, main.leading(&pad) + cursor.push(extent), cross_pos);
            line.cross_extent = line.cross_extent.max(item.outer_extent(cross));
            line.items.push(index);
        }
        if !line.is_empty() {
            line.main_extent = cursor.used();
            trace!(line = lines.len(), boxes = line.len(), main = line.main_extent, "content line");
            lines.push(line);
        }

        let longest = widest(&lines);
        let align = LineAlign {
            main,
            gravity: config.gravity.along(main),
            arranged: config.arranged_gravity,
            available: if main_wraps { longest } else { main.of(content) },
            arranged_count: 0,
        };
        align_lines(items, &lines, &align);

        let mut size = size;
        settle_cross(items, &mut lines, &mut size, cross, &pad, config.gravity.along(cross), cross_pos, cross_wraps);
        if main_wraps {
            main.set(&mut size, longest + main.total(&pad));
        }
        (size, lines)
    }
}

impl Default for FlowLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FlowLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlowLayout")
            .field("config", &self.config)
            .field("items", &self.items)
            .finish()
    }
}

/// Standalone measurement. Conditions corrected here are logged but not
/// returned; inside a pass, nested containers are measured through the
/// pass's own context instead.
impl Measure for FlowLayout {
    fn measure(&mut self, constraints: LayoutConstraints) -> Size {
        let mut ctx = LayoutContext::new(true, None);
        let (size, _) = self.run(&mut ctx, constraints.biggest(), true);
        size
    }

    fn as_sub_layout(&mut self) -> Option<&mut FlowLayout> {
        Some(self)
    }
}

fn content_size(size: Size, padding: &Insets) -> Size {
    Size::new(
        (size.width - padding.horizontal()).max(0.0),
        (size.height - padding.vertical()).max(0.0),
    )
}

/// Position a box whose leading margin edge sits at `main_start` on a line
/// starting at `cross_start`.
fn place(item: &mut FlowItem, main: Axis, main_start: f32, cross_start: f32) {
    let cross = main.cross();
    let main_offset = main_start + main.leading(&item.margin);
    let cross_offset = cross_start + cross.leading(&item.margin);
    main.set_offset(&mut item.frame, main_offset);
    cross.set_offset(&mut item.frame, cross_offset);
}

fn close_line(lines: &mut Vec<Line>, line: &mut Line, cursor: &mut LineCursor, cross_pos: &mut f32, line_spacing: f32) {
    line.main_extent = cursor.used();
    *cross_pos += line.cross_extent + line_spacing;
    trace!(line = lines.len(), boxes = line.len(), main = line.main_extent, "content line");
    lines.push(std::mem::take(line));
    cursor.reset();
}

fn widest(lines: &[Line]) -> f32 {
    lines.iter().map(|line| line.main_extent).fold(0.0, f32::max)
}

fn align_lines(items: &mut [FlowItem], lines: &[Line], align: &LineAlign) {
    let last = lines.len().saturating_sub(1);
    for (k, line) in lines.iter().enumerate() {
        gravity::align_line(items, line, k == last, align);
    }
}

/// Size a self-sizing cross axis from the stack of lines, or spread the
/// lines by cross gravity when the cross extent is given. `last_start` is
/// where the last line begins.
#[allow(clippy::too_many_arguments)]
fn settle_cross(
    items: &mut [FlowItem],
    lines: &mut [Line],
    size: &mut Size,
    cross: Axis,
    pad: &Insets,
    gravity: Alignment,
    last_start: f32,
    cross_wraps: bool,
) {
    let stack_end = last_start + lines.last().map_or(0.0, |line| line.cross_extent);
    if cross_wraps {
        cross.set(size, stack_end + cross.trailing(pad));
    } else {
        let leftover = cross.of(*size) - cross.trailing(pad) - stack_end;
        gravity::distribute_lines(items, lines, cross, gravity, leftover);
    }
}
