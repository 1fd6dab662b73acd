//! Paging inside a scroll host.
//!
//! With `paged_count > 0` in count mode, boxes are grouped into pages of
//! `paged_count` (`paged_count / arranged_count` lines each). Cell extents are
//! derived from the host's page extent so a page fills exactly one viewport.
//! Pages advance along the main axis when the container sizes itself along
//! it, otherwise along the cross axis.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::primitives::Size;

use super::axis::Axis;
use super::length::Insets;

/// The scroll container hosting a paged layout.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollHost {
    /// Viewport (page) size.
    pub size: Size,
    /// Whether the host snaps to whole pages.
    #[serde(default)]
    pub paging: bool,
}

impl ScrollHost {
    pub fn new(size: Size, paging: bool) -> Self {
        Self { size, paging }
    }
}

/// Per-pass paging geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PagePlan {
    pub main: Axis,
    /// Pages advance along the main axis.
    pub along_main: bool,
    pub host: ScrollHost,
    pub paged_count: usize,
    /// Cell extent along the main axis.
    pub item_main: f32,
    /// Cell extent along the cross axis.
    pub item_cross: f32,
}

/// Inputs that shape the page cells.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PageInputs {
    pub main: Axis,
    pub size: Size,
    pub padding: Insets,
    pub spacing: f32,
    pub line_spacing: f32,
    pub arranged_count: usize,
    pub paged_count: usize,
    pub main_wraps: bool,
}

impl PagePlan {
    /// `None` unless paging applies: count mode, a page size, and a host.
    pub fn new(inputs: PageInputs, host: Option<ScrollHost>) -> Option<Self> {
        let host = host?;
        if inputs.paged_count == 0 || inputs.arranged_count == 0 {
            return None;
        }
        let main = inputs.main;
        let cross = main.cross();
        let pad = &inputs.padding;
        let n = inputs.arranged_count as f32;
        let rows = (inputs.paged_count / inputs.arranged_count).max(1) as f32;

        let (item_main, item_cross) = if inputs.main_wraps {
            let item_main = if host.paging {
                (main.of(host.size) - main.total(pad) - (n - 1.0) * inputs.spacing) / n
            } else {
                (main.of(host.size) - main.leading(pad) - n * inputs.spacing) / n
            };
            let item_cross =
                (cross.of(inputs.size) - cross.total(pad) - (rows - 1.0) * inputs.line_spacing) / rows;
            (item_main, item_cross)
        } else {
            let item_main =
                (main.of(inputs.size) - main.total(pad) - (n - 1.0) * inputs.spacing) / n;
            let item_cross = if host.paging {
                (cross.of(host.size) - cross.total(pad) - (rows - 1.0) * inputs.line_spacing) / rows
            } else {
                (cross.of(host.size) - cross.leading(pad) - rows * inputs.line_spacing) / rows
            };
            (item_main, item_cross)
        };

        let plan = Self {
            main,
            along_main: inputs.main_wraps,
            host,
            paged_count: inputs.paged_count,
            item_main: item_main.max(0.0),
            item_cross: item_cross.max(0.0),
        };
        debug!(?plan, "paging");
        Some(plan)
    }

    /// Whether box `index` opens a new page (the first page is implicit).
    #[inline]
    pub fn is_page_start(&self, index: usize) -> bool {
        index > 0 && index % self.paged_count == 0
    }

    /// Move the line origin to the start of the next page.
    ///
    /// `cross_pos` is where the new line would start without paging; it has
    /// already been advanced past the previous line and its line spacing.
    pub fn turn_page(&self, cross_pos: &mut f32, page_offset: &mut f32, padding: &Insets, line_spacing: f32) {
        let main = self.main;
        let cross = main.cross();
        if self.along_main {
            *page_offset += main.of(self.host.size);
            if !self.host.paging {
                *page_offset -= main.leading(padding);
            }
            *cross_pos = cross.leading(padding);
        } else if self.host.paging {
            *cross_pos += cross.total(padding) - line_spacing;
        }
    }

    /// Grow a self-sizing extent so it covers every page.
    pub fn cover_pages(&self, size: &mut Size, item_count: usize, main_wraps: bool, cross_wraps: bool) {
        if !self.host.paging || item_count == 0 {
            return;
        }
        let pages = item_count.div_ceil(self.paged_count) as f32;
        let axis = if self.along_main { self.main } else { self.main.cross() };
        let wraps = if self.along_main { main_wraps } else { cross_wraps };
        if wraps {
            let covered = pages * axis.of(self.host.size);
            if axis.of(*size) < covered {
                axis.set(size, covered);
            }
        }
    }
}
