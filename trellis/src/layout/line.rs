//! Line packing.
//!
//! Count mode chunks boxes into lines of exactly `arranged_count`. Content
//! mode wraps greedily: a box joins the current line while the line's used
//! extent plus spacing plus the box still fits within the available extent
//! (with [`EPSILON`](super::length::EPSILON) tolerance). A box alone on an
//! empty line always stays there.

use std::ops::Range;

use serde::Serialize;

use super::length::approx_le;

/// One row (vertical orientation) or column (horizontal orientation).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Line {
    /// Box indices in placement order.
    pub items: Vec<usize>,
    /// Main-axis extent of the boxes, margins, and gaps between them.
    pub main_extent: f32,
    /// Largest box cross extent including margins.
    pub cross_extent: f32,
}

impl Line {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Split `len` boxes into lines of `count`; the last line may be partial.
pub fn chunk_by_count(len: usize, count: usize) -> Vec<Range<usize>> {
    let count = count.max(1);
    (0..len)
        .step_by(count)
        .map(|start| start..(start + count).min(len))
        .collect()
}

/// Tracks how much of the current line is used.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LineCursor {
    available: f32,
    spacing: f32,
    used: f32,
    count: usize,
}

impl LineCursor {
    pub fn new(available: f32, spacing: f32) -> Self {
        Self {
            available,
            spacing,
            used: 0.0,
            count: 0,
        }
    }

    /// Whether a box of `extent` (margins included) fits on this line.
    pub fn fits(&self, extent: f32) -> bool {
        self.count == 0 || approx_le(self.used + self.spacing + extent, self.available)
    }

    /// Space a new box could still take, net of the gap before it.
    pub fn remaining(&self) -> f32 {
        let gap = if self.count == 0 { 0.0 } else { self.spacing };
        self.available - self.used - gap
    }

    /// Add a box; returns the offset of its leading margin edge from the line start.
    pub fn push(&mut self, extent: f32) -> f32 {
        let start = if self.count == 0 { 0.0 } else { self.used + self.spacing };
        self.used = start + extent;
        self.count += 1;
        start
    }

    pub fn used(&self) -> f32 {
        self.used
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn reset(&mut self) {
        self.used = 0.0;
        self.count = 0;
    }
}

/// Greedy wrap of `extents` (margins included) into lines of box indices.
pub fn greedy_lines(extents: &[f32], available: f32, spacing: f32) -> Vec<Vec<usize>> {
    let mut lines = Vec::new();
    let mut current = Vec::new();
    let mut cursor = LineCursor::new(available, spacing);

    for (index, &extent) in extents.iter().enumerate() {
        if !cursor.fits(extent) {
            lines.push(std::mem::take(&mut current));
            cursor.reset();
        }
        cursor.push(extent);
        current.push(index);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_by_count() {
        assert_eq!(chunk_by_count(7, 3), vec![0..3, 3..6, 6..7]);
        assert_eq!(chunk_by_count(6, 3), vec![0..3, 3..6]);
        assert!(chunk_by_count(0, 3).is_empty());
    }

    #[test]
    fn test_greedy_two_per_line() {
        // 3 x 120 with spacing 10 in 250: 120 + 10 + 120 = 250 fits exactly
        let lines = greedy_lines(&[120.0, 120.0, 120.0], 250.0, 10.0);
        assert_eq!(lines, vec![vec![0, 1], vec![2]]);
    }

    #[test]
    fn test_greedy_tolerates_rounding() {
        let third = 100.0 / 3.0;
        let lines = greedy_lines(&[third, third, third], 100.0, 0.0);
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_greedy_oversized_alone() {
        let lines = greedy_lines(&[300.0, 20.0, 20.0], 100.0, 0.0);
        assert_eq!(lines, vec![vec![0], vec![1, 2]]);
    }

    #[test]
    fn test_cursor_remaining_and_push() {
        let mut cursor = LineCursor::new(100.0, 10.0);
        assert_eq!(cursor.remaining(), 100.0);
        assert_eq!(cursor.push(30.0), 0.0);
        assert_eq!(cursor.remaining(), 60.0);
        assert_eq!(cursor.push(20.0), 40.0);
        assert_eq!(cursor.used(), 60.0);
        assert!(!cursor.fits(31.0));
        assert!(cursor.fits(30.0));
    }
}
