//! Best-fit line selection.
//!
//! Greedy wrapping leaves a gap at the end of a line whenever the next box is
//! too big for it. When auto-arrange is on, each line is instead filled with
//! the in-order subsequence of the remaining boxes whose total comes closest
//! to the available extent without exceeding it. The chosen boxes leave the
//! pool and the search repeats for the next line.
//!
//! The search is a depth-first walk over subsequences with an explicit stack.
//! At each level it extends the current subsequence with the next candidates
//! in order and stops at the first one that no longer fits. A perfect fit ends
//! the level early. The number of extensions per line is capped at
//! [`MAX_SEARCH_STEPS`]; past the cap the best line found so far is used.

use tracing::trace;

use super::length::{approx_eq, approx_le};

/// Extension attempts allowed per line.
pub const MAX_SEARCH_STEPS: usize = 1 << 16;

/// Lines chosen by the search, as indices into the original extents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arrangement {
    pub lines: Vec<Vec<usize>>,
    /// Lines (by position in `lines`) whose search hit the step cap.
    pub capped: Vec<usize>,
}

impl Arrangement {
    /// Boxes in arranged order.
    pub fn order(&self) -> Vec<usize> {
        self.lines.iter().flatten().copied().collect()
    }
}

/// Reorder boxes so each line is filled as tightly as possible.
///
/// `extents` are main-axis extents including margins. Returns a permutation of
/// `0..extents.len()` that keeps the relative order within each line.
pub fn arrange(extents: &[f32], available: f32, spacing: f32) -> Vec<usize> {
    plan(extents, available, spacing).order()
}

/// Run the search and report the chosen lines.
pub fn plan(extents: &[f32], available: f32, spacing: f32) -> Arrangement {
    let mut pool: Vec<usize> = (0..extents.len()).collect();
    let mut arrangement = Arrangement::default();

    while !pool.is_empty() {
        let (picked, capped) = best_line(&pool, extents, available, spacing);
        if capped {
            arrangement.capped.push(arrangement.lines.len());
        }

        // `picked` holds ascending positions into `pool`
        let line: Vec<usize> = picked.iter().map(|&p| pool[p]).collect();
        for &p in picked.iter().rev() {
            pool.remove(p);
        }
        trace!(line = arrangement.lines.len(), boxes = ?line, "auto-arrange line");
        arrangement.lines.push(line);
    }
    arrangement
}

struct Frame {
    /// Next pool position to try at this level.
    next: usize,
    /// Total of the subsequence this level extends.
    total: f32,
}

/// Positions in `pool` of the best line, and whether the cap was hit.
fn best_line(pool: &[usize], extents: &[f32], available: f32, spacing: f32) -> (Vec<usize>, bool) {
    let mut best: Vec<usize> = Vec::new();
    let mut best_total = 0.0f32;
    let mut chosen: Vec<usize> = Vec::new();
    let mut stack = vec![Frame { next: 0, total: 0.0 }];
    let mut steps = 0usize;
    let mut capped = false;

    while let Some(frame) = stack.last_mut() {
        if frame.next >= pool.len() {
            stack.pop();
            chosen.pop();
            continue;
        }
        if steps >= MAX_SEARCH_STEPS {
            capped = true;
            break;
        }
        steps += 1;

        let position = frame.next;
        let gap = if chosen.is_empty() { 0.0 } else { spacing };
        let total = frame.total + gap + extents[pool[position]];

        if !approx_le(total, available) {
            // A level ends at its first box that does not fit
            frame.next = pool.len();
            continue;
        }

        frame.next += 1;
        if total > best_total || best.is_empty() {
            best_total = total;
            best.clear();
            best.extend(chosen.iter().copied());
            best.push(position);
        }
        if approx_eq(total, available) {
            frame.next = pool.len();
            continue;
        }

        chosen.push(position);
        stack.push(Frame {
            next: position + 1,
            total,
        });
    }

    if best.is_empty() {
        // Nothing fits on its own; the first box takes a line by itself
        best.push(0);
    }
    (best, capped)
}
