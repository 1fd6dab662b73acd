//! Layout context carried through one pass.
//!
//! The LayoutContext holds pass-wide state:
//! - Whether this is an estimate pass (nested containers are only measured)
//! - The scroll host the container sits in, if any
//! - Nesting depth for log output
//! - Conditions the engine corrected silently, for diagnostics

use serde::Serialize;
use tracing::warn;

use super::paging::ScrollHost;

/// A condition the engine corrected instead of failing on.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutWarning {
    /// Both axes of a box are ratios of each other; the box collapsed to zero.
    AspectCycle { item: usize },
    /// `paged_count` is not a multiple of `arranged_count`; the quotient was truncated.
    UnevenPaging { paged: usize, arranged: usize },
    /// The rearrangement search hit its step cap while filling the line that
    /// starts with `item`; the best line found so far was used.
    SearchCapped { item: usize },
    /// A lone box was wider than its line and was clamped to it.
    Oversized { item: usize, extent: f32, available: f32 },
    /// Conditions corrected inside the nested container held by box `item`.
    /// Indices in `warnings` refer to that container's own boxes.
    Nested { item: usize, warnings: Vec<LayoutWarning> },
}

/// State saved while a nested container runs.
#[derive(Debug)]
struct Scope {
    host: Option<ScrollHost>,
    estimate: bool,
    warnings: Vec<LayoutWarning>,
}

/// Layout context passed through a container and its nested containers.
#[derive(Debug)]
pub struct LayoutContext {
    estimate: bool,
    host: Option<ScrollHost>,
    has_sub_layout: bool,
    depth: u32,
    /// Enclosing containers, restored on `exit`.
    scopes: Vec<Scope>,
    warnings: Vec<LayoutWarning>,
}

impl LayoutContext {
    pub fn new(estimate: bool, host: Option<ScrollHost>) -> Self {
        Self {
            estimate,
            host,
            has_sub_layout: false,
            depth: 0,
            scopes: Vec::new(),
            warnings: Vec::new(),
        }
    }

    #[inline]
    pub fn is_estimate(&self) -> bool {
        self.estimate
    }

    #[inline]
    pub fn host(&self) -> Option<ScrollHost> {
        self.host
    }

    pub(crate) fn mark_sub_layout(&mut self) {
        self.has_sub_layout = true;
    }

    #[inline]
    pub fn has_sub_layout(&self) -> bool {
        self.has_sub_layout
    }

    /// Enter a nested container. The scroll host only applies to the
    /// outermost container; `estimate` turns the nested run into a
    /// measurement. Warnings collect separately until `exit`.
    pub fn enter(&mut self, estimate: bool) {
        self.scopes.push(Scope {
            host: self.host.take(),
            estimate: self.estimate,
            warnings: std::mem::take(&mut self.warnings),
        });
        self.estimate |= estimate;
        self.depth += 1;
    }

    /// Leave the nested container held by box `item`.
    ///
    /// Its warnings are recorded as one [`LayoutWarning::Nested`] when `keep`
    /// is set, and dropped otherwise. An identical entry is not repeated,
    /// since a container may be measured more than once per pass.
    pub fn exit(&mut self, item: usize, keep: bool) {
        let Some(scope) = self.scopes.pop() else {
            return;
        };
        let nested = std::mem::replace(&mut self.warnings, scope.warnings);
        self.host = scope.host;
        self.estimate = scope.estimate;
        self.depth = self.depth.saturating_sub(1);

        if keep && !nested.is_empty() {
            let warning = LayoutWarning::Nested { item, warnings: nested };
            if !self.warnings.contains(&warning) {
                self.warnings.push(warning);
            }
        }
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Record and log a corrected condition.
    pub fn warn(&mut self, warning: LayoutWarning) {
        warn!(depth = self.depth, ?warning, "layout condition corrected");
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[LayoutWarning] {
        &self.warnings
    }

    /// Take collected warnings.
    pub fn take_warnings(&mut self) -> Vec<LayoutWarning> {
        std::mem::take(&mut self.warnings)
    }
}
