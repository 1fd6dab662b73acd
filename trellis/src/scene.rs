//! Scene files.
//!
//! A scene is a JSON description of one flow container, its boxes, and the
//! space it is laid out in. Nested containers are described inline.
//!
//! ```json
//! {
//!   "available": { "width": 300, "height": 200 },
//!   "config": { "arranged_count": 3, "spacing": 4 },
//!   "items": [
//!     { "width": { "fixed": 80 }, "height": { "fixed": 20 } },
//!     { "width": "fill", "content": { "reflow": { "length": 240, "line_height": 16 } } }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, SceneError};
use crate::layout::{
    FlowConfig, FlowItem, FlowLayout, Insets, Intrinsic, LayoutOutput, LayoutWarning, Line, Reflow,
    ScrollHost, SizeRule,
};
use crate::primitives::{Rect, Size};

/// Content of a box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentSpec {
    /// Fixed intrinsic size.
    Intrinsic { width: f32, height: f32 },
    /// Paragraph-like content that wraps to the width it gets.
    Reflow { length: f32, line_height: f32 },
    /// A nested flow container.
    Nested(ContainerSpec),
}

/// One box.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemSpec {
    pub width: SizeRule,
    pub height: SizeRule,
    pub margin: Insets,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<ContentSpec>,
}

/// A container and its boxes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerSpec {
    pub config: FlowConfig,
    pub items: Vec<ItemSpec>,
}

/// A container plus the inputs of one layout pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub available: Size,
    #[serde(default)]
    pub estimate: bool,
    #[serde(default)]
    pub host: Option<ScrollHost>,
    #[serde(flatten)]
    pub root: ContainerSpec,
}

/// Frame of a box, with the frames of a nested container's boxes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameReport {
    pub frame: Rect,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FrameReport>,
}

/// Outcome of laying out a scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneReport {
    pub size: Size,
    pub has_sub_layout: bool,
    pub lines: Vec<Line>,
    pub frames: Vec<FrameReport>,
    pub warnings: Vec<LayoutWarning>,
}

impl ItemSpec {
    pub fn build(&self) -> FlowItem {
        let item = FlowItem::new()
            .width(self.width)
            .height(self.height)
            .margin(self.margin);
        match &self.content {
            None => item,
            Some(ContentSpec::Intrinsic { width, height }) => {
                item.content(Intrinsic(Size::new(*width, *height)))
            }
            Some(ContentSpec::Reflow { length, line_height }) => item.content(Reflow {
                length: *length,
                line_height: *line_height,
            }),
            Some(ContentSpec::Nested(spec)) => item.nested(spec.build()),
        }
    }
}

impl ContainerSpec {
    pub fn build(&self) -> FlowLayout {
        FlowLayout::with_config(self.config.clone()).children(self.items.iter().map(ItemSpec::build))
    }

    /// Validate this container and every nested one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.config.validate()?;
        for item in &self.items {
            if let Some(ContentSpec::Nested(nested)) = &item.content {
                nested.validate()?;
            }
        }
        Ok(())
    }
}

impl Scene {
    pub fn from_json(text: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a scene file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.root.validate()
    }

    /// Build the container and run one pass.
    pub fn run(&self) -> (FlowLayout, LayoutOutput) {
        let mut layout = self.root.build();
        let output = layout.compute_layout(self.available, self.estimate, self.host);
        (layout, output)
    }

    /// Run the scene and collect every frame.
    pub fn report(&self) -> SceneReport {
        let (mut layout, output) = self.run();
        SceneReport {
            size: output.size,
            has_sub_layout: output.has_sub_layout,
            lines: output.lines,
            frames: frames(&mut layout),
            warnings: output.warnings,
        }
    }
}

fn frames(layout: &mut FlowLayout) -> Vec<FrameReport> {
    layout
        .items_mut()
        .iter_mut()
        .map(|item| FrameReport {
            frame: item.frame,
            children: item.sub_layout().map(frames).unwrap_or_default(),
        })
        .collect()
}
