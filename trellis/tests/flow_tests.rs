//! Integration tests for whole layout passes.
//!
//! Each test builds a container (through the builder API or a JSON scene),
//! runs one pass, and checks the frames written back onto the boxes.

use serde_json::json;
use trellis::ConfigError;
use trellis::layout::{
    Alignment, CrossAxisAlignment, FloatingSpacing, FlowItem, FlowLayout, LayoutOutput, LayoutWarning, Length,
    Orientation, ScrollHost,
};
use trellis::primitives::{Rect, Size};
use trellis::scene::Scene;

const TOLERANCE: f32 = 0.01;

/// Harness that runs a pass and keeps the container for inspection.
struct LayoutTest {
    layout: FlowLayout,
    output: LayoutOutput,
}

impl LayoutTest {
    fn run(mut layout: FlowLayout, available: Size, host: Option<ScrollHost>) -> Self {
        let output = layout.compute_layout(available, false, host);
        Self { layout, output }
    }

    /// Parse a scene and run it.
    fn scene(value: serde_json::Value) -> Self {
        let scene: Scene = serde_json::from_value(value).expect("scene should parse");
        let (layout, output) = scene.run();
        Self { layout, output }
    }

    fn frame(&self, index: usize) -> Rect {
        self.layout.items()[index].frame
    }

    fn expect_frame(&self, index: usize, x: f32, y: f32, width: f32, height: f32) {
        let frame = self.frame(index);
        let expected = Rect::new(x, y, width, height);
        let close = (frame.x - x).abs() < TOLERANCE
            && (frame.y - y).abs() < TOLERANCE
            && (frame.width - width).abs() < TOLERANCE
            && (frame.height - height).abs() < TOLERANCE;
        assert!(close, "box {index}: expected {expected:?}, got {frame:?}");
    }

    fn expect_size(&self, width: f32, height: f32) {
        let size = self.output.size;
        assert!(
            (size.width - width).abs() < TOLERANCE && (size.height - height).abs() < TOLERANCE,
            "expected container {width}x{height}, got {size:?}"
        );
    }

    fn line_items(&self) -> Vec<Vec<usize>> {
        self.output.lines.iter().map(|line| line.items.clone()).collect()
    }
}

fn fixed_boxes(n: usize, width: f32, height: f32) -> Vec<FlowItem> {
    (0..n).map(|_| FlowItem::fixed(width, height)).collect()
}

#[test]
fn test_three_per_line() {
    let t = LayoutTest::scene(json!({
        "available": { "width": 300, "height": 200 },
        "config": { "arranged_count": 3 },
        "items": [
            { "width": { "fixed": 100 }, "height": { "fixed": 20 } },
            { "width": { "fixed": 100 }, "height": { "fixed": 20 } },
            { "width": { "fixed": 100 }, "height": { "fixed": 20 } }
        ]
    }));
    t.expect_frame(0, 0.0, 0.0, 100.0, 20.0);
    t.expect_frame(1, 100.0, 0.0, 100.0, 20.0);
    t.expect_frame(2, 200.0, 0.0, 100.0, 20.0);
    assert_eq!(t.line_items(), vec![vec![0, 1, 2]]);
}

#[test]
fn test_fourth_box_wraps() {
    let t = LayoutTest::run(
        FlowLayout::new().arranged_count(3).children(fixed_boxes(4, 100.0, 20.0)),
        Size::new(300.0, 200.0),
        None,
    );
    t.expect_frame(3, 0.0, 20.0, 100.0, 20.0);
    assert_eq!(t.line_items(), vec![vec![0, 1, 2], vec![3]]);
}

#[test]
fn test_content_wrap_with_spacing() {
    let t = LayoutTest::run(
        FlowLayout::new().spacing(10.0).line_spacing(5.0).children(fixed_boxes(3, 120.0, 30.0)),
        Size::new(250.0, 100.0),
        None,
    );
    t.expect_frame(0, 0.0, 0.0, 120.0, 30.0);
    t.expect_frame(1, 130.0, 0.0, 120.0, 30.0);
    t.expect_frame(2, 0.0, 35.0, 120.0, 30.0);
    assert_eq!(t.output.lines[0].main_extent, 250.0);
    assert_eq!(t.output.lines[1].main_extent, 120.0);
}

#[test]
fn test_proportional_weights() {
    let t = LayoutTest::run(
        FlowLayout::new()
            .arranged_count(2)
            .child(FlowItem::new().width(Length::FillPortion(1.0)).height(Length::Fixed(10.0)))
            .child(FlowItem::new().width(Length::FillPortion(3.0)).height(Length::Fixed(10.0))),
        Size::new(400.0, 100.0),
        None,
    );
    t.expect_frame(0, 0.0, 0.0, 100.0, 10.0);
    t.expect_frame(1, 100.0, 0.0, 300.0, 10.0);
}

#[test]
fn test_paging_along_main_axis() {
    // Width wraps content, so pages advance horizontally one viewport apart
    let layout = FlowLayout::new()
        .arranged_count(3)
        .paged_count(6)
        .width(Length::Shrink)
        .children((0..9).map(|_| FlowItem::new()));
    let host = ScrollHost::new(Size::new(300.0, 300.0), true);
    let t = LayoutTest::run(layout, Size::new(0.0, 200.0), Some(host));

    t.expect_frame(0, 0.0, 0.0, 100.0, 100.0);
    t.expect_frame(5, 200.0, 100.0, 100.0, 100.0);
    t.expect_frame(6, 300.0, 0.0, 100.0, 100.0);
    t.expect_size(600.0, 200.0);
}

#[test]
fn test_paging_along_cross_axis() {
    let layout = FlowLayout::new()
        .arranged_count(3)
        .paged_count(6)
        .height(Length::Shrink)
        .children((0..9).map(|_| FlowItem::new()));
    let host = ScrollHost::new(Size::new(300.0, 200.0), true);
    let t = LayoutTest::run(layout, Size::new(300.0, 0.0), Some(host));

    t.expect_frame(3, 0.0, 100.0, 100.0, 100.0);
    t.expect_frame(6, 0.0, 200.0, 100.0, 100.0);
    // Two pages of the host's height
    t.expect_size(300.0, 400.0);
}

#[test]
fn test_paging_ignored_without_host() {
    let t = LayoutTest::run(
        FlowLayout::new().arranged_count(3).paged_count(6).children(fixed_boxes(7, 50.0, 10.0)),
        Size::new(300.0, 300.0),
        None,
    );
    t.expect_frame(6, 0.0, 20.0, 50.0, 10.0);
}

#[test]
fn test_uneven_paging_is_reported() {
    let t = LayoutTest::run(
        FlowLayout::new().arranged_count(3).paged_count(5).children(fixed_boxes(3, 10.0, 10.0)),
        Size::new(300.0, 300.0),
        None,
    );
    assert_eq!(
        t.output.warnings,
        vec![LayoutWarning::UnevenPaging { paged: 5, arranged: 3 }]
    );
}

#[test]
fn test_auto_arrange_packs_best_line() {
    let t = LayoutTest::run(
        FlowLayout::new()
            .auto_arrange(true)
            .child(FlowItem::fixed(60.0, 10.0))
            .child(FlowItem::fixed(50.0, 10.0))
            .child(FlowItem::fixed(40.0, 10.0)),
        Size::new(100.0, 100.0),
        None,
    );
    assert_eq!(t.line_items(), vec![vec![1, 2], vec![0]]);
    t.expect_frame(1, 0.0, 0.0, 50.0, 10.0);
    t.expect_frame(2, 50.0, 0.0, 40.0, 10.0);
    t.expect_frame(0, 0.0, 10.0, 60.0, 10.0);
}

#[test]
fn test_gravity_centers_content() {
    let t = LayoutTest::run(
        FlowLayout::new()
            .arranged_count(2)
            .horizontal_gravity(Alignment::Center)
            .vertical_gravity(Alignment::Center)
            .children(fixed_boxes(2, 50.0, 20.0)),
        Size::new(300.0, 100.0),
        None,
    );
    t.expect_frame(0, 100.0, 40.0, 50.0, 20.0);
    t.expect_frame(1, 150.0, 40.0, 50.0, 20.0);
}

#[test]
fn test_arranged_stretch() {
    let t = LayoutTest::run(
        FlowLayout::new()
            .arranged_count(2)
            .arranged_gravity(CrossAxisAlignment::Stretch)
            .child(FlowItem::fixed(30.0, 50.0))
            .child(FlowItem::new().width(Length::Fixed(30.0))),
        Size::new(200.0, 200.0),
        None,
    );
    t.expect_frame(1, 30.0, 0.0, 30.0, 50.0);
}

#[test]
fn test_arranged_end() {
    let t = LayoutTest::run(
        FlowLayout::new()
            .arranged_count(2)
            .arranged_gravity(CrossAxisAlignment::End)
            .child(FlowItem::fixed(30.0, 50.0))
            .child(FlowItem::fixed(30.0, 20.0)),
        Size::new(200.0, 200.0),
        None,
    );
    t.expect_frame(1, 30.0, 30.0, 30.0, 20.0);
}

#[test]
fn test_aspect_cycle_collapses() {
    let t = LayoutTest::run(
        FlowLayout::new()
            .arranged_count(2)
            .child(FlowItem::new().width(Length::Aspect(1.0)).height(Length::Aspect(1.0)))
            .child(FlowItem::fixed(20.0, 20.0)),
        Size::new(200.0, 200.0),
        None,
    );
    t.expect_frame(0, 0.0, 0.0, 0.0, 0.0);
    t.expect_frame(1, 0.0, 0.0, 20.0, 20.0);
    assert_eq!(t.output.warnings, vec![LayoutWarning::AspectCycle { item: 0 }]);
}

#[test]
fn test_aspect_follows_other_axis() {
    let t = LayoutTest::run(
        FlowLayout::new()
            .arranged_count(1)
            .child(FlowItem::new().width(Length::Fixed(80.0)).height(Length::Aspect(0.5))),
        Size::new(200.0, 200.0),
        None,
    );
    t.expect_frame(0, 0.0, 0.0, 80.0, 40.0);
}

#[test]
fn test_repeated_passes_match() {
    let value = json!({
        "available": { "width": 260, "height": 300 },
        "config": {
            "spacing": 6,
            "line_spacing": 4,
            "padding": { "top": 3, "right": 3, "bottom": 3, "left": 3 },
            "gravity": { "horizontal": "space_between", "vertical": "end" },
            "arranged_gravity": "center"
        },
        "items": [
            { "width": { "fixed": 90 }, "height": { "fixed": 30 } },
            { "width": "fill", "height": { "fixed": 12 } },
            { "content": { "reflow": { "length": 300, "line_height": 10 } } },
            { "width": { "percent": 0.25 }, "height": { "fixed": 20 } }
        ]
    });
    let scene: Scene = serde_json::from_value(value).unwrap();
    let first = scene.report();
    let second = scene.report();
    assert_eq!(first, second);
}

#[test]
fn test_nested_scene_laid_out() {
    let t = LayoutTest::scene(json!({
        "available": { "width": 300, "height": 300 },
        "config": { "arranged_count": 2, "spacing": 10 },
        "items": [
            { "width": { "fixed": 100 }, "height": { "fixed": 100 } },
            { "content": { "nested": {
                "config": { "arranged_count": 2, "width": "shrink", "height": "shrink" },
                "items": [
                    { "width": { "fixed": 25 }, "height": { "fixed": 25 } },
                    { "width": { "fixed": 25 }, "height": { "fixed": 25 } },
                    { "width": { "fixed": 25 }, "height": { "fixed": 25 } }
                ]
            } } }
        ]
    }));
    assert!(t.output.has_sub_layout);
    t.expect_frame(1, 110.0, 0.0, 50.0, 50.0);
}

#[test]
fn test_scene_validation() {
    let scene: Scene = serde_json::from_value(json!({
        "available": { "width": 100, "height": 100 },
        "config": { "arranged_count": 3, "paged_count": 5 },
        "items": []
    }))
    .unwrap();
    assert_eq!(
        scene.validate(),
        Err(ConfigError::UnevenPaging { paged: 5, arranged: 3 })
    );
}

#[test]
fn test_report_serializes_warnings() {
    let scene: Scene = serde_json::from_value(json!({
        "available": { "width": 100, "height": 100 },
        "items": [ { "width": { "fixed": 150 }, "height": { "fixed": 10 } } ]
    }))
    .unwrap();
    let report = serde_json::to_value(scene.report()).unwrap();
    assert_eq!(report["warnings"][0]["kind"], "oversized");
    assert_eq!(report["frames"][0]["frame"]["width"], 100.0);
}

#[test]
fn test_content_lines_stay_inside_padding() {
    let widths = [70.0, 35.0, 90.0, 20.0, 55.0, 60.0, 15.0, 80.0];
    for auto_arrange in [false, true] {
        let layout = FlowLayout::new()
            .padding(8.0)
            .spacing(4.0)
            .line_spacing(4.0)
            .auto_arrange(auto_arrange)
            .children(widths.iter().map(|&w| FlowItem::fixed(w, 12.0)));
        let t = LayoutTest::run(layout, Size::new(200.0, 400.0), None);

        let content = Rect::new(8.0, 8.0, 184.0, 384.0);
        for index in 0..widths.len() {
            assert!(content.contains(&t.frame(index), TOLERANCE), "box {index} escapes the content area");
        }
        for line in &t.output.lines {
            assert!(line.main_extent <= 184.0 + TOLERANCE);
        }
        let placed: usize = t.output.lines.iter().map(|line| line.len()).sum();
        assert_eq!(placed, widths.len());
    }
}

#[test]
fn test_floating_spacing_spreads_line() {
    // floor((230 + 10) / 60) = 4 boxes per line, (230 - 200) / 3 = 10 between them
    let layout = FlowLayout::new()
        .floating(FloatingSpacing::new(50.0, 10.0))
        .children((0..5).map(|_| FlowItem::new().height(Length::Fixed(10.0))));
    let t = LayoutTest::run(layout, Size::new(230.0, 100.0), None);

    for (index, x) in [0.0, 60.0, 120.0, 180.0].into_iter().enumerate() {
        t.expect_frame(index, x, 0.0, 50.0, 10.0);
    }
    t.expect_frame(4, 0.0, 10.0, 50.0, 10.0);
}

#[test]
fn test_horizontal_content_columns() {
    let t = LayoutTest::run(
        FlowLayout::new()
            .orientation(Orientation::Horizontal)
            .spacing(10.0)
            .line_spacing(5.0)
            .children(fixed_boxes(3, 30.0, 40.0)),
        Size::new(200.0, 100.0),
        None,
    );
    t.expect_frame(0, 0.0, 0.0, 30.0, 40.0);
    t.expect_frame(1, 0.0, 50.0, 30.0, 40.0);
    t.expect_frame(2, 35.0, 0.0, 30.0, 40.0);
    assert_eq!(t.line_items(), vec![vec![0, 1], vec![2]]);
}

#[test]
fn test_cross_gravity_space_between_lines() {
    let t = LayoutTest::run(
        FlowLayout::new()
            .arranged_count(1)
            .vertical_gravity(Alignment::SpaceBetween)
            .children(fixed_boxes(3, 30.0, 20.0)),
        Size::new(100.0, 100.0),
        None,
    );
    t.expect_frame(0, 0.0, 0.0, 30.0, 20.0);
    t.expect_frame(1, 0.0, 40.0, 30.0, 20.0);
    t.expect_frame(2, 0.0, 80.0, 30.0, 20.0);
}

#[test]
fn test_cross_gravity_fill_grows_lines() {
    let t = LayoutTest::run(
        FlowLayout::new()
            .arranged_count(1)
            .vertical_gravity(Alignment::Fill)
            .children(fixed_boxes(3, 30.0, 20.0)),
        Size::new(100.0, 100.0),
        None,
    );
    let third = 100.0 / 3.0;
    t.expect_frame(0, 0.0, 0.0, 30.0, third);
    t.expect_frame(1, 0.0, third, 30.0, third);
    t.expect_frame(2, 0.0, 2.0 * third, 30.0, third);
}

#[test]
fn test_paging_with_free_scrolling_host() {
    // Without page snapping each page after the first drops the leading padding
    let layout = FlowLayout::new()
        .arranged_count(2)
        .paged_count(2)
        .padding(10.0)
        .width(Length::Shrink)
        .children((0..4).map(|_| FlowItem::new()));
    let host = ScrollHost::new(Size::new(200.0, 100.0), false);
    let t = LayoutTest::run(layout, Size::new(0.0, 100.0), Some(host));

    let xs: Vec<f32> = (0..4).map(|index| t.frame(index).x).collect();
    assert_eq!(xs, vec![10.0, 105.0, 200.0, 295.0]);
    for index in 0..4 {
        t.expect_frame(index, xs[index], 10.0, 95.0, 80.0);
    }
    t.expect_size(400.0, 100.0);
}

