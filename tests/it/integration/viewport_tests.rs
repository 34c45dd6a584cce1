//! Viewport Integration Tests

use crate::helpers::{TestCanvasBuilder, count_viewport_changes};
use zoomboard::{
    CanvasEvent, CanvasSettings, Item, Modifiers, Point, PointerButton, SettingsError, Vector,
};

fn approx(a: Point, b: Point) -> bool {
    (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
}

#[test]
fn test_zoom_keeps_pivot_stationary() {
    let mut t = TestCanvasBuilder::new().build();
    t.canvas.pan(Vector::new(37.0, -12.0));

    let pivot = Point::new(200.0, 150.0);
    let logical = t.canvas.to_logical(pivot);
    assert!(t.canvas.zoom(1.1, pivot));

    assert!((t.canvas.viewport().scale() - 1.1).abs() < 1e-12);
    assert!(approx(t.canvas.to_viewport(logical), pivot));
    assert_eq!(count_viewport_changes(&t.drain()), 2);
}

#[test]
fn test_zoom_is_clamped_and_silent_at_bounds() {
    let mut t = TestCanvasBuilder::new().build();

    assert!(t.canvas.zoom(100.0, Point::ZERO));
    assert_eq!(t.canvas.viewport().scale(), 2.0);
    assert!(!t.canvas.zoom_in(Point::ZERO));

    t.drain();
    assert!(!t.canvas.zoom(1.5, Point::new(10.0, 10.0)));
    assert!(t.drain().is_empty());

    assert!(t.canvas.zoom(1e-6, Point::ZERO));
    assert_eq!(t.canvas.viewport().scale(), 0.1);
}

#[test]
fn test_zoom_in_then_out_round_trips() {
    let mut t = TestCanvasBuilder::new().build();
    let pivot = Point::new(320.0, 240.0);
    let logical = t.canvas.to_logical(pivot);

    t.canvas.zoom_in(pivot);
    t.canvas.zoom_out(pivot);

    assert!((t.canvas.viewport().scale() - 1.0).abs() < 1e-12);
    assert!(approx(t.canvas.to_logical(pivot), logical));
}

#[test]
fn test_middle_button_pans() {
    let mut t = TestCanvasBuilder::new().with_box(100.0, 100.0).build();

    // Starting on an item still pans.
    t.canvas
        .pointer_down(Point::new(105.0, 105.0), PointerButton::Middle, Modifiers::NONE);
    t.move_to(155.0, 125.0);
    t.up(155.0, 125.0);

    assert_eq!(t.canvas.viewport().location(), Point::new(-50.0, -20.0));
    assert_eq!(t.position(0), Point::new(100.0, 100.0));
    assert_eq!(
        t.drain(),
        vec![CanvasEvent::ViewportChanged {
            location: Point::new(-50.0, -20.0),
            scale: 1.0,
        }]
    );
}

#[test]
fn test_middle_button_pan_respects_scale() {
    let mut t = TestCanvasBuilder::new().build();
    t.canvas.zoom(2.0, Point::ZERO);

    t.canvas
        .pointer_down(Point::new(100.0, 100.0), PointerButton::Middle, Modifiers::NONE);
    t.move_to(150.0, 100.0);
    t.up(150.0, 100.0);

    assert_eq!(t.canvas.viewport().location(), Point::new(-25.0, 0.0));
}

#[test]
fn test_overscroll_margin_clamps_pan() {
    let settings = CanvasSettings {
        overscroll_margin: Some(100.0),
        ..Default::default()
    };
    let mut t = TestCanvasBuilder::new()
        .with_settings(settings)
        .with_view_size(100.0, 100.0)
        .with_item(Item::new(0.0, 0.0, 1000.0, 1000.0))
        .build();

    t.canvas.pan(Vector::new(-500.0, -30.0));
    assert_eq!(t.canvas.viewport().location(), Point::new(-100.0, -30.0));

    t.canvas.pan(Vector::new(5_000.0, 5_000.0));
    assert_eq!(t.canvas.viewport().location(), Point::new(1_000.0, 1_000.0));
}

#[test]
fn test_extent_tracks_items() {
    let settings = CanvasSettings {
        extent_margin: 10.0,
        ..Default::default()
    };
    let mut t = TestCanvasBuilder::new()
        .with_settings(settings)
        .with_box(0.0, 0.0)
        .with_box(100.0, 50.0)
        .build();

    let extent = t.canvas.viewport().extent();
    assert_eq!((extent.min_x, extent.min_y), (-10.0, -10.0));
    assert_eq!((extent.max_x, extent.max_y), (130.0, 80.0));

    // Real-time drags grow the extent as they go.
    t.down(105.0, 55.0);
    t.move_to(205.0, 55.0);
    assert_eq!(t.canvas.viewport().extent().max_x, 230.0);
    t.up(205.0, 55.0);

    let moved = t.id(1);
    t.canvas.remove_item(moved);
    assert_eq!(t.canvas.viewport().extent().max_x, 30.0);
}

#[test]
fn test_deferred_drag_updates_extent_on_commit() {
    let mut t = TestCanvasBuilder::new()
        .with_box(0.0, 0.0)
        .deferred_drag()
        .build();

    t.down(5.0, 5.0);
    t.move_to(105.0, 5.0);
    assert_eq!(t.canvas.viewport().extent().max_x, 20.0);

    t.up(105.0, 5.0);
    assert_eq!(t.canvas.viewport().extent().max_x, 120.0);
}

#[test]
fn test_fit_to_screen() {
    let mut t = TestCanvasBuilder::new()
        .with_box(0.0, 0.0)
        .with_box(1580.0, 580.0)
        .build();

    assert!(t.canvas.fit_to_screen());
    assert_eq!(t.canvas.viewport().scale(), 0.5);
    assert!(approx(
        t.canvas.viewport().visible_rect().center(),
        Point::new(800.0, 300.0)
    ));
}

#[test]
fn test_reset_location_and_zoom() {
    let mut t = TestCanvasBuilder::new().build();
    t.canvas.zoom(1.5, Point::new(10.0, 10.0));
    t.canvas.pan(Vector::new(3.0, 4.0));

    assert!(t.canvas.reset_zoom());
    assert_eq!(t.canvas.viewport().scale(), 1.0);
    assert!(t.canvas.reset_location());
    assert_eq!(t.canvas.viewport().location(), Point::ZERO);
    assert!(!t.canvas.reset_location());
}

#[test]
fn test_bring_into_view_centres_point() {
    let mut t = TestCanvasBuilder::new().build();
    assert!(t.canvas.bring_into_view(Point::new(1_000.0, 1_000.0)));
    assert_eq!(t.canvas.viewport().location(), Point::new(600.0, 700.0));
}

#[test]
fn test_narrowed_scale_range_clamps_current_scale() {
    let mut t = TestCanvasBuilder::new().build();
    t.canvas.zoom(2.0, Point::new(400.0, 300.0));
    t.drain();

    let settings = CanvasSettings {
        max_scale: 1.5,
        ..Default::default()
    };
    t.canvas.set_settings(settings).unwrap();

    assert_eq!(t.canvas.viewport().scale(), 1.5);
    assert_eq!(count_viewport_changes(&t.drain()), 1);
}

#[test]
fn test_invalid_settings_are_rejected() {
    let mut t = TestCanvasBuilder::new().build();
    let bad = CanvasSettings {
        min_scale: 0.0,
        ..Default::default()
    };

    let err = t.canvas.set_settings(bad).unwrap_err();
    assert!(matches!(err, SettingsError::Invalid { field: "min_scale", .. }));
    assert_eq!(t.canvas.settings().min_scale, 0.1);
}

#[test]
fn test_scale_items_moves_only_unpinned_items() {
    let mut t = TestCanvasBuilder::new()
        .with_box(100.0, 100.0)
        .with_item(Item::new(200.0, 200.0, 20.0, 20.0).with_pinned_position())
        .build();

    assert!(t.canvas.scale_items(2.0, Point::ZERO));

    assert_eq!(t.position(0), Point::new(200.0, 200.0));
    assert_eq!(t.position(1), Point::new(200.0, 200.0));
    for id in [t.id(0), t.id(1)] {
        let scale = t.canvas.item(id).unwrap().scale();
        assert_eq!((scale.x, scale.y), (2.0, 2.0));
    }
    assert!(!t.canvas.scale_items(0.0, Point::ZERO));
    assert_eq!(t.canvas.hit_test(Point::new(205.0, 205.0)), Some(t.id(1)));
}
