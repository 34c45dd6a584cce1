//! Auto-pan Integration Tests
//!
//! The default test viewport is 800x600 with a 15px edge margin, 15px per
//! tick and a 16ms tick interval.

use crate::helpers::{TestCanvasBuilder, count_viewport_changes, kinds};
use zoomboard::{CanvasSettings, Point, TimerId};

#[test]
fn test_drag_near_edge_pans_and_item_follows() {
    let mut t = TestCanvasBuilder::new().with_box(700.0, 300.0).build();

    t.down(705.0, 305.0);
    t.move_to(795.0, 305.0);
    assert!(t.canvas.is_auto_panning());
    assert_eq!(t.position(0), Point::new(790.0, 300.0));

    assert_eq!(t.advance(16), 1);
    assert_eq!(t.canvas.viewport().location(), Point::new(15.0, 0.0));
    assert_eq!(t.position(0), Point::new(805.0, 300.0));

    assert_eq!(t.advance(32), 2);
    assert_eq!(t.canvas.viewport().location(), Point::new(45.0, 0.0));
    assert_eq!(t.position(0), Point::new(835.0, 300.0));
}

#[test]
fn test_release_cancels_auto_pan() {
    let mut t = TestCanvasBuilder::new().with_box(700.0, 300.0).build();
    t.down(705.0, 305.0);
    t.move_to(795.0, 305.0);
    t.advance(16);

    t.up(795.0, 305.0);
    assert!(!t.canvas.is_auto_panning());
    assert_eq!(t.timer.active_count(), 0);

    let events = t.drain();
    assert_eq!(kinds(&events).last(), Some(&"drag_completed"));

    // No pan after completion, however much time passes.
    assert_eq!(t.advance(1_000), 0);
    assert!(t.drain().is_empty());
    assert_eq!(t.canvas.viewport().location(), Point::new(15.0, 0.0));
}

#[test]
fn test_stale_tick_is_ignored() {
    let mut t = TestCanvasBuilder::new().with_box(700.0, 300.0).build();
    t.down(705.0, 305.0);
    t.move_to(795.0, 305.0);
    t.up(795.0, 305.0);
    t.drain();

    // The first (and only) scheduled timer, delivered late by the host.
    t.canvas.timer_tick(TimerId(1));
    assert!(t.drain().is_empty());
    assert_eq!(t.canvas.viewport().location(), Point::ZERO);
}

#[test]
fn test_leaving_margin_stops_auto_pan() {
    let mut t = TestCanvasBuilder::new().with_box(700.0, 300.0).build();
    t.down(705.0, 305.0);
    t.move_to(795.0, 305.0);
    assert!(t.canvas.is_auto_panning());

    t.move_to(400.0, 300.0);
    assert!(!t.canvas.is_auto_panning());
    assert_eq!(t.advance(100), 0);
    assert_eq!(t.canvas.viewport().location(), Point::ZERO);
}

#[test]
fn test_escape_cancels_auto_pan() {
    let mut t = TestCanvasBuilder::new().with_box(10.0, 300.0).build();
    t.down(15.0, 305.0);
    t.move_to(5.0, 305.0);
    assert!(t.canvas.is_auto_panning());

    t.canvas.abort_gesture();
    assert_eq!(t.timer.active_count(), 0);
    assert_eq!(t.advance(100), 0);
}

#[test]
fn test_pan_speed_is_scale_independent_in_pixels() {
    let mut t = TestCanvasBuilder::new().with_box(300.0, 100.0).build();
    t.canvas.zoom(2.0, Point::ZERO);

    // Item occupies pixels (600..640, 200..240).
    t.down(610.0, 210.0);
    t.move_to(795.0, 210.0);
    t.advance(16);

    // 15 pixels at scale 2 is 7.5 logical units.
    assert_eq!(t.canvas.viewport().location(), Point::new(7.5, 0.0));
}

#[test]
fn test_disabled_auto_panning_never_schedules() {
    let settings = CanvasSettings {
        disable_auto_panning: true,
        ..Default::default()
    };
    let mut t = TestCanvasBuilder::new()
        .with_settings(settings)
        .with_box(700.0, 300.0)
        .build();

    t.down(705.0, 305.0);
    t.move_to(795.0, 305.0);
    assert!(!t.canvas.is_auto_panning());
    assert_eq!(t.timer.active_count(), 0);
}

#[test]
fn test_selection_rectangle_grows_with_auto_pan() {
    let mut t = TestCanvasBuilder::new().with_box(850.0, 100.0).build();

    t.down(700.0, 100.0);
    t.move_to(795.0, 105.0);
    assert!(t.canvas.selected_ids().is_empty());

    assert_eq!(t.advance(160), 10);
    assert_eq!(t.canvas.viewport().location(), Point::new(150.0, 0.0));
    assert_eq!(t.canvas.selected_ids(), vec![t.id(0)]);

    t.up(795.0, 105.0);
    assert_eq!(count_viewport_changes(&t.drain()), 10);
}

#[test]
fn test_dropping_canvas_cancels_timer() {
    let mut t = TestCanvasBuilder::new().with_box(700.0, 300.0).build();
    t.down(705.0, 305.0);
    t.move_to(795.0, 305.0);
    assert_eq!(t.timer.active_count(), 1);

    let timer = t.timer.clone();
    drop(t);
    assert_eq!(timer.active_count(), 0);
}
