//! Snapshot tests using the insta crate.
//!
//! These pin the JSON shape hosts see when they forward events, and the
//! event order of common gestures.
//!
//! To update inline snapshots after intentional changes:
//! ```bash
//! cargo insta test --accept
//! ```

use crate::helpers::{TestCanvasBuilder, kinds};
use zoomboard::{CanvasEvent, Item, ItemId, Modifiers};

#[test]
fn test_selection_changed_json() {
    let event = CanvasEvent::SelectionChanged {
        selected: vec![ItemId(1), ItemId(3)],
    };
    insta::assert_json_snapshot!(event, @r#"
    {
      "event": "selection_changed",
      "selected": [
        1,
        3
      ]
    }
    "#);
}

#[test]
fn test_real_time_drag_event_order() {
    let mut t = TestCanvasBuilder::new().with_box(100.0, 100.0).build();
    t.drag(&[(105.0, 105.0), (125.0, 105.0), (145.0, 115.0)]);

    insta::assert_json_snapshot!(kinds(&t.drain()), @r#"
    [
      "selection_changed",
      "drag_started",
      "drag_delta",
      "drag_delta",
      "drag_completed"
    ]
    "#);
}

#[test]
fn test_group_drag_with_additive_press_event_order() {
    let mut t = TestCanvasBuilder::new()
        .with_item(Item::new(0.0, 0.0, 20.0, 20.0).with_selected(true))
        .with_box(100.0, 0.0)
        .deferred_drag()
        .build();

    t.down_with(105.0, 5.0, Modifiers::shift());
    t.move_to(115.0, 5.0);
    t.canvas.abort_gesture();

    insta::assert_json_snapshot!(kinds(&t.drain()), @r#"
    [
      "selection_changed",
      "drag_started",
      "drag_delta",
      "drag_completed"
    ]
    "#);
}
