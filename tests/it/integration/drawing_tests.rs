//! Drawing State Integration Tests

use crate::helpers::{TestCanvasBuilder, kinds};
use zoomboard::{CanvasEvent, Item, Key, Modifiers, Point, Rect, StateKind};

#[test]
fn test_drawing_reports_bounds_on_release() {
    let mut t = TestCanvasBuilder::new().build();
    let id = t.canvas.add_item(Item::new(0.0, 0.0, 0.0, 0.0));
    t.drain();

    assert!(t.canvas.begin_drawing(id, Point::new(100.0, 100.0)));
    assert_eq!(t.canvas.state_of(id), Some(StateKind::Drawing));

    t.move_to(130.0, 110.0);
    t.move_to(150.0, 130.0);
    t.up(150.0, 130.0);

    let bounds = Rect::from_points(Point::new(100.0, 100.0), Point::new(150.0, 130.0));
    assert_eq!(
        t.drain(),
        vec![CanvasEvent::DrawingEnded {
            item: id,
            position: Point::new(150.0, 130.0),
            bounds,
        }]
    );
    assert_eq!(t.canvas.state_of(id), Some(StateKind::Default));
    assert!(t.canvas.is_idle());

    // The collaborator applies the bounds; hit testing follows.
    assert!(t.canvas.update_item(id, |item| item.set_bounds(bounds)));
    assert_eq!(t.canvas.hit_test(Point::new(120.0, 120.0)), Some(id));
    assert_eq!(t.canvas.item(id).unwrap().size().width, 50.0);
}

#[test]
fn test_drawing_towards_origin_is_normalised() {
    let mut t = TestCanvasBuilder::new().build();
    let id = t.canvas.add_item(Item::new(0.0, 0.0, 0.0, 0.0));

    t.canvas.begin_drawing(id, Point::new(200.0, 200.0));
    t.up(150.0, 120.0);

    let ended = t.drain().into_iter().find_map(|e| match e {
        CanvasEvent::DrawingEnded { bounds, .. } => Some(bounds),
        _ => None,
    });
    let bounds = ended.expect("drawing ended");
    assert_eq!(bounds.origin(), Point::new(150.0, 120.0));
    assert_eq!((bounds.width(), bounds.height()), (50.0, 80.0));
}

#[test]
fn test_drawing_in_zoomed_viewport_reports_logical_bounds() {
    let mut t = TestCanvasBuilder::new().build();
    t.canvas.zoom(2.0, Point::ZERO);
    let id = t.canvas.add_item(Item::new(0.0, 0.0, 0.0, 0.0));

    t.canvas.begin_drawing(id, Point::new(100.0, 100.0));
    t.up(200.0, 160.0);

    let ended = t.drain().into_iter().find_map(|e| match e {
        CanvasEvent::DrawingEnded { bounds, .. } => Some(bounds),
        _ => None,
    });
    assert_eq!(
        ended,
        Some(Rect::from_points(Point::new(50.0, 50.0), Point::new(100.0, 80.0)))
    );
}

#[test]
fn test_escape_aborts_drawing_silently() {
    let mut t = TestCanvasBuilder::new().build();
    let id = t.canvas.add_item(Item::new(0.0, 0.0, 0.0, 0.0));
    t.drain();

    t.canvas.begin_drawing(id, Point::new(100.0, 100.0));
    t.move_to(150.0, 150.0);
    assert!(t.canvas.key_down(Key::Escape, Modifiers::NONE));

    assert!(t.drain().is_empty());
    assert_eq!(t.canvas.state_of(id), Some(StateKind::Default));
}

#[test]
fn test_begin_drawing_requires_idle_canvas() {
    let mut t = TestCanvasBuilder::new().with_box(0.0, 0.0).build();
    let id = t.canvas.add_item(Item::new(300.0, 300.0, 0.0, 0.0));

    t.down(5.0, 5.0);
    assert!(!t.canvas.begin_drawing(id, Point::new(300.0, 300.0)));
    t.up(5.0, 5.0);

    assert!(t.canvas.begin_drawing(id, Point::new(300.0, 300.0)));
    assert!(!t.canvas.begin_drawing(zoomboard::ItemId(999), Point::ZERO));
}

#[test]
fn test_removing_drawn_item_aborts_drawing() {
    let mut t = TestCanvasBuilder::new().build();
    let id = t.canvas.add_item(Item::new(0.0, 0.0, 0.0, 0.0));
    t.canvas.begin_drawing(id, Point::new(10.0, 10.0));

    assert!(t.canvas.remove_item(id).is_some());
    assert!(t.canvas.is_idle());
    assert_eq!(t.canvas.state_of(id), None);

    t.up(50.0, 50.0);
    assert!(kinds(&t.drain()).is_empty());
}
