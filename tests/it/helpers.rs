//! Test helpers and builders for reducing boilerplate in tests.
//!
//! This module provides:
//! - `TestCanvasBuilder` - Builder pattern for canvases with items and settings
//! - `TestCanvas` - The canvas plus the event log and timer that drive it
//! - Gesture shorthands (`drag`, `click`) and event filters

#![allow(dead_code)]

use std::time::Duration;
use zoomboard::{
    Canvas, CanvasEvent, CanvasSettings, EventLog, Item, ItemId, ManualTimer, Modifiers, Point,
    PointerButton, Size,
};

// ============================================================================
// TestCanvasBuilder
// ============================================================================

/// Builder for test canvases.
///
/// # Example
/// ```ignore
/// let mut t = TestCanvasBuilder::new()
///     .with_item(Item::new(100.0, 100.0, 40.0, 40.0))
///     .deferred_drag()
///     .build();
/// t.drag(&[(110.0, 110.0), (120.0, 110.0)]);
/// ```
pub struct TestCanvasBuilder {
    settings: CanvasSettings,
    items: Vec<Item>,
    view_size: Size,
}

impl Default for TestCanvasBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCanvasBuilder {
    pub fn new() -> Self {
        Self {
            settings: CanvasSettings::default(),
            items: Vec::new(),
            view_size: Size::new(800.0, 600.0),
        }
    }

    pub fn with_settings(mut self, settings: CanvasSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    /// Add a 20x20 item at `(left, top)`.
    pub fn with_box(self, left: f64, top: f64) -> Self {
        self.with_item(Item::new(left, top, 20.0, 20.0))
    }

    pub fn with_view_size(mut self, width: f64, height: f64) -> Self {
        self.view_size = Size::new(width, height);
        self
    }

    pub fn deferred_drag(mut self) -> Self {
        self.settings.real_time_dragging_enabled = false;
        self
    }

    pub fn deferred_selection(mut self) -> Self {
        self.settings.real_time_selection_enabled = false;
        self
    }

    pub fn with_snapping(mut self, spacing: f64) -> Self {
        self.settings.enable_snapping = true;
        self.settings.grid_spacing = spacing;
        self
    }

    pub fn build(self) -> TestCanvas {
        let log = EventLog::new();
        let timer = ManualTimer::new();
        let mut canvas = Canvas::new(self.settings, timer.clone(), log.clone())
            .expect("test settings should validate");
        canvas.resize(self.view_size);
        let ids = self
            .items
            .into_iter()
            .map(|item| canvas.add_item(item))
            .collect();
        // Drop add-time selection events so tests start from a clean log.
        log.drain();
        TestCanvas {
            canvas,
            log,
            timer,
            ids,
        }
    }
}

// ============================================================================
// TestCanvas
// ============================================================================

pub struct TestCanvas {
    pub canvas: Canvas,
    pub log: EventLog,
    pub timer: ManualTimer,
    /// Ids of the builder items, in insertion order
    pub ids: Vec<ItemId>,
}

impl TestCanvas {
    pub fn id(&self, n: usize) -> ItemId {
        self.ids[n]
    }

    pub fn position(&self, n: usize) -> Point {
        self.canvas.item(self.ids[n]).expect("item exists").position()
    }

    pub fn visual_position(&self, n: usize) -> Point {
        self.canvas
            .item(self.ids[n])
            .expect("item exists")
            .visual_position()
    }

    pub fn down(&mut self, x: f64, y: f64) {
        self.down_with(x, y, Modifiers::NONE);
    }

    pub fn down_with(&mut self, x: f64, y: f64, modifiers: Modifiers) {
        self.canvas
            .pointer_down(Point::new(x, y), PointerButton::Primary, modifiers);
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.canvas.pointer_move(Point::new(x, y));
    }

    pub fn up(&mut self, x: f64, y: f64) {
        self.canvas.pointer_up(Point::new(x, y));
    }

    /// Press at the first point, move through the rest, release at the last.
    pub fn drag(&mut self, path: &[(f64, f64)]) {
        let Some((&(x0, y0), rest)) = path.split_first() else {
            return;
        };
        self.down(x0, y0);
        for &(x, y) in rest {
            self.move_to(x, y);
        }
        let (x, y) = path[path.len() - 1];
        self.up(x, y);
    }

    pub fn click(&mut self, x: f64, y: f64) {
        self.down(x, y);
        self.up(x, y);
    }

    /// Advance the manual timer and deliver the ticks. Returns how many fired.
    pub fn advance(&mut self, ms: u64) -> usize {
        let fired = self.timer.advance(Duration::from_millis(ms));
        for &id in &fired {
            self.canvas.timer_tick(id);
        }
        fired.len()
    }

    pub fn drain(&self) -> Vec<CanvasEvent> {
        self.log.drain()
    }
}

// ============================================================================
// Event helpers
// ============================================================================

pub fn count_viewport_changes(events: &[CanvasEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, CanvasEvent::ViewportChanged { .. }))
        .count()
}

pub fn drag_deltas(events: &[CanvasEvent]) -> Vec<zoomboard::Vector> {
    events
        .iter()
        .filter_map(|e| match e {
            CanvasEvent::DragDelta { offset, .. } => Some(*offset),
            _ => None,
        })
        .collect()
}

pub fn last_selection(events: &[CanvasEvent]) -> Option<Vec<ItemId>> {
    events.iter().rev().find_map(|e| match e {
        CanvasEvent::SelectionChanged { selected } => Some(selected.clone()),
        _ => None,
    })
}

/// Short names of the events, for order assertions.
pub fn kinds(events: &[CanvasEvent]) -> Vec<&'static str> {
    events
        .iter()
        .map(|e| match e {
            CanvasEvent::DragStarted { .. } => "drag_started",
            CanvasEvent::DragDelta { .. } => "drag_delta",
            CanvasEvent::DragCompleted { .. } => "drag_completed",
            CanvasEvent::DrawingEnded { .. } => "drawing_ended",
            CanvasEvent::SelectionChanged { .. } => "selection_changed",
            CanvasEvent::ViewportChanged { .. } => "viewport_changed",
        })
        .collect()
}
