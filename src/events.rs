//! Domain events emitted by the canvas.
//!
//! The canvas owns one injected [`EventSink`] and emits events synchronously,
//! in the order the corresponding transitions happen, exactly once each.

use crate::item::ItemId;
use crate::types::{Point, Rect, Vector};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use std::sync::mpsc::Sender;
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CanvasEvent {
    /// Pointer position (logical) where the drag began
    DragStarted { item: ItemId, position: Point },
    /// Logical offset of one pointer sample
    DragDelta { item: ItemId, offset: Vector },
    /// Pointer position (logical) at release; `canceled` when the gesture was aborted
    DragCompleted {
        item: ItemId,
        position: Point,
        canceled: bool,
    },
    /// Drawing finished; `bounds` is the rectangle the collaborator should apply
    DrawingEnded {
        item: ItemId,
        position: Point,
        bounds: Rect,
    },
    /// The full selected set after a change, in collection order
    SelectionChanged { selected: Vec<ItemId> },
    ViewportChanged { location: Point, scale: f64 },
}

/// Receiver of canvas events.
pub trait EventSink {
    fn emit(&mut self, event: CanvasEvent);
}

impl EventSink for Vec<CanvasEvent> {
    fn emit(&mut self, event: CanvasEvent) {
        self.push(event);
    }
}

impl EventSink for Sender<CanvasEvent> {
    fn emit(&mut self, event: CanvasEvent) {
        if self.send(event).is_err() {
            trace!("event receiver dropped");
        }
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: CanvasEvent) {}
}

/// Shared, cloneable event buffer. One clone goes into the canvas, the other
/// stays with the observer.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    events: Arc<Mutex<Vec<CanvasEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all buffered events.
    pub fn drain(&self) -> Vec<CanvasEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn snapshot(&self) -> Vec<CanvasEvent> {
        self.events.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: CanvasEvent) {
        self.events.lock().push(event);
    }
}
