//! Per-item interaction state stack.
//!
//! Each item owns a stack of states. The bottom entry is always
//! [`ItemState::Default`]; gestures push transient states on top and pop them
//! when they finish. Manipulating the stack yields [`StateNotification`]s that
//! the canvas acts on, so enter/exit/re-enter behaviour lives next to the
//! code that owns the items rather than inside the states.
//!
//! ## State Transitions
//!
//! ```text
//! Default -> Dragging      (drag-start on a draggable item)
//! Default -> Drawing       (collaborator starts drawing a new item)
//! Dragging -> Default      (pointer up, or gesture abort)
//! Drawing -> previous      (pointer up, or gesture abort)
//! ```

use crate::drag::DragStrategy;
use crate::types::{Point, Rect};

/// Discriminant of an [`ItemState`], used in notifications and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateKind {
    Default,
    Dragging,
    Drawing,
}

/// A single entry of an item's state stack.
#[derive(Debug)]
pub enum ItemState {
    /// Resting
    Default,
    /// Translating pointer moves into drag deltas
    Dragging(DragContext),
    /// Growing a rectangle for a freshly created item
    Drawing(DrawContext),
}

impl ItemState {
    pub fn kind(&self) -> StateKind {
        match self {
            ItemState::Default => StateKind::Default,
            ItemState::Dragging(_) => StateKind::Dragging,
            ItemState::Drawing(_) => StateKind::Drawing,
        }
    }
}

/// Data owned by the `Dragging` state.
#[derive(Debug)]
pub struct DragContext {
    /// Logical pointer position when the drag started
    pub initial: Point,
    /// Logical pointer position of the last processed sample
    pub last: Point,
    /// Assigned when the state is entered
    pub strategy: Option<DragStrategy>,
}

impl DragContext {
    pub fn new(position: Point) -> Self {
        Self {
            initial: position,
            last: position,
            strategy: None,
        }
    }
}

/// Data owned by the `Drawing` state.
#[derive(Debug, Clone, Copy)]
pub struct DrawContext {
    pub anchor: Point,
    pub current: Point,
}

impl DrawContext {
    pub fn new(anchor: Point) -> Self {
        Self {
            anchor,
            current: anchor,
        }
    }

    /// Rectangle between the anchor and the current pointer.
    pub fn bounds(&self) -> Rect {
        Rect::from_points(self.anchor, self.current)
    }
}

/// Notification produced by a stack manipulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateNotification {
    /// A state was pushed and is about to receive input
    Enter(StateKind),
    /// A state was popped
    Exit(StateKind),
    /// A suspended state regained control after a pop
    ReEnter(StateKind),
}

#[derive(Debug)]
pub struct StateStack {
    states: Vec<ItemState>,
}

impl Default for StateStack {
    fn default() -> Self {
        Self {
            states: vec![ItemState::Default],
        }
    }
}

impl StateStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &ItemState {
        // Never empty: the Default entry cannot be popped.
        &self.states[self.states.len() - 1]
    }

    pub fn current_mut(&mut self) -> &mut ItemState {
        let top = self.states.len() - 1;
        &mut self.states[top]
    }

    pub fn depth(&self) -> usize {
        self.states.len()
    }

    /// True when only the Default state is on the stack.
    pub fn is_resting(&self) -> bool {
        self.states.len() == 1
    }

    pub fn push(&mut self, state: ItemState) -> StateNotification {
        let kind = state.kind();
        self.states.push(state);
        StateNotification::Enter(kind)
    }

    /// Pop the current state. The Default state at the bottom is never popped.
    pub fn pop(&mut self) -> Option<(ItemState, [StateNotification; 2])> {
        if self.is_resting() {
            return None;
        }
        let popped = self.states.pop()?;
        let exit = StateNotification::Exit(popped.kind());
        let re_enter = StateNotification::ReEnter(self.current().kind());
        Some((popped, [exit, re_enter]))
    }
}
