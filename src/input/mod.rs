//! Pointer and keyboard input types for the canvas.
//!
//! Hosts translate their toolkit events into the types defined here and feed
//! them to [`crate::canvas::Canvas`] in strict temporal order.
//!
//! ## Modules
//!
//! - `state` - Per-item interaction state stack
//! - `coords` - Viewport pixel / logical coordinate conversion

pub mod coords;
mod state;

pub use state::{DragContext, DrawContext, ItemState, StateKind, StateNotification, StateStack};

use serde::{Deserialize, Serialize};

/// Which pointer button started a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

/// Keyboard modifiers held while an input event was delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub control: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        control: false,
        alt: false,
    };

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::NONE
        }
    }

    pub fn control() -> Self {
        Self {
            control: true,
            ..Self::NONE
        }
    }

    pub fn alt() -> Self {
        Self {
            alt: true,
            ..Self::NONE
        }
    }
}

/// Keys the canvas reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Escape,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Character(char),
}
