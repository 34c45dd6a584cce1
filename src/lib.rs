//! Interaction engine for a zoomable, pannable canvas.
//!
//! The crate turns pointer, keyboard and timer input into coordinated effects
//! on a collection of positioned items: per-item state stacks, single and
//! multiple drags with real-time or deferred updates, rectangle selection,
//! boundary and snapping policies, a viewport model and edge auto-pan.
//! Rendering and input capture stay with the host.
//!
//! ```ignore
//! use zoomboard::{Canvas, CanvasSettings, EventLog, Item, ManualTimer, Modifiers, Point, PointerButton};
//!
//! let log = EventLog::new();
//! let mut canvas = Canvas::new(CanvasSettings::default(), ManualTimer::new(), log.clone())?;
//! let id = canvas.add_item(Item::new(100.0, 100.0, 80.0, 40.0));
//! canvas.pointer_down(Point::new(110.0, 110.0), PointerButton::Primary, Modifiers::NONE);
//! canvas.pointer_move(Point::new(150.0, 130.0));
//! canvas.pointer_up(Point::new(150.0, 130.0));
//! ```

pub mod auto_pan;
pub mod canvas;
pub mod constants;
pub mod drag;
pub mod error;
pub mod events;
pub mod input;
pub mod item;
pub mod logging;
pub mod perf;
pub mod selection;
pub mod settings;
pub mod spatial_index;
pub mod types;
pub mod viewport;

pub use auto_pan::{ManualTimer, Timer, TimerId};
pub use canvas::Canvas;
pub use error::{SettingsError, SettingsResult};
pub use events::{CanvasEvent, EventLog, EventSink, NullSink};
pub use input::{Key, Modifiers, PointerButton, StateKind};
pub use item::{Item, ItemCollection, ItemId, ItemScale};
pub use selection::SelectionMode;
pub use settings::CanvasSettings;
pub use types::{Point, Rect, Size, Vector};
pub use viewport::Viewport;
