//! Headless replay harness.
//!
//! Reads a JSON script of items and input steps, drives a [`Canvas`] with it
//! and prints the emitted events plus the final item rectangles as JSON.
//!
//! ```text
//! zoomboard-replay script.json
//! zoomboard-replay - < script.json
//! ```
//!
//! Script shape:
//!
//! ```json
//! {
//!   "settings": { "enable_snapping": true, "grid_spacing": 50 },
//!   "viewport": { "width": 800, "height": 600 },
//!   "items": [ { "left": 100, "top": 100, "width": 40, "height": 40 } ],
//!   "steps": [
//!     { "op": "down", "x": 110, "y": 110 },
//!     { "op": "move", "x": 135, "y": 90 },
//!     { "op": "up", "x": 135, "y": 90 },
//!     { "op": "tick", "ms": 32 }
//!   ]
//! }
//! ```

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::time::Duration;
use tracing::info;
use zoomboard::perf::measure_and_log;
use zoomboard::{
    Canvas, CanvasEvent, CanvasSettings, EventLog, Item, Key, ManualTimer, Modifiers, Point,
    PointerButton, Size,
};

#[derive(Debug, Deserialize)]
struct Script {
    #[serde(default)]
    settings: CanvasSettings,
    viewport: Option<Size>,
    #[serde(default)]
    items: Vec<Item>,
    #[serde(default)]
    steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum Step {
    Down {
        x: f64,
        y: f64,
        #[serde(default)]
        button: PointerButton,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Move {
        x: f64,
        y: f64,
    },
    Up {
        x: f64,
        y: f64,
    },
    Key {
        key: Key,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// Let time pass and deliver every timer tick that fires
    Tick {
        ms: u64,
    },
    Zoom {
        factor: f64,
        x: f64,
        y: f64,
    },
    Abort,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    events: Vec<CanvasEvent>,
    items: Vec<&'a Item>,
    location: Point,
    scale: f64,
}

fn main() -> Result<()> {
    zoomboard::logging::init();

    let path = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow!("usage: zoomboard-replay <script.json | ->"))?;
    let source = read_source(&path)?;
    let script: Script =
        serde_json::from_str(&source).with_context(|| format!("Failed to parse script {path}"))?;

    let report = measure_and_log("replay", 1_000.0, || run(script))?;
    println!("{report}");
    Ok(())
}

fn read_source(path: &str) -> Result<String> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read script from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {path}"))
}

fn run(script: Script) -> Result<String> {
    let log = EventLog::new();
    let timer = ManualTimer::new();
    let mut canvas = Canvas::new(script.settings, timer.clone(), log.clone())
        .context("Invalid settings in script")?;

    if let Some(size) = script.viewport {
        canvas.resize(size);
    }
    for item in script.items {
        canvas.add_item(item);
    }
    info!(items = canvas.items().len(), steps = script.steps.len(), "replaying script");

    for step in script.steps {
        match step {
            Step::Down {
                x,
                y,
                button,
                modifiers,
            } => canvas.pointer_down(Point::new(x, y), button, modifiers),
            Step::Move { x, y } => canvas.pointer_move(Point::new(x, y)),
            Step::Up { x, y } => canvas.pointer_up(Point::new(x, y)),
            Step::Key { key, modifiers } => {
                canvas.key_down(key, modifiers);
            }
            Step::Tick { ms } => {
                for id in timer.advance(Duration::from_millis(ms)) {
                    canvas.timer_tick(id);
                }
            }
            Step::Zoom { factor, x, y } => {
                canvas.zoom(factor, Point::new(x, y));
            }
            Step::Abort => {
                canvas.abort_gesture();
            }
        }
    }

    let report = Report {
        events: log.drain(),
        items: canvas.items().iter().collect(),
        location: canvas.viewport().location(),
        scale: canvas.viewport().scale(),
    };
    serde_json::to_string_pretty(&report).context("Failed to serialize report")
}
