//! Auto-pan: timer-driven viewport panning while a gesture nears the edge.
//!
//! The canvas schedules a recurring tick through the injected [`Timer`] when
//! the pointer enters the edge margin during a gesture and cancels it when
//! the pointer leaves the margin or the gesture ends. Ticks are delivered
//! back by the host through [`crate::canvas::Canvas::timer_tick`]; ticks for
//! a timer that is no longer the active one are ignored, so nothing pans
//! after cancellation.

use crate::types::{Point, Size, Vector};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerId(pub u64);

/// Recurring timer facility provided by the host.
pub trait Timer {
    /// Start a recurring tick every `interval`.
    fn schedule(&mut self, interval: Duration) -> TimerId;
    /// Stop a tick. Cancelling an unknown id is a no-op.
    fn cancel(&mut self, id: TimerId);
}

#[derive(Debug)]
struct ScheduledTimer {
    id: TimerId,
    interval: Duration,
    until_next: Duration,
}

#[derive(Debug, Default)]
struct ManualTimerState {
    next_id: u64,
    timers: Vec<ScheduledTimer>,
}

/// A timer driven by explicit calls to [`ManualTimer::advance`].
///
/// Clones share state: hand one clone to the canvas and keep another in the
/// host loop (or test) that advances time.
#[derive(Debug, Default, Clone)]
pub struct ManualTimer {
    state: Arc<Mutex<ManualTimerState>>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.state.lock().timers.iter().any(|t| t.id == id)
    }

    pub fn active_count(&self) -> usize {
        self.state.lock().timers.len()
    }

    /// Let `elapsed` pass and return every tick that fired, in time order.
    pub fn advance(&self, elapsed: Duration) -> Vec<TimerId> {
        let mut state = self.state.lock();
        let mut fired: Vec<(Duration, TimerId)> = Vec::new();

        for timer in &mut state.timers {
            if timer.interval.is_zero() {
                continue;
            }
            let mut at = timer.until_next;
            while at <= elapsed {
                fired.push((at, timer.id));
                at += timer.interval;
            }
            timer.until_next = at - elapsed;
        }

        fired.sort_by_key(|&(at, id)| (at, id.0));
        fired.into_iter().map(|(_, id)| id).collect()
    }
}

impl Timer for ManualTimer {
    fn schedule(&mut self, interval: Duration) -> TimerId {
        let mut state = self.state.lock();
        state.next_id += 1;
        let id = TimerId(state.next_id);
        state.timers.push(ScheduledTimer {
            id,
            interval,
            until_next: interval,
        });
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.state.lock().timers.retain(|t| t.id != id);
    }
}

/// Auto-pan bookkeeping owned by the canvas.
#[derive(Debug, Default)]
pub struct AutoPan {
    timer: Option<TimerId>,
    direction: Vector,
}

impl AutoPan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unit direction (-1, 0 or 1 per axis) for a pointer within `margin`
    /// pixels of the viewport edge.
    pub fn edge_direction(pointer: Point, view: Size, margin: f64) -> Vector {
        let axis = |pos: f64, extent: f64| {
            if pos <= margin {
                -1.0
            } else if pos >= extent - margin {
                1.0
            } else {
                0.0
            }
        };
        Vector::new(axis(pointer.x, view.width), axis(pointer.y, view.height))
    }

    pub fn is_active(&self) -> bool {
        self.timer.is_some()
    }

    pub fn direction(&self) -> Vector {
        self.direction
    }

    /// True when `id` is the tick this auto-pan is waiting for.
    pub fn owns(&self, id: TimerId) -> bool {
        self.timer == Some(id)
    }

    /// Follow the pointer: start ticking when `direction` is non-zero, stop
    /// when it is zero.
    pub fn update(&mut self, direction: Vector, interval: Duration, timer: &mut dyn Timer) {
        if direction.is_zero() {
            self.stop(timer);
            return;
        }
        self.direction = direction;
        if self.timer.is_none() {
            let id = timer.schedule(interval);
            trace!(?id, ?direction, "auto-pan started");
            self.timer = Some(id);
        }
    }

    pub fn stop(&mut self, timer: &mut dyn Timer) {
        if let Some(id) = self.timer.take() {
            timer.cancel(id);
            trace!(?id, "auto-pan stopped");
        }
        self.direction = Vector::ZERO;
    }
}
