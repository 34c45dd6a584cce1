//! Performance instrumentation for the input hot paths.
//!
//! Pointer moves arrive at display rate, and a real-time drag of a large
//! selection touches every item in the working set per sample. The macros
//! here time those paths when the `profiling` feature is enabled and compile
//! to nothing otherwise.
//!
//! ```ignore
//! use zoomboard::{profile_function, profile_scope};
//!
//! fn pointer_move() {
//!     profile_function!();
//!     {
//!         profile_scope!("refresh_items");
//!         // ...
//!     }
//! }
//! ```

use std::time::Instant;
use tracing::warn;
#[cfg(feature = "profiling")]
use tracing::trace;

/// Budget for one input event at 60 FPS
pub const TARGET_FRAME_MS: f64 = 16.67;

/// Threshold used by `profile_scope!` without an explicit one
const PROFILING_THRESHOLD_MS: f64 = 1.0;

/// Profile a scope with the given name. Zero-cost when profiling is disabled.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::for_profiling($name);
        #[cfg(not(feature = "profiling"))]
        let _ = $name;
    };
    ($name:expr, $threshold_ms:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::new($name, $threshold_ms);
        #[cfg(not(feature = "profiling"))]
        let _ = ($name, $threshold_ms);
    };
}

/// Profile the current function. Zero-cost when profiling is disabled.
#[macro_export]
macro_rules! profile_function {
    () => {
        $crate::profile_scope!($crate::function_name!());
    };
}

/// Fully qualified name of the enclosing function.
#[macro_export]
macro_rules! function_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        // Strip the trailing "::f"
        &name[..name.len() - 3]
    }};
}

pub use profile_function;
pub use profile_scope;

/// A scoped timer that reports on drop when it ran longer than its threshold.
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
    threshold_ms: f64,
}

impl ScopedTimer {
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        Self {
            name,
            start: Instant::now(),
            threshold_ms,
        }
    }

    pub fn for_profiling(name: &'static str) -> Self {
        Self::new(name, PROFILING_THRESHOLD_MS)
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    fn is_slow(&self, elapsed_ms: f64) -> bool {
        elapsed_ms > self.threshold_ms
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();
        if !self.is_slow(elapsed_ms) {
            return;
        }

        #[cfg(feature = "profiling")]
        trace!("[PERF] {}: {:.2}ms", self.name, elapsed_ms);

        #[cfg(not(feature = "profiling"))]
        warn!(
            operation = self.name,
            elapsed_ms = format!("{:.2}", elapsed_ms),
            threshold_ms = format!("{:.2}", self.threshold_ms),
            "Slow operation"
        );
    }
}

/// Run `f` and warn if it exceeds `threshold_ms`.
#[inline]
pub fn measure_and_log<T, F: FnOnce() -> T>(name: &str, threshold_ms: f64, f: F) -> T {
    let start = Instant::now();
    let result = f();
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    if elapsed_ms > threshold_ms {
        warn!(
            operation = name,
            elapsed_ms = format!("{:.2}", elapsed_ms),
            threshold_ms = format!("{:.2}", threshold_ms),
            "Slow operation"
        );
    }
    result
}
