//! Subscriber setup for hosts and tools that do not install their own.
//!
//! The library only emits `tracing` events. Call [`init`] once from a binary
//! (the replay harness does) to print them; `RUST_LOG` overrides the default
//! filter.

use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or unparsable
pub const DEFAULT_FILTER: &str = "zoomboard=info";

static INIT: OnceCell<()> = OnceCell::new();

/// Install a `fmt` subscriber writing to stderr. Safe to call repeatedly;
/// only the first call has an effect, and an already installed global
/// subscriber is left alone.
pub fn init() {
    INIT.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
