//! Engine-wide constants.
//!
//! Centralizes default values for zooming, auto-panning and drag policies so
//! settings, viewport and tests agree on them.

// ============================================================================
// Zoom
// ============================================================================

/// Minimum viewport scale
pub const MIN_SCALE: f64 = 0.1;

/// Maximum viewport scale
pub const MAX_SCALE: f64 = 2.0;

/// Default viewport scale
pub const DEFAULT_SCALE: f64 = 1.0;

/// Multiplier applied per zoom step (zoom in multiplies, zoom out divides)
pub const SCALE_FACTOR: f64 = 1.1;

// ============================================================================
// Auto-pan
// ============================================================================

/// Viewport pixels panned per auto-pan tick
pub const AUTO_PAN_SPEED: f64 = 15.0;

/// Interval between auto-pan ticks in milliseconds
pub const AUTO_PAN_TICK_RATE_MS: u64 = 16;

/// Distance from the viewport edge (in viewport pixels) that activates auto-pan
pub const AUTO_PAN_EDGE_MARGIN: f64 = 15.0;

// ============================================================================
// Grid & Dragging
// ============================================================================

/// Default snapping grid spacing
pub const GRID_SPACING: f64 = 15.0;

/// Keyboard nudge distance when snapping is disabled
pub const NUDGE_STEP: f64 = 1.0;

/// Default margin added around the union of item bounds
pub const EXTENT_MARGIN: f64 = 0.0;

// ============================================================================
// Viewport
// ============================================================================

/// Viewport size used before the host reports one
pub const DEFAULT_VIEWPORT_SIZE: (f64, f64) = (800.0, 600.0);
