//! Coordinate conversion utilities for canvas interactions.
//!
//! Pointer input arrives in viewport pixels; items live in logical
//! coordinates. All conversions go through here so the formulas exist once.

use crate::types::{Point, Vector};

/// Context needed for coordinate conversions
#[derive(Debug, Clone, Copy)]
pub struct CoordinateContext {
    /// Logical position of the viewport's top-left corner
    pub location: Point,
    pub scale: f64,
}

impl CoordinateContext {
    #[inline]
    pub fn new(location: Point, scale: f64) -> Self {
        Self { location, scale }
    }
}

pub struct CoordinateConverter;

impl CoordinateConverter {
    /// Convert a viewport pixel position to a logical position
    #[inline]
    pub fn viewport_to_logical(pos: Point, ctx: &CoordinateContext) -> Point {
        Point::new(
            ctx.location.x + pos.x / ctx.scale,
            ctx.location.y + pos.y / ctx.scale,
        )
    }

    /// Convert a logical position to a viewport pixel position
    #[inline]
    pub fn logical_to_viewport(pos: Point, ctx: &CoordinateContext) -> Point {
        Point::new(
            (pos.x - ctx.location.x) * ctx.scale,
            (pos.y - ctx.location.y) * ctx.scale,
        )
    }

    /// Convert a delta from viewport pixels to logical units
    #[inline]
    pub fn delta_viewport_to_logical(delta: Vector, scale: f64) -> Vector {
        Vector::new(delta.x / scale, delta.y / scale)
    }

    /// Convert a delta from logical units to viewport pixels
    #[inline]
    pub fn delta_logical_to_viewport(delta: Vector, scale: f64) -> Vector {
        Vector::new(delta.x * scale, delta.y * scale)
    }
}
