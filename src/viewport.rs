//! Viewport model - the visible window into the unbounded logical plane.
//!
//! The viewport is described by the logical position of its top-left corner,
//! its size in viewport pixels and a scale. Logical size is pixel size divided
//! by scale. The extent is the region scroll bars should cover: the union of
//! all item bounds plus a margin.

use crate::constants::{DEFAULT_SCALE, DEFAULT_VIEWPORT_SIZE};
use crate::input::coords::{CoordinateContext, CoordinateConverter};
use crate::item::ItemCollection;
use crate::settings::CanvasSettings;
use crate::types::{Point, Rect, Size, Vector};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Viewport {
    location: Point,
    /// Size in viewport pixels
    view_size: Size,
    scale: f64,
    min_scale: f64,
    max_scale: f64,
    scale_factor: f64,
    extent: Rect,
    overscroll_margin: Option<f64>,
    grid_spacing: f64,
}

impl Viewport {
    pub fn new(settings: &CanvasSettings) -> Self {
        let mut viewport = Self {
            location: Point::ZERO,
            view_size: Size::new(DEFAULT_VIEWPORT_SIZE.0, DEFAULT_VIEWPORT_SIZE.1),
            scale: DEFAULT_SCALE,
            min_scale: settings.min_scale,
            max_scale: settings.max_scale,
            scale_factor: settings.scale_factor,
            extent: Rect::ZERO,
            overscroll_margin: settings.overscroll_margin,
            grid_spacing: settings.grid_spacing,
        };
        viewport.scale = viewport.clamp_scale(DEFAULT_SCALE);
        viewport
    }

    /// Pick up new zoom bounds and margins. The current scale is clamped into
    /// the new range around the viewport centre.
    pub fn apply_settings(&mut self, settings: &CanvasSettings) {
        self.min_scale = settings.min_scale;
        self.max_scale = settings.max_scale;
        self.scale_factor = settings.scale_factor;
        self.overscroll_margin = settings.overscroll_margin;
        self.grid_spacing = settings.grid_spacing;
        let clamped = self.clamp_scale(self.scale);
        if clamped != self.scale {
            self.set_scale(clamped, self.center_pixel());
        }
    }

    pub fn location(&self) -> Point {
        self.location
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    pub fn max_scale(&self) -> f64 {
        self.max_scale
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    pub fn grid_spacing(&self) -> f64 {
        self.grid_spacing
    }

    /// Viewport size in pixels.
    pub fn view_size(&self) -> Size {
        self.view_size
    }

    /// Visible region size in logical units.
    pub fn size(&self) -> Size {
        Size::new(
            self.view_size.width / self.scale,
            self.view_size.height / self.scale,
        )
    }

    /// Visible region in logical coordinates.
    pub fn visible_rect(&self) -> Rect {
        Rect::from_origin_size(self.location, self.size())
    }

    pub fn extent(&self) -> Rect {
        self.extent
    }

    pub fn coords(&self) -> CoordinateContext {
        CoordinateContext::new(self.location, self.scale)
    }

    pub fn to_logical(&self, pixel: Point) -> Point {
        CoordinateConverter::viewport_to_logical(pixel, &self.coords())
    }

    pub fn to_viewport(&self, logical: Point) -> Point {
        CoordinateConverter::logical_to_viewport(logical, &self.coords())
    }

    /// Host reports a new viewport size in pixels.
    pub fn resize(&mut self, view_size: Size) {
        self.view_size = Size::new(view_size.width.max(0.0), view_size.height.max(0.0));
    }

    pub(crate) fn set_extent(&mut self, extent: Rect) {
        self.extent = extent;
    }

    /// Move the visible region by `delta` logical units. With an overscroll
    /// margin configured the result is clamped so the visible region stays
    /// within the extent grown by that margin. Returns true if the location changed.
    pub fn pan(&mut self, delta: Vector) -> bool {
        let next = self.clamp_location(self.location + delta);
        if next == self.location {
            return false;
        }
        self.location = next;
        true
    }

    /// Multiply the scale by `factor`, clamped to the scale bounds, keeping
    /// the logical point under `pivot` (viewport pixels) stationary.
    /// Returns true if the scale changed.
    pub fn zoom(&mut self, factor: f64, pivot: Point) -> bool {
        if !(factor.is_finite() && factor > 0.0) {
            return false;
        }
        self.set_scale(self.scale * factor, pivot)
    }

    pub fn zoom_in(&mut self, pivot: Point) -> bool {
        self.zoom(self.scale_factor, pivot)
    }

    pub fn zoom_out(&mut self, pivot: Point) -> bool {
        self.zoom(1.0 / self.scale_factor, pivot)
    }

    /// Set an absolute scale around `pivot` (viewport pixels).
    pub fn set_scale(&mut self, scale: f64, pivot: Point) -> bool {
        let next = self.clamp_scale(scale);
        if next == self.scale {
            return false;
        }
        let anchor = self.to_logical(pivot);
        self.scale = next;
        self.location = Point::new(anchor.x - pivot.x / next, anchor.y - pivot.y / next);
        debug!(scale = next, "viewport zoomed");
        true
    }

    pub fn reset_location(&mut self) -> bool {
        let changed = self.location != Point::ZERO;
        self.location = Point::ZERO;
        changed
    }

    /// Return to the default scale around the viewport centre.
    pub fn reset_zoom(&mut self) -> bool {
        self.set_scale(DEFAULT_SCALE, self.center_pixel())
    }

    /// Centre the visible region on a logical point.
    pub fn bring_into_view(&mut self, point: Point) -> bool {
        let size = self.size();
        let next = Point::new(point.x - size.width / 2.0, point.y - size.height / 2.0);
        let changed = next != self.location;
        self.location = next;
        changed
    }

    /// Zoom and centre so `rect` fills the viewport as far as the scale bounds allow.
    pub fn fit(&mut self, rect: Rect) -> bool {
        let before = (self.location, self.scale);
        if rect.width() > 0.0 && rect.height() > 0.0 {
            let sx = self.view_size.width / rect.width();
            let sy = self.view_size.height / rect.height();
            self.scale = self.clamp_scale(sx.min(sy));
        }
        self.bring_into_view(rect.center());
        before != (self.location, self.scale)
    }

    fn center_pixel(&self) -> Point {
        Point::new(self.view_size.width / 2.0, self.view_size.height / 2.0)
    }

    fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale)
    }

    fn clamp_location(&self, location: Point) -> Point {
        let Some(margin) = self.overscroll_margin else {
            return location;
        };
        let size = self.size();
        let bounds = self.extent.inflate(margin);
        Point::new(
            clamp_axis(location.x, bounds.min_x, bounds.max_x - size.width),
            clamp_axis(location.y, bounds.min_y, bounds.max_y - size.height),
        )
    }
}

/// Clamp into `[lo, hi]`; when the visible span is wider than the bounds the
/// range flips, which keeps the bounds inside the visible span instead.
fn clamp_axis(value: f64, lo: f64, hi: f64) -> f64 {
    if lo <= hi {
        value.clamp(lo, hi)
    } else {
        value.clamp(hi, lo)
    }
}

/// Union of authoritative item bounds grown by `margin`, or an empty
/// rectangle at the origin when there are no items.
pub fn compute_extent(items: &ItemCollection, margin: f64) -> Rect {
    items.bounds().unwrap_or(Rect::ZERO).inflate(margin)
}
