//! Canvas configuration.
//!
//! Settings are plain serde data so hosts can keep them in a JSON file next to
//! their own preferences. Every field has a default; a partial file only
//! overrides what it names.

use crate::constants::{
    AUTO_PAN_EDGE_MARGIN, AUTO_PAN_SPEED, AUTO_PAN_TICK_RATE_MS, EXTENT_MARGIN, GRID_SPACING,
    MAX_SCALE, MIN_SCALE, SCALE_FACTOR,
};
use crate::error::{SettingsError, SettingsResult};
use crate::selection::SelectionMode;
use crate::types::Size;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    pub can_select_multiple_items: bool,
    /// Move items on every pointer sample instead of committing on release
    pub real_time_dragging_enabled: bool,
    /// Update selection flags on every pointer sample instead of on release
    pub real_time_selection_enabled: bool,
    pub enable_snapping: bool,
    /// Snapping unit; zero or negative disables snapping
    pub grid_spacing: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    /// Per-step zoom multiplier
    pub scale_factor: f64,
    /// Viewport pixels panned per auto-pan tick
    pub auto_pan_speed: f64,
    pub auto_pan_tick_rate_ms: u64,
    /// Distance from the viewport edge, in viewport pixels, that activates auto-pan
    pub auto_pan_edge_margin: f64,
    pub disable_auto_panning: bool,
    /// Items may not be dragged below `-negative_limit` on either axis
    pub negative_limit: Option<f64>,
    /// Drags that would shrink the extent below this size are rejected
    pub min_extent: Option<Size>,
    /// Margin added around the union of item bounds
    pub extent_margin: f64,
    /// How far the visible region may leave the extent when panning
    pub overscroll_margin: Option<f64>,
    pub default_selection_mode: SelectionMode,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            can_select_multiple_items: true,
            real_time_dragging_enabled: true,
            real_time_selection_enabled: true,
            enable_snapping: false,
            grid_spacing: GRID_SPACING,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            scale_factor: SCALE_FACTOR,
            auto_pan_speed: AUTO_PAN_SPEED,
            auto_pan_tick_rate_ms: AUTO_PAN_TICK_RATE_MS,
            auto_pan_edge_margin: AUTO_PAN_EDGE_MARGIN,
            disable_auto_panning: false,
            negative_limit: None,
            min_extent: None,
            extent_margin: EXTENT_MARGIN,
            overscroll_margin: None,
            default_selection_mode: SelectionMode::Append,
        }
    }
}

impl CanvasSettings {
    /// Load settings from a JSON file and validate them.
    pub fn load(path: impl AsRef<Path>) -> SettingsResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(json: &str) -> SettingsResult<Self> {
        let settings: CanvasSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> SettingsResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Snapping grid, if snapping is enabled and the spacing is usable.
    pub fn snap_spacing(&self) -> Option<f64> {
        (self.enable_snapping && self.grid_spacing > 0.0).then_some(self.grid_spacing)
    }

    pub fn auto_pan_interval(&self) -> Duration {
        Duration::from_millis(self.auto_pan_tick_rate_ms)
    }

    pub fn validate(&self) -> SettingsResult<()> {
        let finite = [
            ("grid_spacing", self.grid_spacing),
            ("min_scale", self.min_scale),
            ("max_scale", self.max_scale),
            ("scale_factor", self.scale_factor),
            ("auto_pan_speed", self.auto_pan_speed),
            ("auto_pan_edge_margin", self.auto_pan_edge_margin),
            ("extent_margin", self.extent_margin),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(SettingsError::invalid(field, "must be finite"));
            }
        }

        if self.min_scale <= 0.0 {
            return Err(SettingsError::invalid("min_scale", "must be positive"));
        }
        if self.min_scale > self.max_scale {
            return Err(SettingsError::invalid(
                "max_scale",
                format!("{} is below min_scale {}", self.max_scale, self.min_scale),
            ));
        }
        if self.scale_factor <= 1.0 {
            return Err(SettingsError::invalid("scale_factor", "must be greater than 1"));
        }
        if self.auto_pan_tick_rate_ms == 0 {
            return Err(SettingsError::invalid("auto_pan_tick_rate_ms", "must be non-zero"));
        }
        if self.auto_pan_speed < 0.0 {
            return Err(SettingsError::invalid("auto_pan_speed", "must not be negative"));
        }
        if self.auto_pan_edge_margin < 0.0 {
            return Err(SettingsError::invalid("auto_pan_edge_margin", "must not be negative"));
        }
        if self.extent_margin < 0.0 {
            return Err(SettingsError::invalid("extent_margin", "must not be negative"));
        }
        if let Some(limit) = self.negative_limit {
            if !limit.is_finite() || limit < 0.0 {
                return Err(SettingsError::invalid(
                    "negative_limit",
                    "must be a finite, non-negative distance",
                ));
            }
        }
        if let Some(margin) = self.overscroll_margin {
            if !margin.is_finite() || margin < 0.0 {
                return Err(SettingsError::invalid(
                    "overscroll_margin",
                    "must be a finite, non-negative distance",
                ));
            }
        }
        if let Some(min) = self.min_extent {
            if !(min.width >= 0.0 && min.height >= 0.0) {
                return Err(SettingsError::invalid("min_extent", "must not be negative"));
            }
        }
        Ok(())
    }
}
