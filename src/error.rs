//! Error types for canvas configuration.
//!
//! Interaction operations never fail: invalid transitions and boundary
//! violations are silent no-ops. Only loading and applying settings can.

use thiserror::Error;

/// Errors that can occur while loading or applying [`crate::settings::CanvasSettings`]
#[derive(Error, Debug)]
pub enum SettingsError {
    /// IO error from std::io
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error from serde_json
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A value is outside its accepted range
    #[error("Invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl SettingsError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        SettingsError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Result type alias for settings operations
pub type SettingsResult<T> = Result<T, SettingsError>;
