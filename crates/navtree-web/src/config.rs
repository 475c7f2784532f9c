#![forbid(unsafe_code)]

//! Policy-as-data configuration for the menu editor.
//!
//! # Loading
//!
//! ```toml
//! # navtree.toml
//! invalid_marker_timeout_ms = 1500
//!
//! [drop_zone]
//! edge_margin = 6.0
//!
//! [layout]
//! row_height = 44.0
//! ```
//!
//! ```rust,ignore
//! let config = EditorConfig::from_toml_file("navtree.toml")?;
//! ```
//!
//! # Defaults
//!
//! Every field defaults to the stock editor behavior, so
//! `EditorConfig::default()` needs no file at all.

#[cfg(feature = "config")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use navtree_widgets::{DEFAULT_INVALID_MARKER_TIMEOUT, DropZoneConfig, LayoutConfig};

/// Tunables for hit testing, layout, and input feedback.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct EditorConfig {
    pub drop_zone: DropZoneConfig,
    pub layout: LayoutConfig,
    /// How long an empty custom-link field stays flagged.
    pub invalid_marker_timeout_ms: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            drop_zone: DropZoneConfig::default(),
            layout: LayoutConfig::default(),
            invalid_marker_timeout_ms: DEFAULT_INVALID_MARKER_TIMEOUT.as_millis() as u64,
        }
    }
}

impl EditorConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, EditorConfigError> {
        toml::from_str(s).map_err(EditorConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, EditorConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(EditorConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, EditorConfigError> {
        serde_json::from_str(s).map_err(EditorConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, EditorConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(EditorConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Marker timeout as a duration.
    #[must_use]
    pub const fn invalid_marker_timeout(&self) -> Duration {
        Duration::from_millis(self.invalid_marker_timeout_ms)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let drop_zone = &self.drop_zone;
        if !drop_zone.edge_margin.is_finite() || drop_zone.edge_margin < 0.0 {
            errors.push(format!(
                "drop_zone.edge_margin must be finite and >= 0, got {}",
                drop_zone.edge_margin
            ));
        }
        if !drop_zone.inside_offset_x.is_finite() || drop_zone.inside_offset_x < 0.0 {
            errors.push(format!(
                "drop_zone.inside_offset_x must be finite and >= 0, got {}",
                drop_zone.inside_offset_x
            ));
        }

        let layout = &self.layout;
        if !layout.row_height.is_finite() || layout.row_height <= 0.0 {
            errors.push(format!(
                "layout.row_height must be finite and > 0, got {}",
                layout.row_height
            ));
        }
        if !layout.indent.is_finite() || layout.indent < 0.0 {
            errors.push(format!(
                "layout.indent must be finite and >= 0, got {}",
                layout.indent
            ));
        }
        if !layout.edit_form_height.is_finite() || layout.edit_form_height < 0.0 {
            errors.push(format!(
                "layout.edit_form_height must be finite and >= 0, got {}",
                layout.edit_form_height
            ));
        }

        // Nesting needs a band between the two edge margins.
        if drop_zone.edge_margin * 2.0 >= layout.row_height {
            errors.push(format!(
                "drop_zone.edge_margin ({}) must be less than half of layout.row_height ({})",
                drop_zone.edge_margin, layout.row_height
            ));
        }

        errors
    }
}

/// Errors that can occur when loading an editor configuration.
#[derive(Debug)]
pub enum EditorConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for EditorConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for EditorConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
