//! Machine configuration for the translator
//!
//! The seven options the job model and the G-code encoder consume. A value of
//! [`LaserSettings`] is handed to every component that needs it; nothing reads
//! settings from global state.
//!
//! Settings files may be JSON or TOML. Missing keys fall back to defaults.

use crate::error::{SettingsError, SettingsResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Feedrate given to a pass created by the lasertag parser.
pub const DEFAULT_PASS_FEEDRATE: f64 = 1200.0;

/// Intensity given to a pass created by the lasertag parser.
pub const DEFAULT_PASS_INTENSITY: f64 = 10.0;

/// Upper bound for `num_digits`.
pub const MAX_NUM_DIGITS: usize = 8;

/// Settings consumed by the job model and the encoders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaserSettings {
    /// Seek (non-cutting) feedrate in mm/min
    pub max_seek_speed: u32,
    /// Feedrate used while rastering, in mm/min
    pub raster_feedrate: u32,
    /// Decimal digits for motion coordinates
    pub num_digits: usize,
    /// Raster dot pitch in mm
    pub kerf: f64,
    /// Raster runway on each side of a row, in mm
    pub raster_offset: f64,
    /// Maximum number of raster bytes per `G8D` line
    pub raster_linechars: usize,
    /// Longest feed segment allowed after segmentation, in mm
    pub max_segment_length: f64,
}

impl Default for LaserSettings {
    fn default() -> Self {
        Self {
            max_seek_speed: 8000,
            raster_feedrate: 3000,
            num_digits: 2,
            kerf: 0.1,
            raster_offset: 40.0,
            raster_linechars: 70,
            max_segment_length: 5.0,
        }
    }
}

impl LaserSettings {
    /// Create settings with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from a `.json` or `.toml` file and validate them
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let settings: Self = match extension(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        settings.validate()?;
        tracing::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings to a `.json` or `.toml` file
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match extension(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate settings
    pub fn validate(&self) -> SettingsResult<()> {
        if self.max_seek_speed == 0 {
            return Err(SettingsError::invalid("max_seek_speed", "must be > 0"));
        }

        if self.raster_feedrate == 0 {
            return Err(SettingsError::invalid("raster_feedrate", "must be > 0"));
        }

        if self.num_digits > MAX_NUM_DIGITS {
            return Err(SettingsError::invalid(
                "num_digits",
                format!("must be <= {}", MAX_NUM_DIGITS),
            ));
        }

        if !(self.kerf.is_finite() && self.kerf > 0.0) {
            return Err(SettingsError::invalid("kerf", "must be > 0"));
        }

        if !(self.raster_offset.is_finite() && self.raster_offset >= 0.0) {
            return Err(SettingsError::invalid("raster_offset", "must be >= 0"));
        }

        if self.raster_linechars == 0 {
            return Err(SettingsError::invalid("raster_linechars", "must be > 0"));
        }

        if !(self.max_segment_length.is_finite() && self.max_segment_length > 0.0) {
            return Err(SettingsError::invalid("max_segment_length", "must be > 0"));
        }

        Ok(())
    }
}

enum Format {
    Json,
    Toml,
}

fn extension(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(SettingsError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}
