//! Application settings
//!
//! Read from an optional JSON file next to the binary's working directory.
//! Every field has a default, so a partial file only overrides what it names.

use std::path::{Path, PathBuf};
use std::time::Duration;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;
use crate::frame::Palette;
use crate::sim::{CollisionRule, LogicConfig};

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Window ===
    pub window_width: u32,
    pub window_height: u32,
    pub window_title: String,

    // === Logo ===
    /// PNG shown on the quad; a blank quad is drawn if it fails to load
    pub texture_path: PathBuf,
    /// Color before the first collision
    pub initial_color: Vec3,
    /// Color applied on a corner hit
    pub corner_color: Vec3,
    /// Minimum value for each channel of a random collision color
    pub color_floor: f32,

    // === Simulation ===
    /// Logic thread sleep per tick (milliseconds)
    pub tick_interval_ms: u64,
    /// Debounce window between reflections (seconds)
    pub debounce_secs: f64,
    pub half_extent: f32,
    pub boundary: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Fixed RNG seed for reproducible runs; random when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            window_title: WINDOW_TITLE.to_string(),

            texture_path: PathBuf::from(TEXTURE_PATH),
            initial_color: Vec3::ONE,
            corner_color: Vec3::new(1.0, 0.84, 0.0),
            color_floor: 0.2,

            tick_interval_ms: TICK_INTERVAL_MS,
            debounce_secs: DEBOUNCE_SECS,
            half_extent: HALF_EXTENT,
            boundary: BOUNDARY,
            min_speed: MIN_START_SPEED,
            max_speed: MAX_START_SPEED,
            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string and validate them
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Read settings, falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings file at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |msg: String| -> Result<(), SettingsError> { Err(SettingsError::Invalid(msg)) };

        if self.window_width == 0 || self.window_height == 0 {
            return invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.window_width, self.window_height
            ));
        }
        if self.tick_interval_ms == 0 {
            return invalid("tick_interval_ms must be positive".into());
        }
        let floats = [
            ("min_speed", self.min_speed),
            ("max_speed", self.max_speed),
            ("half_extent", self.half_extent),
            ("boundary", self.boundary),
            ("color_floor", self.color_floor),
        ];
        if let Some((name, value)) = floats.iter().find(|(_, v)| !v.is_finite()) {
            return invalid(format!("{name} must be finite, got {value}"));
        }
        if !self.debounce_secs.is_finite() {
            return invalid(format!("debounce_secs must be finite, got {}", self.debounce_secs));
        }
        if !(self.debounce_secs >= 0.0) {
            return invalid(format!("debounce_secs must be >= 0, got {}", self.debounce_secs));
        }
        if !(self.boundary > 0.0) || !(self.half_extent > 0.0) || self.half_extent >= self.boundary {
            return invalid(format!(
                "half_extent {} must be positive and smaller than boundary {}",
                self.half_extent, self.boundary
            ));
        }
        if !(self.min_speed > 0.0) || self.min_speed > self.max_speed {
            return invalid(format!(
                "speed range [{}, {}] must be positive and ordered",
                self.min_speed, self.max_speed
            ));
        }
        if !(0.0..=1.0).contains(&self.color_floor) {
            return invalid(format!("color_floor must be in [0, 1], got {}", self.color_floor));
        }
        Ok(())
    }

    pub fn logic_config(&self) -> LogicConfig {
        LogicConfig {
            tick_interval: Duration::from_millis(self.tick_interval_ms),
            debounce: self.debounce_secs,
            rule: CollisionRule::new(self.half_extent, self.boundary),
        }
    }

    pub fn palette(&self) -> Palette {
        Palette {
            corner_color: self.corner_color,
            channel_floor: self.color_floor,
        }
    }
}
