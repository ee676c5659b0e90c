//! DVD Screensaver - a bouncing logo with a threaded simulation
//!
//! Core modules:
//! - `sim`: Shared motion state, collision rule and the logic thread
//! - `frame`: Per-frame flag consumption and color selection
//! - `renderer`: wgpu pipeline for the textured quad
//! - `app`: Window lifecycle and thread orchestration
//! - `settings`: JSON-backed configuration

pub mod app;
pub mod clock;
pub mod error;
pub mod frame;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{AppError, SettingsError, TextureError};
pub use settings::Settings;

/// Default configuration constants
pub mod consts {
    /// Logic thread sleep between ticks (milliseconds)
    pub const TICK_INTERVAL_MS: u64 = 16;
    /// Minimum time between two reflections (seconds)
    pub const DEBOUNCE_SECS: f64 = 0.1;

    /// Half the side length of the logo quad, in NDC units
    pub const HALF_EXTENT: f32 = 0.2;
    /// Viewport walls sit at +/- this value on both axes
    pub const BOUNDARY: f32 = 1.0;

    /// Initial velocity components are drawn from this range (units/s)
    pub const MIN_START_SPEED: f32 = 0.3;
    pub const MAX_START_SPEED: f32 = 0.6;

    /// Window defaults
    pub const WINDOW_WIDTH: u32 = 800;
    pub const WINDOW_HEIGHT: u32 = 600;
    pub const WINDOW_TITLE: &str = "DVD Screensaver Simulator";

    /// Logo image, relative to the working directory
    pub const TEXTURE_PATH: &str = "assets/dvd_logo.png";
    /// Optional settings file, relative to the working directory
    pub const SETTINGS_FILE: &str = "dvd-screensaver.json";
}
