//! Error types

use thiserror::Error;

/// Fatal errors that stop the application before or during startup
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to create window: {0}")]
    WindowCreation(String),

    #[error("Failed to initialize graphics device: {0}")]
    LoaderInit(String),

    #[error("Failed to start logic thread: {0}")]
    LogicThread(#[from] std::io::Error),

    #[error("Event loop error: {0}")]
    EventLoop(String),
}

impl From<winit::error::EventLoopError> for AppError {
    fn from(err: winit::error::EventLoopError) -> Self {
        AppError::EventLoop(err.to_string())
    }
}

/// Logo loading failures (non-fatal, a placeholder is used instead)
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Image has no pixels ({width}x{height})")]
    Empty { width: u32, height: u32 },
}

/// Settings file failures
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid settings: {0}")]
    Invalid(String),
}
