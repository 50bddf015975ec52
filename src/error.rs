//! Error types for Bunny Dash

use thiserror::Error;

/// Errors raised by frame steps and startup
#[derive(Debug, Error)]
pub enum GameError {
    /// An asset could not be fetched
    #[error("Asset load failed for {path}: {reason}")]
    Asset { path: String, reason: String },

    /// An asset was fetched but could not be decoded
    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },

    /// Browser/platform call failed (missing window, canvas, ...)
    #[error("Platform error: {0}")]
    Platform(String),

    /// GPU surface or device error
    #[error("Render error: {0}")]
    Render(String),

    /// Configuration could not be parsed
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    /// A frame step failed
    #[error("Step '{step}' failed: {reason}")]
    Step { step: &'static str, reason: String },
}

impl From<wgpu::SurfaceError> for GameError {
    fn from(err: wgpu::SurfaceError) -> Self {
        GameError::Render(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
