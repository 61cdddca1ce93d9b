//! Core error types for ringdown-core.
//!
//! Two failure families exist: missing required presentation elements
//! (fatal for the controller, it declines to mount) and configuration
//! problems. Audio playback failure is deliberately NOT an error -- it is
//! a [`crate::surface::PlaybackOutcome`].

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for ringdown-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Presentation surface errors
    #[error("Surface error: {0}")]
    Surface(#[from] SurfaceError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Presentation-surface errors.
#[derive(Error, Debug)]
pub enum SurfaceError {
    /// A required element (display or dial) is not mounted.
    /// The controller refuses to initialize -- no partial state.
    #[error("required element '{name}' is not mounted")]
    MissingElement { name: &'static str },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

impl From<Box<dyn std::error::Error + Send + Sync>> for CoreError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        CoreError::Custom(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
