//! Error types for rendering.
//!
//! Per-avatar failures never show up here: they are logged and the avatar
//! is skipped. A `RenderError` means the whole image could not be produced.

use thiserror::Error;

/// Configuration loading error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A value is out of range
    #[error("Invalid configuration value: {0}")]
    Invalid(String),
}

/// Fatal render errors
#[derive(Debug, Error)]
pub enum RenderError {
    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Client(String),

    /// The canvas is too large to allocate
    #[error("Canvas allocation failed for {width}x{height} image")]
    CanvasAllocation {
        /// Requested width in pixels
        width: u32,
        /// Requested height in pixels
        height: u32,
    },

    /// PNG encoding failed
    #[error("Image encoding failed: {0}")]
    Encode(#[from] image::ImageError),

    /// The drawing worker panicked or was cancelled
    #[error("Render worker failed: {0}")]
    Worker(String),
}

impl RenderError {
    /// Shorthand for an invalid configuration value
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        RenderError::Config(ConfigError::Invalid(msg.into()))
    }
}
