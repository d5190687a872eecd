//! # Error Types
//!
//! This module defines error types used throughout the thumbprint library.

use thiserror::Error;

/// Convenience alias for results carrying a [`ThumbprintError`].
pub type Result<T> = std::result::Result<T, ThumbprintError>;

/// Main error type for thumbprint operations
#[derive(Debug, Error)]
pub enum ThumbprintError {
    /// Missing or empty required argument, or a parameter outside its range
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Two byte sequences that must have equal length do not
    #[error("Length mismatch: {left} bytes vs {right} bytes")]
    LengthMismatch { left: usize, right: usize },

    /// Non-positive width or height requested from a resampler
    #[error("Invalid dimensions: {width}x{height}")]
    Dimension { width: u32, height: u32 },

    /// Image decoding, encoding or raster contract error
    #[error("Image error: {0}")]
    Image(String),

    /// Font loading error
    #[error("Font error: {0}")]
    Font(String),

    /// Malformed hexadecimal text
    #[error("Hex error: {0}")]
    Hex(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<image::ImageError> for ThumbprintError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(e) => ThumbprintError::Io(e),
            other => ThumbprintError::Image(other.to_string()),
        }
    }
}

impl From<hex::FromHexError> for ThumbprintError {
    fn from(err: hex::FromHexError) -> Self {
        ThumbprintError::Hex(err.to_string())
    }
}
