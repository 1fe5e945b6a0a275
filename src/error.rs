//! # Error Types
//!
//! This module defines error types used throughout the telar library.

use thiserror::Error;

/// Main error type for telar operations
#[derive(Debug, Error)]
pub enum TelarError {
    /// Invalid generation parameters (pin count, line weight, spacing)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Grayscale raster dimensions don't match the pin layout's canvas
    #[error(
        "Dimension mismatch: image is {image_width}x{image_height}, \
         pin layout was built for {canvas_width}x{canvas_height}"
    )]
    DimensionMismatch {
        image_width: usize,
        image_height: usize,
        canvas_width: usize,
        canvas_height: usize,
    },

    /// Image decoding or processing error
    #[error("Image error: {0}")]
    Image(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
