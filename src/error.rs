//! Error types for the renderer

use thiserror::Error;

use crate::dimension::Dimension;

/// Result type alias for renderer operations
pub type Result<T> = std::result::Result<T, RenderError>;

/// Errors that can occur while configuring or running a renderer
#[derive(Error, Debug)]
pub enum RenderError {
    /// A dimension had a zero-length axis
    #[error("Invalid dimension {width}x{height}: both axes must be positive")]
    InvalidDimension { width: u32, height: u32 },

    /// Requested output size is smaller than the smallest renderable symbol
    #[error("Requested dimension {requested} is below the minimum {minimum}")]
    RequestedDimensionTooSmall {
        requested: Dimension,
        minimum: Dimension,
    },

    /// Module size must be at least one pixel
    #[error("Invalid module size {0}: must be at least 1")]
    InvalidModuleSize(u32),

    /// Accessor called on a renderer whose mode does not support it
    #[error("{operation} is not supported by the {mode} renderer")]
    Unsupported {
        operation: &'static str,
        mode: &'static str,
    },

    /// Derived image size is larger than the configured ceiling.
    ///
    /// `actual` saturates at `u32::MAX` per axis when the true product does not fit in a `u32`;
    /// such a product always counts as exceeding, even an unbounded ceiling.
    #[error("Image dimension {actual} exceeds the maximum {max}")]
    SizeExceeded { max: Dimension, actual: Dimension },

    /// Render was called with a matrix that has no modules
    #[error("Module matrix is empty")]
    EmptyMatrix,

    /// A fit policy returned a size too small for the scaled symbol
    #[error("Fitted dimension {fitted} cannot hold the scaled symbol {symbol}")]
    FitTooSmall { fitted: Dimension, symbol: Dimension },

    /// Module rows were empty or of unequal length
    #[error("Invalid module matrix: {0}")]
    InvalidMatrix(String),

    /// Failed to create an export directory
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to encode or write an exported image
    #[error("Image export failed: {0}")]
    Image(#[from] image::ImageError),
}

impl RenderError {
    pub(crate) fn unsupported(operation: &'static str, mode: &'static str) -> Self {
        RenderError::Unsupported { operation, mode }
    }
}
