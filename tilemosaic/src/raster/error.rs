//! Error types for raster construction and conversion.

use thiserror::Error;

/// Errors that can occur when constructing or converting a raster.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RasterError {
    /// Width or height is zero.
    #[error("Raster dimensions must be non-zero, got {width}x{height}")]
    ZeroDimension { width: u32, height: u32 },

    /// Channel count outside the supported 1..=4 range.
    #[error("Unsupported channel count {0}, expected 1 to 4")]
    InvalidChannelCount(u8),

    /// Sample buffer does not match the declared dimensions.
    #[error("Sample buffer holds {got} bytes, dimensions require {expected}")]
    BufferSizeMismatch { got: usize, expected: usize },

    /// A conversion required a specific channel count the raster lacks.
    #[error("Raster has {got} channels, conversion requires {expected}")]
    ChannelMismatch { got: u8, expected: u8 },
}
