//! Error types for mosaicking operations.

use thiserror::Error;

use crate::raster::RasterError;
use crate::tile::Origin;

/// Errors that can occur while merging tiles.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MosaicError {
    /// No tiles were supplied.
    #[error("No tiles supplied to merge")]
    EmptyInput,

    /// A tile's orientation differs from the first tile's.
    #[error("Tile {index} has origin {found}, expected {expected}")]
    OriginMismatch {
        index: usize,
        expected: Origin,
        found: Origin,
    },

    /// A tile's channel depth differs from the first tile's.
    #[error("Tile {index} has {found} channels, expected {expected}")]
    ChannelMismatch {
        index: usize,
        expected: u8,
        found: u8,
    },

    /// The output grid would exceed the supported size.
    #[error("Output grid {width}x{height} exceeds {max_pixels} pixels")]
    OutputTooLarge {
        width: u64,
        height: u64,
        max_pixels: u64,
    },

    /// The output raster could not be allocated.
    #[error(transparent)]
    Raster(#[from] RasterError),
}
