//! Error types for tile construction.

use thiserror::Error;

use crate::extent::ExtentError;
use crate::tile::Origin;

/// Errors that can occur when constructing a [`crate::tile::Tile`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TileError {
    /// Axis entry count does not match the raster dimension it describes.
    #[error("{axis} axis has {len} entries, raster requires {expected}")]
    AxisLengthMismatch {
        axis: &'static str,
        len: usize,
        expected: usize,
    },

    /// Axis has fewer than two entries, so pixel spacing cannot be derived.
    #[error("{axis} axis has {len} entries, at least 2 are required to derive spacing")]
    AxisTooShort { axis: &'static str, len: usize },

    /// Consecutive axis entries are identical.
    #[error("{axis} axis has zero spacing between entries")]
    ZeroSpacing { axis: &'static str },

    /// Axis entries are not regularly spaced.
    #[error("{axis} axis spacing at index {index} is {found}, expected {expected}")]
    IrregularSpacing {
        axis: &'static str,
        index: usize,
        expected: f64,
        found: f64,
    },

    /// The y axis direction contradicts the stated origin.
    #[error("y axis direction contradicts origin {origin}")]
    OriginAxisMismatch { origin: Origin },

    /// The axes describe a degenerate extent.
    #[error(transparent)]
    Extent(#[from] ExtentError),
}
