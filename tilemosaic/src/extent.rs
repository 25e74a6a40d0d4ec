//! Geographic extent type.
//!
//! An [`Extent`] describes the axis-aligned bounding box of a raster in
//! geographic coordinates, in the same units as the tile axes that produced
//! it (degrees, projected meters, ...). Extents are validated at
//! construction: bounds must be finite and strictly ordered.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when constructing an [`Extent`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtentError {
    /// A bound is NaN or infinite.
    #[error("Extent bound is not finite: {0}")]
    NotFinite(f64),

    /// The x bounds are reversed or collapsed.
    #[error("Invalid x bounds: min {min} must be less than max {max}")]
    InvalidXBounds { min: f64, max: f64 },

    /// The y bounds are reversed or collapsed.
    #[error("Invalid y bounds: min {min} must be less than max {max}")]
    InvalidYBounds { min: f64, max: f64 },
}

/// Axis-aligned geographic bounding box.
///
/// The box is half-open in both directions: a point on the `x_max` or
/// `y_max` edge belongs to the neighbouring extent, which keeps adjacent
/// tiles from claiming the same column or row of pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl Extent {
    /// Creates a validated extent.
    ///
    /// # Errors
    ///
    /// Returns `ExtentError` if any bound is non-finite or if the minimum
    /// of either axis is not strictly below its maximum.
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Result<Self, ExtentError> {
        for bound in [x_min, x_max, y_min, y_max] {
            if !bound.is_finite() {
                return Err(ExtentError::NotFinite(bound));
            }
        }
        if x_min >= x_max {
            return Err(ExtentError::InvalidXBounds {
                min: x_min,
                max: x_max,
            });
        }
        if y_min >= y_max {
            return Err(ExtentError::InvalidYBounds {
                min: y_min,
                max: y_max,
            });
        }
        Ok(Self {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    /// Minimum x bound.
    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    /// Maximum x bound.
    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    /// Minimum y bound.
    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    /// Maximum y bound.
    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    /// Width of the extent in geographic units.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Height of the extent in geographic units.
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Smallest extent covering both `self` and `other`.
    pub fn union(&self, other: &Extent) -> Extent {
        Extent {
            x_min: self.x_min.min(other.x_min),
            x_max: self.x_max.max(other.x_max),
            y_min: self.y_min.min(other.y_min),
            y_max: self.y_max.max(other.y_max),
        }
    }

    /// Whether the point lies inside the half-open box.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x_min && x < self.x_max && y >= self.y_min && y < self.y_max
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}] x [{}, {}]",
            self.x_min, self.x_max, self.y_min, self.y_max
        )
    }
}
