//! Georeferenced image tiles.
//!
//! A [`Tile`] pairs a [`Raster`] with the geographic [`Extent`] it covers
//! and an [`Origin`] flag stating whether raster row 0 maps to the top or
//! bottom of that extent. Tiles are immutable once built; the mosaicker
//! reads them and never writes back.
//!
//! Tiles can be built two ways:
//!
//! - [`Tile::from_extent`] when the extent is already known, the common
//!   case when an image source hands back `(image, extent, origin)`.
//! - [`Tile::from_axes`] when the caller has per-column x and per-row y
//!   coordinate sequences instead. Axes must be regularly spaced; each
//!   value is the minimum-coordinate edge of its pixel.

mod error;

pub use error::TileError;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::extent::Extent;
use crate::raster::Raster;

/// Relative spacing tolerance when validating axis regularity.
const SPACING_TOLERANCE: f64 = 1e-6;

/// Whether raster row 0 maps to the top or bottom of the extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Row 0 is the top of the extent (`y_max`).
    Upper,
    /// Row 0 is the bottom of the extent (`y_min`).
    Lower,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Upper => write!(f, "upper"),
            Origin::Lower => write!(f, "lower"),
        }
    }
}

/// One georeferenced raster tile.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    raster: Raster,
    extent: Extent,
    origin: Origin,
}

impl Tile {
    /// Creates a tile from a raster and the extent it covers.
    pub fn from_extent(raster: Raster, extent: Extent, origin: Origin) -> Self {
        Self {
            raster,
            extent,
            origin,
        }
    }

    /// Creates a tile from per-column x and per-row y coordinate axes.
    ///
    /// Each axis value is the minimum-coordinate edge of its pixel, the
    /// convention `linspace(min, max, n, endpoint=False)` produces. Axes
    /// must be regularly spaced and may run in either direction: a
    /// decreasing x axis is normalized by mirroring the raster columns,
    /// while the y axis direction must agree with `origin` (increasing for
    /// [`Origin::Lower`], decreasing for [`Origin::Upper`]).
    ///
    /// # Errors
    ///
    /// Returns `TileError` if axis lengths do not match the raster
    /// dimensions, an axis has fewer than two entries, spacing is zero or
    /// irregular, or the y axis direction contradicts the origin flag.
    pub fn from_axes(
        raster: Raster,
        x_axis: &[f64],
        y_axis: &[f64],
        origin: Origin,
    ) -> Result<Self, TileError> {
        if x_axis.len() != raster.width() as usize {
            return Err(TileError::AxisLengthMismatch {
                axis: "x",
                len: x_axis.len(),
                expected: raster.width() as usize,
            });
        }
        if y_axis.len() != raster.height() as usize {
            return Err(TileError::AxisLengthMismatch {
                axis: "y",
                len: y_axis.len(),
                expected: raster.height() as usize,
            });
        }

        let x_step = axis_step("x", x_axis)?;
        let y_step = axis_step("y", y_axis)?;

        let y_increasing = y_step > 0.0;
        let origin_consistent = match origin {
            Origin::Lower => y_increasing,
            Origin::Upper => !y_increasing,
        };
        if !origin_consistent {
            return Err(TileError::OriginAxisMismatch { origin });
        }

        let extent = Extent::new(
            axis_min(x_axis),
            axis_max(x_axis) + x_step.abs(),
            axis_min(y_axis),
            axis_max(y_axis) + y_step.abs(),
        )?;

        let raster = if x_step < 0.0 {
            raster.flipped_horizontal()
        } else {
            raster
        };

        Ok(Self {
            raster,
            extent,
            origin,
        })
    }

    /// The tile's pixel data.
    pub fn raster(&self) -> &Raster {
        &self.raster
    }

    /// The geographic extent the tile covers.
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// The tile's orientation.
    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.raster.height()
    }

    /// Channels per pixel.
    pub fn channels(&self) -> u8 {
        self.raster.channels()
    }

    /// Geographic width of one pixel.
    pub fn x_step(&self) -> f64 {
        self.extent.width() / self.raster.width() as f64
    }

    /// Geographic height of one pixel.
    pub fn y_step(&self) -> f64 {
        self.extent.height() / self.raster.height() as f64
    }

    /// Leading-edge x coordinate of every column, left to right.
    pub fn x_axis(&self) -> Vec<f64> {
        let step = self.x_step();
        (0..self.raster.width())
            .map(|c| self.extent.x_min() + c as f64 * step)
            .collect()
    }

    /// Leading-edge y coordinate of every row, in row order.
    ///
    /// Increasing for [`Origin::Lower`] tiles, decreasing for
    /// [`Origin::Upper`] tiles, mirroring the row layout in memory.
    pub fn y_axis(&self) -> Vec<f64> {
        let step = self.y_step();
        (0..self.raster.height())
            .map(|r| match self.origin {
                Origin::Lower => self.extent.y_min() + r as f64 * step,
                Origin::Upper => self.extent.y_max() - (r as f64 + 1.0) * step,
            })
            .collect()
    }
}

/// Derives the constant step of a regularly spaced axis.
fn axis_step(axis: &'static str, values: &[f64]) -> Result<f64, TileError> {
    if values.len() < 2 {
        return Err(TileError::AxisTooShort {
            axis,
            len: values.len(),
        });
    }
    let step = values[1] - values[0];
    if step == 0.0 || !step.is_finite() {
        return Err(TileError::ZeroSpacing { axis });
    }
    let tolerance = step.abs() * SPACING_TOLERANCE;
    for (index, pair) in values.windows(2).enumerate() {
        let found = pair[1] - pair[0];
        if !found.is_finite() || (found - step).abs() > tolerance {
            return Err(TileError::IrregularSpacing {
                axis,
                index,
                expected: step,
                found,
            });
        }
    }
    Ok(step)
}

fn axis_min(values: &[f64]) -> f64 {
    // Regular spacing means the extremes sit at the ends.
    values[0].min(values[values.len() - 1])
}

fn axis_max(values: &[f64]) -> f64 {
    values[0].max(values[values.len() - 1])
}
