//! The tile mosaicker.
//!
//! [`merge`] composites a sequence of georeferenced [`Tile`]s into one
//! contiguous raster covering the union of their extents, sized so no input
//! loses detail when tiles of different zoom levels are combined.
//!
//! # Algorithm
//!
//! 1. The target resolution is the finest per-pixel spacing observed across
//!    the inputs, for x and y independently.
//! 2. The output extent is the bounding-box union of the input extents.
//! 3. The output raster is zero-initialized (transparent/black background)
//!    at the target resolution and the shared channel depth.
//! 4. Each tile is resampled onto the output grid with nearest-neighbor
//!    lookup at the position implied by its extent. Tiles are composited in
//!    input order and later tiles win where they overlap.
//!
//! The grid dimensions are rounded from the union extent divided by the
//! target resolution, and the effective pixel size is re-derived from the
//! rounded dimensions so the grid spans the union extent exactly even when
//! the extent is not an integer multiple of the finest spacing.
//!
//! The operation is pure: no I/O, no shared state, and safe to call from
//! multiple threads as long as the inputs are not mutated during the call.

mod error;

pub use error::MosaicError;

use tracing::debug;

use crate::extent::Extent;
use crate::raster::Raster;
use crate::tile::{Origin, Tile};

/// Background sample value for pixels no tile covers.
const BACKGROUND: u8 = 0;

/// Upper bound on output pixels, so a degenerate extent/resolution pair
/// (one fine tile far away from another) fails instead of attempting an
/// enormous allocation. 2^28 pixels is 1 GiB of RGBA samples.
const MAX_OUTPUT_PIXELS: u64 = 1 << 28;

/// Result of a merge: one raster, its extent, and its orientation.
///
/// Shaped for a rendering surface that accepts an image plus the
/// geographic extent to draw it into.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedImage {
    /// The composited raster.
    pub raster: Raster,
    /// Bounding-box union of the input extents.
    pub extent: Extent,
    /// Orientation shared by every input tile.
    pub origin: Origin,
}

/// Merges georeferenced tiles into a single raster.
///
/// # Arguments
///
/// * `tiles` - Tiles to composite, in painting order (later tiles win
///   where they overlap earlier ones)
///
/// # Errors
///
/// Returns `MosaicError::EmptyInput` if `tiles` is empty,
/// `MosaicError::OriginMismatch` / `MosaicError::ChannelMismatch` if the
/// tiles do not all share one orientation and channel depth, or
/// `MosaicError::OutputTooLarge` if the union extent at the target
/// resolution would exceed the supported output size. No partial result is
/// produced on failure.
pub fn merge(tiles: &[Tile]) -> Result<MergedImage, MosaicError> {
    let first = tiles.first().ok_or(MosaicError::EmptyInput)?;
    let origin = first.origin();
    let channels = first.channels();

    for (index, tile) in tiles.iter().enumerate().skip(1) {
        if tile.origin() != origin {
            return Err(MosaicError::OriginMismatch {
                index,
                expected: origin,
                found: tile.origin(),
            });
        }
        if tile.channels() != channels {
            return Err(MosaicError::ChannelMismatch {
                index,
                expected: channels,
                found: tile.channels(),
            });
        }
    }

    let mut bounds = first.extent();
    let mut x_res = first.x_step();
    let mut y_res = first.y_step();
    for tile in &tiles[1..] {
        bounds = bounds.union(&tile.extent());
        x_res = x_res.min(tile.x_step());
        y_res = y_res.min(tile.y_step());
    }

    let width = (bounds.width() / x_res).round().max(1.0) as u64;
    let height = (bounds.height() / y_res).round().max(1.0) as u64;
    if width.checked_mul(height).map_or(true, |p| p > MAX_OUTPUT_PIXELS) {
        return Err(MosaicError::OutputTooLarge {
            width,
            height,
            max_pixels: MAX_OUTPUT_PIXELS,
        });
    }
    let width = width as u32;
    let height = height as u32;

    // The rounded grid must span the union extent exactly, so the actual
    // pixel size is derived from the rounded dimensions rather than the
    // finest input spacing. Otherwise trailing rows/columns would sample
    // past the covered territory on non-grid-aligned inputs.
    let x_size = bounds.width() / width as f64;
    let y_size = bounds.height() / height as f64;

    debug!(
        tiles = tiles.len(),
        width,
        height,
        extent = %bounds,
        "Merging tiles onto target grid"
    );

    let mut canvas = Raster::filled(width, height, channels, BACKGROUND)?;
    for tile in tiles {
        paint_tile(&mut canvas, tile, &bounds, x_size, y_size, origin);
    }

    debug!(width, height, "Merge complete");

    Ok(MergedImage {
        raster: canvas,
        extent: bounds,
        origin,
    })
}

/// Resamples one tile onto the canvas, overwriting whatever is there.
fn paint_tile(
    canvas: &mut Raster,
    tile: &Tile,
    bounds: &Extent,
    x_size: f64,
    y_size: f64,
    origin: Origin,
) {
    let te = tile.extent();
    let source = tile.raster();
    let source_width = source.width() as f64;
    let source_height = source.height() as f64;

    // Output rows/columns whose centers can fall inside this tile.
    let col_lo = ((te.x_min() - bounds.x_min()) / x_size).floor().max(0.0) as u32;
    let col_hi = ((te.x_max() - bounds.x_min()) / x_size)
        .ceil()
        .min(canvas.width() as f64) as u32;
    let (row_lo, row_hi) = match origin {
        Origin::Lower => (
            ((te.y_min() - bounds.y_min()) / y_size).floor().max(0.0) as u32,
            ((te.y_max() - bounds.y_min()) / y_size)
                .ceil()
                .min(canvas.height() as f64) as u32,
        ),
        Origin::Upper => (
            ((bounds.y_max() - te.y_max()) / y_size).floor().max(0.0) as u32,
            ((bounds.y_max() - te.y_min()) / y_size)
                .ceil()
                .min(canvas.height() as f64) as u32,
        ),
    };

    for row in row_lo..row_hi {
        // Geographic y of this output row's pixel center.
        let gy = match origin {
            Origin::Lower => bounds.y_min() + (row as f64 + 0.5) * y_size,
            Origin::Upper => bounds.y_max() - (row as f64 + 0.5) * y_size,
        };
        let source_row = match origin {
            Origin::Lower => ((gy - te.y_min()) / tile.y_step()).floor(),
            Origin::Upper => ((te.y_max() - gy) / tile.y_step()).floor(),
        };
        if source_row < 0.0 || source_row >= source_height {
            continue;
        }
        let source_row = source_row as u32;

        for col in col_lo..col_hi {
            let gx = bounds.x_min() + (col as f64 + 0.5) * x_size;
            let source_col = ((gx - te.x_min()) / tile.x_step()).floor();
            if source_col < 0.0 || source_col >= source_width {
                continue;
            }
            canvas.put_sample(col, row, source.sample(source_col as u32, source_row));
        }
    }
}
