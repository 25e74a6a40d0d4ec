//! Tile source seam.
//!
//! The mosaicker does not fetch imagery itself; an external collaborator
//! yields `(image, extent, origin)` for each requested tile coordinate.
//! That collaborator is injected through the [`TileSource`] trait rather
//! than patched onto a live object at runtime, so deterministic/offline
//! sources can stand in for network-backed ones in tests.
//!
//! [`mosaic_from_source`] is the convenience path: fetch every coordinate
//! in a list, then hand the tiles to [`merge`](crate::mosaic::merge).

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::mosaic::{merge, MergedImage, MosaicError};
use crate::tile::Tile;

/// Grid address of one tile within a source's tiling scheme.
///
/// The address is opaque to this crate: the source decides what grid it
/// refers to and reports each tile's geographic extent alongside the
/// pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    /// Column within the grid.
    pub col: u32,
    /// Row within the grid.
    pub row: u32,
    /// Zoom level of the grid.
    pub zoom: u8,
}

impl TileCoord {
    /// Creates a new tile coordinate.
    pub fn new(col: u32, row: u32, zoom: u8) -> Self {
        Self { col, row, zoom }
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.col, self.row)
    }
}

/// Errors that can occur while sourcing and merging tiles.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source could not produce a tile for a coordinate.
    #[error("Failed to fetch tile {coord}: {reason}")]
    Fetch { coord: TileCoord, reason: String },

    /// The fetched tiles could not be merged.
    #[error(transparent)]
    Mosaic(#[from] MosaicError),
}

/// A provider of georeferenced tiles.
///
/// Implementations must be thread-safe (`Send + Sync`) so a source can be
/// shared behind an `Arc` by concurrent callers. Network, cache, and
/// synthetic sources all fit behind this trait; only synthetic ones live
/// in this crate.
pub trait TileSource: Send + Sync {
    /// Produces the tile for `coord`.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Fetch` if the tile cannot be produced.
    fn fetch(&self, coord: TileCoord) -> Result<Tile, SourceError>;
}

/// Fetches every coordinate from `source` and merges the results.
///
/// Fetching is all-or-nothing: the first failed coordinate aborts the
/// operation, matching the mosaicker's no-partial-results contract.
///
/// # Errors
///
/// Returns `SourceError::Fetch` for the first coordinate that fails, or a
/// wrapped `MosaicError` if the fetched tiles are empty or inconsistent.
pub fn mosaic_from_source<S>(source: &S, coords: &[TileCoord]) -> Result<MergedImage, SourceError>
where
    S: TileSource + ?Sized,
{
    let mut tiles = Vec::with_capacity(coords.len());
    for &coord in coords {
        tiles.push(source.fetch(coord)?);
    }

    debug!(tiles = tiles.len(), "Fetched tiles from source, merging");

    Ok(merge(&tiles)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extent::Extent;
    use crate::raster::Raster;
    use crate::tile::Origin;
    use std::sync::Arc;

    /// Synthetic source: each tile is a unit square at (col, row) filled
    /// with a value derived from its coordinate.
    struct SyntheticSource;

    impl TileSource for SyntheticSource {
        fn fetch(&self, coord: TileCoord) -> Result<Tile, SourceError> {
            let extent = Extent::new(
                coord.col as f64,
                coord.col as f64 + 1.0,
                coord.row as f64,
                coord.row as f64 + 1.0,
            )
            .map_err(|e| SourceError::Fetch {
                coord,
                reason: e.to_string(),
            })?;
            let value = (coord.col * 10 + coord.row) as u8;
            let raster = Raster::filled(2, 2, 1, value).map_err(|e| SourceError::Fetch {
                coord,
                reason: e.to_string(),
            })?;
            Ok(Tile::from_extent(raster, extent, Origin::Lower))
        }
    }

    /// Source that fails for every coordinate.
    struct FailingSource;

    impl TileSource for FailingSource {
        fn fetch(&self, coord: TileCoord) -> Result<Tile, SourceError> {
            Err(SourceError::Fetch {
                coord,
                reason: "synthetic failure".to_string(),
            })
        }
    }

    #[test]
    fn test_mosaic_from_source_merges_fetched_tiles() {
        let coords = [
            TileCoord::new(0, 0, 2),
            TileCoord::new(1, 0, 2),
            TileCoord::new(0, 1, 2),
        ];

        let merged = mosaic_from_source(&SyntheticSource, &coords).unwrap();

        assert_eq!(merged.extent, Extent::new(0.0, 2.0, 0.0, 2.0).unwrap());
        assert_eq!(merged.raster.width(), 4);
        assert_eq!(merged.raster.height(), 4);
        // Bottom-left block comes from tile 0/0 (value 0), which matches
        // the background; the right and top blocks are distinguishable.
        assert_eq!(merged.raster.sample(2, 0), &[10]);
        assert_eq!(merged.raster.sample(0, 2), &[1]);
    }

    #[test]
    fn test_mosaic_from_source_empty_coords_is_empty_input() {
        let result = mosaic_from_source(&SyntheticSource, &[]);
        assert!(matches!(
            result,
            Err(SourceError::Mosaic(MosaicError::EmptyInput))
        ));
    }

    #[test]
    fn test_mosaic_from_source_propagates_fetch_failure() {
        let coords = [TileCoord::new(3, 4, 1)];
        let result = mosaic_from_source(&FailingSource, &coords);

        match result {
            Err(SourceError::Fetch { coord, reason }) => {
                assert_eq!(coord, TileCoord::new(3, 4, 1));
                assert_eq!(reason, "synthetic failure");
            }
            other => panic!("Expected fetch failure, got {:?}", other.map(|m| m.extent)),
        }
    }

    #[test]
    fn test_source_error_display() {
        let err = SourceError::Fetch {
            coord: TileCoord::new(2, 7, 4),
            reason: "timeout".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to fetch tile 4/2/7: timeout");
    }

    #[test]
    fn test_source_works_as_trait_object() {
        let source: Arc<dyn TileSource> = Arc::new(SyntheticSource);
        let coords = [TileCoord::new(1, 1, 0)];

        let merged = mosaic_from_source(source.as_ref(), &coords).unwrap();
        assert_eq!(merged.raster.sample(0, 0), &[11]);
    }

    #[test]
    fn test_tile_coord_display() {
        assert_eq!(TileCoord::new(5, 9, 3).to_string(), "3/5/9");
    }

    #[test]
    fn test_trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn TileSource>();
    }
}
