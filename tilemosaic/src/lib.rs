//! TileMosaic - georeferenced tile mosaicking
//!
//! This library stitches irregular, differently-extented imagery tiles into
//! one contiguous raster for a single display call. It sits between an
//! image source (which yields `(image, extent, origin)` per tile) and a
//! rendering surface (which accepts a raster plus the geographic extent to
//! draw it into); neither collaborator lives in this crate.
//!
//! # Architecture
//!
//! ```text
//! TileSource ────► Tile, Tile, ... ────► merge ────► MergedImage
//! (injected)       (raster + extent      (mosaic)    (raster + extent
//!                   + origin)                         + origin)
//! ```
//!
//! # Example
//!
//! ```
//! use tilemosaic::{merge, Extent, Origin, Raster, Tile};
//!
//! // Two 2x2 gray tiles covering adjacent unit squares.
//! let left = Tile::from_extent(
//!     Raster::filled(2, 2, 1, 80).unwrap(),
//!     Extent::new(0.0, 1.0, 0.0, 1.0).unwrap(),
//!     Origin::Lower,
//! );
//! let right = Tile::from_extent(
//!     Raster::filled(2, 2, 1, 160).unwrap(),
//!     Extent::new(1.0, 2.0, 0.0, 1.0).unwrap(),
//!     Origin::Lower,
//! );
//!
//! let merged = merge(&[left, right]).unwrap();
//! assert_eq!(merged.raster.width(), 4);
//! assert_eq!(merged.raster.height(), 2);
//! assert_eq!(merged.extent, Extent::new(0.0, 2.0, 0.0, 1.0).unwrap());
//! ```

pub mod extent;
pub mod mosaic;
pub mod raster;
pub mod source;
pub mod tile;

pub use extent::{Extent, ExtentError};
pub use mosaic::{merge, MergedImage, MosaicError};
pub use raster::{Raster, RasterError};
pub use source::{mosaic_from_source, SourceError, TileCoord, TileSource};
pub use tile::{Origin, Tile, TileError};
