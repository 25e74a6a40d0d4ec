//! End-to-end mosaicking scenarios.
//!
//! These tests exercise the public API the way a map-display caller would:
//! tiles built from decoded imagery plus coordinate axes, merged into one
//! raster handed to a rendering surface.

use image::{Rgba, RgbaImage};
use tilemosaic::{merge, Extent, MosaicError, Origin, Raster, Tile};

/// Equivalent of `linspace(start, stop, n, endpoint=False)`, the axis
/// convention tile harnesses produce.
fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    let step = (stop - start) / n as f64;
    (0..n).map(|i| start + i as f64 * step).collect()
}

fn rgba_tile(extent: Extent, width: u32, height: u32, color: [u8; 4]) -> Tile {
    let image = RgbaImage::from_pixel(width, height, Rgba(color));
    let raster = Raster::try_from(image).unwrap();
    Tile::from_extent(raster, extent, Origin::Lower)
}

fn extent(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Extent {
    Extent::new(x_min, x_max, y_min, y_max).unwrap()
}

const RED: [u8; 4] = [255, 0, 0, 255];
const GREEN: [u8; 4] = [0, 255, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];
const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

/// Three 2x2 tiles on adjacent 1-degree squares in an L-shape merge into
/// a 4x4 raster whose fourth quadrant is background.
#[test]
fn three_tiles_in_l_shape_leave_background_quadrant() {
    let tiles = [
        rgba_tile(extent(0.0, 1.0, 0.0, 1.0), 2, 2, RED),
        rgba_tile(extent(1.0, 2.0, 0.0, 1.0), 2, 2, GREEN),
        rgba_tile(extent(0.0, 1.0, 1.0, 2.0), 2, 2, BLUE),
    ];

    let merged = merge(&tiles).unwrap();

    assert_eq!(merged.extent, extent(0.0, 2.0, 0.0, 2.0));
    assert_eq!(merged.origin, Origin::Lower);
    assert_eq!(merged.raster.width(), 4);
    assert_eq!(merged.raster.height(), 4);
    assert_eq!(merged.raster.channels(), 4);

    // Origin lower: row 0 is the bottom of the extent.
    for y in 0..2 {
        for x in 0..2 {
            assert_eq!(merged.raster.sample(x, y), &RED, "bottom-left at ({x},{y})");
            assert_eq!(
                merged.raster.sample(x + 2, y),
                &GREEN,
                "bottom-right at ({x},{y})"
            );
            assert_eq!(
                merged.raster.sample(x, y + 2),
                &BLUE,
                "top-left at ({x},{y})"
            );
            assert_eq!(
                merged.raster.sample(x + 2, y + 2),
                &TRANSPARENT,
                "uncovered top-right at ({x},{y})"
            );
        }
    }
}

/// Tiles built from coordinate axes merge identically to tiles built from
/// their extents.
#[test]
fn axis_built_tiles_merge_like_extent_built_tiles() {
    let image = RgbaImage::from_pixel(4, 4, Rgba(GREEN));
    let raster = Raster::try_from(image).unwrap();

    let x = linspace(-10.0, -6.0, 4);
    let y = linspace(50.0, 54.0, 4);
    let from_axes = Tile::from_axes(raster.clone(), &x, &y, Origin::Lower).unwrap();
    let from_extent = Tile::from_extent(raster, extent(-10.0, -6.0, 50.0, 54.0), Origin::Lower);

    assert_eq!(from_axes, from_extent);

    let a = merge(std::slice::from_ref(&from_axes)).unwrap();
    let b = merge(std::slice::from_ref(&from_extent)).unwrap();
    assert_eq!(a, b);
}

/// Later tiles overwrite earlier ones wherever they overlap.
#[test]
fn overlapping_tiles_composite_in_painting_order() {
    let base = rgba_tile(extent(0.0, 4.0, 0.0, 4.0), 8, 8, RED);
    let patch = rgba_tile(extent(1.0, 3.0, 1.0, 3.0), 4, 4, BLUE);

    let merged = merge(&[base, patch]).unwrap();
    assert_eq!(merged.extent, extent(0.0, 4.0, 0.0, 4.0));
    assert_eq!(merged.raster.width(), 8);
    assert_eq!(merged.raster.height(), 8);

    // The patch covers geographic [1,3)x[1,3), i.e. pixels [2,6)x[2,6).
    for y in 0..8 {
        for x in 0..8 {
            let inside = (2..6).contains(&x) && (2..6).contains(&y);
            let expected = if inside { &BLUE } else { &RED };
            assert_eq!(merged.raster.sample(x, y), expected, "pixel ({x},{y})");
        }
    }
}

/// A zoomed-out tile next to a zoomed-in one is upsampled to the finer
/// grid instead of degrading it.
#[test]
fn mixed_zoom_levels_keep_the_finest_resolution() {
    let fine = rgba_tile(extent(0.0, 1.0, 0.0, 1.0), 4, 4, RED);
    let coarse = rgba_tile(extent(1.0, 2.0, 0.0, 1.0), 2, 2, GREEN);

    let merged = merge(&[fine, coarse]).unwrap();

    // Target spacing is the fine tile's 0.25 units/pixel.
    assert_eq!(merged.raster.width(), 8);
    assert_eq!(merged.raster.height(), 4);
    assert_eq!(merged.raster.sample(0, 0), &RED);
    assert_eq!(merged.raster.sample(4, 0), &GREEN);
    assert_eq!(merged.raster.sample(7, 3), &GREEN);
}

/// Staggered same-resolution tiles whose union is not grid-aligned still
/// cover the whole output; no background leaks into covered territory.
#[test]
fn staggered_tiles_fill_the_whole_union() {
    let left = rgba_tile(extent(0.0, 2.0, 0.0, 1.0), 2, 2, RED);
    let right = rgba_tile(extent(0.5, 2.5, 0.0, 1.0), 2, 2, GREEN);

    let merged = merge(&[left, right]).unwrap();
    assert_eq!(merged.extent, extent(0.0, 2.5, 0.0, 1.0));
    assert_eq!(merged.raster.width(), 3);
    assert_eq!(merged.raster.height(), 2);

    for y in 0..2 {
        for x in 0..3 {
            assert_ne!(
                merged.raster.sample(x, y),
                &TRANSPARENT,
                "pixel ({x},{y}) left uncovered"
            );
        }
        assert_eq!(merged.raster.sample(0, y), &RED);
        assert_eq!(merged.raster.sample(2, y), &GREEN);
    }
}

#[test]
fn merging_nothing_reports_empty_input() {
    assert!(matches!(merge(&[]), Err(MosaicError::EmptyInput)));
}

#[test]
fn mixed_orientations_are_rejected() {
    let image = RgbaImage::from_pixel(2, 2, Rgba(RED));
    let upper = Tile::from_extent(
        Raster::try_from(image.clone()).unwrap(),
        extent(0.0, 1.0, 0.0, 1.0),
        Origin::Upper,
    );
    let lower = Tile::from_extent(
        Raster::try_from(image).unwrap(),
        extent(1.0, 2.0, 0.0, 1.0),
        Origin::Lower,
    );

    let result = merge(&[upper, lower]);
    assert!(matches!(result, Err(MosaicError::OriginMismatch { .. })));
}

/// The merged raster converts back into an `RgbaImage` for display.
#[test]
fn merged_rgba_raster_converts_for_display() {
    let tiles = [
        rgba_tile(extent(0.0, 1.0, 0.0, 1.0), 2, 2, RED),
        rgba_tile(extent(1.0, 2.0, 0.0, 1.0), 2, 2, GREEN),
    ];

    let merged = merge(&tiles).unwrap();
    let image = merged.raster.into_rgba().unwrap();

    assert_eq!(image.dimensions(), (4, 2));
    assert_eq!(image.get_pixel(0, 0), &Rgba(RED));
    assert_eq!(image.get_pixel(3, 1), &Rgba(GREEN));
}
