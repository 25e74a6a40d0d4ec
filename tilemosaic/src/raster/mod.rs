//! Strongly-typed raster value object.
//!
//! A [`Raster`] is a rectangular grid of 8-bit color samples with explicit
//! width, height, and channel count, validated at construction. It replaces
//! the loosely-shaped arrays that imagery decoders hand around: once a
//! `Raster` exists, its buffer length is guaranteed to match its declared
//! dimensions.
//!
//! Sample depth is fixed at 8 bits per channel, which is what decoded web
//! imagery carries. Channel counts from 1 (grayscale) to 4 (RGBA) are
//! supported; a mosaic requires all of its inputs to agree on the count.

mod error;

pub use error::RasterError;

use image::{DynamicImage, RgbaImage};

/// Rectangular grid of 8-bit samples in row-major order.
///
/// Row 0 is first in memory; whether it is the top or bottom of the
/// geographic extent is recorded separately by [`crate::tile::Origin`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    channels: u8,
    data: Vec<u8>,
}

impl Raster {
    /// Creates a raster from an existing sample buffer.
    ///
    /// # Errors
    ///
    /// Returns `RasterError` if either dimension is zero, the channel count
    /// is outside 1..=4, or the buffer length does not equal
    /// `width * height * channels`.
    pub fn new(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Result<Self, RasterError> {
        Self::validate_shape(width, height, channels)?;
        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected {
            return Err(RasterError::BufferSizeMismatch {
                got: data.len(),
                expected,
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Creates a raster with every sample set to `value`.
    ///
    /// A `value` of 0 yields the transparent/black background used for
    /// uncovered mosaic pixels.
    ///
    /// # Errors
    ///
    /// Returns `RasterError` if either dimension is zero or the channel
    /// count is outside 1..=4.
    pub fn filled(width: u32, height: u32, channels: u8, value: u8) -> Result<Self, RasterError> {
        Self::validate_shape(width, height, channels)?;
        let len = width as usize * height as usize * channels as usize;
        Ok(Self {
            width,
            height,
            channels,
            data: vec![value; len],
        })
    }

    fn validate_shape(width: u32, height: u32, channels: u8) -> Result<(), RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::ZeroDimension { width, height });
        }
        if channels == 0 || channels > 4 {
            return Err(RasterError::InvalidChannelCount(channels));
        }
        Ok(())
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of channels per pixel.
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// The raw sample buffer, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the raster, returning the raw sample buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// The samples of one pixel.
    ///
    /// Callers must keep `x < width` and `y < height`.
    pub fn sample(&self, x: u32, y: u32) -> &[u8] {
        debug_assert!(x < self.width && y < self.height);
        let start = (y as usize * self.width as usize + x as usize) * self.channels as usize;
        &self.data[start..start + self.channels as usize]
    }

    /// Overwrites the samples of one pixel.
    ///
    /// Callers must keep `x < width`, `y < height`, and
    /// `sample.len() == channels`.
    pub fn put_sample(&mut self, x: u32, y: u32, sample: &[u8]) {
        debug_assert!(x < self.width && y < self.height);
        debug_assert_eq!(sample.len(), self.channels as usize);
        let start = (y as usize * self.width as usize + x as usize) * self.channels as usize;
        self.data[start..start + self.channels as usize].copy_from_slice(sample);
    }

    /// Returns a copy with the column order of every row reversed.
    ///
    /// Used to normalize tiles delivered with a decreasing x axis into
    /// canonical left-to-right order.
    pub fn flipped_horizontal(&self) -> Raster {
        let mut flipped = self.clone();
        for y in 0..self.height {
            for x in 0..self.width {
                flipped.put_sample(self.width - 1 - x, y, self.sample(x, y));
            }
        }
        flipped
    }

    /// Converts a 4-channel raster into an [`RgbaImage`] for display or
    /// encoding.
    ///
    /// # Errors
    ///
    /// Returns `RasterError::ChannelMismatch` if the raster does not carry
    /// exactly 4 channels.
    pub fn into_rgba(self) -> Result<RgbaImage, RasterError> {
        if self.channels != 4 {
            return Err(RasterError::ChannelMismatch {
                got: self.channels,
                expected: 4,
            });
        }
        let (width, height) = (self.width, self.height);
        let expected = self.data.len();
        RgbaImage::from_raw(width, height, self.data).ok_or(RasterError::BufferSizeMismatch {
            got: expected,
            expected,
        })
    }
}

impl TryFrom<RgbaImage> for Raster {
    type Error = RasterError;

    fn try_from(image: RgbaImage) -> Result<Self, Self::Error> {
        let (width, height) = image.dimensions();
        Raster::new(width, height, 4, image.into_raw())
    }
}

impl TryFrom<DynamicImage> for Raster {
    type Error = RasterError;

    fn try_from(image: DynamicImage) -> Result<Self, Self::Error> {
        Raster::try_from(image.to_rgba8())
    }
}
