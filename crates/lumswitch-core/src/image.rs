//! Image buffer types.
//!
//! [`Image`] stores pixels in row-major order, top-to-bottom, channels
//! interleaved:
//!
//! ```text
//! LuminanceImage:  [Y Y Y Y ...]          ← Row 0
//! DriveImage:      [R G B A R G B A ...]  ← Row 0
//! ```
//!
//! # Usage
//!
//! ```rust
//! use lumswitch_core::{Image, LuminanceImage};
//!
//! let mut lum: LuminanceImage = Image::new(640, 480);
//! lum.set_pixel(10, 10, [0.5]);
//! assert_eq!(lum.pixel(10, 10), [0.5]);
//! ```

use crate::{Error, PixelFormat, Result};
use std::sync::Arc;

/// Single-channel float image holding target luminance in `[0, 1]`.
pub type LuminanceImage = Image<f32, 1>;

/// Four-channel float image holding normalized drive pixels `(R, G, B, A)`.
pub type DriveImage = Image<f32, 4>;

/// Owned image buffer with `N` interleaved channels of type `T`.
///
/// The pixel buffer is stored in an [`Arc<Vec<T>>`], so clones share
/// data until one of them is mutated (copy-on-write).
#[derive(Clone)]
pub struct Image<T: PixelFormat, const N: usize> {
    data: Arc<Vec<T>>,
    width: u32,
    height: u32,
}

impl<T: PixelFormat, const N: usize> Image<T, N> {
    /// Creates a new image filled with zeros.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lumswitch_core::Image;
    ///
    /// let img: Image<u8, 4> = Image::new(1920, 1080);
    /// assert_eq!(img.width(), 1920);
    /// assert_eq!(img.height(), 1080);
    /// ```
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * N;
        Self {
            data: Arc::new(vec![T::zero(); len]),
            width,
            height,
        }
    }

    /// Creates an image from existing pixel data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `data.len()` is not
    /// `width * height * N`.
    pub fn from_data(width: u32, height: u32, data: Vec<T>) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(N))
            .ok_or_else(|| Error::invalid_dimensions(width, height, "buffer size overflows"))?;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} elements, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data: Arc::new(data),
            width,
            height,
        })
    }

    /// Creates an image filled with a specific pixel value.
    pub fn filled(width: u32, height: u32, pixel: [T; N]) -> Self {
        let mut img = Self::new(width, height);
        img.fill(pixel);
        img
    }

    /// Returns the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the image dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns a reference to the raw interleaved data.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Returns a mutable reference to the raw data (copy-on-write).
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        Arc::make_mut(&mut self.data).as_mut_slice()
    }

    #[inline]
    fn pixel_offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * N
    }

    /// Returns the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [T; N] {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let offset = self.pixel_offset(x, y);
        let mut result = [T::zero(); N];
        result.copy_from_slice(&self.data[offset..offset + N]);
        result
    }

    /// Sets the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: [T; N]) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let offset = self.pixel_offset(x, y);
        let data = Arc::make_mut(&mut self.data);
        data[offset..offset + N].copy_from_slice(&pixel);
    }

    /// Fills the entire image with a pixel value.
    pub fn fill(&mut self, pixel: [T; N]) {
        let data = Arc::make_mut(&mut self.data);
        for chunk in data.chunks_exact_mut(N) {
            chunk.copy_from_slice(&pixel);
        }
    }

    /// Iterates over all pixels with their coordinates.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, [T; N])> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| (x, y, self.pixel(x, y))))
    }
}

impl<T: PixelFormat, const N: usize> std::fmt::Debug for Image<T, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("channels", &N)
            .field("bits", &T::BITS)
            .finish()
    }
}
