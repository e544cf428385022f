//! The raster value type: an owned, packed RGBA8 pixel grid.
//!
//! A [`Raster`] is the fundamental image value every operation in this crate
//! consumes and produces. Pixels are stored row-major, four bytes per pixel
//! in R,G,B,A order, and the buffer length is always exactly
//! `width * height * 4`.
//!
//! A raster exclusively owns its buffer. Ownership can be transferred
//! outright with [`Raster::into_raw_parts`] / [`Raster::from_raw_parts`],
//! but two rasters never alias the same storage.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Bytes per pixel (R, G, B, A).
pub(crate) const CHANNELS: usize = 4;

/// An RGBA color with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Fully transparent black, the default pad color.
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);

    /// Create a color from all four channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Channel by packed index: 0 = R, 1 = G, 2 = B, 3 = A.
    #[inline]
    pub(crate) fn channel(self, k: usize) -> u8 {
        match k {
            0 => self.r,
            1 => self.g,
            2 => self.b,
            _ => self.a,
        }
    }

    /// The four channels in packed buffer order.
    #[inline]
    pub(crate) fn bytes(self) -> [u8; CHANNELS] {
        [self.r, self.g, self.b, self.a]
    }
}

/// An axis-aligned rectangle with non-negative integer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Create a rectangle from its top-left corner and extent.
    pub const fn new(left: u32, top: u32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// One past the rightmost column.
    #[inline]
    pub fn right(&self) -> u32 {
        self.left + self.width
    }

    /// One past the bottom row.
    #[inline]
    pub fn bottom(&self) -> u32 {
        self.top + self.height
    }
}

/// An owned RGBA8 pixel grid.
///
/// Invariant: the pixel buffer length is always `width * height * 4`, and
/// both dimensions are non-zero. Fields are private so the invariant cannot
/// be broken from outside; byte access goes through [`Raster::as_bytes`] and
/// [`Raster::as_bytes_mut`], which cannot change the buffer length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Raster {
    /// Allocate a new raster filled with transparent black.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGeometry`] if either dimension is zero. The
    /// check runs before any allocation.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidGeometry { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * CHANNELS],
        })
    }

    /// Allocate a new raster filled with a solid color.
    pub fn filled(width: u32, height: u32, color: Color) -> Result<Self> {
        let mut raster = Self::new(width, height)?;
        raster.fill(color);
        Ok(raster)
    }

    /// Take exclusive ownership of an existing pixel buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGeometry`] for a zero dimension and
    /// [`Error::BufferMismatch`] if the buffer length is not
    /// `width * height * 4`.
    pub fn from_raw_parts(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidGeometry { width, height });
        }
        let expected = width as usize * height as usize * CHANNELS;
        if pixels.len() != expected {
            return Err(Error::BufferMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Transfer the buffer out, consuming the raster.
    pub fn into_raw_parts(self) -> (u32, u32, Vec<u8>) {
        (self.width, self.height, self.pixels)
    }

    /// Width in pixels. Always non-zero.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels. Always non-zero.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The packed RGBA bytes, row-major.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Mutable access to the packed RGBA bytes.
    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Byte offset of pixel (x, y).
    #[inline]
    pub(crate) fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Read the pixel at (x, y).
    ///
    /// Panics if the coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Color {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let pos = self.offset(x, y);
        Color::rgba(
            self.pixels[pos],
            self.pixels[pos + 1],
            self.pixels[pos + 2],
            self.pixels[pos + 3],
        )
    }

    /// Write the pixel at (x, y).
    ///
    /// Panics if the coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        let pos = self.offset(x, y);
        self.pixels[pos..pos + CHANNELS].copy_from_slice(&color.bytes());
    }

    /// Fill the entire raster with a solid color.
    pub fn fill(&mut self, color: Color) {
        let bytes = color.bytes();
        for px in self.pixels.chunks_exact_mut(CHANNELS) {
            px.copy_from_slice(&bytes);
        }
    }

    /// Fill a rectangle with a solid color, clipped to the raster bounds.
    ///
    /// A rectangle that lies entirely outside is a no-op.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let right = rect.right().min(self.width);
        let bottom = rect.bottom().min(self.height);
        if rect.left >= right || rect.top >= bottom {
            return;
        }
        let bytes = color.bytes();
        for y in rect.top..bottom {
            let start = self.offset(rect.left, y);
            let end = self.offset(right - 1, y) + CHANNELS;
            for px in self.pixels[start..end].chunks_exact_mut(CHANNELS) {
                px.copy_from_slice(&bytes);
            }
        }
    }

    /// Copy a sub-rectangle into a new, independently owned raster.
    ///
    /// The rectangle is clipped to the source bounds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidGeometry`] if the requested or clipped region
    /// is empty.
    pub fn crop(&self, rect: Rect) -> Result<Raster> {
        let right = rect.right().min(self.width);
        let bottom = rect.bottom().min(self.height);
        if rect.left >= right || rect.top >= bottom {
            return Err(Error::InvalidGeometry {
                width: rect.width,
                height: rect.height,
            });
        }
        let out_w = right - rect.left;
        let out_h = bottom - rect.top;
        let mut out = Raster::new(out_w, out_h)?;
        let row_len = out_w as usize * CHANNELS;
        for y in 0..out_h {
            let src_start = self.offset(rect.left, rect.top + y);
            let dst_start = out.offset(0, y);
            out.pixels[dst_start..dst_start + row_len]
                .copy_from_slice(&self.pixels[src_start..src_start + row_len]);
        }
        Ok(out)
    }

    /// Produce the photographic negative: RGB channels inverted, alpha kept.
    pub fn negative(&self) -> Raster {
        let mut out = self.clone();
        for px in out.pixels.chunks_exact_mut(CHANNELS) {
            px[0] = 255 - px[0];
            px[1] = 255 - px[1];
            px[2] = 255 - px[2];
        }
        out
    }
}
