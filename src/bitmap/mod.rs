// src/bitmap/mod.rs
//! Owned 24-bit RGB pixel buffer with a fixed row stride.
//!
//! Pixels are stored row-major as R, G, B bytes. Rows may be padded: `stride`
//! is the byte distance between the starts of consecutive rows and is always
//! at least `width * 3`.

pub mod io;

use crate::color::Rgb;
use crate::error::{EscherError, Result};

/// Bytes per pixel. The only layout this crate handles.
pub const BYTES_PER_PIXEL: usize = 3;

/// Row alignment used by [`Bitmap::new`], matching the 4-byte BMP row padding.
const ROW_ALIGN: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    stride: usize,
    data: Vec<u8>,
}

impl Bitmap {
    /// Allocate a black bitmap with 4-byte aligned rows.
    pub fn new(width: usize, height: usize) -> Self {
        let stride = (width * BYTES_PER_PIXEL).div_ceil(ROW_ALIGN) * ROW_ALIGN;
        Self {
            width,
            height,
            stride,
            data: vec![0u8; stride * height],
        }
    }

    /// Wrap existing bytes. `data` must hold `height` rows of `stride` bytes.
    pub fn from_raw(width: usize, height: usize, stride: usize, data: Vec<u8>) -> Result<Self> {
        if stride < width * BYTES_PER_PIXEL {
            return Err(EscherError::InvalidBuffer(format!(
                "stride {} is smaller than a {}-pixel row",
                stride, width
            )));
        }
        if data.len() < stride * height {
            return Err(EscherError::InvalidBuffer(format!(
                "expected at least {} bytes for {}x{} (stride {}), got {}",
                stride * height,
                width,
                height,
                stride,
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    /// Fill a new bitmap with a single color.
    pub fn filled(width: usize, height: usize, color: Rgb) -> Self {
        let mut bitmap = Self::new(width, height);
        for y in 0..height {
            for px in bitmap.row_mut(y).chunks_exact_mut(BYTES_PER_PIXEL) {
                px.copy_from_slice(&[color.r, color.g, color.b]);
            }
        }
        bitmap
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Byte distance between rows.
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn same_dimensions(&self, other: &Bitmap) -> bool {
        self.width == other.width && self.height == other.height
    }

    #[inline]
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as u64) < self.width as u64 && (y as u64) < self.height as u64
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        y * self.stride + x * BYTES_PER_PIXEL
    }

    /// Packed `0xRRGGBB` color at (x, y), or `0` outside the bitmap.
    #[inline]
    pub fn get_pixel(&self, x: i64, y: i64) -> u32 {
        if !self.contains(x, y) {
            return 0;
        }
        let o = self.offset(x as usize, y as usize);
        Rgb::from_slice(&self.data[o..o + BYTES_PER_PIXEL]).packed()
    }

    /// Write a pixel. Returns `false` and leaves the bitmap untouched when
    /// (x, y) is outside.
    #[inline]
    pub fn set_pixel(&mut self, x: i64, y: i64, color: Rgb) -> bool {
        if !self.contains(x, y) {
            return false;
        }
        let o = self.offset(x as usize, y as usize);
        self.data[o..o + BYTES_PER_PIXEL].copy_from_slice(&[color.r, color.g, color.b]);
        true
    }

    /// Pixel bytes of row `y`, without the stride padding.
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.width * BYTES_PER_PIXEL]
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.stride;
        let len = self.width * BYTES_PER_PIXEL;
        &mut self.data[start..start + len]
    }

    /// Copy out tightly packed RGB bytes (stride == width * 3).
    pub fn to_packed_rgb(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.width * self.height * BYTES_PER_PIXEL);
        for y in 0..self.height {
            out.extend_from_slice(self.row(y));
        }
        out
    }
}

#[cfg(test)]
mod tests;
