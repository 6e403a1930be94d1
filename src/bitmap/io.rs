// src/bitmap/io.rs
//! BMP load/save helpers.
//!
//! - `load_bitmap`: decode a file into a 24-bit RGB `Bitmap`, rejecting any
//!   other pixel depth, including paletted and 16-bit files the decoder
//!   would expand to RGB.
//! - `save_bitmap`: write a `Bitmap` as a 24-bit BMP, overwriting the target.

use super::{Bitmap, BYTES_PER_PIXEL};
use crate::error::{EscherError, Result};
use image::{ColorType, DynamicImage, ImageError, ImageFormat, ImageReader};
use log::debug;
use std::io::Cursor;
use std::path::Path;

/// Byte offset of the little-endian bits-per-pixel field in a BMP header.
const BMP_BPP_OFFSET: usize = 28;

/// Bits per pixel declared by a BMP header, if `bytes` starts with one.
fn bmp_bits_per_pixel(bytes: &[u8]) -> Option<u16> {
    if bytes.len() < BMP_BPP_OFFSET + 2 || &bytes[..2] != b"BM" {
        return None;
    }
    Some(u16::from_le_bytes([
        bytes[BMP_BPP_OFFSET],
        bytes[BMP_BPP_OFFSET + 1],
    ]))
}

/// Load an image from disk as 24-bit RGB.
pub fn load_bitmap(path: &Path) -> Result<Bitmap> {
    let read_err = |source: ImageError| EscherError::ImageRead {
        path: path.to_path_buf(),
        source,
    };
    let bytes = std::fs::read(path).map_err(|e| read_err(ImageError::IoError(e)))?;
    if let Some(bpp) = bmp_bits_per_pixel(&bytes) {
        if bpp as usize != BYTES_PER_PIXEL * 8 {
            return Err(EscherError::UnsupportedPixelFormat(format!(
                "{}-bit BMP",
                bpp
            )));
        }
    }

    let decoded = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| read_err(ImageError::IoError(e)))?
        .decode()
        .map_err(read_err)?;

    let rgb = match decoded {
        DynamicImage::ImageRgb8(buf) => buf,
        other => {
            return Err(EscherError::UnsupportedPixelFormat(format!(
                "{:?}",
                other.color()
            )))
        }
    };

    let width = rgb.width() as usize;
    let height = rgb.height() as usize;
    if width == 0 || height == 0 {
        return Err(EscherError::EmptyImage { width, height });
    }
    debug!("Decoded {}x{} RGB image from {}", width, height, path.display());
    Bitmap::from_raw(width, height, width * BYTES_PER_PIXEL, rgb.into_raw())
}

/// Save a bitmap as a 24-bit BMP.
pub fn save_bitmap(bitmap: &Bitmap, path: &Path) -> Result<()> {
    image::save_buffer_with_format(
        path,
        &bitmap.to_packed_rgb(),
        bitmap.width() as u32,
        bitmap.height() as u32,
        ColorType::Rgb8,
        ImageFormat::Bmp,
    )
    .map_err(|source| EscherError::ImageWrite {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use std::path::PathBuf;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("escher-io-{}-{}", std::process::id(), name))
    }

    #[test]
    fn save_then_load_keeps_pixels() {
        let path = scratch_path("roundtrip.bmp");
        let mut bitmap = Bitmap::filled(5, 3, Rgb::new(10, 20, 30));
        bitmap.set_pixel(4, 2, Rgb::new(0xff, 0x80, 0x01));

        save_bitmap(&bitmap, &path).unwrap();
        let loaded = load_bitmap(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.width(), 5);
        assert_eq!(loaded.height(), 3);
        assert_eq!(loaded.get_pixel(4, 2), 0xFF8001);
        assert_eq!(loaded.get_pixel(0, 0), Rgb::new(10, 20, 30).packed());
    }

    #[test]
    fn rgba_bitmaps_are_rejected() {
        let path = scratch_path("rgba.bmp");
        image::RgbaImage::new(2, 2)
            .save_with_format(&path, ImageFormat::Bmp)
            .unwrap();
        let result = load_bitmap(&path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(EscherError::UnsupportedPixelFormat(_))));
    }

    #[test]
    fn paletted_bitmaps_are_rejected() {
        let path = scratch_path("gray.bmp");
        image::GrayImage::new(3, 3)
            .save_with_format(&path, ImageFormat::Bmp)
            .unwrap();
        let result = load_bitmap(&path);
        std::fs::remove_file(&path).ok();

        match result {
            Err(EscherError::UnsupportedPixelFormat(detail)) => assert_eq!(detail, "8-bit BMP"),
            other => panic!("expected UnsupportedPixelFormat, got {:?}", other.map(|b| b.width())),
        }
    }

    #[test]
    fn header_depth_is_read_little_endian() {
        let mut header = vec![0u8; 54];
        header[..2].copy_from_slice(b"BM");
        header[28] = 24;
        assert_eq!(bmp_bits_per_pixel(&header), Some(24));
        header[28] = 16;
        assert_eq!(bmp_bits_per_pixel(&header), Some(16));
        assert_eq!(bmp_bits_per_pixel(b"BM"), None);
        assert_eq!(bmp_bits_per_pixel(&[0u8; 54]), None);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let result = load_bitmap(&scratch_path("does-not-exist.bmp"));
        assert!(matches!(result, Err(EscherError::ImageRead { .. })));
    }
}
