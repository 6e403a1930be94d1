// src/color.rs

//! Defines the `Rgb` color type and the packed `0xRRGGBB` representation used
//! for marker comparisons.

use serde::{Deserialize, Serialize};

/// An RGB true color, with each component from 0 to 255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    /// Rendered for pixels whose search left the source image.
    pub const RED: Rgb = Rgb::new(0xff, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Packs the color as `0xRRGGBB`.
    pub const fn packed(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Unpacks a `0xRRGGBB` value. Bits above the low 24 are ignored.
    pub const fn from_packed(value: u32) -> Self {
        Rgb {
            r: ((value >> 16) & 0xff) as u8,
            g: ((value >> 8) & 0xff) as u8,
            b: (value & 0xff) as u8,
        }
    }

    /// Reads a color from the first three bytes of `bytes` (R, G, B order).
    #[inline]
    pub fn from_slice(bytes: &[u8]) -> Self {
        Rgb::new(bytes[0], bytes[1], bytes[2])
    }

    /// Writes the color as B, G, R, X into a 4-byte framebuffer pixel.
    #[inline]
    pub fn write_bgrx(self, dest: &mut [u8]) {
        dest[0] = self.b;
        dest[1] = self.g;
        dest[2] = self.r;
        dest[3] = 0xff;
    }
}
