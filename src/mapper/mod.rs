// src/mapper/mod.rs
//! The Escher (Droste) mapping.
//!
//! Every destination pixel is taken to polar coordinates around the center,
//! pushed through a logarithmic spiral, and then rescaled by powers of
//! `baseScale` until it lands on source content next to the marker-colored
//! hole. The hole is where the next, smaller copy of the image belongs.
//!
//! Both search phases are capped at [`MAX_TRIES`] steps. When a cap is hit
//! the pixel keeps whatever the search left: a hard miss (candidate outside
//! the source) is written as red, a soft miss (still inside the hole when the
//! budget runs out) is not written at all. No unbounded fallback search is
//! attempted.

use crate::bitmap::Bitmap;
use crate::color::Rgb;
use crate::error::{EscherError, Result};
use std::f64::consts::PI;

/// Iteration budget of each search phase.
pub const MAX_TRIES: usize = 32;

/// Radius below which a pixel counts as the center itself.
const DEGENERATE_RADIUS: f64 = 1.0e-6;

/// Fixed angular phase subtracted after the spiral twist.
const PHASE_OFFSET: f64 = PI / 32.0;

/// Center and spiral coefficients for one mapping pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformParams {
    /// Center column, in source pixels.
    pub cx: f64,
    /// Center row, in source pixels (rows grow downward).
    pub cy: f64,
    /// Radial decay per full turn.
    pub alpha: f64,
    /// Angular shear per unit of log-radius, per full turn.
    pub beta: f64,
}

impl TransformParams {
    pub fn new(cx: f64, cy: f64, alpha: f64, beta: f64) -> Self {
        Self {
            cx,
            cy,
            alpha,
            beta,
        }
    }

    /// Defaults for a freshly loaded image: centered, alpha 1, beta 0.
    pub fn centered(width: usize, height: usize) -> Self {
        Self::new((width / 2) as f64, (height / 2) as f64, 1.0, 0.0)
    }

    /// Integer pixel the center falls on.
    pub fn center_pixel(&self) -> (i64, i64) {
        (self.cx as i64, self.cy as i64)
    }
}

/// Per-pass constants derived from [`TransformParams`].
#[derive(Debug, Clone, Copy)]
struct Spiral {
    cx: f64,
    cy: f64,
    alpha: f64,
    beta: f64,
    base_scale: f64,
}

impl Spiral {
    fn new(params: &TransformParams) -> Self {
        let alpha = params.alpha / (2.0 * PI);
        let beta = params.beta / (2.0 * PI);
        Self {
            cx: params.cx,
            cy: params.cy,
            alpha,
            beta,
            base_scale: (-2.0 * PI * alpha).exp(),
        }
    }

    #[inline]
    fn candidate(&self, r: f64, dir_x: f64, dir_y: f64) -> (i64, i64) {
        ((self.cx + r * dir_x) as i64, (self.cy - r * dir_y) as i64)
    }

    /// Resolve one destination pixel. `None` means a soft miss.
    fn resolve(&self, src: &Bitmap, marker: u32, ix: usize, iy: usize) -> Option<Rgb> {
        let x = ix as f64 - self.cx;
        let y = self.cy - iy as f64;
        let r = (x * x + y * y).sqrt();
        if r < DEGENERATE_RADIUS {
            return Some(Rgb::BLACK);
        }

        let a = y.atan2(x);
        let mut r_s = r * 0.5 * (-self.alpha * (a + PI)).exp();
        let a_s = a - (self.beta * r.ln() + PHASE_OFFSET);
        let (dir_x, dir_y) = (a_s.cos(), a_s.sin());

        // Shrink until the candidate falls into the marker hole.
        for _ in 0..MAX_TRIES {
            let (sx, sy) = self.candidate(r_s, dir_x, dir_y);
            if src.contains(sx, sy) && src.get_pixel(sx, sy) == marker {
                break;
            }
            r_s *= self.base_scale;
        }

        // Grow back out until we hit real content.
        for _ in 0..MAX_TRIES {
            let (sx, sy) = self.candidate(r_s, dir_x, dir_y);
            if !src.contains(sx, sy) {
                return Some(Rgb::RED);
            }
            let color = src.get_pixel(sx, sy);
            if color != marker {
                return Some(Rgb::from_packed(color));
            }
            r_s /= self.base_scale;
        }

        None
    }

    fn apply(&self, dest: &mut Bitmap, src: &Bitmap, marker: u32) {
        for iy in 0..dest.height() {
            for ix in 0..dest.width() {
                if let Some(color) = self.resolve(src, marker, ix, iy) {
                    dest.set_pixel(ix as i64, iy as i64, color);
                }
            }
        }
    }
}

/// Map `src` into a new bitmap of the same size.
///
/// The destination starts as a copy of the source, so soft-miss pixels show
/// the source pixel at their own coordinate.
pub fn map(src: &Bitmap, marker: u32, params: TransformParams) -> Bitmap {
    let mut dest = src.clone();
    Spiral::new(&params).apply(&mut dest, src, marker);
    dest
}

/// Map `src` into an existing destination of identical dimensions.
///
/// Soft-miss pixels keep the destination's prior content.
pub fn map_into(
    dest: &mut Bitmap,
    src: &Bitmap,
    marker: u32,
    params: TransformParams,
) -> Result<()> {
    if !dest.same_dimensions(src) {
        return Err(EscherError::DimensionMismatch {
            src_w: src.width(),
            src_h: src.height(),
            dst_w: dest.width(),
            dst_h: dest.height(),
        });
    }
    Spiral::new(&params).apply(dest, src, marker);
    Ok(())
}

#[cfg(test)]
mod tests;
