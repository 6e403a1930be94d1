// src/display/canvas.rs
//! Side-by-side layout: the source image in the left pane, the mapped result
//! in the right pane, both the size of the source.

use super::messages::{RenderSnapshot, FRAMEBUFFER_BYTES_PER_PIXEL};
use crate::bitmap::{Bitmap, BYTES_PER_PIXEL};
use crate::color::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideBySide {
    pane_width: u32,
    pane_height: u32,
}

impl SideBySide {
    pub fn for_image(source: &Bitmap) -> Self {
        Self {
            pane_width: source.width() as u32,
            pane_height: source.height() as u32,
        }
    }

    /// Window size in pixels: two panes wide, one pane high.
    pub fn window_size(&self) -> (u32, u32) {
        (self.pane_width * 2, self.pane_height)
    }

    pub fn new_snapshot(&self) -> RenderSnapshot {
        let (w, h) = self.window_size();
        RenderSnapshot::new(w, h)
    }

    /// Is the window point inside the source pane?
    pub fn source_contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.pane_width && (y as u32) < self.pane_height
    }

    pub fn draw_source(&self, snapshot: &mut RenderSnapshot, source: &Bitmap) {
        blit(snapshot, source, 0);
    }

    pub fn draw_result(&self, snapshot: &mut RenderSnapshot, result: &Bitmap) {
        blit(snapshot, result, self.pane_width);
    }

    pub fn clear_result(&self, snapshot: &mut RenderSnapshot) {
        fill(
            snapshot,
            self.pane_width,
            self.pane_width,
            self.pane_height,
            Rgb::BLACK,
        );
    }
}

/// Copy `bitmap` into the framebuffer with its left edge at `x_offset`,
/// clipped to the framebuffer.
pub fn blit(snapshot: &mut RenderSnapshot, bitmap: &Bitmap, x_offset: u32) {
    let fb_width = snapshot.width_px as usize;
    let x_offset = x_offset as usize;
    if x_offset >= fb_width {
        return;
    }
    let cols = bitmap.width().min(fb_width - x_offset);
    let rows = bitmap.height().min(snapshot.height_px as usize);
    let fb_stride = fb_width * FRAMEBUFFER_BYTES_PER_PIXEL;

    for y in 0..rows {
        let src_row = &bitmap.row(y)[..cols * BYTES_PER_PIXEL];
        let start = y * fb_stride + x_offset * FRAMEBUFFER_BYTES_PER_PIXEL;
        let dest_row = &mut snapshot.framebuffer[start..start + cols * FRAMEBUFFER_BYTES_PER_PIXEL];
        for (src_px, dest_px) in src_row
            .chunks_exact(BYTES_PER_PIXEL)
            .zip(dest_row.chunks_exact_mut(FRAMEBUFFER_BYTES_PER_PIXEL))
        {
            Rgb::from_slice(src_px).write_bgrx(dest_px);
        }
    }
}

fn fill(snapshot: &mut RenderSnapshot, x_offset: u32, width: u32, height: u32, color: Rgb) {
    let fb_width = snapshot.width_px as usize;
    let x_offset = x_offset as usize;
    if x_offset >= fb_width {
        return;
    }
    let cols = (width as usize).min(fb_width - x_offset);
    let rows = (height as usize).min(snapshot.height_px as usize);
    let fb_stride = fb_width * FRAMEBUFFER_BYTES_PER_PIXEL;

    for y in 0..rows {
        let start = y * fb_stride + x_offset * FRAMEBUFFER_BYTES_PER_PIXEL;
        for px in snapshot.framebuffer[start..start + cols * FRAMEBUFFER_BYTES_PER_PIXEL]
            .chunks_exact_mut(FRAMEBUFFER_BYTES_PER_PIXEL)
        {
            color.write_bgrx(px);
        }
    }
}
