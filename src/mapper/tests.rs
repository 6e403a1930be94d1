// src/mapper/tests.rs

use super::*;
use test_log::test;

const RED: u32 = 0xFF0000;
const BLUE: u32 = 0x0000FF;

fn count_color(bitmap: &Bitmap, color: u32) -> usize {
    let mut n = 0;
    for y in 0..bitmap.height() as i64 {
        for x in 0..bitmap.width() as i64 {
            if bitmap.get_pixel(x, y) == color {
                n += 1;
            }
        }
    }
    n
}

/// 32x32: yellow left half, green right half, blue 8x8 hole in the middle.
fn framed_hole() -> Bitmap {
    let mut bitmap = Bitmap::new(32, 32);
    for y in 0..32 {
        for x in 0..32 {
            let color = if (12..20).contains(&x) && (12..20).contains(&y) {
                Rgb::from_packed(BLUE)
            } else if x < 16 {
                Rgb::new(0xff, 0xff, 0)
            } else {
                Rgb::new(0, 0xff, 0)
            };
            bitmap.set_pixel(x, y, color);
        }
    }
    bitmap
}

#[test]
fn four_by_four_scenario() {
    let mut src = Bitmap::filled(4, 4, Rgb::RED);
    src.set_pixel(2, 2, Rgb::from_packed(BLUE));

    let out = map(&src, BLUE, TransformParams::new(2.0, 2.0, 1.0, 0.0));

    for y in 0..4 {
        for x in 0..4 {
            let expected = if (x, y) == (2, 2) { 0 } else { RED };
            assert_eq!(out.get_pixel(x, y), expected, "pixel ({}, {})", x, y);
        }
    }
}

#[test]
fn output_keeps_source_dimensions() {
    let src = Bitmap::filled(7, 3, Rgb::new(1, 2, 3));
    let out = map(&src, 0x010203, TransformParams::centered(7, 3));
    assert_eq!((out.width(), out.height()), (7, 3));
}

#[test]
fn repeated_passes_are_byte_identical() {
    let src = framed_hole();
    let params = TransformParams::new(16.0, 16.0, 1.3, 0.4);
    let first = map(&src, BLUE, params);
    let second = map(&src, BLUE, params);
    assert_eq!(first, second);
}

#[test]
fn center_pixel_is_black() {
    let src = framed_hole();
    for &(cx, cy) in &[(16, 16), (0, 0), (31, 5), (13, 30)] {
        let out = map(&src, BLUE, TransformParams::new(cx as f64, cy as f64, 1.0, 0.3));
        assert_eq!(out.get_pixel(cx, cy), 0, "center ({}, {})", cx, cy);
    }
}

#[test]
fn solid_marker_image_resolves_to_red() {
    let color = Rgb::new(0x33, 0x66, 0x99);
    let src = Bitmap::filled(8, 6, color);
    for beta in [0.0, 0.7] {
        let out = map(&src, color.packed(), TransformParams::new(4.0, 3.0, 1.0, beta));
        assert_eq!(out.get_pixel(4, 3), 0);
        assert_eq!(count_color(&out, RED), 8 * 6 - 1);
    }
}

#[test]
fn zero_alpha_leaves_soft_misses_as_source() {
    // baseScale == 1: the inward search never leaves the hole and gives up.
    let color = Rgb::new(0x33, 0x66, 0x99);
    let src = Bitmap::filled(8, 6, color);
    let out = map(&src, color.packed(), TransformParams::new(4.0, 3.0, 0.0, 0.0));
    assert_eq!(out.get_pixel(4, 3), 0);
    assert_eq!(count_color(&out, color.packed()), 8 * 6 - 1);
}

#[test]
fn content_around_the_hole_is_found() {
    let src = framed_hole();
    for beta in [0.0, 0.5] {
        let out = map(&src, BLUE, TransformParams::new(16.0, 16.0, 1.0, beta));
        assert_eq!(count_color(&out, BLUE), 0, "marker leaked at beta {}", beta);
        assert_eq!(count_color(&out, RED), 0, "hard miss at beta {}", beta);
        assert!(count_color(&out, 0xFFFF00) > 0);
        assert!(count_color(&out, 0x00FF00) > 0);
    }
}

#[test]
fn map_into_rejects_mismatched_destination() {
    let src = Bitmap::new(4, 4);
    let mut dest = Bitmap::new(4, 5);
    let err = map_into(&mut dest, &src, 0, TransformParams::centered(4, 4)).unwrap_err();
    assert!(matches!(err, EscherError::DimensionMismatch { dst_h: 5, .. }));
}

#[test]
fn map_into_matches_map_on_a_source_copy() {
    let src = framed_hole();
    let params = TransformParams::new(10.0, 20.0, 0.8, -0.2);
    let mut dest = src.clone();
    map_into(&mut dest, &src, BLUE, params).unwrap();
    assert_eq!(dest, map(&src, BLUE, params));
}
