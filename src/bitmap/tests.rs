// src/bitmap/tests.rs

use super::*;

#[test]
fn new_pads_rows_to_four_bytes() {
    let bitmap = Bitmap::new(5, 2);
    assert_eq!(bitmap.stride(), 16);
    assert_eq!(bitmap.row(1).len(), 15);
}

#[test]
fn out_of_bounds_reads_return_zero() {
    let bitmap = Bitmap::filled(3, 2, Rgb::new(0xff, 0xff, 0xff));
    for &(x, y) in &[(-1, 0), (0, -1), (3, 0), (0, 2), (i64::MIN, 0), (0, i64::MAX)] {
        assert_eq!(bitmap.get_pixel(x, y), 0, "({}, {})", x, y);
        assert!(!bitmap.contains(x, y));
    }
    assert_eq!(bitmap.get_pixel(2, 1), 0xFFFFFF);
}

#[test]
fn set_then_get_honours_stride_padding() {
    let data = vec![0u8; 4 * 10];
    let mut bitmap = Bitmap::from_raw(2, 4, 10, data).unwrap();
    assert!(bitmap.set_pixel(1, 3, Rgb::new(0x12, 0x34, 0x56)));
    assert_eq!(bitmap.get_pixel(1, 3), 0x123456);
    assert_eq!(bitmap.get_pixel(0, 3), 0);
    assert!(!bitmap.set_pixel(2, 0, Rgb::RED));
    assert_eq!(bitmap.to_packed_rgb().len(), 2 * 4 * 3);
}

#[test]
fn from_raw_rejects_short_buffers() {
    assert!(matches!(
        Bitmap::from_raw(4, 4, 11, vec![0; 64]),
        Err(EscherError::InvalidBuffer(_))
    ));
    assert!(matches!(
        Bitmap::from_raw(4, 4, 12, vec![0; 47]),
        Err(EscherError::InvalidBuffer(_))
    ));
}
