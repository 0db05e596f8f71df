//! End-to-end properties of the pixel buffer conversions.
//!
//! Inputs are generated with a small deterministic LCG so every run checks
//! the same pseudo-random buffers.

use approx::assert_relative_eq;
use tagtile_core::prelude::*;
use tagtile_core::{WorkingArea, is_valid_date, label_color, parse_target_scale, unpack_argb};

/// Deterministic byte stream (Numerical Recipes LCG constants).
struct Lcg(u32);

impl Lcg {
    fn next_u8(&mut self) -> u8 {
        self.0 = self.0.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        (self.0 >> 24) as u8
    }

    fn bytes(&mut self, n: usize) -> Vec<u8> {
        (0..n).map(|_| self.next_u8()).collect()
    }
}

// ============================================================================
// Label colors
// ============================================================================

#[test]
fn labels_follow_color_formula() {
    let ids: Vec<i32> = (-300..300).collect();
    let labels = LabelMatrix::new(40, 15, ids.clone()).unwrap();
    let bmp = labels_to_bitmap(&labels);

    for (i, &c) in ids.iter().enumerate() {
        let [a, r, g, b] = unpack_argb(bmp.pixels()[i]);
        let c = c as i64;
        assert_eq!(a, 255);
        assert_eq!(r as i64, (17 * c).rem_euclid(256));
        assert_eq!(g as i64, (163 * c).rem_euclid(256));
        assert_eq!(b as i64, (211 * c).rem_euclid(256));
    }
    assert_eq!(label_color(0), [0, 0, 0]);
}

// ============================================================================
// Opaque round trip
// ============================================================================

#[test]
fn rgb_round_trip_is_exact() {
    let mut rng = Lcg(7);
    for &(w, h) in &[(1, 1), (3, 5), (17, 4), (64, 33)] {
        let data = rng.bytes(w as usize * h as usize * 3);
        let array = PixelArray::new(w, h, 3, data).unwrap();
        let bmp = channel_array_to_bitmap(&array).unwrap();
        assert_eq!(bmp.format(), BitmapFormat::Rgb32);
        assert_eq!(bmp.byte_len(), w as usize * h as usize * 4);

        let back = bitmap_to_channel_array(&bmp).unwrap();
        assert_eq!(back, array);
    }
}

#[test]
fn bgr_round_trip_comes_back_as_rgb() {
    let array = PixelArray::new(2, 1, 3, vec![1, 2, 3, 4, 5, 6])
        .unwrap()
        .with_order(ChannelOrder::Bgr)
        .unwrap();
    let back = bitmap_to_channel_array(&channel_array_to_bitmap(&array).unwrap()).unwrap();
    assert_eq!(back.order(), ChannelOrder::Rgb);
    assert_eq!(back.data(), &[3, 2, 1, 6, 5, 4]);
}

#[test]
fn empty_arrays_convert() {
    let array = PixelArray::new(0, 5, 3, Vec::new()).unwrap();
    let bmp = channel_array_to_bitmap(&array).unwrap();
    assert_eq!(bmp.dimensions(), (0, 5));
    assert!(bmp.pixels().is_empty());
}

// ============================================================================
// Clamping and dates
// ============================================================================

#[test]
fn clamp_examples() {
    assert_eq!(clamp_coords(-5, -5, 100, 50), (0, 0));
    assert_eq!(clamp_coords(500, 500, 100, 50), (100, 50));
    for x in 0..=100 {
        for y in (0..=50).step_by(7) {
            assert_eq!(clamp_coords(x, y, 100, 50), (x, y));
        }
    }
}

#[test]
fn date_examples() {
    assert!(!is_valid_date("2023-02-29"));
    assert!(is_valid_date("2024-02-29"));
    assert!(!is_valid_date("not-a-date"));
}

// ============================================================================
// Rasterization
// ============================================================================

#[test]
fn horizontal_segment_has_six_cells() {
    let cells = rasterize_open_polyline(&[0.0, 0.0], &[0.0, 5.0]).unwrap();
    let expected: Vec<Cell> = (0..=5).map(|c| Cell::new(0, c)).collect();
    assert_eq!(cells, expected);
}

#[test]
fn polyline_length_is_sum_of_segments() {
    let rows = [0.0, 4.0, 4.0, 10.0];
    let cols = [0.0, 1.0, 9.0, 2.0];
    let cells = rasterize_open_polyline(&rows, &cols).unwrap();
    // Each segment covers max(|dr|, |dc|) + 1 cells.
    assert_eq!(cells.len(), 5 + 9 + 8);
    assert_eq!(cells.first(), Some(&Cell::new(0, 0)));
    assert_eq!(cells.last(), Some(&Cell::new(10, 2)));
}

// ============================================================================
// Scalar fields
// ============================================================================

#[test]
fn flat_field_is_well_defined() {
    let field = ScalarField::filled(8, 8, 3.0);
    let bmp = scalar_field_to_bitmap(&field, None);
    assert_eq!(bmp.format(), BitmapFormat::Rgb32);
    assert!(bmp.pixels().iter().all(|&p| unpack_argb(p) == [255, 0, 0, 0]));
}

#[test]
fn scalar_field_spans_full_range() {
    let values: Vec<f32> = (0..256).map(|v| v as f32 * 0.5 - 20.0).collect();
    let field = ScalarField::new(16, 16, values).unwrap();
    let gray = normalize_scalar_field(&field, None).unwrap();
    assert_eq!(gray.data()[0], 0);
    assert_eq!(gray.data()[255], 255);
    assert!(gray.data().windows(2).all(|w| w[0] <= w[1]));

    let mid = field.data()[128];
    let expected = (mid + 20.0) / 127.5 * 255.0;
    assert_relative_eq!(gray.data()[128] as f32, expected.trunc(), epsilon = 1.0);
}

// ============================================================================
// Working area and free-text fields
// ============================================================================

#[test]
fn working_area_formatting() {
    assert_eq!(
        WorkingArea::new(10.7, 2.2, 300.9, 150.1).to_string(),
        "10,2,300,150"
    );
}

#[test]
fn crop_then_round_trip() {
    let mut rng = Lcg(99);
    let array = PixelArray::new(10, 8, 3, rng.bytes(240)).unwrap();
    let bmp = channel_array_to_bitmap(&array).unwrap();
    let area = WorkingArea::new(2.0, 3.0, 4.0, 5.0);
    let crop = crop_bitmap(&bmp, &area).unwrap();
    let sub = bitmap_to_channel_array(&crop).unwrap();

    for y in 0..5 {
        for x in 0..4 {
            assert_eq!(sub.pixel(x, y), array.pixel(x + 3, y + 2));
        }
    }
}

#[test]
fn target_scale_parses_floats() {
    assert_relative_eq!(parse_target_scale("0.25").unwrap(), 0.25);
    assert!(parse_target_scale("1,5").is_err());
}
