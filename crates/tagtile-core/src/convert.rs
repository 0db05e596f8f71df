//! Conversions between pixel arrays, single-channel matrices and bitmaps.
//!
//! Every function here is pure: inputs are borrowed, outputs are freshly
//! allocated and never alias the input buffers, so callers may mutate or
//! drop their arrays right after a call.
//!
//! # Overview
//!
//! | Function | From | To |
//! |----------|------|----|
//! | [`mask_to_bitmap`] | [`Mask`] | opaque [`Bitmap`] |
//! | [`gray_to_bitmap`] | [`GrayImage`] | opaque [`Bitmap`] |
//! | [`labels_to_bitmap`] | [`LabelMatrix`] | opaque [`Bitmap`] |
//! | [`scalar_field_to_bitmap`] | [`ScalarField`] | opaque [`Bitmap`] |
//! | [`channel_array_to_bitmap`] | [`PixelArray`] (3 or 4 ch) | [`Bitmap`] |
//! | [`bitmap_to_channel_array`] | opaque [`Bitmap`] | 3-channel [`PixelArray`] |
//! | [`crop_bitmap`] | [`Bitmap`] + [`WorkingArea`] | [`Bitmap`] |
//! | [`scale_bitmap_to_fit`] | [`Bitmap`] | [`Bitmap`] |
//!
//! Bulk conversions process rows in parallel with [`rayon`].

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::area::WorkingArea;
use crate::array::{ChannelOrder, PixelArray};
use crate::bitmap::{Bitmap, BitmapFormat, OPAQUE, pack_argb, unpack_argb};
use crate::error::{Error, Result};
use crate::matrix::{GrayImage, LabelMatrix, Mask, ScalarField};

/// Per-channel multipliers of the label color formula.
const LABEL_MULTIPLIERS: [i64; 3] = [17, 163, 211];

/// Color of a label id: `(17c, 163c, 211c)` modulo 256.
///
/// Any integer is a legal id; values simply wrap. Id 0 is black.
///
/// ```rust
/// use tagtile_core::label_color;
///
/// assert_eq!(label_color(0), [0, 0, 0]);
/// assert_eq!(label_color(1), [17, 163, 211]);
/// assert_eq!(label_color(2), [34, 70, 166]);
/// ```
#[inline]
pub fn label_color(id: i32) -> [u8; 3] {
    let c = id as i64;
    LABEL_MULTIPLIERS.map(|m| (c * m).rem_euclid(256) as u8)
}

/// Row chunk size for parallel iteration; zero-width images have no rows.
#[inline]
fn row_len(width: u32) -> usize {
    (width as usize).max(1)
}

/// Converts a binary mask to an opaque gray bitmap (`true` -> white).
///
/// Cells are scaled by 255, replicated into three identical channels and
/// packed through the same path as [`channel_array_to_bitmap`].
pub fn mask_to_bitmap(mask: &Mask) -> Bitmap {
    let gray: Vec<u8> = mask.data().iter().map(|&on| if on { 255 } else { 0 }).collect();
    pack_gray(mask.width(), mask.height(), &gray)
}

/// Converts an 8-bit grayscale matrix to an opaque gray bitmap.
///
/// Values are taken as-is (0..=255); no scaling is applied. Use
/// [`mask_to_bitmap`] for 0/1 masks.
pub fn gray_to_bitmap(gray: &GrayImage) -> Bitmap {
    pack_gray(gray.width(), gray.height(), gray.data())
}

fn pack_gray(width: u32, height: u32, gray: &[u8]) -> Bitmap {
    let rgb: Vec<u8> = gray.iter().flat_map(|&v| [v, v, v]).collect();
    let array = PixelArray::from_parts(width, height, ChannelOrder::Rgb, rgb);
    pack_opaque(&array, [0, 1, 2])
}

/// Converts a label matrix to an opaque color bitmap using [`label_color`].
///
/// Runs in time linear in the pixel count.
pub fn labels_to_bitmap(labels: &LabelMatrix) -> Bitmap {
    let (width, height) = labels.dimensions();
    trace!(width, height, "labels_to_bitmap");

    let mut pixels = vec![0u32; labels.len()];
    pixels
        .par_chunks_mut(row_len(width))
        .zip(labels.data().par_chunks(row_len(width)))
        .for_each(|(dst, src)| {
            for (d, &id) in dst.iter_mut().zip(src) {
                let [r, g, b] = label_color(id);
                *d = pack_argb(OPAQUE, r, g, b);
            }
        });

    Bitmap::from_raw(width, height, BitmapFormat::Rgb32, pixels)
}

/// Returns `true` if a scalar field cell carries data.
#[inline]
fn is_valid_cell(v: f32, nodata: Option<f32>) -> bool {
    v.is_finite() && nodata.is_none_or(|nd| v != nd)
}

/// Min-max normalizes a scalar field to 8-bit gray.
///
/// No-data cells (equal to `nodata`, or non-finite) are replaced with the
/// maximum of the valid cells before normalizing, so they render white.
/// Results are truncated toward zero.
///
/// # Errors
///
/// [`Error::DegenerateRange`] if the valid cells span no range (flat field),
/// [`Error::NoValidData`] if there are no valid cells at all.
pub fn normalize_scalar_field(field: &ScalarField, nodata: Option<f32>) -> Result<GrayImage> {
    let (min, max) = field
        .data()
        .iter()
        .copied()
        .filter(|&v| is_valid_cell(v, nodata))
        .fold(None, |acc: Option<(f32, f32)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .ok_or(Error::NoValidData)?;

    if !(max > min) {
        return Err(Error::DegenerateRange { min, max });
    }

    let lo = min as f64;
    let range = max as f64 - lo;
    let gray = field
        .data()
        .par_iter()
        .map(|&v| {
            let v = if is_valid_cell(v, nodata) { v as f64 } else { max as f64 };
            ((v - lo) / range * 255.0) as u8
        })
        .collect();

    GrayImage::new(field.width(), field.height(), gray)
}

/// Converts a scalar field to an opaque gray bitmap.
///
/// See [`normalize_scalar_field`] for the mapping. A degenerate range
/// (flat field, or only no-data cells) yields an all-black bitmap.
pub fn scalar_field_to_bitmap(field: &ScalarField, nodata: Option<f32>) -> Bitmap {
    match normalize_scalar_field(field, nodata) {
        Ok(gray) => gray_to_bitmap(&gray),
        Err(e) => {
            debug!("scalar field rendered black: {e}");
            Bitmap::filled(
                field.width(),
                field.height(),
                BitmapFormat::Rgb32,
                pack_argb(OPAQUE, 0, 0, 0),
            )
        }
    }
}

/// Packs a 3- or 4-channel pixel array into a bitmap.
///
/// - 3 channels -> [`BitmapFormat::Rgb32`], alpha set to 255
/// - 4 channels -> [`BitmapFormat::Argb32`], alpha taken from the array
///
/// Channels are located through the array's [`ChannelOrder`], so an
/// [`ChannelOrder::Argb`] array and an [`ChannelOrder::Rgba`] array with the
/// same colors produce the same bitmap.
///
/// # Errors
///
/// [`Error::InvalidChannelCount`] for any other channel count.
///
/// # Example
///
/// ```rust
/// use tagtile_core::{PixelArray, BitmapFormat, channel_array_to_bitmap};
///
/// let rgb = PixelArray::new(1, 1, 3, vec![10, 20, 30]).unwrap();
/// let bmp = channel_array_to_bitmap(&rgb).unwrap();
/// assert_eq!(bmp.format(), BitmapFormat::Rgb32);
/// assert_eq!(bmp.argb(0, 0), Some([255, 10, 20, 30]));
/// ```
pub fn channel_array_to_bitmap(array: &PixelArray) -> Result<Bitmap> {
    let order = array.order();
    let mismatch = || Error::ChannelMismatch {
        expected: order.channels().unwrap_or(0),
        got: array.channels(),
    };

    match array.channels() {
        3 => {
            let rgb = order.rgb_indices().ok_or_else(mismatch)?;
            Ok(pack_opaque(array, rgb))
        }
        4 => {
            let rgb = order.rgb_indices().ok_or_else(mismatch)?;
            let alpha = order.alpha_index().ok_or_else(mismatch)?;
            Ok(pack_alpha(array, rgb, alpha))
        }
        got => Err(Error::InvalidChannelCount { got }),
    }
}

fn pack_opaque(array: &PixelArray, [ri, gi, bi]: [usize; 3]) -> Bitmap {
    pack_rows(array, BitmapFormat::Rgb32, |px| {
        pack_argb(OPAQUE, px[ri], px[gi], px[bi])
    })
}

fn pack_alpha(array: &PixelArray, [ri, gi, bi]: [usize; 3], ai: usize) -> Bitmap {
    pack_rows(array, BitmapFormat::Argb32, |px| {
        pack_argb(px[ai], px[ri], px[gi], px[bi])
    })
}

fn pack_rows<F>(array: &PixelArray, format: BitmapFormat, pack: F) -> Bitmap
where
    F: Fn(&[u8]) -> u32 + Sync,
{
    let width = array.width();
    let channels = array.channels() as usize;
    trace!(width, height = array.height(), channels, format = format.name(), "pack_rows");

    let mut pixels = vec![0u32; array.pixel_count()];
    pixels
        .par_chunks_mut(row_len(width))
        .zip(array.data().par_chunks(row_len(width) * channels))
        .for_each(|(dst, src)| {
            for (d, px) in dst.iter_mut().zip(src.chunks_exact(channels)) {
                *d = pack(px);
            }
        });

    Bitmap::from_raw(width, array.height(), format, pixels)
}

/// Unpacks an opaque bitmap into a new 3-channel [`ChannelOrder::Rgb`] array.
///
/// Exact inverse of [`channel_array_to_bitmap`] for 3-channel input.
///
/// # Errors
///
/// [`Error::UnsupportedPixelFormat`] for [`BitmapFormat::Argb32`].
pub fn bitmap_to_channel_array(bitmap: &Bitmap) -> Result<PixelArray> {
    if bitmap.format() != BitmapFormat::Rgb32 {
        return Err(Error::UnsupportedPixelFormat {
            format: bitmap.format().name(),
        });
    }

    let width = bitmap.width();
    let mut data = vec![0u8; bitmap.pixels().len() * 3];
    data.par_chunks_mut(row_len(width) * 3)
        .zip(bitmap.pixels().par_chunks(row_len(width)))
        .for_each(|(dst, src)| {
            for (d, &p) in dst.chunks_exact_mut(3).zip(src) {
                let [_, r, g, b] = unpack_argb(p);
                d.copy_from_slice(&[r, g, b]);
            }
        });

    Ok(PixelArray::from_parts(width, bitmap.height(), ChannelOrder::Rgb, data))
}

/// Copies the sub-region described by a working area into a new bitmap.
///
/// The result keeps the source format and owns its pixels.
///
/// # Errors
///
/// [`Error::InvalidRegion`] if the area has negative fields or does not fit
/// inside the bitmap. Clamp first with [`crate::clamp_coords`].
///
/// # Example
///
/// ```rust
/// use tagtile_core::{Bitmap, BitmapFormat, WorkingArea, crop_bitmap};
///
/// let bmp = Bitmap::filled(100, 50, BitmapFormat::Rgb32, 0);
/// let crop = crop_bitmap(&bmp, &WorkingArea::new(10.0, 20.0, 30.0, 5.0)).unwrap();
/// assert_eq!(crop.dimensions(), (30, 5));
/// ```
pub fn crop_bitmap(bitmap: &Bitmap, area: &WorkingArea) -> Result<Bitmap> {
    let (width, height) = bitmap.dimensions();
    let [top, left, w, h] = area.truncated();
    let rect = area
        .to_rect()
        .filter(|r| r.fits_in(width, height))
        .ok_or_else(|| Error::invalid_region(left, top, w, h, width, height))?;

    let x0 = rect.x as usize;
    let x1 = x0 + rect.width as usize;
    let mut pixels = Vec::with_capacity(rect.area() as usize);
    for y in rect.y..rect.y + rect.height {
        pixels.extend_from_slice(&bitmap.row(y)[x0..x1]);
    }

    Ok(Bitmap::from_raw(rect.width, rect.height, bitmap.format(), pixels))
}

/// Scales a bitmap to fit in `max_width x max_height`, keeping aspect ratio.
///
/// Uses nearest-neighbour sampling; smooth filtering is left to the
/// rendering surface. Non-empty sources always produce at least 1x1.
pub fn scale_bitmap_to_fit(bitmap: &Bitmap, max_width: u32, max_height: u32) -> Bitmap {
    let (sw, sh) = bitmap.dimensions();
    if sw == 0 || sh == 0 || max_width == 0 || max_height == 0 {
        return Bitmap::from_raw(0, 0, bitmap.format(), Vec::new());
    }

    let scale = (max_width as f64 / sw as f64).min(max_height as f64 / sh as f64);
    let dw = ((sw as f64 * scale).round() as u32).clamp(1, max_width);
    let dh = ((sh as f64 * scale).round() as u32).clamp(1, max_height);

    let mut pixels = vec![0u32; dw as usize * dh as usize];
    pixels
        .par_chunks_mut(dw as usize)
        .enumerate()
        .for_each(|(y, row)| {
            let sy = ((y as u64 * sh as u64) / dh as u64) as u32;
            let src = bitmap.row(sy);
            for (x, d) in row.iter_mut().enumerate() {
                let sx = (x as u64 * sw as u64) / dw as u64;
                *d = src[sx as usize];
            }
        });

    Bitmap::from_raw(dw, dh, bitmap.format(), pixels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Matrix;

    #[test]
    fn label_color_wraps_negative_ids() {
        assert_eq!(label_color(-1), [239, 93, 45]);
        assert_eq!(label_color(256), [0, 0, 0]);
    }

    #[test]
    fn labels_zero_is_black() {
        let labels = LabelMatrix::new(2, 1, vec![0, 3]).unwrap();
        let bmp = labels_to_bitmap(&labels);
        assert_eq!(bmp.argb(0, 0), Some([255, 0, 0, 0]));
        assert_eq!(bmp.argb(1, 0), Some([255, 51, 233, 121]));
    }

    #[test]
    fn mask_scales_to_white() {
        let mask = Mask::new(2, 1, vec![false, true]).unwrap();
        let bmp = mask_to_bitmap(&mask);
        assert_eq!(bmp.format(), BitmapFormat::Rgb32);
        assert_eq!(bmp.pixel(0, 0), Some(0xFF00_0000));
        assert_eq!(bmp.pixel(1, 0), Some(0xFFFF_FFFF));
    }

    #[test]
    fn gray_passes_values_through() {
        let gray = GrayImage::new(1, 1, vec![128]).unwrap();
        assert_eq!(gray_to_bitmap(&gray).argb(0, 0), Some([255, 128, 128, 128]));
    }

    #[test]
    fn scalar_field_min_max() {
        let field = ScalarField::new(3, 1, vec![0.0, 5.0, 10.0]).unwrap();
        let gray = normalize_scalar_field(&field, None).unwrap();
        assert_eq!(gray.data(), &[0, 127, 255]);
    }

    #[test]
    fn scalar_field_nodata_takes_max() {
        let field = ScalarField::new(3, 1, vec![-9999.0, 2.0, 4.0]).unwrap();
        let gray = normalize_scalar_field(&field, Some(-9999.0)).unwrap();
        assert_eq!(gray.data(), &[255, 0, 255]);

        let with_nan = ScalarField::new(3, 1, vec![f32::NAN, 2.0, 4.0]).unwrap();
        let gray = normalize_scalar_field(&with_nan, None).unwrap();
        assert_eq!(gray.data(), &[255, 0, 255]);
    }

    #[test]
    fn scalar_field_flat_is_black() {
        let field = ScalarField::filled(4, 2, 3.0);
        assert!(matches!(
            normalize_scalar_field(&field, None),
            Err(Error::DegenerateRange { min, max }) if min == 3.0 && max == 3.0
        ));
        let bmp = scalar_field_to_bitmap(&field, None);
        assert_eq!(bmp.dimensions(), (4, 2));
        assert!(bmp.pixels().iter().all(|&p| p == 0xFF00_0000));
    }

    #[test]
    fn scalar_field_all_nodata_is_black() {
        let field = ScalarField::filled(2, 2, -1.0);
        assert_eq!(
            normalize_scalar_field(&field, Some(-1.0)),
            Err(Error::NoValidData)
        );
        let nan = ScalarField::filled(1, 1, f32::NAN);
        assert_eq!(normalize_scalar_field(&nan, None), Err(Error::NoValidData));
        let bmp = scalar_field_to_bitmap(&field, Some(-1.0));
        assert!(bmp.pixels().iter().all(|&p| p == 0xFF00_0000));
    }

    #[test]
    fn four_channel_respects_order() {
        let rgba = PixelArray::new(1, 1, 4, vec![1, 2, 3, 4]).unwrap();
        let argb = PixelArray::new(1, 1, 4, vec![4, 1, 2, 3])
            .unwrap()
            .with_order(ChannelOrder::Argb)
            .unwrap();
        let a = channel_array_to_bitmap(&rgba).unwrap();
        let b = channel_array_to_bitmap(&argb).unwrap();
        assert_eq!(a.format(), BitmapFormat::Argb32);
        assert_eq!(a, b);
        assert_eq!(a.argb(0, 0), Some([4, 1, 2, 3]));
    }

    #[test]
    fn bgr_is_swapped() {
        let bgr = PixelArray::new(1, 1, 3, vec![30, 20, 10])
            .unwrap()
            .with_order(ChannelOrder::Bgr)
            .unwrap();
        let bmp = channel_array_to_bitmap(&bgr).unwrap();
        assert_eq!(bmp.argb(0, 0), Some([255, 10, 20, 30]));
    }

    #[test]
    fn invalid_channel_count() {
        let two = PixelArray::new(2, 2, 2, vec![0; 8]).unwrap();
        assert_eq!(
            channel_array_to_bitmap(&two),
            Err(Error::InvalidChannelCount { got: 2 })
        );
        let one = PixelArray::new(1, 1, 1, vec![0]).unwrap();
        assert_eq!(
            channel_array_to_bitmap(&one),
            Err(Error::InvalidChannelCount { got: 1 })
        );
    }

    #[test]
    fn inverse_rejects_alpha_bitmap() {
        let bmp = Bitmap::filled(1, 1, BitmapFormat::Argb32, 0);
        assert_eq!(
            bitmap_to_channel_array(&bmp),
            Err(Error::UnsupportedPixelFormat { format: "ARGB32" })
        );
    }

    #[test]
    fn output_does_not_alias_input() {
        let mut array = PixelArray::new(1, 1, 3, vec![1, 2, 3]).unwrap();
        let bmp = channel_array_to_bitmap(&array).unwrap();
        array.data_mut()[0] = 99;
        assert_eq!(bmp.argb(0, 0), Some([255, 1, 2, 3]));
    }

    #[test]
    fn crop_copies_region() {
        let bmp = Bitmap::from_pixels(3, 3, BitmapFormat::Argb32, (0..9).collect()).unwrap();
        let crop = crop_bitmap(&bmp, &WorkingArea::new(1.0, 1.0, 2.0, 2.0)).unwrap();
        assert_eq!(crop.pixels(), &[4, 5, 7, 8]);
        assert_eq!(crop.format(), BitmapFormat::Argb32);
    }

    #[test]
    fn crop_out_of_range_fails() {
        let bmp = Bitmap::filled(3, 3, BitmapFormat::Rgb32, 0);
        let err = crop_bitmap(&bmp, &WorkingArea::new(2.0, 0.0, 3.0, 2.0)).unwrap_err();
        assert!(err.is_bounds_error());
        assert!(crop_bitmap(&bmp, &WorkingArea::new(-1.0, 0.0, 1.0, 1.0)).is_err());
    }

    #[test]
    fn scale_keeps_aspect() {
        let bmp = Bitmap::filled(200, 100, BitmapFormat::Rgb32, 0);
        assert_eq!(scale_bitmap_to_fit(&bmp, 50, 50).dimensions(), (50, 25));
        assert_eq!(scale_bitmap_to_fit(&bmp, 400, 400).dimensions(), (400, 200));
        assert_eq!(scale_bitmap_to_fit(&bmp, 0, 10).dimensions(), (0, 0));
    }

    #[test]
    fn scale_samples_nearest() {
        let labels = Matrix::from_fn(2, 2, |x, y| (x + 2 * y) as i32);
        let bmp = labels_to_bitmap(&labels);
        let up = scale_bitmap_to_fit(&bmp, 4, 4);
        assert_eq!(up.pixel(3, 3), bmp.pixel(1, 1));
        assert_eq!(up.pixel(0, 1), bmp.pixel(0, 0));
    }
}
