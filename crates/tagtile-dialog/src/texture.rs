//! Rendering surface adapter: [`Bitmap`] -> egui texture data.

use egui::{Color32, ColorImage};
use tagtile_core::{Bitmap, unpack_argb};

/// Converts packed pixels to egui colors.
///
/// Alpha is honoured only for [`tagtile_core::BitmapFormat::Argb32`];
/// `Rgb32` pixels are always opaque.
pub fn bitmap_to_color32(bitmap: &Bitmap) -> Vec<Color32> {
    let has_alpha = bitmap.format().has_alpha();
    bitmap
        .pixels()
        .iter()
        .map(|&p| {
            let [a, r, g, b] = unpack_argb(p);
            if has_alpha {
                Color32::from_rgba_unmultiplied(r, g, b, a)
            } else {
                Color32::from_rgb(r, g, b)
            }
        })
        .collect()
}

/// Converts a bitmap to an image ready for `Context::load_texture`.
pub fn bitmap_to_color_image(bitmap: &Bitmap) -> ColorImage {
    let (w, h) = bitmap.dimensions();
    ColorImage {
        size: [w as usize, h as usize],
        pixels: bitmap_to_color32(bitmap),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagtile_core::{BitmapFormat, pack_argb};

    #[test]
    fn rgb32_is_opaque() {
        let bmp = Bitmap::from_pixels(2, 1, BitmapFormat::Rgb32, vec![
            pack_argb(0, 10, 20, 30),
            pack_argb(255, 1, 2, 3),
        ])
        .unwrap();
        let px = bitmap_to_color32(&bmp);
        assert_eq!(px, vec![Color32::from_rgb(10, 20, 30), Color32::from_rgb(1, 2, 3)]);
    }

    #[test]
    fn argb32_keeps_alpha() {
        let bmp = Bitmap::from_pixels(2, 1, BitmapFormat::Argb32, vec![
            pack_argb(255, 10, 20, 30),
            pack_argb(0, 10, 20, 30),
        ])
        .unwrap();
        let px = bitmap_to_color32(&bmp);
        assert_eq!(px[0], Color32::from_rgb(10, 20, 30));
        assert_eq!(px[1].a(), 0);
    }

    #[test]
    fn color_image_size_is_width_height() {
        let bmp = Bitmap::filled(3, 2, BitmapFormat::Rgb32, pack_argb(255, 0, 0, 0));
        let img = bitmap_to_color_image(&bmp);
        assert_eq!(img.size, [3, 2]);
        assert_eq!(img.pixels.len(), 6);
        assert!(img.pixels.iter().all(|&c| c == Color32::BLACK));
    }
}
