//! Packed 32-bit bitmap, the interchange format handed to rendering surfaces.
//!
//! # Pixel Format
//!
//! Each pixel is one `u32` laid out as `0xAARRGGBB`. On little-endian
//! machines the bytes in memory read `B, G, R, A`, which is the native
//! layout of most GUI toolkits.
//!
//! Exactly two encodings exist:
//!
//! - [`BitmapFormat::Rgb32`] - opaque; the alpha byte is always `0xFF`
//! - [`BitmapFormat::Argb32`] - straight (non-premultiplied) alpha
//!
//! Rows are packed without padding, so the byte length is always
//! `width * height * 4`. Stride handling belongs to the toolkit adapter.

use crate::error::{Error, Result};

/// Alpha value of every [`BitmapFormat::Rgb32`] pixel.
pub const OPAQUE: u8 = 0xFF;

/// Encoding of a [`Bitmap`] pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BitmapFormat {
    /// Opaque RGB in 32 bits (`0xFFRRGGBB`).
    Rgb32,
    /// RGB with straight alpha (`0xAARRGGBB`).
    Argb32,
}

impl BitmapFormat {
    /// Short format name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rgb32 => "RGB32",
            Self::Argb32 => "ARGB32",
        }
    }

    /// Returns `true` if the format stores meaningful alpha.
    pub const fn has_alpha(self) -> bool {
        matches!(self, Self::Argb32)
    }
}

/// Packs channel values into a `0xAARRGGBB` pixel.
#[inline]
pub const fn pack_argb(a: u8, r: u8, g: u8, b: u8) -> u32 {
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Splits a `0xAARRGGBB` pixel into `[a, r, g, b]`.
#[inline]
pub const fn unpack_argb(pixel: u32) -> [u8; 4] {
    [
        (pixel >> 24) as u8,
        (pixel >> 16) as u8,
        (pixel >> 8) as u8,
        pixel as u8,
    ]
}

/// Owned packed 32-bit image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    format: BitmapFormat,
    pixels: Vec<u32>,
}

impl Bitmap {
    /// Bitmap filled with one packed pixel value.
    ///
    /// For [`BitmapFormat::Rgb32`] the alpha byte is forced to opaque.
    pub fn filled(width: u32, height: u32, format: BitmapFormat, pixel: u32) -> Self {
        let pixel = normalize(format, pixel);
        Self {
            width,
            height,
            format,
            pixels: vec![pixel; width as usize * height as usize],
        }
    }

    /// Wraps packed pixels.
    ///
    /// For [`BitmapFormat::Rgb32`] every alpha byte is forced to opaque.
    ///
    /// # Errors
    ///
    /// [`Error::DataLength`] if `pixels.len() != width * height`.
    pub fn from_pixels(
        width: u32,
        height: u32,
        format: BitmapFormat,
        mut pixels: Vec<u32>,
    ) -> Result<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(Error::DataLength {
                width,
                height,
                channels: 4,
                expected: expected * 4,
                got: pixels.len() * 4,
            });
        }
        if format == BitmapFormat::Rgb32 {
            for p in &mut pixels {
                *p = normalize(format, *p);
            }
        }
        Ok(Self {
            width,
            height,
            format,
            pixels,
        })
    }

    /// Wraps pixels already known to match the dimensions and format.
    pub(crate) fn from_raw(width: u32, height: u32, format: BitmapFormat, pixels: Vec<u32>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Self {
            width,
            height,
            format,
            pixels,
        }
    }

    /// Decodes little-endian `B, G, R, A` bytes.
    ///
    /// # Errors
    ///
    /// [`Error::DataLength`] if `bytes.len() != width * height * 4`.
    pub fn from_bytes(width: u32, height: u32, format: BitmapFormat, bytes: &[u8]) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if bytes.len() != expected {
            return Err(Error::DataLength {
                width,
                height,
                channels: 4,
                expected,
                got: bytes.len(),
            });
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        Self::from_pixels(width, height, format, pixels)
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Pixel encoding.
    #[inline]
    pub fn format(&self) -> BitmapFormat {
        self.format
    }

    /// Packed pixels, row-major.
    #[inline]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Size of the packed buffer in bytes.
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.pixels.len() * 4
    }

    /// One row of packed pixels.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u32] {
        let w = self.width as usize;
        let start = y as usize * w;
        &self.pixels[start..start + w]
    }

    /// Packed pixel at (x, y), `None` outside the bitmap.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        (x < self.width && y < self.height)
            .then(|| self.pixels[y as usize * self.width as usize + x as usize])
    }

    /// `[a, r, g, b]` at (x, y), `None` outside the bitmap.
    #[inline]
    pub fn argb(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixel(x, y).map(unpack_argb)
    }

    /// Serializes to little-endian `B, G, R, A` bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_le_bytes()).collect()
    }
}

#[inline]
const fn normalize(format: BitmapFormat, pixel: u32) -> u32 {
    match format {
        BitmapFormat::Rgb32 => pixel | 0xFF00_0000,
        BitmapFormat::Argb32 => pixel,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_unpack() {
        let p = pack_argb(0x11, 0x22, 0x33, 0x44);
        assert_eq!(p, 0x1122_3344);
        assert_eq!(unpack_argb(p), [0x11, 0x22, 0x33, 0x44]);
    }

    #[test]
    fn rgb32_forces_opaque() {
        let bmp = Bitmap::from_pixels(1, 1, BitmapFormat::Rgb32, vec![0x0012_3456]).unwrap();
        assert_eq!(bmp.pixel(0, 0), Some(0xFF12_3456));
        let argb = Bitmap::from_pixels(1, 1, BitmapFormat::Argb32, vec![0x0012_3456]).unwrap();
        assert_eq!(argb.pixel(0, 0), Some(0x0012_3456));
    }

    #[test]
    fn bytes_are_bgra() {
        let bmp = Bitmap::filled(2, 1, BitmapFormat::Rgb32, pack_argb(0, 1, 2, 3));
        assert_eq!(bmp.byte_len(), 8);
        assert_eq!(bmp.to_bytes(), vec![3, 2, 1, 255, 3, 2, 1, 255]);
        let back = Bitmap::from_bytes(2, 1, BitmapFormat::Rgb32, &bmp.to_bytes()).unwrap();
        assert_eq!(back, bmp);
    }

    #[test]
    fn length_is_checked() {
        assert!(Bitmap::from_pixels(2, 2, BitmapFormat::Rgb32, vec![0; 3]).is_err());
        assert!(Bitmap::from_bytes(1, 1, BitmapFormat::Rgb32, &[0; 3]).is_err());
    }

    #[test]
    fn format_names() {
        assert_eq!(BitmapFormat::Argb32.name(), "ARGB32");
        assert!(!BitmapFormat::Rgb32.has_alpha());
    }
}
