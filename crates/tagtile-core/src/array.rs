//! Interleaved multi-channel 8-bit pixel arrays.
//!
//! A [`PixelArray`] is the generic `height x width x channels` buffer that
//! computed images arrive in. Channel positions carry no implicit meaning:
//! every array is tagged with a [`ChannelOrder`] and conversions look
//! channels up by role (red, green, blue, alpha), never by index.
//!
//! # Memory Layout
//!
//! ```text
//! Rgb:  [R G B R G B R G B ...]      <- row 0
//! Argb: [A R G B A R G B ...]        <- row 0
//! ```

use crate::error::{Error, Result};

/// Semantic order of the channels inside one pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelOrder {
    /// Red, green, blue.
    Rgb,
    /// Blue, green, red.
    Bgr,
    /// Red, green, blue, alpha.
    Rgba,
    /// Blue, green, red, alpha.
    Bgra,
    /// Alpha, red, green, blue.
    Argb,
    /// No color meaning (channel count other than 3 or 4).
    Unspecified,
}

impl ChannelOrder {
    /// Channel count implied by the order, `None` for [`Self::Unspecified`].
    pub const fn channels(self) -> Option<u8> {
        match self {
            Self::Rgb | Self::Bgr => Some(3),
            Self::Rgba | Self::Bgra | Self::Argb => Some(4),
            Self::Unspecified => None,
        }
    }

    /// Default order for a channel count.
    pub const fn for_channels(channels: u8) -> Self {
        match channels {
            3 => Self::Rgb,
            4 => Self::Rgba,
            _ => Self::Unspecified,
        }
    }

    /// Positions of `[red, green, blue]` within a pixel.
    pub const fn rgb_indices(self) -> Option<[usize; 3]> {
        match self {
            Self::Rgb | Self::Rgba => Some([0, 1, 2]),
            Self::Bgr | Self::Bgra => Some([2, 1, 0]),
            Self::Argb => Some([1, 2, 3]),
            Self::Unspecified => None,
        }
    }

    /// Position of the alpha channel, if any.
    pub const fn alpha_index(self) -> Option<usize> {
        match self {
            Self::Rgba | Self::Bgra => Some(3),
            Self::Argb => Some(0),
            Self::Rgb | Self::Bgr | Self::Unspecified => None,
        }
    }
}

/// Owned `height x width x channels` buffer of `u8` samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelArray {
    width: u32,
    height: u32,
    channels: u8,
    order: ChannelOrder,
    data: Vec<u8>,
}

impl PixelArray {
    /// Wraps interleaved row-major samples.
    ///
    /// 3- and 4-channel arrays default to [`ChannelOrder::Rgb`] and
    /// [`ChannelOrder::Rgba`]; use [`with_order`](Self::with_order) for
    /// anything else.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidChannelCount`] if `channels == 0`
    /// - [`Error::DataLength`] if `data.len() != width * height * channels`
    pub fn new(width: u32, height: u32, channels: u8, data: Vec<u8>) -> Result<Self> {
        if channels == 0 {
            return Err(Error::InvalidChannelCount { got: 0 });
        }
        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected {
            return Err(Error::DataLength {
                width,
                height,
                channels,
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            order: ChannelOrder::for_channels(channels),
            data,
        })
    }

    /// Wraps samples already known to match the dimensions and order.
    pub(crate) fn from_parts(width: u32, height: u32, order: ChannelOrder, data: Vec<u8>) -> Self {
        let channels = order.channels().unwrap_or(1);
        debug_assert_eq!(data.len(), width as usize * height as usize * channels as usize);
        Self {
            width,
            height,
            channels,
            order,
            data,
        }
    }

    /// Re-labels the channel semantics without touching the samples.
    ///
    /// Fails with [`Error::ChannelMismatch`] if the order implies a
    /// different channel count.
    pub fn with_order(mut self, order: ChannelOrder) -> Result<Self> {
        match order.channels() {
            Some(n) if n != self.channels => Err(Error::ChannelMismatch {
                expected: n,
                got: self.channels,
            }),
            None if matches!(self.channels, 3 | 4) => Err(Error::ChannelMismatch {
                expected: 0,
                got: self.channels,
            }),
            _ => {
                self.order = order;
                Ok(self)
            }
        }
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

    /// Samples per pixel.
    #[inline]
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Channel semantics.
    #[inline]
    pub fn order(&self) -> ChannelOrder {
        self.order
    }

    /// Number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Raw interleaved samples.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw samples.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the array, returning its samples.
    #[inline]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Samples of the pixel at (x, y), `None` outside the array.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let c = self.channels as usize;
        let start = (y as usize * self.width as usize + x as usize) * c;
        Some(&self.data[start..start + c])
    }
}
