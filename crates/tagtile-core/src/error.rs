//! Error types for tagtile-core operations.
//!
//! Two enums cover every failure mode of the crate:
//!
//! - [`Error`] - buffer conversion and geometry failures
//! - [`ParseError`] - structured reasons a free-text field was rejected
//!
//! Total functions ([`crate::clamp_coords`], [`crate::is_valid_date`]) never
//! produce either of them.
//!
//! # Usage
//!
//! ```rust
//! use tagtile_core::{Error, PixelArray, channel_array_to_bitmap};
//!
//! let two_channels = PixelArray::new(1, 1, 2, vec![0, 0]).unwrap();
//! let err = channel_array_to_bitmap(&two_channels).unwrap_err();
//! assert!(matches!(err, Error::InvalidChannelCount { got: 2 }));
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - derive macro for `Display` / `std::error::Error`

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by pixel buffer conversions and geometry helpers.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Pixel array has a channel depth the conversion cannot handle.
    ///
    /// Bitmap conversion accepts exactly 3 or 4 channels.
    #[error("invalid channel count: {got} (expected 3 or 4)")]
    InvalidChannelCount {
        /// Channel count of the rejected array
        got: u8,
    },

    /// Bitmap encoding is not handled by an inverse conversion.
    #[error("unsupported pixel format: {format}")]
    UnsupportedPixelFormat {
        /// Name of the rejected encoding
        format: &'static str,
    },

    /// Scalar field values span no range (flat field).
    #[error("degenerate value range: min {min} == max {max}")]
    DegenerateRange {
        /// Minimum valid value
        min: f32,
        /// Maximum valid value
        max: f32,
    },

    /// Scalar field has no valid cells (empty, or every cell is no-data).
    #[error("scalar field has no valid cells")]
    NoValidData,

    /// Polyline vertex is non-finite or outside the rasterizable range.
    #[error("vertex {index} ({row}, {col}) is not a finite grid coordinate")]
    InvalidVertex {
        /// Vertex position in the polyline
        index: usize,
        /// Row coordinate as given
        row: f64,
        /// Column coordinate as given
        col: f64,
    },

    /// Region does not fit inside the image.
    #[error("region ({x}, {y}, {w}x{h}) exceeds image bounds {width}x{height}")]
    InvalidRegion {
        /// Region X origin
        x: i64,
        /// Region Y origin
        y: i64,
        /// Region width
        w: i64,
        /// Region height
        h: i64,
        /// Image width
        width: u32,
        /// Image height
        height: u32,
    },

    /// Two sequences that must be parallel have different lengths.
    #[error("length mismatch: {rows} row coordinates vs {cols} column coordinates")]
    LengthMismatch {
        /// Number of row coordinates
        rows: usize,
        /// Number of column coordinates
        cols: usize,
    },

    /// Buffer length does not match the declared dimensions.
    #[error("data length {got} does not match {width}x{height}x{channels} = {expected}")]
    DataLength {
        /// Image width
        width: u32,
        /// Image height
        height: u32,
        /// Channels per pixel
        channels: u8,
        /// Expected sample count
        expected: usize,
        /// Actual sample count
        got: usize,
    },

    /// Channel order label does not fit the array's channel count.
    #[error("channel mismatch: expected {expected}, got {got}")]
    ChannelMismatch {
        /// Channel count implied by the order
        expected: u8,
        /// Channel count of the array
        got: u8,
    },

    /// Free-text input could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl Error {
    /// Creates an [`Error::InvalidRegion`] error.
    #[inline]
    pub fn invalid_region(x: i64, y: i64, w: i64, h: i64, width: u32, height: u32) -> Self {
        Self::InvalidRegion {
            x,
            y,
            w,
            h,
            width,
            height,
        }
    }

    /// Returns `true` if this is a bounds-related error.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::InvalidRegion { .. })
    }
}

/// Reasons a free-text field was rejected.
///
/// Returned by the `FromStr` impls and field parsers instead of swallowing
/// the failure, so a UI can show the reason next to the field.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    /// Field is empty or whitespace only.
    #[error("value is empty")]
    Empty,

    /// Wrong number of comma separated fields.
    #[error("expected {expected} comma separated values, got {got}")]
    FieldCount {
        /// Required field count
        expected: usize,
        /// Supplied field count
        got: usize,
    },

    /// Field is not an integer.
    #[error("'{0}' is not an integer")]
    NotAnInteger(String),

    /// Field is not a number.
    #[error("'{0}' is not a number")]
    NotANumber(String),

    /// Number must be strictly positive.
    #[error("{0} must be greater than zero")]
    NotPositive(f64),

    /// Text is not a valid `YYYY-MM-DD` calendar date.
    #[error("'{0}' is not a valid YYYY-MM-DD date")]
    InvalidDate(String),

    /// Label is not one of the known options.
    #[error("unknown option '{0}'")]
    UnknownOption(String),
}
