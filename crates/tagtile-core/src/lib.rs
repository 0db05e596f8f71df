//! # tagtile-core
//!
//! Pixel buffer conversions and export settings for the tagtile annotation
//! tools.
//!
//! This crate turns computed image data into something a GUI can paint:
//!
//! - [`PixelArray`] - interleaved 8-bit arrays with explicit [`ChannelOrder`]
//! - [`Bitmap`] - packed 32-bit interchange image ([`BitmapFormat`])
//! - [`Matrix`] - single-channel grids: [`Mask`], [`GrayImage`],
//!   [`LabelMatrix`], [`ScalarField`]
//! - [`WorkingArea`], [`Rect`] - regions of interest
//! - [`ExportSettings`], [`SplitMode`] - values produced by the export dialog
//!
//! ## Crate Structure
//!
//! ```text
//! tagtile-core (this crate, no GUI dependency)
//!    ^
//!    |
//!    +-- tagtile-dialog (egui settings dialog, bitmap -> texture adapter)
//!    +-- tagtile-cli (command line front end)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use tagtile_core::{LabelMatrix, labels_to_bitmap};
//!
//! let labels = LabelMatrix::new(2, 1, vec![0, 1]).unwrap();
//! let bmp = labels_to_bitmap(&labels);
//! assert_eq!(bmp.argb(1, 0), Some([255, 17, 163, 211]));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` - serialization for [`WorkingArea`], [`SplitMode`] and
//!   [`ExportSettings`]

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod area;
pub mod array;
pub mod bitmap;
pub mod convert;
pub mod date;
pub mod error;
pub mod export;
pub mod geometry;
pub mod matrix;
pub mod rect;

pub use area::WorkingArea;
pub use array::{ChannelOrder, PixelArray};
pub use bitmap::{Bitmap, BitmapFormat, OPAQUE, pack_argb, unpack_argb};
pub use convert::{
    bitmap_to_channel_array, channel_array_to_bitmap, crop_bitmap, gray_to_bitmap, label_color,
    labels_to_bitmap, mask_to_bitmap, normalize_scalar_field, scalar_field_to_bitmap,
    scale_bitmap_to_fit,
};
pub use date::{DATE_FORMAT, is_valid_date, parse_date};
pub use error::{Error, ParseError, Result};
pub use export::{
    DEFAULT_DATASET_FOLDER, DEFAULT_TARGET_SCALE, ExportSettings, SplitMode, parse_target_scale,
};
pub use geometry::{
    CURVE_LABEL, Cell, MAX_VERTEX_COORD, clamp_coords, rasterize_open_polyline, stamp_curve,
};
pub use matrix::{GrayImage, LabelMatrix, Mask, Matrix, ScalarField};
pub use rect::Rect;

/// Prelude module for convenient imports.
///
/// ```
/// use tagtile_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::area::WorkingArea;
    pub use crate::array::{ChannelOrder, PixelArray};
    pub use crate::bitmap::{Bitmap, BitmapFormat};
    pub use crate::convert::*;
    pub use crate::error::{Error, ParseError, Result};
    pub use crate::export::{ExportSettings, SplitMode};
    pub use crate::geometry::{Cell, clamp_coords, rasterize_open_polyline};
    pub use crate::matrix::{GrayImage, LabelMatrix, Mask, ScalarField};
}
