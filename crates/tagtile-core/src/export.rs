//! Dataset export settings produced by the "Export New Dataset" dialog.
//!
//! The export pipeline itself lives elsewhere; this module only defines the
//! values it consumes and the parsers for their free-text forms.

use std::path::PathBuf;
use std::str::FromStr;

use crate::area::WorkingArea;
use crate::error::ParseError;

/// Default dataset output folder.
pub const DEFAULT_DATASET_FOLDER: &str = "temp";

/// Default target scale text.
pub const DEFAULT_TARGET_SCALE: &str = "1.0";

/// Strategy for partitioning the working area into train/val/test tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SplitMode {
    /// Vertical stripes of equal width.
    #[default]
    UniformVertical,
    /// Horizontal stripes of equal height.
    UniformHorizontal,
    /// Random tile assignment.
    Random,
    /// Split balancing class statistics across subsets.
    BiologicallyInspired,
}

impl SplitMode {
    /// Display label for UI.
    pub const fn label(self) -> &'static str {
        match self {
            Self::UniformVertical => "Uniform (vertical)",
            Self::UniformHorizontal => "Uniform (horizontal)",
            Self::Random => "Random",
            Self::BiologicallyInspired => "Biologically-inspired",
        }
    }

    /// All modes, in combo box order.
    pub const fn all() -> &'static [Self] {
        &[
            Self::UniformVertical,
            Self::UniformHorizontal,
            Self::Random,
            Self::BiologicallyInspired,
        ]
    }
}

impl std::fmt::Display for SplitMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SplitMode {
    type Err = ParseError;

    /// Accepts the UI label or a short kebab-case name (`vertical`,
    /// `horizontal`, `random`, `bio`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(mode) = Self::all().iter().find(|m| m.label() == s) {
            return Ok(*mode);
        }
        match s.to_ascii_lowercase().as_str() {
            "vertical" | "uniform-vertical" => Ok(Self::UniformVertical),
            "horizontal" | "uniform-horizontal" => Ok(Self::UniformHorizontal),
            "random" => Ok(Self::Random),
            "bio" | "biologically-inspired" => Ok(Self::BiologicallyInspired),
            _ => Err(ParseError::UnknownOption(s.to_string())),
        }
    }
}

/// Parses the target scale field: a strictly positive, finite float.
///
/// ```rust
/// use tagtile_core::{parse_target_scale, ParseError};
///
/// assert_eq!(parse_target_scale(" 0.5 "), Ok(0.5));
/// assert_eq!(parse_target_scale("0"), Err(ParseError::NotPositive(0.0)));
/// assert!(parse_target_scale("abc").is_err());
/// ```
pub fn parse_target_scale(text: &str) -> Result<f64, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::Empty);
    }
    let value: f64 = text
        .parse()
        .map_err(|_| ParseError::NotANumber(text.to_string()))?;
    if !value.is_finite() {
        return Err(ParseError::NotANumber(text.to_string()));
    }
    if value <= 0.0 {
        return Err(ParseError::NotPositive(value));
    }
    Ok(value)
}

/// Validated settings handed to the export pipeline.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExportSettings {
    /// Output folder for the dataset.
    pub dataset_folder: PathBuf,
    /// Region of the map to export.
    pub working_area: WorkingArea,
    /// Tile partitioning strategy.
    pub split_mode: SplitMode,
    /// Rescaling factor applied before tiling.
    pub target_scale: f64,
    /// Oversample rare classes.
    pub oversampling: bool,
    /// Display the exported tiles once done.
    pub show_tiles: bool,
}
