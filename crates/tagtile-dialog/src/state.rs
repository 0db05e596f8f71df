//! Dialog state and persistence.
//!
//! Stores the settings that persist between sessions via eframe storage.
//! The working area is never persisted: it always comes from the caller.

use serde::{Deserialize, Serialize};
use tagtile_core::{
    DEFAULT_DATASET_FOLDER, DEFAULT_TARGET_SCALE, ParseError, SplitMode, WorkingArea,
};

/// Default preview size.
pub const DEFAULT_VIEWPORT: [u32; 2] = [480, 360];

/// Persistent dialog settings (saved between sessions).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogPersistence {
    /// Last dataset folder text.
    pub dataset_folder: String,
    /// Last split mode.
    pub split_mode: SplitMode,
    /// Last target scale text, kept verbatim.
    pub target_scale: String,
    /// Last oversampling flag.
    pub oversampling: bool,
    /// Last "show exported tiles" flag.
    pub show_tiles: bool,
}

impl Default for DialogPersistence {
    fn default() -> Self {
        Self {
            dataset_folder: DEFAULT_DATASET_FOLDER.into(),
            split_mode: SplitMode::default(),
            target_scale: DEFAULT_TARGET_SCALE.into(),
            oversampling: false,
            show_tiles: false,
        }
    }
}

/// Runtime dialog state: the raw text of every field plus the last valid
/// working area.
#[derive(Debug, Clone)]
pub struct DialogState {
    /// Dataset folder text.
    pub dataset_folder: String,
    /// Working area text as edited.
    pub working_area_text: String,
    /// Last working area that parsed.
    pub working_area: WorkingArea,
    /// Parse error of `working_area_text`, if any.
    pub working_area_error: Option<ParseError>,
    /// Selected split mode.
    pub split_mode: SplitMode,
    /// Target scale text as edited.
    pub target_scale_text: String,
    /// Oversampling checkbox.
    pub oversampling: bool,
    /// "Show exported tiles" checkbox.
    pub show_tiles: bool,
    /// Last export error shown under the buttons.
    pub error: Option<String>,
}

impl DialogState {
    /// Creates state for `working_area` with persisted field values.
    pub fn from_persistence(persistence: &DialogPersistence, working_area: WorkingArea) -> Self {
        Self {
            dataset_folder: persistence.dataset_folder.clone(),
            working_area_text: working_area.to_string(),
            working_area,
            working_area_error: None,
            split_mode: persistence.split_mode,
            target_scale_text: persistence.target_scale.clone(),
            oversampling: persistence.oversampling,
            show_tiles: persistence.show_tiles,
            error: None,
        }
    }

    /// Converts to persistence for saving.
    pub fn to_persistence(&self) -> DialogPersistence {
        DialogPersistence {
            dataset_folder: self.dataset_folder.clone(),
            split_mode: self.split_mode,
            target_scale: self.target_scale_text.clone(),
            oversampling: self.oversampling,
            show_tiles: self.show_tiles,
        }
    }
}
