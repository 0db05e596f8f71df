//! Message types for UI <-> worker communication, and the dialog's
//! outgoing completion events.
//!
//! UI sends preview commands, worker answers with preview events. Callers
//! of the dialog only ever see [`DialogEvent`].

use std::path::PathBuf;

use egui::Color32;
use tagtile_core::{Bitmap, ExportSettings, WorkingArea};

/// Generation counter for invalidating stale previews.
pub type Generation = u64;

/// Events emitted by the dialog to whoever owns it.
#[derive(Debug, Clone, PartialEq)]
pub enum DialogEvent {
    /// A folder was picked with the folder chooser.
    FolderChosen(PathBuf),

    /// Export was confirmed with valid settings.
    Export(ExportSettings),

    /// Export was refused; the message says which field is invalid.
    Error(String),

    /// The dialog was closed. Emitted at most once.
    Closed,
}

/// Messages from UI thread to preview worker.
#[derive(Debug, Clone)]
pub enum PreviewMsg {
    /// Replace the source image.
    SetImage(Bitmap),

    /// Set the region to preview.
    SetArea(WorkingArea),

    /// Set the preview size in screen pixels.
    SetViewport([u32; 2]),

    /// Sync generation counter.
    SyncGeneration(Generation),

    /// Stop the worker.
    Close,
}

/// Events from preview worker to UI thread.
#[derive(Debug)]
pub enum PreviewEvent {
    /// Preview texture ready.
    PreviewReady {
        generation: Generation,
        width: u32,
        height: u32,
        pixels: Vec<Color32>,
    },

    /// Preview could not be produced.
    Error {
        generation: Generation,
        message: String,
    },
}
