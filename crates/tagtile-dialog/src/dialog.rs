//! The "Export New Dataset" settings form.
//!
//! [`ExportDialog`] owns the field values and reports what happened through
//! an injected [`Sender<DialogEvent>`]. It can be drawn inside any egui
//! [`egui::Ui`] or driven headless through its setters and `on_*` methods.

use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

use egui::Color32;
use tagtile_core::{ExportSettings, ParseError, SplitMode, WorkingArea, parse_target_scale};
use tracing::{debug, info};

use crate::messages::DialogEvent;
use crate::state::{DialogPersistence, DialogState};

/// Width of the label column.
const TEXT_SPACE: f32 = 150.0;
/// Minimum width of the edit column.
const LINE_WIDTH: f32 = 300.0;

const FIELD_BG: Color32 = Color32::from_rgb(55, 55, 55);
const ERROR_FG: Color32 = Color32::from_rgb(230, 90, 90);

/// Something the caller may need to react to after a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DialogAction {
    /// The working area text now parses to a new value.
    AreaChanged(WorkingArea),
    /// Export succeeded.
    Exported,
    /// The dialog was cancelled.
    Closed,
}

/// Dataset export settings dialog.
pub struct ExportDialog {
    state: DialogState,
    events: Sender<DialogEvent>,
    closed: bool,
}

impl ExportDialog {
    /// Creates a dialog with default field values.
    pub fn new(working_area: WorkingArea, events: Sender<DialogEvent>) -> Self {
        Self::with_persistence(working_area, &DialogPersistence::default(), events)
    }

    /// Creates a dialog with field values restored from a previous session.
    pub fn with_persistence(
        working_area: WorkingArea,
        persistence: &DialogPersistence,
        events: Sender<DialogEvent>,
    ) -> Self {
        Self {
            state: DialogState::from_persistence(persistence, working_area),
            events,
            closed: false,
        }
    }

    fn emit(&self, event: DialogEvent) {
        let _ = self.events.send(event);
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    /// Dataset output folder, as typed.
    pub fn dataset_folder(&self) -> &str {
        &self.state.dataset_folder
    }

    /// Selected split mode.
    pub const fn split_mode(&self) -> SplitMode {
        self.state.split_mode
    }

    /// Target scale parsed from its text field.
    pub fn target_scale(&self) -> Result<f64, ParseError> {
        parse_target_scale(&self.state.target_scale_text)
    }

    /// Target scale text, as typed.
    pub fn target_scale_text(&self) -> &str {
        &self.state.target_scale_text
    }

    /// Last working area that parsed.
    pub const fn working_area(&self) -> WorkingArea {
        self.state.working_area
    }

    /// Working area text, as typed.
    pub fn working_area_text(&self) -> &str {
        &self.state.working_area_text
    }

    /// Oversampling checkbox.
    pub const fn oversampling(&self) -> bool {
        self.state.oversampling
    }

    /// "Show exported tiles" checkbox.
    pub const fn show_exported_tiles(&self) -> bool {
        self.state.show_tiles
    }

    /// Whether [`Self::on_close`] has run.
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Last export error, if any.
    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    /// Settings worth restoring next session.
    pub fn to_persistence(&self) -> DialogPersistence {
        self.state.to_persistence()
    }

    // ---------------------------------------------------------------------
    // Setters
    // ---------------------------------------------------------------------

    /// Replaces the dataset folder text.
    pub fn set_dataset_folder(&mut self, folder: impl Into<String>) {
        self.state.dataset_folder = folder.into();
    }

    /// Selects a split mode.
    pub const fn set_split_mode(&mut self, mode: SplitMode) {
        self.state.split_mode = mode;
    }

    /// Replaces the target scale text. Validation happens on read.
    pub fn set_target_scale_text(&mut self, text: impl Into<String>) {
        self.state.target_scale_text = text.into();
    }

    /// Replaces the working area and rewrites its text.
    pub fn set_working_area(&mut self, area: WorkingArea) {
        self.state.working_area = area;
        self.state.working_area_text = area.to_string();
        self.state.working_area_error = None;
    }

    /// Replaces the working area text.
    ///
    /// On success the parsed area becomes current; on failure the previous
    /// area is kept and the error is remembered for display.
    pub fn set_working_area_text(
        &mut self,
        text: impl Into<String>,
    ) -> Result<WorkingArea, ParseError> {
        self.state.working_area_text = text.into();
        self.reparse_working_area()
    }

    fn reparse_working_area(&mut self) -> Result<WorkingArea, ParseError> {
        match self.state.working_area_text.parse::<WorkingArea>() {
            Ok(area) => {
                self.state.working_area = area;
                self.state.working_area_error = None;
                Ok(area)
            }
            Err(e) => {
                self.state.working_area_error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Sets the oversampling checkbox.
    pub const fn set_oversampling(&mut self, on: bool) {
        self.state.oversampling = on;
    }

    /// Sets the "show exported tiles" checkbox.
    pub const fn set_show_exported_tiles(&mut self, on: bool) {
        self.state.show_tiles = on;
    }

    // ---------------------------------------------------------------------
    // Actions
    // ---------------------------------------------------------------------

    /// Opens the folder chooser. A picked folder replaces the dataset folder
    /// and emits [`DialogEvent::FolderChosen`]; cancelling changes nothing.
    pub fn on_choose_folder(&mut self) -> Option<PathBuf> {
        let folder = rfd::FileDialog::new()
            .set_title("Choose a Folder to Export the Dataset")
            .pick_folder()?;
        self.folder_chosen(&folder);
        Some(folder)
    }

    fn folder_chosen(&mut self, folder: &Path) {
        debug!(folder = %folder.display(), "dataset folder chosen");
        self.state.dataset_folder = folder.display().to_string();
        self.emit(DialogEvent::FolderChosen(folder.to_path_buf()));
    }

    /// Closes the dialog, emitting [`DialogEvent::Closed`] the first time.
    pub fn on_close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        debug!("export dialog closed");
        self.emit(DialogEvent::Closed);
    }

    /// Validates every field and emits the result.
    ///
    /// Valid settings go out as [`DialogEvent::Export`]; otherwise the
    /// first invalid field is reported as [`DialogEvent::Error`] and kept for
    /// display.
    pub fn on_export(&mut self) -> Result<ExportSettings, ParseError> {
        match self.settings() {
            Ok(settings) => {
                info!(
                    folder = %settings.dataset_folder.display(),
                    area = %settings.working_area,
                    mode = %settings.split_mode,
                    scale = settings.target_scale,
                    "export confirmed"
                );
                self.state.error = None;
                self.emit(DialogEvent::Export(settings.clone()));
                Ok(settings)
            }
            Err(e) => {
                let message = e.to_string();
                debug!(%message, "export refused");
                self.state.error = Some(message.clone());
                self.emit(DialogEvent::Error(message));
                Err(e)
            }
        }
    }

    /// Collects the current fields into validated settings.
    pub fn settings(&self) -> Result<ExportSettings, ParseError> {
        let folder = self.state.dataset_folder.trim();
        if folder.is_empty() {
            return Err(ParseError::Empty);
        }
        let working_area = self.state.working_area_text.parse::<WorkingArea>()?;
        Ok(ExportSettings {
            dataset_folder: PathBuf::from(folder),
            working_area,
            split_mode: self.state.split_mode,
            target_scale: self.target_scale()?,
            oversampling: self.state.oversampling,
            show_tiles: self.state.show_tiles,
        })
    }

    // ---------------------------------------------------------------------
    // Drawing
    // ---------------------------------------------------------------------

    /// Draws the form. Returns the action triggered this frame, if any.
    pub fn ui(&mut self, ui: &mut egui::Ui) -> Option<DialogAction> {
        let mut action = None;
        let mut choose_folder = false;

        egui::Grid::new("export_settings")
            .num_columns(3)
            .min_col_width(TEXT_SPACE)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label("Dataset folder:");
                });
                ui.add(
                    egui::TextEdit::singleline(&mut self.state.dataset_folder)
                        .background_color(FIELD_BG)
                        .min_size(egui::vec2(LINE_WIDTH, 0.0)),
                );
                if ui.button("...").clicked() {
                    choose_folder = true;
                }
                ui.end_row();

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label("Working Area:");
                });
                let area_edit = ui
                    .add(
                        egui::TextEdit::singleline(&mut self.state.working_area_text)
                            .background_color(FIELD_BG)
                            .min_size(egui::vec2(LINE_WIDTH, 0.0)),
                    )
                    .on_hover_text("top,left,width,height");
                if area_edit.changed()
                    && let Ok(area) = self.reparse_working_area()
                {
                    action = Some(DialogAction::AreaChanged(area));
                }
                ui.end_row();

                if let Some(err) = &self.state.working_area_error {
                    ui.label("");
                    ui.colored_label(ERROR_FG, err.to_string());
                    ui.end_row();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label("Dataset split:");
                });
                egui::ComboBox::from_id_salt("split_mode")
                    .width(LINE_WIDTH)
                    .selected_text(self.state.split_mode.label())
                    .show_ui(ui, |ui| {
                        for &mode in SplitMode::all() {
                            ui.selectable_value(&mut self.state.split_mode, mode, mode.label());
                        }
                    });
                ui.end_row();

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label("Target scale:");
                });
                ui.add(
                    egui::TextEdit::singleline(&mut self.state.target_scale_text)
                        .background_color(FIELD_BG)
                        .min_size(egui::vec2(LINE_WIDTH, 0.0)),
                );
                ui.end_row();

                if let Err(err) = self.target_scale() {
                    ui.label("");
                    ui.colored_label(ERROR_FG, err.to_string());
                    ui.end_row();
                }
            });

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            ui.checkbox(&mut self.state.oversampling, "Oversampling");
            ui.checkbox(&mut self.state.show_tiles, "Show exported tiles");
        });

        ui.add_space(8.0);
        if let Some(err) = &self.state.error {
            ui.colored_label(ERROR_FG, err);
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Export").clicked() && self.on_export().is_ok() {
                action = Some(DialogAction::Exported);
            }
            if ui.button("Cancel").clicked() {
                self.on_close();
                action = Some(DialogAction::Closed);
            }
        });

        if choose_folder {
            self.on_choose_folder();
        }

        action
    }
}
