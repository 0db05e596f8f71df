//! Standalone dialog window with eframe/egui integration.
//!
//! Hosts an [`ExportDialog`] next to a live preview of the working area.

use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread::{self, JoinHandle};

use egui::{Color32, ColorImage, TextureHandle, TextureOptions};
use tagtile_core::{Bitmap, WorkingArea};
use tracing::debug;

use crate::dialog::{DialogAction, ExportDialog};
use crate::handler::PreviewHandler;
use crate::messages::{DialogEvent, Generation, PreviewEvent, PreviewMsg};
use crate::state::DialogPersistence;

/// eframe storage key for [`DialogPersistence`].
pub const STORAGE_KEY: &str = "tagtile_export_dialog";

/// Window background, matching the dark annotation tool theme.
const WINDOW_BG: Color32 = Color32::from_rgb(40, 40, 40);

/// Configuration for launching the dialog.
#[derive(Debug, Clone, Default)]
pub struct DialogConfig {
    /// Initial working area. Defaults to the whole preview image, or an
    /// empty area when there is none.
    pub working_area: Option<WorkingArea>,
    /// Image shown behind the working area.
    pub preview: Option<Bitmap>,
    /// Verbosity level.
    pub verbose: u8,
}

impl DialogConfig {
    /// Working area to start with.
    pub fn initial_area(&self) -> WorkingArea {
        self.working_area.unwrap_or_else(|| {
            self.preview
                .as_ref()
                .map(|b| WorkingArea::full(b.width(), b.height()))
                .unwrap_or_default()
        })
    }
}

/// Dialog application: settings form plus preview worker.
pub struct ExportDialogApp {
    /// Sender for commands to worker thread.
    tx: Sender<PreviewMsg>,
    /// Receiver for results from worker thread.
    rx: Receiver<PreviewEvent>,
    /// Worker thread handle (Option for Drop).
    worker: Option<JoinHandle<()>>,

    dialog: ExportDialog,

    /// Current preview texture.
    texture: Option<TextureHandle>,
    /// Preview error to display.
    preview_error: Option<String>,
    has_preview: bool,

    /// Generation counter for stale result rejection.
    generation: Generation,
    viewport: [u32; 2],
}

impl ExportDialogApp {
    /// Creates the application; dialog events go to `events`.
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: DialogConfig,
        events: Sender<DialogEvent>,
    ) -> Self {
        let (tx_to_worker, rx_in_worker) = channel();
        let (tx_to_ui, rx_from_worker) = channel();

        let worker = thread::spawn(move || {
            PreviewHandler::new(rx_in_worker, tx_to_ui).run();
        });

        let persistence: DialogPersistence = cc
            .storage
            .and_then(|s| eframe::get_value(s, STORAGE_KEY))
            .unwrap_or_default();

        let area = config.initial_area();
        if config.verbose > 0 {
            debug!(%area, "initial working area");
        }

        let mut app = Self {
            tx: tx_to_worker,
            rx: rx_from_worker,
            worker: Some(worker),
            dialog: ExportDialog::with_persistence(area, &persistence, events),
            texture: None,
            preview_error: None,
            has_preview: config.preview.is_some(),
            generation: 0,
            viewport: [0, 0],
        };

        if let Some(image) = config.preview {
            app.send_regen(PreviewMsg::SetImage(image));
            app.send_regen(PreviewMsg::SetArea(area));
        }

        app
    }

    fn send(&self, msg: PreviewMsg) {
        let _ = self.tx.send(msg);
    }

    fn send_regen(&mut self, msg: PreviewMsg) {
        self.generation += 1;
        self.send(PreviewMsg::SyncGeneration(self.generation));
        self.send(msg);
    }

    /// Process all pending events from worker. Returns true if any events
    /// were processed.
    fn process_events(&mut self, ctx: &egui::Context) -> bool {
        let mut had_events = false;
        while let Ok(event) = self.rx.try_recv() {
            had_events = true;
            match event {
                PreviewEvent::PreviewReady {
                    generation,
                    width,
                    height,
                    pixels,
                } => {
                    if generation < self.generation {
                        continue;
                    }
                    let image = ColorImage {
                        size: [width as usize, height as usize],
                        pixels,
                    };
                    self.texture =
                        Some(ctx.load_texture("working_area_preview", image, TextureOptions::LINEAR));
                    self.preview_error = None;
                }
                PreviewEvent::Error {
                    generation,
                    message,
                } => {
                    if generation < self.generation {
                        continue;
                    }
                    self.texture = None;
                    self.preview_error = Some(message);
                }
            }
        }
        had_events
    }

    fn draw_preview(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let size = [available.x.max(1.0) as u32, available.y.max(1.0) as u32];
            if size != self.viewport {
                self.viewport = size;
                self.send_regen(PreviewMsg::SetViewport(size));
            }

            if let Some(err) = &self.preview_error {
                ui.centered_and_justified(|ui| {
                    ui.colored_label(Color32::RED, err);
                });
                return;
            }

            if let Some(texture) = &self.texture {
                let tex_size = texture.size_vec2();
                let scale = (available.x / tex_size.x).min(available.y / tex_size.y);
                let (rect, _) = ui.allocate_exact_size(available, egui::Sense::hover());
                let image_rect = egui::Rect::from_center_size(rect.center(), tex_size * scale);
                ui.painter_at(rect).image(
                    texture.id(),
                    image_rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    Color32::WHITE,
                );
            } else {
                ui.centered_and_justified(|ui| {
                    ui.label(if self.has_preview {
                        "Rendering preview..."
                    } else {
                        "No preview image"
                    });
                });
            }
        });
    }
}

impl eframe::App for ExportDialogApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let had_events = self.process_events(ctx);

        if ctx.input(|i| i.viewport().close_requested() || i.key_pressed(egui::Key::Escape)) {
            self.dialog.on_close();
        }

        let frame = egui::Frame::central_panel(&ctx.style()).fill(WINDOW_BG);
        let action = if self.has_preview {
            let action = egui::SidePanel::left("settings")
                .resizable(false)
                .frame(frame)
                .show(ctx, |ui| self.dialog.ui(ui))
                .inner;
            self.draw_preview(ctx);
            action
        } else {
            egui::CentralPanel::default()
                .frame(frame)
                .show(ctx, |ui| self.dialog.ui(ui))
                .inner
        };

        match action {
            Some(DialogAction::AreaChanged(area)) => self.send_regen(PreviewMsg::SetArea(area)),
            Some(DialogAction::Exported) => self.dialog.on_close(),
            Some(DialogAction::Closed) | None => {}
        }

        if self.dialog.is_closed() {
            self.send(PreviewMsg::Close);
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        if had_events {
            ctx.request_repaint();
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, STORAGE_KEY, &self.dialog.to_persistence());
    }
}

impl Drop for ExportDialogApp {
    fn drop(&mut self) {
        let _ = self.tx.send(PreviewMsg::Close);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
