//! Preview worker.
//!
//! Crops the source image to the working area and scales it to the preview
//! size off the UI thread, so typing in the working-area field stays
//! responsive on large maps.

use std::sync::mpsc::{Receiver, Sender};

use tagtile_core::{Bitmap, Rect, WorkingArea, crop_bitmap, scale_bitmap_to_fit};
use tracing::{debug, trace};

use crate::messages::{Generation, PreviewEvent, PreviewMsg};
use crate::state::DEFAULT_VIEWPORT;
use crate::texture::bitmap_to_color32;

/// Worker thread handler.
pub struct PreviewHandler {
    rx: Receiver<PreviewMsg>,
    tx: Sender<PreviewEvent>,

    generation: Generation,
    image: Option<Bitmap>,
    area: Option<WorkingArea>,
    viewport: [u32; 2],
}

impl PreviewHandler {
    /// Creates a new handler.
    pub const fn new(rx: Receiver<PreviewMsg>, tx: Sender<PreviewEvent>) -> Self {
        Self {
            rx,
            tx,
            generation: 0,
            image: None,
            area: None,
            viewport: DEFAULT_VIEWPORT,
        }
    }

    /// Main event loop. Returns when [`PreviewMsg::Close`] arrives or the UI
    /// side hangs up.
    pub fn run(mut self) {
        while let Ok(msg) = self.rx.recv() {
            match msg {
                PreviewMsg::Close => break,
                PreviewMsg::SyncGeneration(g) => self.generation = g,
                PreviewMsg::SetImage(image) => {
                    debug!(width = image.width(), height = image.height(), "preview image set");
                    self.image = Some(image);
                    self.regenerate();
                }
                PreviewMsg::SetArea(area) => {
                    self.area = Some(area);
                    self.regenerate();
                }
                PreviewMsg::SetViewport(size) => {
                    if size != self.viewport {
                        self.viewport = size;
                        self.regenerate();
                    }
                }
            }
        }
        debug!("preview handler shutdown");
    }

    fn send(&self, event: PreviewEvent) {
        let _ = self.tx.send(event);
    }

    fn error(&self, message: String) {
        self.send(PreviewEvent::Error {
            generation: self.generation,
            message,
        });
    }

    /// Rebuilds the preview from the current image, area and viewport.
    fn regenerate(&self) {
        let Some(image) = &self.image else {
            return;
        };

        let cropped;
        let source = match &self.area {
            None => image,
            Some(area) => {
                let Some(region) = visible_region(image, area) else {
                    self.error(format!(
                        "working area {area} does not overlap the {}x{} image",
                        image.width(),
                        image.height()
                    ));
                    return;
                };
                cropped = match crop_bitmap(image, &WorkingArea::from(region)) {
                    Ok(b) => b,
                    Err(e) => {
                        self.error(e.to_string());
                        return;
                    }
                };
                &cropped
            }
        };

        // Only shrink; the canvas handles magnification.
        let [vw, vh] = self.viewport;
        let preview = if source.width() <= vw && source.height() <= vh {
            source.clone()
        } else {
            scale_bitmap_to_fit(source, vw, vh)
        };
        trace!(
            generation = self.generation,
            width = preview.width(),
            height = preview.height(),
            "preview ready"
        );
        self.send(PreviewEvent::PreviewReady {
            generation: self.generation,
            width: preview.width(),
            height: preview.height(),
            pixels: bitmap_to_color32(&preview),
        });
    }
}

/// Part of `area` that lies inside `image`, or `None` if they do not overlap.
fn visible_region(image: &Bitmap, area: &WorkingArea) -> Option<Rect> {
    let (width, height) = image.dimensions();
    let rect = area.to_rect()?;
    Rect::from_size(width, height).intersect(&rect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::channel;
    use std::thread;
    use std::time::Duration;

    use egui::Color32;
    use tagtile_core::{BitmapFormat, pack_argb};

    const WAIT: Duration = Duration::from_secs(5);

    fn spawn() -> (Sender<PreviewMsg>, Receiver<PreviewEvent>, thread::JoinHandle<()>) {
        let (tx_msg, rx_msg) = channel();
        let (tx_evt, rx_evt) = channel();
        let worker = thread::spawn(move || PreviewHandler::new(rx_msg, tx_evt).run());
        (tx_msg, rx_evt, worker)
    }

    /// 4x2 image, left half red, right half blue.
    fn halves() -> Bitmap {
        let red = pack_argb(255, 255, 0, 0);
        let blue = pack_argb(255, 0, 0, 255);
        Bitmap::from_pixels(4, 2, BitmapFormat::Rgb32, vec![
            red, red, blue, blue, red, red, blue, blue,
        ])
        .unwrap()
    }

    #[test]
    fn nothing_to_preview_without_image() {
        let (tx, rx, worker) = spawn();
        tx.send(PreviewMsg::SetArea(WorkingArea::new(0.0, 0.0, 1.0, 1.0))).unwrap();
        tx.send(PreviewMsg::Close).unwrap();
        worker.join().unwrap();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn crops_to_working_area() {
        let (tx, rx, worker) = spawn();
        tx.send(PreviewMsg::SetViewport([4, 2])).unwrap();
        tx.send(PreviewMsg::SetImage(halves())).unwrap();
        tx.send(PreviewMsg::SyncGeneration(3)).unwrap();
        tx.send(PreviewMsg::SetArea(WorkingArea::new(0.0, 2.0, 2.0, 2.0))).unwrap();
        tx.send(PreviewMsg::Close).unwrap();
        worker.join().unwrap();

        // First the full image, then the cropped right half.
        let full = rx.recv_timeout(WAIT).unwrap();
        assert!(matches!(full, PreviewEvent::PreviewReady { generation: 0, width: 4, height: 2, .. }));

        match rx.recv_timeout(WAIT).unwrap() {
            PreviewEvent::PreviewReady {
                generation,
                width,
                height,
                pixels,
            } => {
                assert_eq!(generation, 3);
                assert_eq!((width, height), (2, 2));
                assert!(pixels.iter().all(|&c| c == Color32::from_rgb(0, 0, 255)));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn area_is_clipped_to_image() {
        let (tx, rx, worker) = spawn();
        tx.send(PreviewMsg::SetArea(WorkingArea::new(1.0, 3.0, 100.0, 100.0))).unwrap();
        tx.send(PreviewMsg::SetImage(halves())).unwrap();
        tx.send(PreviewMsg::Close).unwrap();
        worker.join().unwrap();

        match rx.recv_timeout(WAIT).unwrap() {
            PreviewEvent::PreviewReady { width, height, .. } => assert_eq!((width, height), (1, 1)),
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn disjoint_area_reports_error() {
        let (tx, rx, worker) = spawn();
        tx.send(PreviewMsg::SetArea(WorkingArea::new(50.0, 50.0, 10.0, 10.0))).unwrap();
        tx.send(PreviewMsg::SetImage(halves())).unwrap();
        tx.send(PreviewMsg::Close).unwrap();
        worker.join().unwrap();

        assert!(matches!(
            rx.recv_timeout(WAIT).unwrap(),
            PreviewEvent::Error { generation: 0, .. }
        ));
    }

    #[test]
    fn preview_fits_viewport() {
        let (tx, rx, worker) = spawn();
        tx.send(PreviewMsg::SetViewport([2, 2])).unwrap();
        tx.send(PreviewMsg::SetImage(halves())).unwrap();
        tx.send(PreviewMsg::Close).unwrap();
        worker.join().unwrap();

        match rx.recv_timeout(WAIT).unwrap() {
            PreviewEvent::PreviewReady { width, height, pixels, .. } => {
                assert_eq!((width, height), (2, 1));
                assert_eq!(pixels[0], Color32::from_rgb(255, 0, 0));
                assert_eq!(pixels[1], Color32::from_rgb(0, 0, 255));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
