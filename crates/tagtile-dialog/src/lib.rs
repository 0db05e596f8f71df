//! # tagtile-dialog
//!
//! "Export New Dataset" settings dialog built on egui.
//!
//! Features:
//! - Dataset folder field with folder chooser
//! - Working area field (`top,left,width,height`, integer truncation)
//! - Split mode, target scale, oversampling and tile preview options
//! - Live preview of the working area, rendered on a worker thread
//! - Persistent settings
//!
//! Instead of callbacks, the dialog reports through a channel: every
//! outcome arrives as a [`DialogEvent`] on the `Sender` handed in at
//! construction.
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::mpsc::channel;
//! use tagtile_dialog::{run, DialogConfig, DialogEvent};
//!
//! let (tx, rx) = channel();
//! let exit_code = run(DialogConfig::default(), tx);
//! for event in rx.try_iter() {
//!     if let DialogEvent::Export(settings) = event {
//!         println!("{settings:?}");
//!     }
//! }
//! ```
//!
//! # Keyboard Shortcuts
//!
//! | Key | Action |
//! |-----|--------|
//! | `Esc` | Close without exporting |

#![warn(missing_docs)]
#![warn(clippy::all)]

mod app;
mod dialog;
mod handler;
mod messages;
mod state;
mod texture;

pub use app::{DialogConfig, ExportDialogApp, STORAGE_KEY};
pub use dialog::{DialogAction, ExportDialog};
pub use messages::DialogEvent;
pub use state::{DialogPersistence, DialogState};
pub use texture::{bitmap_to_color_image, bitmap_to_color32};

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

use tracing::{debug, warn};

/// Window title.
pub const TITLE: &str = "Export New Dataset - Settings";

/// Run the dialog in its own window until it is closed.
///
/// Blocks the calling thread. Events are delivered on `events` as they
/// happen; drain the receiver after this returns.
///
/// # Returns
/// Exit code: 0 for success, 1 for error
pub fn run(config: DialogConfig, events: Sender<DialogEvent>) -> i32 {
    let size = if config.preview.is_some() {
        [1100.0, 480.0]
    } else {
        [520.0, 240.0]
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITLE)
            .with_inner_size(size)
            .with_min_inner_size([480.0, 200.0]),
        persistence_path: persistence_path(),
        ..Default::default()
    };

    debug!("creating dialog window");
    let result = eframe::run_native(
        TITLE,
        native_options,
        Box::new(move |cc| Ok(Box::new(ExportDialogApp::new(cc, config, events)))),
    );

    match result {
        Ok(()) => {
            debug!("dialog exited normally");
            0
        }
        Err(e) => {
            warn!("dialog error: {e}");
            1
        }
    }
}

/// Get platform-specific persistence path.
pub fn persistence_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("tagtile").join("dialog"))
}

/// Load persisted dialog settings from disk, without opening a window.
pub fn load_persistence() -> Option<DialogPersistence> {
    load_persistence_from(&persistence_path()?.join("app.ron"))
}

/// Load persisted dialog settings from an eframe `app.ron` file.
///
/// eframe stores a map of storage keys to RON-encoded values; the dialog's
/// entry lives under [`STORAGE_KEY`].
pub fn load_persistence_from(path: &Path) -> Option<DialogPersistence> {
    let text = std::fs::read_to_string(path).ok()?;
    let entries: HashMap<String, String> = ron::from_str(&text).ok()?;
    ron::from_str(entries.get(STORAGE_KEY)?).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagtile_core::SplitMode;

    fn write_store(dir: &Path, entries: &HashMap<String, String>) -> PathBuf {
        let path = dir.join("app.ron");
        std::fs::write(&path, ron::to_string(entries).unwrap()).unwrap();
        path
    }

    #[test]
    fn persistence_path_is_namespaced() {
        if let Some(path) = persistence_path() {
            assert!(path.ends_with("tagtile/dialog"));
        }
    }

    #[test]
    fn load_from_eframe_store() {
        let dir = tempfile::tempdir().unwrap();
        let saved = DialogPersistence {
            dataset_folder: "/data/tiles".into(),
            split_mode: SplitMode::UniformHorizontal,
            target_scale: "0.75".into(),
            oversampling: true,
            show_tiles: true,
        };
        let mut entries = HashMap::new();
        entries.insert(STORAGE_KEY.to_string(), ron::to_string(&saved).unwrap());
        entries.insert("egui".to_string(), "()".to_string());
        let path = write_store(dir.path(), &entries);

        assert_eq!(load_persistence_from(&path), Some(saved));
    }

    #[test]
    fn load_missing_or_foreign_store() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_persistence_from(&dir.path().join("nope.ron")), None);

        let mut entries = HashMap::new();
        entries.insert("other_app".to_string(), "(x: 1)".to_string());
        let path = write_store(dir.path(), &entries);
        assert_eq!(load_persistence_from(&path), None);

        std::fs::write(&path, "not ron at all {").unwrap();
        assert_eq!(load_persistence_from(&path), None);
    }
}
