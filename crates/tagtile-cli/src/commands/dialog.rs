//! Dialog command - export settings dialog.

use anyhow::{Result, bail};
use std::sync::mpsc::channel;
use tagtile_core::{ExportSettings, LabelMatrix, labels_to_bitmap};
use tagtile_dialog::{DialogConfig, DialogEvent, DialogPersistence};
use tracing::debug;

use crate::DialogArgs;

/// Run the dialog command.
pub fn run(args: DialogArgs, verbose: u8) -> Result<()> {
    if args.saved {
        return print_saved();
    }

    let working_area = args.area.as_deref().map(super::parse_area).transpose()?;
    let preview = match args.preview.as_deref() {
        Some(path) => {
            let labels: LabelMatrix = super::load_grid(path)?;
            Some(labels_to_bitmap(&labels))
        }
        None => None,
    };

    let config = DialogConfig {
        working_area,
        preview,
        verbose,
    };

    let (tx, rx) = channel();
    let exit_code = tagtile_dialog::run(config, tx);

    for event in rx.try_iter() {
        debug!(?event, "dialog event");
        if let DialogEvent::Export(settings) = event {
            print!("{}", format_settings(&settings));
        }
    }

    if exit_code != 0 {
        std::process::exit(exit_code);
    }

    Ok(())
}

fn print_saved() -> Result<()> {
    match tagtile_dialog::load_persistence() {
        Some(saved) => {
            print!("{}", format_saved(&saved));
            Ok(())
        }
        None => bail!("No saved dialog settings found"),
    }
}

/// `key: value` lines for exported settings.
fn format_settings(settings: &ExportSettings) -> String {
    format!(
        "dataset_folder: {}\nworking_area: {}\nsplit_mode: {}\ntarget_scale: {}\noversampling: {}\nshow_tiles: {}\n",
        settings.dataset_folder.display(),
        settings.working_area,
        settings.split_mode,
        settings.target_scale,
        settings.oversampling,
        settings.show_tiles,
    )
}

/// `key: value` lines for persisted settings. The working area is not saved.
fn format_saved(saved: &DialogPersistence) -> String {
    format!(
        "dataset_folder: {}\nsplit_mode: {}\ntarget_scale: {}\noversampling: {}\nshow_tiles: {}\n",
        saved.dataset_folder, saved.split_mode, saved.target_scale, saved.oversampling, saved.show_tiles,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagtile_core::{SplitMode, WorkingArea};

    #[test]
    fn saved_settings_lines() {
        let saved = DialogPersistence {
            dataset_folder: "/data/tiles".into(),
            split_mode: SplitMode::UniformHorizontal,
            target_scale: "0.75".into(),
            oversampling: true,
            show_tiles: false,
        };
        let text = format_saved(&saved);
        assert!(text.starts_with("dataset_folder: /data/tiles\n"));
        assert!(text.contains(&format!("split_mode: {}\n", SplitMode::UniformHorizontal)));
        assert!(text.contains("target_scale: 0.75\n"));
        assert!(text.contains("oversampling: true\n"));
        assert!(text.ends_with("show_tiles: false\n"));
        assert!(!text.contains("working_area"));
    }

    #[test]
    fn export_settings_lines() {
        let settings = ExportSettings {
            dataset_folder: "temp".into(),
            working_area: WorkingArea::new(10.7, 2.2, 300.9, 150.1),
            split_mode: SplitMode::default(),
            target_scale: 1.0,
            oversampling: false,
            show_tiles: true,
        };
        let text = format_settings(&settings);
        assert!(text.contains("working_area: 10,2,300,150\n"));
        assert!(text.contains("target_scale: 1\n"));
        assert_eq!(text.lines().count(), 6);
    }
}
