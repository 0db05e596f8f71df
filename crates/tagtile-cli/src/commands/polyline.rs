//! Polyline command
//!
//! Prints the grid cells of an open polyline, or stamps them onto a label
//! grid and renders the result.

use crate::PolylineArgs;
use anyhow::{Context, Result};
use tagtile_core::{LabelMatrix, labels_to_bitmap, rasterize_open_polyline, stamp_curve};
use tracing::debug;

pub fn run(args: PolylineArgs, verbose: u8) -> Result<()> {
    let cells = rasterize_open_polyline(&args.rows, &args.cols).context("Invalid polyline")?;
    debug!(vertices = args.rows.len(), cells = cells.len(), "rasterized");

    let Some(mask_path) = args.mask.as_deref() else {
        for cell in &cells {
            println!("{} {}", cell.row, cell.col);
        }
        return Ok(());
    };

    let bbox = super::parse_area(args.bbox.as_deref().unwrap_or_default())?;
    let mask: LabelMatrix = super::load_grid(mask_path)?;
    let curve: Vec<(i64, i64)> = cells.iter().map(|c| (c.col, c.row)).collect();
    let stamped = stamp_curve(&mask, &bbox, &curve);

    super::emit_bitmap(&labels_to_bitmap(&stamped), args.out.output.as_deref(), verbose)
}
