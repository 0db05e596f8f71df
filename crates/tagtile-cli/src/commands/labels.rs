//! Labels command
//!
//! Renders a label id grid with the fixed label colour table.

use crate::LabelsArgs;
use anyhow::Result;
use tagtile_core::{LabelMatrix, labels_to_bitmap};
use tracing::{debug, info};

pub fn run(args: LabelsArgs, verbose: u8) -> Result<()> {
    let labels: LabelMatrix = super::load_grid(&args.input)?;

    let distinct = {
        let mut ids: Vec<i32> = labels.data().to_vec();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    };
    debug!(distinct, "label ids");

    let bitmap = labels_to_bitmap(&labels);
    info!(width = bitmap.width(), height = bitmap.height(), "rendered labels");

    super::emit_bitmap(&bitmap, args.out.output.as_deref(), verbose)
}
