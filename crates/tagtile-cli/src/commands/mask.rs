//! Mask command

use crate::MaskArgs;
use anyhow::Result;
use tagtile_core::{GrayImage, Mask, Matrix, gray_to_bitmap, mask_to_bitmap};
use tracing::debug;

pub fn run(args: MaskArgs, verbose: u8) -> Result<()> {
    let grid: Matrix<u8> = super::load_grid(&args.input)?;

    let bitmap = if args.gray {
        let gray: GrayImage = grid;
        gray_to_bitmap(&gray)
    } else {
        let (w, h) = grid.dimensions();
        let cells = grid.into_data().into_iter().map(|v| v != 0).collect();
        let mask = Mask::new(w, h, cells)?;
        mask_to_bitmap(&mask)
    };
    debug!(gray = args.gray, width = bitmap.width(), height = bitmap.height(), "rendered mask");

    super::emit_bitmap(&bitmap, args.out.output.as_deref(), verbose)
}
