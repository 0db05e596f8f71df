//! Floatmap command
//!
//! Min-max normalizes a float grid (e.g. a DEM) into grey levels.

use crate::FloatmapArgs;
use anyhow::{Context, Result};
use tagtile_core::{ScalarField, gray_to_bitmap, normalize_scalar_field, scalar_field_to_bitmap};
use tracing::{debug, trace};

pub fn run(args: FloatmapArgs, verbose: u8) -> Result<()> {
    let field: ScalarField = super::load_grid(&args.input)?;
    trace!(nodata = ?args.nodata, strict = args.strict, "floatmap");

    let bitmap = if args.strict {
        let gray = normalize_scalar_field(&field, args.nodata)
            .with_context(|| format!("Cannot normalize {}", args.input.display()))?;
        gray_to_bitmap(&gray)
    } else {
        scalar_field_to_bitmap(&field, args.nodata)
    };
    debug!(width = bitmap.width(), height = bitmap.height(), "rendered scalar field");

    super::emit_bitmap(&bitmap, args.out.output.as_deref(), verbose)
}
