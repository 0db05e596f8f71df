//! Crop command
//!
//! Cuts a working area out of a raw B,G,R,A bitmap.

use crate::CropArgs;
use anyhow::{Context, Result, bail};
use tagtile_core::{Bitmap, BitmapFormat, bitmap_to_channel_array, crop_bitmap};
use tracing::{debug, info};

fn parse_format(text: &str) -> Result<BitmapFormat> {
    match text.to_ascii_lowercase().as_str() {
        "rgb32" | "rgb" => Ok(BitmapFormat::Rgb32),
        "argb32" | "argb" => Ok(BitmapFormat::Argb32),
        other => bail!("Unknown pixel format '{other}', expected rgb32 or argb32"),
    }
}

pub fn run(args: CropArgs, verbose: u8) -> Result<()> {
    let (width, height) = super::parse_size(&args.size)?;
    let format = parse_format(&args.format)?;
    let area = super::parse_area(&args.area)?;

    let bytes = std::fs::read(&args.input)
        .with_context(|| format!("Failed to load: {}", args.input.display()))?;
    let bitmap = Bitmap::from_bytes(width, height, format, &bytes)
        .with_context(|| format!("Invalid bitmap: {}", args.input.display()))?;

    if verbose > 0 {
        println!("Cropping {area} from {width}x{height}");
    }

    let cropped = crop_bitmap(&bitmap, &area)?;
    info!(width = cropped.width(), height = cropped.height(), "cropped");

    if args.rgb {
        let array = bitmap_to_channel_array(&cropped).context("RGB output needs an RGB32 bitmap")?;
        debug!(channels = array.channels(), "converted to channel array");
        match args.out.output.as_deref() {
            Some(path) => super::save_bytes(path, array.data())?,
            None => {
                for y in 0..array.height() {
                    let row: Vec<String> = (0..array.width())
                        .filter_map(|x| array.pixel(x, y))
                        .map(|p| format!("{:02X}{:02X}{:02X}", p[0], p[1], p[2]))
                        .collect();
                    println!("{}", row.join(" "));
                }
            }
        }
        return Ok(());
    }

    super::emit_bitmap(&cropped, args.out.output.as_deref(), verbose)
}
