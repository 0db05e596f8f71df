//! Area command
//!
//! `area 10.7 2.2 300.9 150.1` formats four numbers as working-area text;
//! `area 10,2,300,150` parses the text form back.

use crate::AreaArgs;
use anyhow::{Context, Result, bail};
use tagtile_core::WorkingArea;

pub fn run(args: AreaArgs) -> Result<()> {
    match args.fields.as_slice() {
        [text] => {
            let area = super::parse_area(text)?;
            println!("top={} left={} width={} height={}", area.top, area.left, area.width, area.height);
            if let Some(rect) = area.to_rect() {
                println!("rect={rect}");
            }
        }
        [top, left, width, height] => {
            let num = |s: &String| -> Result<f64> {
                s.trim().parse().with_context(|| format!("'{s}' is not a number"))
            };
            let area = WorkingArea::new(num(top)?, num(left)?, num(width)?, num(height)?);
            println!("{area}");
        }
        other => bail!("Expected 1 or 4 values, got {}", other.len()),
    }
    Ok(())
}
