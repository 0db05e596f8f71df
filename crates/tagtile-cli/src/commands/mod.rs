//! CLI command implementations

pub mod area;
pub mod clamp;
pub mod crop;
pub mod date;
pub mod dialog;
pub mod floatmap;
pub mod labels;
pub mod mask;
pub mod polyline;

use anyhow::{Context, Result, bail};
use std::fmt::Display;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tagtile_core::{Bitmap, Matrix, WorkingArea};
use tracing::debug;

/// Read a whole text file, or stdin for `-`.
pub fn read_text(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Parse a text grid: one row per line, cells split on whitespace or commas.
///
/// Blank lines and lines starting with `#` are skipped. Every row must have
/// the same number of cells.
pub fn parse_grid<T>(text: &str) -> Result<Matrix<T>>
where
    T: FromStr,
    T::Err: Display,
{
    let mut width = None;
    let mut height = 0u32;
    let mut data = Vec::new();

    for (lineno, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut count = 0usize;
        for cell in line
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|c| !c.is_empty())
        {
            let value = cell
                .parse::<T>()
                .map_err(|e| anyhow::anyhow!("line {}: '{}': {}", lineno + 1, cell, e))?;
            data.push(value);
            count += 1;
        }
        match width {
            None => width = Some(count),
            Some(w) if w != count => {
                bail!("line {}: expected {} values, got {}", lineno + 1, w, count)
            }
            Some(_) => {}
        }
        height += 1;
    }

    let width = u32::try_from(width.unwrap_or(0)).context("Grid too wide")?;
    Ok(Matrix::new(width, height, data)?)
}

/// Load and parse a text grid.
pub fn load_grid<T>(path: &Path) -> Result<Matrix<T>>
where
    T: FromStr,
    T::Err: Display,
{
    let text = read_text(path)?;
    let grid = parse_grid(&text).with_context(|| format!("Invalid grid: {}", path.display()))?;
    debug!(width = grid.width(), height = grid.height(), "loaded {}", path.display());
    Ok(grid)
}

/// Parse `top,left,width,height` text.
pub fn parse_area(text: &str) -> Result<WorkingArea> {
    text.parse::<WorkingArea>()
        .with_context(|| format!("Invalid working area '{text}'"))
}

/// Parse `WIDTHxHEIGHT`.
pub fn parse_size(text: &str) -> Result<(u32, u32)> {
    let (w, h) = text
        .split_once(['x', 'X'])
        .with_context(|| format!("Invalid size '{text}', expected WIDTHxHEIGHT"))?;
    let w = w.trim().parse().with_context(|| format!("Invalid width '{w}'"))?;
    let h = h.trim().parse().with_context(|| format!("Invalid height '{h}'"))?;
    Ok((w, h))
}

/// Hex dump: a `WxH FORMAT` header, then one line of `AARRGGBB` per row.
pub fn format_hex(bitmap: &Bitmap) -> String {
    let mut out = format!(
        "{}x{} {}\n",
        bitmap.width(),
        bitmap.height(),
        bitmap.format().name()
    );
    for y in 0..bitmap.height() {
        let row: Vec<String> = bitmap.row(y).iter().map(|p| format!("{p:08X}")).collect();
        out.push_str(&row.join(" "));
        out.push('\n');
    }
    out
}

/// Write raw bytes to `output`, or print the hex dump of `bitmap`.
pub fn emit_bitmap(bitmap: &Bitmap, output: Option<&Path>, verbose: u8) -> Result<()> {
    match output {
        Some(path) => {
            save_bytes(path, &bitmap.to_bytes())?;
            if verbose > 0 {
                println!(
                    "Wrote {}x{} {} ({} bytes) to {}",
                    bitmap.width(),
                    bitmap.height(),
                    bitmap.format().name(),
                    bitmap.byte_len(),
                    path.display()
                );
            }
        }
        None => print!("{}", format_hex(bitmap)),
    }
    Ok(())
}

/// Save raw bytes to path
pub fn save_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("Failed to save: {}", path.display()))
}
