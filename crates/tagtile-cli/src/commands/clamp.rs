//! Clamp command

use crate::ClampArgs;
use anyhow::Result;
use tagtile_core::clamp_coords;

pub fn run(args: ClampArgs) -> Result<()> {
    let (x, y) = clamp_coords(args.x, args.y, args.max_x, args.max_y);
    println!("{x},{y}");
    Ok(())
}
