//! Date command

use crate::DateArgs;
use anyhow::{Result, bail};
use tagtile_core::parse_date;

pub fn run(args: DateArgs) -> Result<()> {
    let mut invalid = 0usize;
    for text in &args.dates {
        match parse_date(text) {
            Ok(date) => println!("{text}\tvalid\t{date}"),
            Err(e) => {
                invalid += 1;
                println!("{text}\tinvalid\t{e}");
            }
        }
    }

    if args.check && invalid > 0 {
        bail!("{invalid} of {} dates are invalid", args.dates.len());
    }
    Ok(())
}
