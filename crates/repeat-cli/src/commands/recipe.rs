//! recipe: capture to a file or stdout

use std::io::Write;

use colored::Colorize;
use repeat_core::{CaptureRequest, parse_keys};
use repeat_fs::{NormalizedPath, TextEncoding, io};

use crate::cli::{RangeArgs, TargetArgs};
use crate::error::Result;

pub fn run_recipe(range: &RangeArgs, keys: &str, out: &str, target: &TargetArgs) -> Result<()> {
    let encoding = TextEncoding::from_label(&target.encoding)?;
    let keys = parse_keys(keys)?;
    let filter = range.filter()?;

    let request = CaptureRequest {
        repository: &target.repo,
        from: &range.from,
        to: &range.to,
        filter: &filter,
        encoding,
    };

    let text = repeat_core::recipe(&request, &keys)?;

    if out == "-" {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&encoding.encode(&text))?;
        stdout.flush()?;
    } else {
        io::write_text(&NormalizedPath::new(out), &text, encoding)?;
        println!("{} Recipe written to {}", "OK".green().bold(), out);
    }

    Ok(())
}
