//! apply: replay a recipe from a file or stdin

use std::io::Read;

use repeat_core::{ReplayOptions, parse_replacements};
use repeat_fs::{NormalizedPath, TextEncoding, io};

use crate::cli::{ReplayArgs, TargetArgs};
use crate::error::{CliError, Result};

use super::print_reports;

pub fn run_apply(replay: &ReplayArgs, input: &str, target: &TargetArgs) -> Result<()> {
    let encoding = TextEncoding::from_label(&target.encoding)?;
    let maps = parse_replacements(&replay.replacements)?;
    let recipe = read_recipe(input, encoding)?;

    let options = ReplayOptions {
        dry_run: replay.dry,
        encoding,
    };
    let reports = repeat_core::apply(&target.repo, &recipe, &maps, options)?;
    print_reports(&reports, replay.dry);
    Ok(())
}

fn read_recipe(input: &str, encoding: TextEncoding) -> Result<String> {
    if input != "-" {
        return Ok(io::read_text(&NormalizedPath::new(input), encoding)?);
    }

    let mut bytes = Vec::new();
    std::io::stdin().lock().read_to_end(&mut bytes)?;
    encoding
        .decode(&bytes)
        .map(|text| text.into_owned())
        .ok_or_else(|| CliError::user(format!("Recipe on stdin is not valid {encoding} text")))
}
