//! run: capture and apply in one step

use repeat_core::{CaptureRequest, parse_replacements};
use repeat_fs::TextEncoding;

use crate::cli::{RangeArgs, ReplayArgs, TargetArgs};
use crate::error::Result;

use super::print_reports;

pub fn run_run(range: &RangeArgs, replay: &ReplayArgs, target: &TargetArgs) -> Result<()> {
    let encoding = TextEncoding::from_label(&target.encoding)?;
    let maps = parse_replacements(&replay.replacements)?;
    let filter = range.filter()?;

    let request = CaptureRequest {
        repository: &target.repo,
        from: &range.from,
        to: &range.to,
        filter: &filter,
        encoding,
    };

    let reports = repeat_core::run(&request, &maps, replay.dry)?;
    print_reports(&reports, replay.dry);
    Ok(())
}
