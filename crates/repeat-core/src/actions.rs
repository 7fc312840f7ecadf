//! The three end-to-end operations: run, recipe and apply

use std::path::Path;

use repeat_fs::{NormalizedPath, TextEncoding};
use repeat_git::{GitHistory, HistoryProvider};
use repeat_recipe::{decode, encode};

use crate::config::replacement_keys;
use crate::{
    Capture, PathFilter, ReplacementMap, ReplayEngine, ReplayOptions, ReplayReport, Result, capture,
};

/// Which history to capture and how to read it.
#[derive(Debug, Clone, Copy)]
pub struct CaptureRequest<'a> {
    pub repository: &'a Path,
    pub from: &'a str,
    pub to: &'a str,
    pub filter: &'a PathFilter,
    pub encoding: TextEncoding,
}

impl CaptureRequest<'_> {
    fn capture(&self, keys: &[String]) -> Result<(GitHistory, Capture)> {
        let history = GitHistory::open(self.repository, self.from, self.to)?;
        let captured = capture(&history, keys, self.filter, self.encoding)?;
        Ok((history, captured))
    }
}

/// Capture changes and replay them onto the same working tree right away.
///
/// The recipe keys are the keys of the replacement maps.
pub fn run(
    request: &CaptureRequest<'_>,
    maps: &[ReplacementMap],
    dry_run: bool,
) -> Result<Vec<ReplayReport>> {
    let (history, captured) = request.capture(&replacement_keys(maps))?;

    let engine = ReplayEngine::new(
        history.workdir().clone(),
        ReplayOptions {
            dry_run,
            encoding: request.encoding,
        },
    );
    engine.replay(&captured.changes, maps)
}

/// Capture changes and serialize them as recipe text.
pub fn recipe(request: &CaptureRequest<'_>, keys: &[String]) -> Result<String> {
    let (_, captured) = request.capture(keys)?;
    Ok(encode(&captured.changes, Some(&captured.provenance)))
}

/// Decode recipe text and replay it under `root`.
///
/// Fails before writing anything when a file the recipe needs is missing.
pub fn apply(
    root: &Path,
    recipe: &str,
    maps: &[ReplacementMap],
    options: ReplayOptions,
) -> Result<Vec<ReplayReport>> {
    let changes = decode(recipe)?;
    let engine = ReplayEngine::new(NormalizedPath::canonicalize(root)?, options);
    engine.check_files_exist(&changes)?;
    engine.replay(&changes, maps)
}
