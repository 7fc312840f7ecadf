//! Change set to recipe text

use std::fmt::Write;

use chrono::{DateTime, Utc};
use repeat_diff::{EditKind, EditOp};

use crate::{ChangeSet, CommitSummary, FileUpdate, ProvenanceFile};

/// Where a captured change set came from, written as header comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    pub repository: String,
    pub from: CommitSummary,
    pub to: CommitSummary,
    pub files: Vec<ProvenanceFile>,
    pub created: DateTime<Utc>,
}

const SYNTAX: &str = "\
# git-repeat recipe
#
# syntax:
#\t# <COMMENT>\tcomments start with # and are plain text inside |...|
#\tVERSION<TAB><VERSION>\trecipe syntax version, once at the top
#\tKEY<TAB>|<KEY>|\tkey that replacements can target, may span lines
#\tCOPY<TAB><RELATIVE PATH>\tadded file, copied with replacements applied to path and contents
#\tUPDATE<TAB><RELATIVE PATH>\tmodified file, followed by <TAB> separated edit lines:
#\t\t<OPERATION><TAB><POSITION><TAB>|<CONTENTS>|
#
#\t\toperation: + inserts, - removes; a - and + sharing a position replace that token
#\t\tposition:  token index after splitting the FILE contents on whitespace runs
#\t\tcontents:  required for +, optional for -, between |..|
#\t\t           may span lines and contain pipes; closes on a pipe followed by a newline
#\t\t           all whitespace between |..| is kept
#
#\t\texample, replacing token 42:
#\t\t-\t42
#\t\t+\t42\t|/*
#\t\t\ttest
#\t\t*/|
#
#\tFILE<TAB><RELATIVE PATH><TAB>|<CONTENTS>|\ttext the positions of an UPDATE refer to,
#\t                                         \tused to follow edits made after the recipe was created
#
# recipes may be edited by hand
#
";

/// Serialize a change set.
///
/// Update entries without edits are left out, removals included. When `provenance` is
/// given, the header also records where the changes were captured.
pub fn encode(changes: &ChangeSet, provenance: Option<&Provenance>) -> String {
    let mut out = String::from(SYNTAX);

    if let Some(provenance) = provenance {
        write_provenance(&mut out, provenance);
    }

    if let Some(version) = &changes.version {
        let _ = writeln!(out, "VERSION\t{version}");
    }

    for key in &changes.keys {
        let _ = writeln!(out, "KEY\t|{key}|");
    }

    for copy in &changes.copies {
        let _ = writeln!(out, "COPY\t{copy}");
    }

    for update in changes.effective_updates() {
        write_update(&mut out, update);
    }

    for update in changes.effective_updates() {
        if let Some(baseline) = &update.baseline {
            let _ = writeln!(out, "FILE\t{}\t|{baseline}|", update.path);
        }
    }

    out
}

fn write_provenance(out: &mut String, provenance: &Provenance) {
    let _ = writeln!(
        out,
        "# this file was created at \"{}\" from:",
        provenance.created.format("%Y-%m-%d %H:%M:%S%z")
    );
    let _ = writeln!(out, "# - repository:\n#\t\"{}\"", provenance.repository);
    let _ = writeln!(out, "# - from commit:\n#\t{}", commit_line(&provenance.from));
    let _ = writeln!(out, "# - to commit:\n#\t{}", commit_line(&provenance.to));
    let _ = writeln!(
        out,
        "# - files: ([A]dded, [M]odified, [R]enamed, [D]eleted, e[X]cluded-by-[E]xclude, e[X]cluded-by-[I]nclude)"
    );
    for file in &provenance.files {
        let excluded = file
            .excluded
            .map(|e| format!(" {}", e.marker()))
            .unwrap_or_default();
        let _ = writeln!(out, "#\t{}{}\t{}", file.status.letter(), excluded, file.path);
    }
    out.push_str("#\n");
}

fn commit_line(commit: &CommitSummary) -> String {
    // Summaries are single-line, but keep stray newlines from breaking the comment
    format!(
        "\"{}\" by \"{}\" at \"{}\"",
        commit.summary.replace('\n', " "),
        commit.author,
        commit.committed.format("%Y-%m-%d %H:%M:%S%z")
    )
}

fn write_update(out: &mut String, update: &FileUpdate) {
    let _ = writeln!(out, "UPDATE\t{}", update.path);

    let mut lines: Vec<(usize, Option<&EditOp>)> = update
        .edits
        .iter()
        .map(|edit| (edit.position, Some(edit)))
        .collect();
    lines.extend(
        update
            .removed
            .iter()
            .filter(|pos| !update.edits.iter().any(|e| e.position == **pos))
            .map(|pos| (*pos, None)),
    );
    lines.sort_by_key(|(position, _)| *position);

    for (position, edit) in lines {
        match edit {
            Some(edit) => {
                if edit.kind == EditKind::Replace || update.removed.contains(&position) {
                    let _ = writeln!(out, "-\t{position}");
                }
                let _ = writeln!(out, "+\t{position}\t|{}|", edit.text);
            }
            None => {
                let _ = writeln!(out, "-\t{position}");
            }
        }
    }
}
