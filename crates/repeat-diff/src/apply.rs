//! Positional application of recorded edits onto a live token stream

use std::collections::BTreeSet;

use crate::{DriftTable, EditOp};

/// What happened to the stream at one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppliedKind {
    Inserted,
    Replaced,
    Removed,
    /// Pure removal whose token the live stream no longer has
    AlreadyRemoved,
}

/// Outcome of applying one edit or removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedEdit {
    /// Recorded baseline position
    pub position: usize,
    /// Index actually written in the live stream
    pub index: usize,
    /// Insertions made earlier in this pass
    pub offset: usize,
    /// Baseline drift at `position`
    pub drift: isize,
    pub kind: AppliedKind,
    /// Text written (empty for removals)
    pub text: String,
    /// The computed index fell outside the stream and was clamped
    pub clamped: bool,
}

enum Step<'a> {
    Edit(&'a EditOp),
    Removal(usize),
}

impl Step<'_> {
    fn position(&self) -> usize {
        match self {
            Step::Edit(edit) => edit.position,
            Step::Removal(position) => *position,
        }
    }
}

/// Apply edits and removals to `tokens` in position order.
///
/// Each step targets `position + offset + drift[position]`, where `offset`
/// counts the insertions already made in this pass. A position listed in
/// `removed` overwrites the token there (with the edit text, or with nothing
/// for a pure removal); any other edit inserts a new token and bumps the
/// offset. A pure removal whose baseline token `drift` marks as gone is left
/// out, the live stream already lacks it. `substitute` rewrites edit text
/// before it is written.
pub fn apply_edits<F>(
    tokens: &mut Vec<String>,
    edits: &[EditOp],
    removed: &BTreeSet<usize>,
    drift: &DriftTable,
    mut substitute: F,
) -> Vec<AppliedEdit>
where
    F: FnMut(&str) -> String,
{
    let mut steps: Vec<Step<'_>> = edits.iter().map(Step::Edit).collect();
    steps.extend(
        removed
            .iter()
            .filter(|pos| !edits.iter().any(|edit| edit.position == **pos))
            .map(|pos| Step::Removal(*pos)),
    );
    steps.sort_by_key(Step::position);

    let mut offset = 0usize;
    let mut applied = Vec::with_capacity(steps.len());

    for step in steps {
        let position = step.position();
        let shift = drift.offset_at(position);
        let target = position as isize + offset as isize + shift;
        let overwrite = removed.contains(&position);

        let text = match step {
            Step::Edit(edit) => substitute(&edit.text),
            Step::Removal(_) if drift.is_gone(position) => {
                applied.push(AppliedEdit {
                    position,
                    index: target.max(0) as usize,
                    offset,
                    drift: shift,
                    kind: AppliedKind::AlreadyRemoved,
                    text: String::new(),
                    clamped: false,
                });
                continue;
            }
            Step::Removal(_) => String::new(),
        };

        let upper = if overwrite {
            tokens.len().saturating_sub(1)
        } else {
            tokens.len()
        };
        let index = target.clamp(0, upper as isize) as usize;
        let clamped = index as isize != target;

        let kind = if overwrite && !tokens.is_empty() {
            tokens[index] = text.clone();
            if text.is_empty() {
                AppliedKind::Removed
            } else {
                AppliedKind::Replaced
            }
        } else {
            tokens.insert(index, text.clone());
            offset += 1;
            AppliedKind::Inserted
        };

        applied.push(AppliedEdit {
            position,
            index,
            offset,
            drift: shift,
            kind,
            text,
            clamped,
        });
    }

    applied
}
