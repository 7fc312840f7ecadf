//! Change extraction between two token streams

use std::collections::BTreeSet;

use similar::{Algorithm, ChangeTag, TextDiff};

/// How an edit lands on the token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditKind {
    /// New text inserted before the token at `position`
    Insert,
    /// The token at `position` was removed and the text takes its place
    Replace,
}

/// One recorded insertion or replacement.
///
/// `position` indexes the previous (baseline) token stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOp {
    pub position: usize,
    pub kind: EditKind,
    pub text: String,
}

impl EditOp {
    pub fn insert(position: usize, text: impl Into<String>) -> Self {
        Self {
            position,
            kind: EditKind::Insert,
            text: text.into(),
        }
    }

    pub fn replace(position: usize, text: impl Into<String>) -> Self {
        Self {
            position,
            kind: EditKind::Replace,
            text: text.into(),
        }
    }
}

/// Edits and removals that turn a previous token stream into a current one.
///
/// Every position in `removed` either carries a `Replace` edit or is a pure
/// removal; `Insert` edits never share a position with a removal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenChanges {
    /// Edits in ascending position order
    pub edits: Vec<EditOp>,
    /// Previous-stream positions whose token is gone
    pub removed: BTreeSet<usize>,
}

impl TokenChanges {
    /// True when nothing changed.
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty() && self.removed.is_empty()
    }

    fn flush(&mut self, pending: Option<Pending>) {
        let Some(pending) = pending else {
            return;
        };
        if pending.text.is_empty() {
            // Removal without replacement text, already in `removed`
            return;
        }
        self.edits.push(EditOp {
            position: pending.position,
            kind: if pending.replace {
                EditKind::Replace
            } else {
                EditKind::Insert
            },
            text: pending.text,
        });
    }
}

/// Insertion text being coalesced at one position.
struct Pending {
    position: usize,
    replace: bool,
    text: String,
}

/// Align `previous` against `current` and record the edits between them.
///
/// Contiguous insertions coalesce into a single edit. Insertions directly
/// following a removal replace the removed token instead of being inserted
/// next to it. Insertions after the last previous token are anchored at
/// `previous.len()`, i.e. they append.
///
/// ```
/// use repeat_diff::{EditOp, extract_changes, tokenize};
///
/// let changes = extract_changes(&tokenize("foo bar"), &tokenize("foo baz bar"));
/// assert_eq!(changes.edits, vec![EditOp::insert(2, "baz ")]);
/// assert!(changes.removed.is_empty());
/// ```
pub fn extract_changes(previous: &[&str], current: &[&str]) -> TokenChanges {
    let diff = TextDiff::configure()
        .algorithm(Algorithm::Myers)
        .diff_slices(previous, current);

    let mut changes = TokenChanges::default();
    let mut pending: Option<Pending> = None;
    let mut cursor = 0usize;

    for change in diff.iter_all_changes() {
        match change.tag() {
            ChangeTag::Equal => {
                changes.flush(pending.take());
                cursor += 1;
            }
            ChangeTag::Delete => {
                pending = match pending.take() {
                    // Text inserted right before the removed token takes its place
                    Some(p) if !p.replace && p.position == cursor => Some(Pending {
                        replace: true,
                        ..p
                    }),
                    other => {
                        changes.flush(other);
                        Some(Pending {
                            position: cursor,
                            replace: true,
                            text: String::new(),
                        })
                    }
                };
                changes.removed.insert(cursor);
                cursor += 1;
            }
            ChangeTag::Insert => match pending.as_mut() {
                Some(p) => p.text.push_str(change.value()),
                None => {
                    pending = Some(Pending {
                        position: cursor,
                        replace: false,
                        text: change.value().to_string(),
                    })
                }
            },
        }
    }
    changes.flush(pending.take());

    changes
}
