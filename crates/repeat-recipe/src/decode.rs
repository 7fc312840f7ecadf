//! Recipe text to change set

use repeat_diff::EditOp;

use crate::scan::{self, ScanState, Statement};
use crate::{ChangeSet, Result};

/// Parse recipe text into a [`ChangeSet`].
///
/// Lines are split on `\n` only, so payloads keep carriage returns and other
/// control characters byte for byte. A leading byte order mark is skipped.
/// Parse errors are fatal. A missing
/// `VERSION` or an `UPDATE` without a `FILE` baseline only logs a warning.
pub fn decode(recipe: &str) -> Result<ChangeSet> {
    let mut changes = ChangeSet::default();
    let mut state = ScanState::default();
    let recipe = recipe.strip_prefix('\u{feff}').unwrap_or(recipe);

    for (idx, line) in recipe.split_inclusive('\n').enumerate() {
        let (next, statements) = scan::step(state, line, idx + 1)?;
        state = next;
        for statement in statements {
            apply(&mut changes, statement);
        }
    }
    if let Some(statement) = scan::finish(state)? {
        apply(&mut changes, statement);
    }

    for update in &mut changes.updates {
        update.resolve_kinds();
    }

    validate(&changes);
    Ok(changes)
}

fn apply(changes: &mut ChangeSet, statement: Statement) {
    match statement {
        Statement::Version { value, line } => {
            if changes.version.is_some() {
                tracing::warn!(line, "Recipe VERSION should only appear once, ignoring");
            } else {
                changes.version = Some(value);
            }
        }
        Statement::Key(key) => changes.push_key(key),
        Statement::Copy(path) => changes.push_copy(path),
        Statement::Update(path) => {
            changes.update_mut(&path);
        }
        Statement::Insert {
            file,
            position,
            text,
        } => changes
            .update_mut(&file)
            .edits
            .push(EditOp::insert(position, text)),
        Statement::Removal { file, position } => {
            changes.update_mut(&file).removed.insert(position);
        }
        Statement::Baseline { path, text } => changes.update_mut(&path).baseline = Some(text),
        Statement::Blank { line } => tracing::debug!(line, "Recipe contains an empty line"),
    }
}

fn validate(changes: &ChangeSet) {
    if changes.version.is_none() {
        tracing::warn!("Recipe does not contain VERSION information");
    }

    for update in changes.effective_updates() {
        if update.baseline.is_none() {
            tracing::warn!(
                path = %update.path,
                "Recipe is missing FILE contents for UPDATE, drift cannot be compensated"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use pretty_assertions::assert_eq;
    use repeat_diff::EditKind;
    use std::collections::BTreeSet;

    #[test]
    fn test_decode_minimal_update() {
        let recipe = "UPDATE\tfile.txt\n-\t2\n+\t2\t|Bar|\nFILE\tfile.txt\t|Foo bar|\n";
        let changes = decode(recipe).unwrap();

        let update = changes.update("file.txt").unwrap();
        assert_eq!(update.edits, vec![EditOp::replace(2, "Bar")]);
        assert_eq!(update.removed, BTreeSet::from([2]));
        assert_eq!(update.baseline.as_deref(), Some("Foo bar"));
        assert!(changes.version.is_none());
    }

    #[test]
    fn test_decode_keys_copies_and_version() {
        let recipe = "# header\n#\nVERSION\t1.0\nKEY\t|Foo|\nKEY\t|foo|\nCOPY\tsrc/Foo.cs\n";
        let changes = decode(recipe).unwrap();

        assert_eq!(changes.version.as_deref(), Some("1.0"));
        assert_eq!(changes.keys, vec!["Foo", "foo"]);
        assert_eq!(changes.copies, vec!["src/Foo.cs"]);
        assert!(changes.updates.is_empty());
    }

    #[test]
    fn test_decode_multiline_key() {
        let recipe = "KEY\t|line one\nline two|\nCOPY\ta.txt\n";
        let changes = decode(recipe).unwrap();
        assert_eq!(changes.keys, vec!["line one\nline two"]);
        assert_eq!(changes.copies, vec!["a.txt"]);
    }

    #[test]
    fn test_insert_without_removal_stays_insert() {
        let recipe = "UPDATE\ta.txt\n+\t4\t|new |\n";
        let changes = decode(recipe).unwrap();
        assert_eq!(changes.updates[0].edits[0].kind, EditKind::Insert);
    }

    #[test]
    fn test_leading_bom_is_skipped() {
        let changes = decode("\u{feff}# header\nVERSION\t1.0\n").unwrap();
        assert_eq!(changes.version.as_deref(), Some("1.0"));
    }

    #[test]
    fn test_duplicate_version_keeps_first() {
        let changes = decode("VERSION\t1.0\nVERSION\t2.0\n").unwrap();
        assert_eq!(changes.version.as_deref(), Some("1.0"));
    }

    #[test]
    fn test_blank_lines_are_tolerated() {
        let changes = decode("VERSION\t1.0\n\n   \nCOPY\ta.txt\n").unwrap();
        assert_eq!(changes.copies, vec!["a.txt"]);
    }

    #[test]
    fn test_dangling_file_block_is_error() {
        let recipe = "UPDATE\tfile.txt\n-\t2\n+\t2\t|Bar|\nFILE\tfile.txt\t|Foo bar\n";
        let err = decode(recipe).unwrap_err();
        assert!(matches!(err, Error::Unterminated { ref payload } if payload.contains("Foo bar")));
    }

    #[test]
    fn test_trailing_blank_line_after_last_payload() {
        let recipe = "UPDATE\tfile.txt\n-\t2\n+\t2\t|Bar|\nFILE\tfile.txt\t|Foo bar|\n\n";
        let changes = decode(recipe).unwrap();
        let update = changes.update("file.txt").unwrap();
        assert_eq!(update.baseline.as_deref(), Some("Foo bar"));
        assert_eq!(update.edits, vec![EditOp::replace(2, "Bar")]);
    }

    #[test]
    fn test_unrecognized_line_reports_line_number() {
        let err = decode("VERSION\t1.0\nbogus line\n").unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
    }
}
