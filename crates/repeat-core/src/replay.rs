//! Replay of a change set onto a working tree
//!
//! Copies are written first, then updates, each in change set order. Every
//! replacement map runs as its own pass over the same change set.

use repeat_diff::{AppliedKind, DriftTable, apply_edits, join, tokenize};
use repeat_fs::{NormalizedPath, TextEncoding, io};
use repeat_recipe::{ChangeSet, FileUpdate};

use crate::error::MissingFile;
use crate::{Error, ReplacementMap, Result};

/// Options for replay passes
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplayOptions {
    /// If true, compute every change but write nothing.
    pub dry_run: bool,
    /// Encoding used to read and write every file
    pub encoding: TextEncoding,
}

/// What one pass did, by destination path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayReport {
    pub copied: Vec<String>,
    pub updated: Vec<String>,
    pub skipped: Vec<String>,
}

/// Applies change sets under a target root.
pub struct ReplayEngine {
    root: NormalizedPath,
    options: ReplayOptions,
}

impl ReplayEngine {
    pub fn new(root: NormalizedPath, options: ReplayOptions) -> Self {
        Self { root, options }
    }

    /// Verify every file the change set reads is present under the root.
    ///
    /// Reports all missing files at once. Updates without edits are not
    /// required.
    pub fn check_files_exist(&self, changes: &ChangeSet) -> Result<()> {
        let copies = changes.copies.iter().map(|path| ("COPY", path));
        let updates = changes
            .effective_updates()
            .map(|update| ("UPDATE", &update.path));

        let missing: Vec<MissingFile> = copies
            .chain(updates)
            .filter(|(_, path)| !self.root.join(path).exists())
            .map(|(command, path)| MissingFile {
                command,
                path: path.clone(),
            })
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::MissingFiles {
                root: self.root.to_native(),
                missing,
            })
        }
    }

    /// Run one pass per replacement map, in order.
    ///
    /// A failing pass stops the run; files written by earlier passes stay.
    pub fn replay(&self, changes: &ChangeSet, maps: &[ReplacementMap]) -> Result<Vec<ReplayReport>> {
        if self.options.dry_run {
            tracing::info!("Dry-run enabled");
        }
        if maps.len() > 1 {
            tracing::info!(passes = maps.len(), "Multiple replacements provided");
        }

        let mut reports = Vec::with_capacity(maps.len());
        for (idx, map) in maps.iter().enumerate() {
            let span = tracing::info_span!("pass", number = idx + 1);
            let _guard = span.enter();
            if maps.len() > 1 {
                tracing::info!("Run #{}", idx + 1);
            }
            reconcile_keys(&changes.keys, map);
            reports.push(self.replay_pass(changes, map)?);
        }
        Ok(reports)
    }

    /// Apply every copy and update of `changes` with one replacement map.
    pub fn replay_pass(&self, changes: &ChangeSet, map: &ReplacementMap) -> Result<ReplayReport> {
        let mut report = ReplayReport::default();

        for copy in &changes.copies {
            tracing::info!(path = %copy, "Copying file");
            match self.copy_file(copy, map)? {
                Some(destination) => report.copied.push(destination),
                None => report.skipped.push(copy.clone()),
            }
        }

        for update in &changes.updates {
            if update.is_empty() {
                report.skipped.push(update.path.clone());
                continue;
            }
            tracing::info!(path = %update.path, "Updating file");
            self.update_file(update, map)?;
            report.updated.push(update.path.clone());
        }

        Ok(report)
    }

    /// Copy a template with replacements applied to its path and contents.
    ///
    /// Returns the destination, or `None` when the template is empty.
    fn copy_file(&self, template: &str, map: &ReplacementMap) -> Result<Option<String>> {
        let destination = map.apply(template);
        let contents = io::read_text(&self.root.join(template), self.options.encoding)?;

        if contents.is_empty() {
            tracing::debug!(path = %template, "Empty file, skipping");
            return Ok(None);
        }

        let contents = map.apply(&contents);
        tracing::debug!(path = %destination, "New file");

        if self.options.dry_run {
            tracing::info!(path = %destination, "[dry-run] Would write new file");
        } else {
            io::write_text(&self.root.join(&destination), &contents, self.options.encoding)?;
        }

        Ok(Some(destination))
    }

    fn update_file(&self, update: &FileUpdate, map: &ReplacementMap) -> Result<()> {
        let path = self.root.join(&update.path);
        let contents = io::read_text(&path, self.options.encoding)?;
        let live = tokenize(&contents);

        let drift = match &update.baseline {
            Some(baseline) => DriftTable::compute(&tokenize(baseline), &live),
            None => DriftTable::identity(),
        };
        if !drift.is_identity() {
            tracing::debug!(path = %update.path, "File drifted from recorded baseline");
        }

        let mut tokens: Vec<String> = live.into_iter().map(String::from).collect();
        let applied = apply_edits(&mut tokens, &update.edits, &update.removed, &drift, |text| {
            map.apply(text)
        });

        for step in &applied {
            if step.clamped {
                tracing::warn!(
                    path = %update.path,
                    position = step.position,
                    index = step.index,
                    "Edit position fell outside the file, clamped"
                );
            }
            let action = match step.kind {
                AppliedKind::Inserted => "Inserted",
                AppliedKind::Replaced => "Replaced",
                AppliedKind::Removed => "Removed",
                AppliedKind::AlreadyRemoved => "Already removed",
            };
            tracing::debug!(
                position = step.position,
                offset = step.offset,
                drift = step.drift,
                text = %escape(&step.text),
                "{action} at token"
            );
        }

        if self.options.dry_run {
            tracing::info!(path = %update.path, "[dry-run] Would write updated file");
            return Ok(());
        }

        io::write_text(&path, &join(&tokens), self.options.encoding)?;
        Ok(())
    }
}

/// Warn about keys the recipe and the replacement map do not share.
fn reconcile_keys(keys: &[String], map: &ReplacementMap) {
    for key in keys {
        if !map.contains_key(key) {
            tracing::warn!(key = %key, "Recipe key not in replacements");
        }
    }
    for key in map.keys() {
        if !keys.iter().any(|k| k == key) {
            tracing::warn!(key = %key, "Replacement not in recipe keys");
        }
    }
    for (search, replace) in map.iter() {
        tracing::info!("Replacing \"{search}\" with \"{replace}\"");
    }
}

fn escape(text: &str) -> String {
    text.replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use repeat_diff::EditOp;
    use repeat_test_utils::TestTree;

    fn engine(tree: &TestTree, dry_run: bool) -> ReplayEngine {
        ReplayEngine::new(
            NormalizedPath::new(tree.root()),
            ReplayOptions {
                dry_run,
                ..ReplayOptions::default()
            },
        )
    }

    fn foo_bar_update() -> FileUpdate {
        let mut update = FileUpdate::new("file.txt");
        update.edits = vec![EditOp::replace(2, "Bar")];
        update.removed.insert(2);
        update.baseline = Some("Foo bar".into());
        update
    }

    #[test]
    fn test_replace_in_place() {
        let tree = TestTree::new();
        tree.write("file.txt", "Foo bar");
        let changes = ChangeSet {
            updates: vec![foo_bar_update()],
            ..ChangeSet::default()
        };

        let report = engine(&tree, false)
            .replay_pass(&changes, &ReplacementMap::default())
            .unwrap();

        tree.assert_file("file.txt", "Foo Bar");
        assert_eq!(report.updated, vec!["file.txt"]);
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let tree = TestTree::new();
        tree.write("file.txt", "Foo bar");
        tree.write("src/Foo.cs", "class Foo {}");
        let changes = ChangeSet {
            copies: vec!["src/Foo.cs".into()],
            updates: vec![foo_bar_update()],
            ..ChangeSet::default()
        };

        let report = engine(&tree, true)
            .replay_pass(&changes, &ReplacementMap::new([("Foo", "Baz")]))
            .unwrap();

        tree.assert_file("file.txt", "Foo bar");
        tree.assert_missing("src/Baz.cs");
        assert_eq!(report.copied, vec!["src/Baz.cs"]);
    }

    #[test]
    fn test_copy_substitutes_path_and_contents() {
        let tree = TestTree::new();
        tree.write("src/Foo/Foo.cs", "class Foo : IFoo {}\n");
        let changes = ChangeSet {
            copies: vec!["src/Foo/Foo.cs".into()],
            ..ChangeSet::default()
        };

        engine(&tree, false)
            .replay_pass(&changes, &ReplacementMap::new([("Foo", "Bar")]))
            .unwrap();

        tree.assert_file("src/Bar/Bar.cs", "class Bar : IBar {}\n");
        tree.assert_file("src/Foo/Foo.cs", "class Foo : IFoo {}\n");
    }

    #[test]
    fn test_empty_template_is_skipped() {
        let tree = TestTree::new();
        tree.write("empty.txt", "");
        let changes = ChangeSet {
            copies: vec!["empty.txt".into()],
            ..ChangeSet::default()
        };

        let report = engine(&tree, false)
            .replay_pass(&changes, &ReplacementMap::new([("empty", "full")]))
            .unwrap();

        tree.assert_missing("full.txt");
        assert_eq!(report.skipped, vec!["empty.txt"]);
    }

    #[test]
    fn test_missing_files_are_all_reported() {
        let tree = TestTree::new();
        tree.write("present.txt", "x");
        let mut empty = FileUpdate::new("not-needed.txt");
        empty.baseline = Some("unused".into());
        let mut removals_only = FileUpdate::new("also-not-needed.txt");
        removals_only.removed.insert(2);
        let changes = ChangeSet {
            copies: vec!["present.txt".into(), "gone.cs".into()],
            updates: vec![foo_bar_update(), empty, removals_only],
            ..ChangeSet::default()
        };

        let missing = match engine(&tree, false).check_files_exist(&changes) {
            Err(Error::MissingFiles { missing, .. }) => missing,
            other => panic!("expected MissingFiles, got {other:?}"),
        };
        let paths: Vec<_> = missing.iter().map(|m| m.path.as_str()).collect();
        assert_eq!(paths, vec!["gone.cs", "file.txt"]);
    }

    #[test]
    fn test_each_map_is_a_pass() {
        let tree = TestTree::new();
        tree.write("Foo.txt", "Foo here");
        let changes = ChangeSet {
            copies: vec!["Foo.txt".into()],
            ..ChangeSet::default()
        };
        let maps = vec![
            ReplacementMap::new([("Foo", "Bar")]),
            ReplacementMap::new([("Foo", "Baz")]),
        ];

        let reports = engine(&tree, false).replay(&changes, &maps).unwrap();

        assert_eq!(reports.len(), 2);
        tree.assert_file("Bar.txt", "Bar here");
        tree.assert_file("Baz.txt", "Baz here");
    }

    #[test]
    fn test_drift_shifts_edit() {
        let tree = TestTree::new();
        // Two tokens were prepended after the recipe was captured
        tree.write("file.txt", "New Foo bar");
        let changes = ChangeSet {
            updates: vec![foo_bar_update()],
            ..ChangeSet::default()
        };

        engine(&tree, false)
            .replay_pass(&changes, &ReplacementMap::default())
            .unwrap();

        tree.assert_file("file.txt", "New Foo Bar");
    }

    #[test]
    fn test_missing_baseline_uses_recorded_positions() {
        let tree = TestTree::new();
        tree.write("file.txt", "Foo bar");
        let mut update = foo_bar_update();
        update.baseline = None;
        let changes = ChangeSet {
            updates: vec![update],
            ..ChangeSet::default()
        };

        engine(&tree, false)
            .replay_pass(&changes, &ReplacementMap::default())
            .unwrap();

        tree.assert_file("file.txt", "Foo Bar");
    }

    #[test]
    fn test_unreadable_update_is_error() {
        let tree = TestTree::new();
        let changes = ChangeSet {
            updates: vec![foo_bar_update()],
            ..ChangeSet::default()
        };
        let err = engine(&tree, false)
            .replay_pass(&changes, &ReplacementMap::default())
            .unwrap_err();
        assert!(matches!(err, Error::Fs(_)));
    }
}
