//! Drift between a recorded baseline and a file's present content
//!
//! Recorded edit positions index the baseline stream. When the live file has
//! been edited since capture, those positions no longer point at the same
//! tokens. Aligning the two streams yields, for every baseline index, the
//! signed shift to add when locating that index in the live stream.
//!
//! This is a positional remap only. Edits that overlap the drifted region
//! land at a best-effort index; no conflict detection is attempted.

use similar::{Algorithm, ChangeTag, TextDiff};

/// Per-position offsets from baseline indices to live indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriftTable {
    /// `offsets[i]` is the shift for baseline index `i`; one extra entry
    /// covers appends past the last baseline token.
    offsets: Vec<isize>,
    /// `gone[i]` is set when baseline token `i` has no counterpart in the
    /// live stream.
    gone: Vec<bool>,
}

impl DriftTable {
    /// Zero drift everywhere, used when no baseline was recorded.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Align `baseline` against `live` and accumulate the running offset.
    ///
    /// Baseline-only tokens decrement the offset after their own index is
    /// recorded, live-only tokens increment it before the next one.
    pub fn compute(baseline: &[&str], live: &[&str]) -> Self {
        let diff = TextDiff::configure()
            .algorithm(Algorithm::Myers)
            .diff_slices(baseline, live);

        let mut offsets = Vec::with_capacity(baseline.len() + 1);
        let mut gone = Vec::with_capacity(baseline.len());
        let mut offset: isize = 0;

        for change in diff.iter_all_changes() {
            match change.tag() {
                ChangeTag::Equal => {
                    offsets.push(offset);
                    gone.push(false);
                }
                ChangeTag::Delete => {
                    offsets.push(offset);
                    gone.push(true);
                    offset -= 1;
                }
                ChangeTag::Insert => offset += 1,
            }
        }
        offsets.push(offset);

        Self { offsets, gone }
    }

    /// Shift for a baseline position.
    ///
    /// Positions past the recorded baseline use the trailing offset.
    pub fn offset_at(&self, position: usize) -> isize {
        self.offsets
            .get(position)
            .or_else(|| self.offsets.last())
            .copied()
            .unwrap_or(0)
    }

    /// True when the baseline token at `position` is absent from the live
    /// stream, e.g. because the recorded removal was already made there.
    pub fn is_gone(&self, position: usize) -> bool {
        self.gone.get(position).copied().unwrap_or(false)
    }

    /// True when no position is shifted.
    pub fn is_identity(&self) -> bool {
        self.offsets.iter().all(|offset| *offset == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize;

    #[test]
    fn test_identity_has_no_offsets() {
        let table = DriftTable::identity();
        assert!(table.is_identity());
        assert_eq!(table.offset_at(0), 0);
        assert_eq!(table.offset_at(99), 0);
    }

    #[test]
    fn test_equal_streams_have_zero_drift() {
        let tokens = tokenize("alpha beta gamma");
        let table = DriftTable::compute(&tokens, &tokens);
        assert!(table.is_identity());
    }

    #[test]
    fn test_insertion_before_shifts_following_positions() {
        let baseline = tokenize("a b c");
        let live = tokenize("new a b c");
        let table = DriftTable::compute(&baseline, &live);
        assert_eq!(table.offset_at(0), 2);
        assert_eq!(table.offset_at(4), 2);
        assert_eq!(table.offset_at(5), 2);
    }

    #[test]
    fn test_removal_before_shifts_back() {
        let baseline = tokenize("a b c d");
        let live = tokenize("a d");
        let table = DriftTable::compute(&baseline, &live);
        assert_eq!(table.offset_at(0), 0);
        assert_eq!(table.offset_at(6), -4);
    }

    #[test]
    fn test_removed_baseline_tokens_are_marked_gone() {
        let baseline = tokenize("keep drop tail");
        let live = tokenize("keep tail");
        let table = DriftTable::compute(&baseline, &live);
        assert!(!table.is_gone(0));
        assert!(table.is_gone(2));
        assert!(table.is_gone(3));
        assert!(!table.is_gone(4));
        assert!(!table.is_gone(99));
        assert!(!DriftTable::identity().is_gone(2));
    }

    #[test]
    fn test_trailing_edit_leaves_earlier_positions_alone() {
        let baseline = tokenize("a b c");
        let live = tokenize("a b c d e");
        let table = DriftTable::compute(&baseline, &live);
        for position in 0..5 {
            assert_eq!(table.offset_at(position), 0);
        }
        assert_eq!(table.offset_at(5), 4);
    }
}
