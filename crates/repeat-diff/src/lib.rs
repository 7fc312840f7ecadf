//! Token-level diffing for git-repeat
//!
//! Text is split into a lossless stream of content and whitespace tokens.
//! Two streams are aligned to record the edits that turn one into the
//! other, and a recorded baseline is aligned against a live file to find
//! how far those edits have drifted.

pub mod apply;
pub mod drift;
pub mod extract;
pub mod token;

pub use apply::{AppliedEdit, AppliedKind, apply_edits};
pub use drift::DriftTable;
pub use extract::{EditKind, EditOp, TokenChanges, extract_changes};
pub use token::{join, tokenize};
