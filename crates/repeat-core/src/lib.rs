//! Capture and replay orchestration for git-repeat
//!
//! Ties the lower crates together:
//!
//! ```text
//!                 repeat-cli
//!                     |
//!                repeat-core
//!                     |
//!     +---------+-----+------+----------+
//!     |         |            |          |
//! repeat-fs repeat-diff repeat-recipe repeat-git
//! ```
//!
//! - **capture**: two commits to a [`ChangeSet`](repeat_recipe::ChangeSet)
//! - **replay**: a change set plus replacement maps to file writes
//! - **actions**: `run`, `recipe` and `apply` as the CLI exposes them

pub mod actions;
pub mod capture;
pub mod config;
pub mod error;
pub mod filter;
pub mod replay;

pub use actions::{CaptureRequest, apply, recipe, run};
pub use capture::{Capture, capture};
pub use config::{ReplacementMap, parse_keys, parse_patterns, parse_replacements};
pub use error::{Error, MissingFile, Result};
pub use filter::{DEFAULT_EXCLUDE, PathClass, PathFilter};
pub use replay::{ReplayEngine, ReplayOptions, ReplayReport};
