//! Change sets and their recipe text format.
//!
//! A [`ChangeSet`] is what capture produces and replay consumes: replacement
//! keys, files to copy, and per-file token edits with the baseline text they
//! were recorded against. A recipe is its line-oriented serialized form:
//!
//! ```text
//! VERSION	1.0
//! KEY	|Foo|
//! COPY	src/Foo.cs
//! UPDATE	src/Registry.cs
//! -	12
//! +	12	|Foo|
//! FILE	src/Registry.cs	|<baseline text>|
//! ```
//!
//! Payloads between pipes may span lines and contain pipes; they close only
//! on a pipe immediately followed by a newline.

pub mod decode;
pub mod encode;
pub mod error;
pub mod model;
pub mod scan;

pub use decode::decode;
pub use encode::{Provenance, encode};
pub use error::{Error, Result};
pub use model::{ChangeSet, CommitSummary, Exclusion, FileStatus, FileUpdate, ProvenanceFile};
pub use scan::{OpenBlock, ScanState, Statement};

/// Recipe syntax version written by this crate.
pub const RECIPE_VERSION: &str = "1.0";
