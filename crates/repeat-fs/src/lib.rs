//! Filesystem abstraction for git-repeat
//!
//! Provides normalized relative paths, encoding-aware text reads and
//! atomic writes used by both capture and replay.

pub mod encoding;
pub mod error;
pub mod io;
pub mod path;

pub use encoding::TextEncoding;
pub use error::{Error, Result};
pub use path::NormalizedPath;
