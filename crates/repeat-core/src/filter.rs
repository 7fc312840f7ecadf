//! Include/exclude path patterns for capture

use regex::Regex;
use repeat_recipe::Exclusion;

use crate::{Error, Result};

/// Default exclude patterns, applied when the caller gives none.
pub const DEFAULT_EXCLUDE: &[&str] = &[r"logs\.txt", r"Logs\.txt", r"\.md"];

/// How a changed path is treated by [`PathFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClass {
    Included,
    ExcludedByExclude,
    ExcludedByInclude,
}

impl PathClass {
    pub fn exclusion(self) -> Option<Exclusion> {
        match self {
            PathClass::Included => None,
            PathClass::ExcludedByExclude => Some(Exclusion::ByExclude),
            PathClass::ExcludedByInclude => Some(Exclusion::ByInclude),
        }
    }
}

/// Regular expressions matched anywhere in a repository-relative path.
///
/// A path matching any exclude pattern is dropped. When include patterns are
/// given, a path must also match at least one of them.
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    include: Vec<Regex>,
    exclude: Vec<Regex>,
}

impl PathFilter {
    pub fn new<S: AsRef<str>>(include: &[S], exclude: &[S]) -> Result<Self> {
        Ok(Self {
            include: compile(include)?,
            exclude: compile(exclude)?,
        })
    }

    pub fn classify(&self, path: &str) -> PathClass {
        if self.exclude.iter().any(|re| re.is_match(path)) {
            PathClass::ExcludedByExclude
        } else if !self.include.is_empty() && !self.include.iter().any(|re| re.is_match(path)) {
            PathClass::ExcludedByInclude
        } else {
            PathClass::Included
        }
    }
}

fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(pattern.as_ref()).map_err(|e| {
                Error::configuration(format!("Invalid path pattern \"{}\": {e}", pattern.as_ref()))
            })
        })
        .collect()
}
