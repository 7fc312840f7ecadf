//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use repeat_core::{PathFilter, parse_patterns};

use crate::error::Result;

/// Tool version plus the newest recipe syntax this build reads.
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "\nsupported recipes up to v1.0"
);

/// git-repeat - remove repetitive tasks from your development workflow
///
/// Repeats the changes between two commits with text replacements, right
/// away or later through a recipe file.
///
/// To easily revert changes made by this tool, commit your pending changes
/// on the repository first.
#[derive(Parser, Debug)]
#[command(name = "git-repeat")]
#[command(author, version, long_version = LONG_VERSION, about)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// The action to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available actions
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Capture the changes between two commits and apply them to the repository
    Run {
        #[command(flatten)]
        range: RangeArgs,

        #[command(flatten)]
        replay: ReplayArgs,

        #[command(flatten)]
        target: TargetArgs,
    },

    /// Capture the changes between two commits as a recipe (to file or stdout)
    Recipe {
        #[command(flatten)]
        range: RangeArgs,

        /// Replacement keys as JSON list, e.g. '["foo", "Foo"]'.
        /// Input not starting with [ is read as the path of a JSON file
        #[arg(short, long, default_value = "[]")]
        keys: String,

        /// Output recipe file, - means stdout
        #[arg(short, long, default_value = "-")]
        out: String,

        #[command(flatten)]
        target: TargetArgs,
    },

    /// Apply a recipe to a folder (from file or stdin)
    Apply {
        #[command(flatten)]
        replay: ReplayArgs,

        /// Input recipe file, - means stdin
        #[arg(short = 'i', long = "in", default_value = "-")]
        input: String,

        #[command(flatten)]
        target: TargetArgs,
    },
}

/// Which commits to compare and which files to consider
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct RangeArgs {
    /// Compute the difference from this commit, must come before --to
    #[arg(short, long, default_value = "HEAD~1")]
    pub from: String,

    /// Compute the difference up to this commit, must come after --from
    #[arg(short, long, default_value = "HEAD")]
    pub to: String,

    /// Regular expressions as JSON list; matching relative paths are excluded
    #[arg(long, default_value = r#"["logs\\.txt", "Logs\\.txt", "\\.md"]"#)]
    pub exclude: String,

    /// Regular expressions as JSON list; ONLY matching relative paths are included
    #[arg(long, default_value = "[]")]
    pub include: String,
}

impl RangeArgs {
    pub fn filter(&self) -> Result<PathFilter> {
        let include = parse_patterns(&self.include, "Include patterns")?;
        let exclude = parse_patterns(&self.exclude, "Exclude patterns")?;
        Ok(PathFilter::new(&include, &exclude)?)
    }
}

/// How captured changes are replayed
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ReplayArgs {
    /// Text replacements as JSON, e.g. '{"foo": "bar", "Foo": "Bar"}'.
    /// A list of objects runs once per object. Input not starting with
    /// { or [ is read as the path of a JSON file
    #[arg(short, long, default_value = "{}")]
    pub replacements: String,

    /// Only log what would change, write nothing
    #[arg(long)]
    pub dry: bool,
}

/// Where files are read and written
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct TargetArgs {
    /// Encoding used for reading and writing files
    #[arg(short, long, default_value = "utf-8")]
    pub encoding: String,

    /// Path to the source code. For run and recipe it must be a git
    /// repository, for apply its layout must match the recipe
    #[arg(default_value = ".")]
    pub repo: PathBuf,
}
