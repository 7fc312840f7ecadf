//! git-repeat CLI
//!
//! Repeats the changes of a commit with text replacements.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        if !e.is_broken_pipe() {
            eprintln!("{}: {}", "error".red().bold(), e);
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.debug)?;
    tracing::debug!("Verbose mode enabled");

    match cli.command {
        Commands::Run {
            range,
            replay,
            target,
        } => commands::run_run(&range, &replay, &target),
        Commands::Recipe {
            range,
            keys,
            out,
            target,
        } => commands::run_recipe(&range, &keys, &out, &target),
        Commands::Apply {
            replay,
            input,
            target,
        } => commands::run_apply(&replay, &input, &target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use repeat_test_utils::{GitFixture, TestTree};

    fn fixture() -> GitFixture {
        let mut fixture = GitFixture::new();
        fixture.write("a.txt", "Foo bar\n");
        fixture.commit("First");
        fixture.write("a.txt", "Foo Bar\n");
        fixture.commit("Second");
        fixture
    }

    fn range() -> cli::RangeArgs {
        cli::RangeArgs {
            from: "HEAD~1".into(),
            to: "HEAD".into(),
            exclude: "[]".into(),
            include: "[]".into(),
        }
    }

    fn target(root: &std::path::Path) -> cli::TargetArgs {
        cli::TargetArgs {
            encoding: "utf-8".into(),
            repo: root.to_path_buf(),
        }
    }

    #[test]
    fn test_cli_error_user() {
        let error = crate::error::CliError::user("test error");
        assert_eq!(format!("{}", error), "test error");
        assert!(!error.is_broken_pipe());
    }

    #[test]
    fn test_recipe_to_file_then_apply() {
        let fixture = fixture();
        let out = fixture.root().join("out.recipe");
        let out = out.to_str().unwrap();

        commands::run_recipe(&range(), "[]", out, &target(fixture.root())).unwrap();

        let tree = TestTree::new();
        tree.write("a.txt", "Foo bar\n");
        let replay = cli::ReplayArgs {
            replacements: "{}".into(),
            dry: false,
        };
        commands::run_apply(&replay, out, &target(tree.root())).unwrap();
        tree.assert_file("a.txt", "Foo Bar\n");
    }

    #[test]
    fn test_unknown_encoding_is_reported() {
        let fixture = fixture();
        let mut target = target(fixture.root());
        target.encoding = "no-such-encoding".into();
        let replay = cli::ReplayArgs {
            replacements: "{}".into(),
            dry: true,
        };

        let err = commands::run_run(&range(), &replay, &target).unwrap_err();
        assert!(err.to_string().contains("no-such-encoding"));
    }
}
