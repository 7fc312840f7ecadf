//! Command implementations for repeat-cli

pub mod apply;
pub mod recipe;
pub mod run;

pub use apply::run_apply;
pub use recipe::run_recipe;
pub use run::run_run;

use colored::Colorize;
use repeat_core::ReplayReport;

/// Print what the replay passes did.
pub(crate) fn print_reports(reports: &[ReplayReport], dry_run: bool) {
    let label = if dry_run {
        "DRY-RUN".yellow().bold()
    } else {
        "OK".green().bold()
    };

    for (idx, report) in reports.iter().enumerate() {
        let pass = if reports.len() > 1 {
            format!(" (run #{})", idx + 1)
        } else {
            String::new()
        };
        println!(
            "{label} {} copied, {} updated, {} skipped{pass}",
            report.copied.len(),
            report.updated.len(),
            report.skipped.len()
        );
        for path in &report.copied {
            println!("   {} {}", "+".green(), path);
        }
        for path in &report.updated {
            println!("   {} {}", "~".cyan(), path);
        }
    }
}
