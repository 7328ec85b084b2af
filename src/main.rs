mod cli;
mod logging;
mod progress;

use std::path::Path;
use std::process;

use anyhow::Context;
use backup_pruner::{PruneEngine, PruneResult};
use clap::Parser;
use cli::Cli;
use colored::*;
use dotenv::dotenv;
use progress::CliReporter;
use tracing::{error, info, warn};

fn main() {
    dotenv().ok();

    let _args = Cli::parse();

    let _guard = logging::init_logger();

    if let Err(err) = run() {
        error!("Error: {:#}", err);
        process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let config = backup_pruner::config::load_configuration()
        .context("Error loading configuration")?;

    let engine = PruneEngine::new(config);
    let reporter = CliReporter::new();
    let today = chrono::Local::now().date_naive();
    let result = engine
        .run(today, &reporter)
        .context("Error listing backup directories")?;

    print_summary(&engine.config().base, &result);
    Ok(())
}

fn print_summary(base: &Path, result: &PruneResult) {
    info!(
        "{}: {} candidates, {} skipped, {} kept, {} to delete",
        base.display(),
        format!("{}", result.candidates).cyan(),
        format!("{}", result.skipped.len()).yellow(),
        format!("{}", result.decision.keep.len()).green(),
        format!("{}", result.decision.delete.len()).red(),
    );

    if result.decision.delete.is_empty() {
        info!("No old backup directories needed removing.");
    } else if result.dry_run {
        info!(
            "Dry run: {} directories left in place.",
            format!("{}", result.decision.delete.len()).yellow()
        );
    } else if result.failed_count() > 0 {
        warn!(
            "Backup cleanup finished: {} removed, {} failed and need manual attention.",
            format!("{}", result.deleted_count()).green(),
            format!("{}", result.failed_count()).red(),
        );
        for entry in result.report.failed() {
            warn!("  {}", entry.path.display());
        }
    } else {
        info!(
            "Backup cleanup finished: {} removed in {}.",
            format!("{}", result.deleted_count()).green(),
            format!("{:.2}s", result.elapsed.as_secs_f64()).green(),
        );
    }
}
