use clap::Parser;

/// Environment: `BACKUP_BASE` and `BACKUP_NAME` (required), `BACKUP_DRY_RUN`,
/// `TRACING_LEVEL`, `LOG_FILE_PATH` (optional).
#[derive(Debug, Parser)] // requires `derive` feature
#[command(name = "backup-pruner", version)]
#[command(
    about = "Thin out dated backup snapshots: keep everything from the last 7 days, one per day before that",
    long_about = None
)]
pub struct Cli {}
