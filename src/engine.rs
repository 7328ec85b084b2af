use crate::config::AppConfig;
use crate::error::Error;
use crate::executor::{self, DirectoryRemover, ExecutionReport, FsRemover};
use crate::report::PruneReporter;
use crate::retention::{self, RetentionDecision};
use crate::scanner;
use crate::snapshot::{self, ParseError};
use chrono::NaiveDate;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub struct PruneEngine<R: DirectoryRemover = FsRemover> {
    config: AppConfig,
    remover: R,
}

#[derive(Debug)]
pub struct PruneResult {
    /// Directory names that carried the snapshot prefix.
    pub candidates: usize,
    pub skipped: Vec<ParseError>,
    pub decision: RetentionDecision,
    /// Empty on a dry run.
    pub report: ExecutionReport,
    pub dry_run: bool,
    pub elapsed: Duration,
}

impl PruneResult {
    pub fn deleted_count(&self) -> usize {
        self.report.succeeded().count() + self.report.missing().count()
    }

    pub fn failed_count(&self) -> usize {
        self.report.failed().count()
    }
}

impl PruneEngine<FsRemover> {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            remover: FsRemover,
        }
    }
}

impl<R: DirectoryRemover> PruneEngine<R> {
    pub fn with_remover<T: DirectoryRemover>(self, remover: T) -> PruneEngine<T> {
        PruneEngine {
            config: self.config,
            remover,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Run the full prune pipeline against `today`:
    /// 1. List `<name>-*` directories under the base
    /// 2. Decode each name, skipping the ones that do not parse
    /// 3. Classify into keep/delete
    /// 4. Remove the delete set (unless dry run)
    ///
    /// Only listing errors are returned; per-name and per-removal problems
    /// end up in the result.
    pub fn run(
        &self,
        today: NaiveDate,
        reporter: &dyn PruneReporter,
    ) -> Result<PruneResult, Error> {
        let start = Instant::now();
        let base = &self.config.base;
        let name = &self.config.name;

        info!(
            "Pruning backups in '{}' with prefix '{}'",
            base.display(),
            name
        );
        reporter.on_start(base, name);

        let dir_names = scanner::list_snapshot_dirs(base, name)?;
        let candidates = dir_names.len();
        if dir_names.is_empty() {
            info!(
                "No backup directories starting with '{}-' found in '{}'",
                name,
                base.display()
            );
        }

        let mut skipped = Vec::new();
        let mut decoded = Vec::with_capacity(dir_names.len());
        for dir_name in &dir_names {
            match snapshot::parse(dir_name, name) {
                Ok(snap) => decoded.push(snap),
                Err(e) => {
                    warn!("Skipping directory that is not a backup: {}", e);
                    reporter.on_skip(dir_name, &e);
                    skipped.push(e);
                }
            }
        }

        let decision = retention::classify(decoded, today);
        info!(
            "today={} threshold={} keep={} delete={}",
            decision.today,
            decision.threshold,
            decision.keep.len(),
            decision.delete.len()
        );
        for retained in &decision.keep {
            reporter.on_keep(retained);
        }

        let report = if decision.delete.is_empty() {
            info!("No old backups need removing");
            ExecutionReport::default()
        } else if self.config.dry_run {
            for snap in &decision.delete {
                info!("Dry run, would remove '{}'", base.join(&snap.raw_name).display());
            }
            ExecutionReport::default()
        } else {
            info!("Removing {} old backups", decision.delete.len());
            reporter.on_delete_start(decision.delete.len());
            executor::execute_with(
                &self.remover,
                base,
                decision.delete.iter().map(|s| s.raw_name.as_str()),
                |entry| reporter.on_delete_result(entry),
            )
        };

        let result = PruneResult {
            candidates,
            skipped,
            decision,
            report,
            dry_run: self.config.dry_run,
            elapsed: start.elapsed(),
        };
        debug!("Prune completed in {:.2}s", result.elapsed.as_secs_f64());
        reporter.on_complete(result.deleted_count(), result.failed_count());

        Ok(result)
    }
}
