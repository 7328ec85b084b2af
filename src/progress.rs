use backup_pruner::executor::{DeletionEntry, DeletionOutcome};
use backup_pruner::PruneReporter;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// CLI progress reporter using an indicatif bar over the removal batch.
///
/// Listing and classification are quick, so only removals get a bar.
pub struct CliReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl CliReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn finish_bar(&self) {
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(pb) = guard.take() {
                pb.finish_and_clear();
            }
        }
    }
}

impl PruneReporter for CliReporter {
    fn on_delete_start(&self, total: usize) {
        let pb = ProgressBar::new(total as u64);
        if let Ok(style) =
            ProgressStyle::with_template("{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("=> "));
        }
        pb.set_message("Removing old backups...");
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(old) = guard.replace(pb) {
                old.finish_and_clear();
            }
        }
    }

    fn on_delete_result(&self, entry: &DeletionEntry) {
        if let Ok(guard) = self.bar.lock() {
            if let Some(pb) = guard.as_ref() {
                if let DeletionOutcome::Failed { cause } = &entry.outcome {
                    pb.println(format!(
                        "  \x1b[31m✗\x1b[0m {}: {}",
                        entry.path.display(),
                        cause
                    ));
                }
                pb.set_message(entry.name.clone());
                pb.inc(1);
            }
        }
    }

    fn on_complete(&self, _deleted: usize, _failed: usize) {
        self.finish_bar();
    }
}
