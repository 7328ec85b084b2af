use crate::executor::DeletionEntry;
use crate::retention::Retained;
use crate::snapshot::ParseError;
use std::path::Path;

/// Trait for observing a prune run.
///
/// CLI implements with an indicatif progress bar, tests record the calls.
/// All methods have default no-op implementations and never influence
/// which snapshots are kept.
pub trait PruneReporter: Send + Sync {
    fn on_start(&self, _base: &Path, _name: &str) {}
    fn on_skip(&self, _name: &str, _error: &ParseError) {}
    fn on_keep(&self, _retained: &Retained) {}
    fn on_delete_start(&self, _total: usize) {}
    fn on_delete_result(&self, _entry: &DeletionEntry) {}
    fn on_complete(&self, _deleted: usize, _failed: usize) {}
}

/// No-op reporter for silent operation.
pub struct SilentReporter;

impl PruneReporter for SilentReporter {}
