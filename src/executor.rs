use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Capability to remove a directory tree. Lets the pipeline run against a
/// fake in tests.
pub trait DirectoryRemover {
    fn remove_all(&self, path: &Path) -> io::Result<()>;
}

/// Removes directories from the real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsRemover;

impl DirectoryRemover for FsRemover {
    fn remove_all(&self, path: &Path) -> io::Result<()> {
        fs::remove_dir_all(path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionOutcome {
    Removed,
    /// Target was already gone when we got to it.
    Missing,
    Failed { cause: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionEntry {
    pub name: String,
    pub path: PathBuf,
    pub outcome: DeletionOutcome,
}

/// Per-target outcomes, in the order the targets were given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionReport {
    pub entries: Vec<DeletionEntry>,
}

impl ExecutionReport {
    pub fn succeeded(&self) -> impl Iterator<Item = &DeletionEntry> {
        self.entries
            .iter()
            .filter(|e| e.outcome == DeletionOutcome::Removed)
    }

    pub fn missing(&self) -> impl Iterator<Item = &DeletionEntry> {
        self.entries
            .iter()
            .filter(|e| e.outcome == DeletionOutcome::Missing)
    }

    pub fn failed(&self) -> impl Iterator<Item = &DeletionEntry> {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, DeletionOutcome::Failed { .. }))
    }

    pub fn outcome_of(&self, name: &str) -> Option<&DeletionOutcome> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| &e.outcome)
    }
}

/// Remove `base/<name>` for every name. A failure on one target never stops
/// the others; nothing is retried.
pub fn execute<R, I, S>(remover: &R, base: &Path, names: I) -> ExecutionReport
where
    R: DirectoryRemover + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    execute_with(remover, base, names, |_| {})
}

/// Like [`execute`], calling `on_result` after each target.
pub fn execute_with<R, I, S, F>(
    remover: &R,
    base: &Path,
    names: I,
    mut on_result: F,
) -> ExecutionReport
where
    R: DirectoryRemover + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    F: FnMut(&DeletionEntry),
{
    let mut report = ExecutionReport::default();

    for name in names {
        let name = name.as_ref();
        let path = base.join(name);
        info!("Removing old snapshot '{}'", path.display());

        let outcome = match remover.remove_all(&path) {
            Ok(()) => {
                debug!("removed: {}", path.display());
                DeletionOutcome::Removed
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("Snapshot '{}' no longer exists, skipping", path.display());
                DeletionOutcome::Missing
            }
            Err(e) => {
                error!(
                    "Failed to remove '{}', check it manually: {}",
                    path.display(),
                    e
                );
                DeletionOutcome::Failed {
                    cause: e.to_string(),
                }
            }
        };

        let entry = DeletionEntry {
            name: name.to_string(),
            path,
            outcome,
        };
        on_result(&entry);
        report.entries.push(entry);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Records calls and fails on configured names.
    struct FakeRemover {
        calls: RefCell<Vec<PathBuf>>,
        fail: Vec<(&'static str, io::ErrorKind)>,
    }

    impl FakeRemover {
        fn new(fail: Vec<(&'static str, io::ErrorKind)>) -> Self {
            Self {
                calls: RefCell::new(Vec::new()),
                fail,
            }
        }
    }

    impl DirectoryRemover for FakeRemover {
        fn remove_all(&self, path: &Path) -> io::Result<()> {
            self.calls.borrow_mut().push(path.to_path_buf());
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
            match self.fail.iter().find(|(n, _)| *n == name) {
                Some((_, kind)) => Err(io::Error::new(*kind, "simulated")),
                None => Ok(()),
            }
        }
    }

    #[test]
    fn test_failure_does_not_stop_batch() {
        let remover = FakeRemover::new(vec![("a", io::ErrorKind::PermissionDenied)]);
        let report = execute(&remover, Path::new("/backups"), ["a", "b"]);

        assert_eq!(
            *remover.calls.borrow(),
            vec![PathBuf::from("/backups/a"), PathBuf::from("/backups/b")]
        );
        assert!(matches!(
            report.outcome_of("a"),
            Some(DeletionOutcome::Failed { .. })
        ));
        assert_eq!(report.outcome_of("b"), Some(&DeletionOutcome::Removed));
        assert_eq!(report.failed().count(), 1);
        assert_eq!(report.succeeded().count(), 1);
    }

    #[test]
    fn test_not_found_is_tolerated() {
        let remover = FakeRemover::new(vec![("gone", io::ErrorKind::NotFound)]);
        let report = execute(&remover, Path::new("/backups"), ["gone"]);
        assert_eq!(report.outcome_of("gone"), Some(&DeletionOutcome::Missing));
        assert_eq!(report.failed().count(), 0);
        assert_eq!(report.missing().count(), 1);
    }

    #[test]
    fn test_empty_batch() {
        let remover = FakeRemover::new(vec![]);
        let report = execute(&remover, Path::new("/backups"), Vec::<String>::new());
        assert!(report.entries.is_empty());
        assert!(remover.calls.borrow().is_empty());
    }

    #[test]
    fn test_callback_sees_every_entry() {
        let remover = FakeRemover::new(vec![("b", io::ErrorKind::Other)]);
        let mut seen = Vec::new();
        execute_with(&remover, Path::new("/x"), ["a", "b", "c"], |e| {
            seen.push(e.name.clone())
        });
        assert_eq!(seen, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_fs_remover_removes_tree() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("snap");
        fs::create_dir_all(target.join("nested/deeper")).unwrap();
        fs::write(target.join("nested/file.txt"), "data").unwrap();

        let report = execute(&FsRemover, tmp.path(), ["snap"]);
        assert_eq!(report.outcome_of("snap"), Some(&DeletionOutcome::Removed));
        assert!(!target.exists());

        // second pass finds nothing to remove
        let report = execute(&FsRemover, tmp.path(), ["snap"]);
        assert_eq!(report.outcome_of("snap"), Some(&DeletionOutcome::Missing));
    }
}
