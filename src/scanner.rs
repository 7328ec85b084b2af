use crate::error::Error;
use std::path::Path;
use walkdir::WalkDir;

/// Names of the immediate subdirectories of `base` that start with `<name>-`,
/// in listing order. Files, symlinks and names that are not UTF-8 are ignored.
pub fn list_snapshot_dirs(base: &Path, name: &str) -> Result<Vec<String>, Error> {
    let prefix = format!("{}-", name);
    let mut dirs = Vec::new();

    for entry in WalkDir::new(base).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|source| Error::Listing {
            path: base.to_path_buf(),
            source,
        })?;

        if !entry.file_type().is_dir() {
            continue;
        }

        if let Some(file_name) = entry.file_name().to_str() {
            if file_name.starts_with(&prefix) {
                dirs.push(file_name.to_string());
            }
        }
    }

    Ok(dirs)
}
