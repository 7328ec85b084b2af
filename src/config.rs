use crate::error::Error;
use config::{Config, Environment, Map};
use serde::Deserialize;
use std::path::{self, PathBuf};

const ENV_PREFIX: &str = "BACKUP";

/// Settings for one prune run, built once at start-up and handed to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Absolute path of the directory holding the snapshots.
    pub base: PathBuf,
    /// Snapshot prefix; directories are named `<name>-YYYY-MM-DD-HH`.
    pub name: String,
    /// Classify and report only, remove nothing.
    pub dry_run: bool,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    base: Option<String>,
    name: Option<String>,
    #[serde(default)]
    dry_run: bool,
}

/// Read `BACKUP_BASE`, `BACKUP_NAME` and `BACKUP_DRY_RUN` from the process environment.
pub fn load_configuration() -> Result<AppConfig, Error> {
    load(Environment::with_prefix(ENV_PREFIX))
}

/// Same as [`load_configuration`] but reads the given variables instead of
/// the process environment.
pub fn load_from_vars(vars: Map<String, String>) -> Result<AppConfig, Error> {
    load(Environment::with_prefix(ENV_PREFIX).source(Some(vars)))
}

fn load(env: Environment) -> Result<AppConfig, Error> {
    let raw = Config::builder()
        .add_source(env)
        .build()?
        .try_deserialize::<RawConfig>()?;

    let base = non_empty(raw.base).ok_or(Error::MissingVariable("BACKUP_BASE"))?;
    let name = non_empty(raw.name).ok_or(Error::MissingVariable("BACKUP_NAME"))?;

    let base = path::absolute(&base).map_err(|source| Error::InvalidBase {
        path: PathBuf::from(&base),
        source,
    })?;

    Ok(AppConfig {
        base,
        name,
        dry_run: raw.dry_run,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Map<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_load_from_vars() {
        let config = load_from_vars(vars(&[
            ("BACKUP_BASE", "/mnt/backup/timemachine"),
            ("BACKUP_NAME", "eXile-vms"),
        ]))
        .unwrap();
        assert_eq!(config.base, PathBuf::from("/mnt/backup/timemachine"));
        assert_eq!(config.name, "eXile-vms");
        assert!(!config.dry_run);
    }

    #[test]
    fn test_relative_base_is_made_absolute() {
        let config = load_from_vars(vars(&[
            ("BACKUP_BASE", "backups"),
            ("BACKUP_NAME", "eXile-vms"),
        ]))
        .unwrap();
        assert!(config.base.is_absolute());
        assert!(config.base.ends_with("backups"));
    }

    #[test]
    fn test_dry_run_flag() {
        let config = load_from_vars(vars(&[
            ("BACKUP_BASE", "/b"),
            ("BACKUP_NAME", "n"),
            ("BACKUP_DRY_RUN", "true"),
        ]))
        .unwrap();
        assert!(config.dry_run);
    }

    #[test]
    fn test_missing_base() {
        let result = load_from_vars(vars(&[("BACKUP_NAME", "eXile-vms")]));
        assert!(matches!(result, Err(Error::MissingVariable("BACKUP_BASE"))));
    }

    #[test]
    fn test_empty_name_counts_as_missing() {
        let result = load_from_vars(vars(&[("BACKUP_BASE", "/b"), ("BACKUP_NAME", "")]));
        assert!(matches!(result, Err(Error::MissingVariable("BACKUP_NAME"))));
    }

    #[test]
    fn test_unrelated_variables_are_ignored() {
        let config = load_from_vars(vars(&[
            ("BACKUP_BASE", "/b"),
            ("BACKUP_NAME", "n"),
            ("BACKUP_RETENTION", "whatever"),
            ("HOME", "/root"),
        ]))
        .unwrap();
        assert_eq!(config.name, "n");
    }
}
