use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Missing required environment variable {0}")]
    MissingVariable(&'static str),

    #[error("Cannot resolve backup base '{}': {source}", path.display())]
    InvalidBase {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Error reading backup base '{}': {source}", path.display())]
    Listing {
        path: PathBuf,
        source: walkdir::Error,
    },
}
