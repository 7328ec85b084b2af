pub mod config;
pub mod engine;
pub mod error;
pub mod executor;
pub mod report;
pub mod retention;
pub mod scanner;
pub mod snapshot;

pub use config::AppConfig;
pub use engine::{PruneEngine, PruneResult};
pub use error::Error;
pub use executor::{DeletionOutcome, DirectoryRemover, ExecutionReport, FsRemover};
pub use report::{PruneReporter, SilentReporter};
pub use retention::{classify, RetentionDecision};
pub use snapshot::{parse, DecodedSnapshot, ParseError};
