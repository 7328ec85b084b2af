use std::env;
use std::path::Path;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Logs to stdout, and also to `LOG_FILE_PATH` when that is set.
/// Keep the returned guard alive until exit or buffered file lines are lost.
pub fn init_logger() -> Option<WorkerGuard> {
    let filter = env::var("TRACING_LEVEL").unwrap_or_else(|_| "info".to_string());
    let filter_layer = EnvFilter::new(filter);

    let (file_layer, guard) = match env::var("LOG_FILE_PATH") {
        Ok(log_file_path) if !log_file_path.is_empty() => {
            let path = Path::new(&log_file_path);
            let dir = path.parent().unwrap_or_else(|| Path::new("./"));
            let file_name = path.file_name().unwrap_or(path.as_os_str());
            let file_appender = tracing_appender::rolling::never(dir, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = fmt::layer().with_writer(non_blocking).with_ansi(false);
            (Some(layer), Some(guard))
        }
        _ => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stdout)
                .pretty()
                .with_file(false)
                .without_time()
                .with_ansi(true),
        )
        .with(file_layer)
        .with(filter_layer)
        .init();

    if guard.is_some() {
        info!("Tracing is configured for stdout and file logging.");
    }

    guard
}
