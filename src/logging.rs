//! Tracing subscriber setup for the command-line binary

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Environment variable holding the log filter directive
pub const LOG_ENV: &str = "COMPAT_SCORE_LOG";

const DEFAULT_FILTER: &str = "info";

/// Install a global subscriber writing to `log_file`
///
/// The returned guard flushes buffered records when dropped and must be held
/// for the lifetime of the program.
pub fn init(log_file: &Path, json: bool) -> std::io::Result<WorkerGuard> {
    let dir = log_file.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)?;
    let file_name = log_file
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| "compat-score.log".into());

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(writer).with_ansi(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(writer).with_ansi(false))
            .init();
    }

    Ok(guard)
}
