//! Logging Infrastructure
//!
//! `tracing` subscriber with `EnvFilter`. `RUST_LOG` takes precedence over the
//! configured level, e.g. `RUST_LOG=info,audit=debug,http_access=warn`.

use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize the logger at `info`
pub fn init_logger() {
    init_logger_with_file(None, false, None);
}

/// Initialize the logger with optional JSON format and daily file output
///
/// File output is only enabled when `log_dir` already exists. Calling this
/// twice is harmless; the second subscriber is ignored.
pub fn init_logger_with_file(log_level: Option<&str>, json: bool, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(true);

    let file_dir = log_dir
        .map(Path::new)
        .filter(|dir| dir.exists())
        .and_then(Path::to_str);

    let result = match (file_dir, json) {
        (Some(dir), true) => {
            let appender = tracing_appender::rolling::daily(dir, "pos-server");
            builder.json().with_writer(appender).try_init()
        }
        (Some(dir), false) => {
            let appender = tracing_appender::rolling::daily(dir, "pos-server");
            builder.with_ansi(false).with_writer(appender).try_init()
        }
        (None, true) => builder.json().try_init(),
        (None, false) => builder.try_init(),
    };

    if let Err(e) = result {
        tracing::debug!("Logger already initialized: {}", e);
    }
}
