//! Logging and tracing configuration
//!
//! Non-interactive commands log to stderr. The interactive wizard owns the
//! terminal, so it logs to a file in the data directory instead.

use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::paths;

const LOG_FILE: &str = "uat.log";

/// Initialize tracing for one-shot commands (stderr logging)
///
/// Logs are controlled by the `RUST_LOG` environment variable.
/// Default level is INFO for this crate, WARN for dependencies.
pub fn init_cli() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("uat=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// Initialize tracing for the interactive wizard (file logging)
///
/// Returns the log path and the appender guard, which must be held for
/// the lifetime of the program so buffered lines are flushed. Falls back
/// to warnings-only stderr logging when the log directory is unusable.
pub fn init_interactive() -> Option<(PathBuf, WorkerGuard)> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("uat=debug,warn"));

    if let Some(log_dir) = paths::log_dir() {
        if paths::ensure_dir(&log_dir).is_ok() {
            let appender = tracing_appender::rolling::never(&log_dir, LOG_FILE);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false)
                        .with_target(true)
                        .with_file(true)
                        .with_line_number(true),
                )
                .init();

            return Some((log_dir.join(LOG_FILE), guard));
        }
    }

    tracing_subscriber::registry()
        .with(EnvFilter::new("uat=warn"))
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();

    None
}
