//! Tracing subscriber setup for binaries embedding the library.
//!
//! Writes structured logs to a file and mirrors them to stdout. The library
//! itself only emits through the `tracing` facade (and the injected
//! [`Logger`](crate::log::Logger)); calling this is strictly the binary's
//! choice.

use std::fs;
use std::io;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Default directory for log files.
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Default log file name.
pub const DEFAULT_LOG_FILE: &str = "tilevault.log";

/// Keeps the non-blocking file writer alive.
///
/// Dropping the guard flushes and closes the log file, so hold it for the
/// lifetime of the process.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Initializes logging to `log_dir/log_file` plus stdout.
///
/// The previous log file is truncated so each session starts clean. Log
/// verbosity follows `RUST_LOG`, defaulting to `info`.
///
/// # Errors
///
/// Fails when the log directory cannot be created or the log file cannot
/// be truncated.
pub fn init_logging(log_dir: &str, log_file: &str) -> Result<LoggingGuard, io::Error> {
    fs::create_dir_all(log_dir)?;
    fs::write(Path::new(log_dir).join(log_file), "")?;

    let file_appender = tracing_appender::rolling::never(log_dir, log_file);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .compact();

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stdout)
        .with_ansi(true)
        .compact();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}
