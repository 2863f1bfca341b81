//! Injected logging capability.
//!
//! Tile loading is policy-heavy: failed fetches, refused content types, and
//! mirror write errors are all swallowed and answered with a placeholder, so
//! the log is the only place those events surface. Rather than hard-wiring a
//! logging framework into the load path, the vault holds an `Arc<dyn Logger>`
//! and embedders choose the sink. [`TracingLogger`] is the default and routes
//! everything to the `tracing` facade.

use std::error::Error;
use std::fmt;

/// Severity of a logged event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// Logging sink injected into the vault.
///
/// Implementations must be `Send + Sync`; the vault logs from concurrent
/// tile loads. The provided convenience methods all funnel into [`log`],
/// so implementors override a single method.
///
/// [`log`]: Logger::log
pub trait Logger: Send + Sync {
    /// Emits a message at the given level with an optional underlying cause.
    fn log(&self, level: LogLevel, message: &str, cause: Option<&(dyn Error + 'static)>);

    /// Emits a debug-level message.
    fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message, None);
    }

    /// Emits an info-level message.
    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message, None);
    }

    /// Emits a warning.
    fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message, None);
    }

    /// Emits a warning carrying its underlying cause.
    fn warn_cause(&self, message: &str, cause: &(dyn Error + 'static)) {
        self.log(LogLevel::Warn, message, Some(cause));
    }

    /// Emits an error-level message carrying its underlying cause.
    fn error_cause(&self, message: &str, cause: &(dyn Error + 'static)) {
        self.log(LogLevel::Error, message, Some(cause));
    }
}

/// Routes injected log events to the `tracing` subscriber.
///
/// This is the default sink wired by the builder when no logger is supplied.
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, message: &str, cause: Option<&(dyn Error + 'static)>) {
        match (level, cause) {
            (LogLevel::Debug, None) => tracing::debug!("{message}"),
            (LogLevel::Debug, Some(e)) => tracing::debug!(cause = %e, "{message}"),
            (LogLevel::Info, None) => tracing::info!("{message}"),
            (LogLevel::Info, Some(e)) => tracing::info!(cause = %e, "{message}"),
            (LogLevel::Warn, None) => tracing::warn!("{message}"),
            (LogLevel::Warn, Some(e)) => tracing::warn!(cause = %e, "{message}"),
            (LogLevel::Error, None) => tracing::error!("{message}"),
            (LogLevel::Error, Some(e)) => tracing::error!(cause = %e, "{message}"),
        }
    }
}
