//! CLI error type.

use thiserror::Error;

/// Errors surfaced to the terminal with a non-zero exit code.
#[derive(Debug, Error)]
pub enum CliError {
    /// The vault could not be constructed.
    #[error("failed to build tile vault: {0}")]
    Build(#[from] tilevault::fetch::FetchError),

    /// The fetched tile could not be written to the output file.
    #[error("failed to save tile: {0}")]
    Save(String),

    /// The mirror tree could not be deleted.
    #[error("failed to clear mirror: {0}")]
    Reset(String),
}
