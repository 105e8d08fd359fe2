//! Error taxonomy for rule building, installation, and cleanup.

use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by the builder, installer, and cleaner.
///
/// Every variant is fatal for the current command; nothing is retried.
#[derive(Debug, Error)]
pub enum RulesError {
    /// A required external mechanism is missing or failed (git, HTTP).
    #[error("{0}")]
    Environment(String),

    /// An expected directory does not exist.
    #[error("{what} not found: {}", path.display())]
    MissingPath {
        /// What the directory was expected to contain.
        what: &'static str,
        /// The path that was checked.
        path: PathBuf,
    },

    /// A file or directory could not be read or written.
    #[error("{}: {message}", path.display())]
    Io {
        /// The path being accessed.
        path: PathBuf,
        /// The underlying failure.
        message: String,
    },

    /// The downloaded branch archive could not be unpacked.
    #[error("archive extraction failed: {0}")]
    Archive(String),

    /// The configuration file is malformed.
    #[error("invalid configuration in {}: {message}", path.display())]
    Config {
        /// The configuration file.
        path: PathBuf,
        /// The parse failure.
        message: String,
    },
}

impl RulesError {
    /// Wraps a port error that occurred while accessing `path`.
    pub fn io(path: impl Into<PathBuf>, err: impl std::fmt::Display) -> Self {
        Self::Io { path: path.into(), message: err.to_string() }
    }
}

/// Convenience alias for results carrying [`RulesError`].
pub type Result<T> = std::result::Result<T, RulesError>;
