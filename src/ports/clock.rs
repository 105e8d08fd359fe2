//! Clock port for obtaining the current time.

use chrono::{DateTime, Utc};

/// Provides the current time.
///
/// Generated Windsurf front matter carries the build date, so builds are only
/// reproducible when the clock can be pinned in tests and cassette playback.
pub trait Clock: Send + Sync {
    /// Returns the current UTC time.
    fn now(&self) -> DateTime<Utc>;
}
