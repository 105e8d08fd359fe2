//! Replaying adapter for the `ShellExecutor` port.

use std::sync::Mutex;

use super::{extract_result, next_output};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::shell::{ShellExecutor, ShellOutput};

/// Replays recorded shell command results from a cassette.
pub struct ReplayingShellExecutor {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingShellExecutor {
    /// Creates a new replaying shell executor from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl ShellExecutor for ReplayingShellExecutor {
    fn run(&self, _command: &str) -> Result<ShellOutput, Box<dyn std::error::Error + Send + Sync>> {
        let output = next_output(&self.replayer, "shell", "run");
        extract_result(&output, "shell::run")
    }
}
