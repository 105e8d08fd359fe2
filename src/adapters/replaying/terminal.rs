//! Replaying adapter for the `Terminal` port.

use std::sync::Mutex;

use super::{extract_result, next_output};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::terminal::Terminal;

/// Replays recorded terminal answers from a cassette.
pub struct ReplayingTerminal {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingTerminal {
    /// Creates a new replaying terminal from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl Terminal for ReplayingTerminal {
    fn is_interactive(&self) -> bool {
        next_output(&self.replayer, "terminal", "is_interactive")
            .as_bool()
            .expect("terminal::is_interactive: expected boolean output")
    }

    fn prompt(&self, _message: &str) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let output = next_output(&self.replayer, "terminal", "prompt");
        extract_result(&output, "terminal::prompt")
    }
}
