//! Recording adapter for the `Terminal` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::{record_interaction, record_result};
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::Terminal;

/// Records terminal interactions while delegating to an inner implementation.
pub struct RecordingTerminal {
    inner: Box<dyn Terminal>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingTerminal {
    /// Creates a new recording terminal wrapping the given implementation.
    pub fn new(inner: Box<dyn Terminal>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct PromptInput<'a> {
    message: &'a str,
}

impl Terminal for RecordingTerminal {
    fn is_interactive(&self) -> bool {
        let result = self.inner.is_interactive();
        record_interaction(&self.recorder, "terminal", "is_interactive", &(), &result);
        result
    }

    fn prompt(&self, message: &str) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.prompt(message);
        record_result(&self.recorder, "terminal", "prompt", &PromptInput { message }, &result);
        result
    }
}
