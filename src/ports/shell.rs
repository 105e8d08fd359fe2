//! Shell executor port for running external commands.

use serde::{Deserialize, Serialize};

/// The output of a shell command execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellOutput {
    /// The exit code of the process.
    pub exit_code: i32,
    /// The captured standard output.
    pub stdout: String,
    /// The captured standard error.
    pub stderr: String,
}

impl ShellOutput {
    /// Returns `true` when the command exited with status zero.
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Executes shell commands.
///
/// The installer drives `git` through this port, which lets tests replay
/// clone and sparse-checkout results without network access.
pub trait ShellExecutor: Send + Sync {
    /// Runs a command string in the system shell and returns its output.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be spawned or fails to execute.
    fn run(&self, command: &str) -> Result<ShellOutput, Box<dyn std::error::Error + Send + Sync>>;
}
