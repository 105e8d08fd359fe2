//! Terminal port for interactive prompts.

/// Interacts with the operator at a terminal.
pub trait Terminal: Send + Sync {
    /// Returns `true` when standard input is attached to a terminal.
    fn is_interactive(&self) -> bool;

    /// Prints `message` and reads one line of input, without the trailing newline.
    ///
    /// # Errors
    ///
    /// Returns an error if standard input cannot be read.
    fn prompt(&self, message: &str) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}
