//! Live terminal adapter over standard input and output.

use std::io::{self, BufRead, IsTerminal, Write};

use crate::ports::terminal::Terminal;

/// Live terminal reading answers from stdin.
pub struct LiveTerminal;

impl Terminal for LiveTerminal {
    fn is_interactive(&self) -> bool {
        io::stdin().is_terminal()
    }

    fn prompt(&self, message: &str) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{message}")?;
        stdout.flush()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}
