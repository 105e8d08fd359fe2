//! Core library entry for the `secrules` CLI.
//!
//! Builds Cursor and Windsurf security rules from canonical definitions,
//! installs published rules into projects, and tidies the definitions tree.

pub mod adapters;
pub mod builder;
pub mod cassette;
pub mod catalog;
pub mod cleaner;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod installer;
pub mod ports;
pub mod rules;

#[cfg(test)]
mod test_support;

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    init_logging(cli.verbose);
    commands::dispatch(&cli)
}

/// Installs the stderr log subscriber once per process.
///
/// `--verbose` forces `debug`; otherwise `SECRULES_LOG` applies, defaulting
/// to `warn`.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("SECRULES_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}
