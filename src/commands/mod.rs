//! Command dispatch and handlers.

pub mod build;
pub mod clean;
pub mod install;

use std::env;
use std::path::Path;

use crate::adapters::live::shell::LiveShellExecutor;
use crate::cassette::session::RecordingSession;
use crate::cli::{Cli, Command};
use crate::config::Settings;
use crate::context::ServiceContext;

/// Dispatch a parsed command to its handler.
///
/// When `SECRULES_RECORD` is set to a directory path, clock, filesystem,
/// shell, and terminal interactions are recorded to per-port cassette files
/// below that directory.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    let (ctx, session) = if let Ok(dir) = env::var("SECRULES_RECORD") {
        let session = RecordingSession::new(Path::new(&dir), &LiveShellExecutor)?;
        (ServiceContext::recording(&session), Some(session))
    } else {
        (ServiceContext::live(), None)
    };

    let result = dispatch_with_context(cli, &ctx);

    // Finish recording after command completes (even on error)
    if let Some(session) = session {
        // Drop context first to release Arc references
        drop(ctx);
        finish_recording(session)?;
    }

    result
}

/// Dispatch a command with the given service context.
///
/// # Errors
///
/// Returns an error string if settings cannot be loaded or the handler fails.
pub fn dispatch_with_context(cli: &Cli, ctx: &ServiceContext) -> Result<(), String> {
    let settings =
        Settings::load(&cli.root, ctx.fs.as_ref(), |key| env::var(key).ok()).map_err(|e| e.to_string())?;

    match &cli.command {
        Command::Build => build::run(ctx, &settings),
        Command::Install { cursor, windsurf, dir } => {
            install::run(ctx, &settings, install::forced_tool(*cursor, *windsurf), dir)
        }
        Command::Clean { front_matter, legacy } => {
            clean::run(ctx, &settings.root, *front_matter, *legacy)
        }
    }
}

/// Finish a recording session and print the output directory.
fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let output_dir = session.finish()?;
    eprintln!("Recording saved to: {}", output_dir.display());
    Ok(())
}
