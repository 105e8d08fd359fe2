//! Recording session managing per-port cassette recorders.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use super::recorder::CassetteRecorder;
use crate::ports::ShellExecutor;

/// Manages per-port `CassetteRecorder` instances for a recording session.
///
/// Each port gets its own recorder writing `<port>.cassette.yaml` into a
/// timestamped directory below the requested base directory.
pub struct RecordingSession {
    /// Recorder for clock interactions.
    pub clock: Arc<Mutex<CassetteRecorder>>,
    /// Recorder for filesystem interactions.
    pub fs: Arc<Mutex<CassetteRecorder>>,
    /// Recorder for shell interactions.
    pub shell: Arc<Mutex<CassetteRecorder>>,
    /// Recorder for terminal interactions.
    pub terminal: Arc<Mutex<CassetteRecorder>>,
    output_dir: PathBuf,
}

impl RecordingSession {
    /// Create a new recording session at `<base>/<timestamp>/`.
    ///
    /// `shell` is used once to stamp the cassettes with the current commit.
    ///
    /// # Errors
    ///
    /// Returns an error if the session directory already exists or cannot be
    /// created.
    pub fn new(base: &Path, shell: &dyn ShellExecutor) -> Result<Self, String> {
        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let output_dir = base.join(&timestamp);

        if output_dir.exists() {
            return Err(format!("Cassette directory already exists: {}", output_dir.display()));
        }

        std::fs::create_dir_all(&output_dir)
            .map_err(|e| format!("Failed to create cassette directory: {e}"))?;

        let commit = commit_hash(shell);

        let make_recorder = |port: &str| -> Arc<Mutex<CassetteRecorder>> {
            let path = output_dir.join(format!("{port}.cassette.yaml"));
            let name = format!("{timestamp}-{port}");
            Arc::new(Mutex::new(CassetteRecorder::new(path, name, commit.as_str())))
        };

        Ok(Self {
            clock: make_recorder("clock"),
            fs: make_recorder("fs"),
            shell: make_recorder("shell"),
            terminal: make_recorder("terminal"),
            output_dir,
        })
    }

    /// Directory the cassettes are written into.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Finish all recorders and write cassette files to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if a recording adapter still holds a reference or any
    /// cassette file cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        fn finish_one(arc: Arc<Mutex<CassetteRecorder>>, port: &str) -> Result<(), String> {
            let recorder = Arc::try_unwrap(arc)
                .map_err(|_| format!("Recording adapter for {port} still has references"))?
                .into_inner()
                .map_err(|e| format!("Recorder lock for {port} poisoned: {e}"))?;
            recorder.finish().map_err(|e| format!("Failed to write {port} cassette: {e}"))?;
            Ok(())
        }

        finish_one(self.clock, "clock")?;
        finish_one(self.fs, "fs")?;
        finish_one(self.shell, "shell")?;
        finish_one(self.terminal, "terminal")?;

        Ok(self.output_dir)
    }
}

/// Current commit of the working directory, or "unknown" outside a repository.
fn commit_hash(shell: &dyn ShellExecutor) -> String {
    match shell.run("git rev-parse HEAD") {
        Ok(out) if out.success() => out.stdout.trim().to_string(),
        _ => {
            tracing::warn!("could not read git commit hash, using 'unknown'");
            "unknown".to_string()
        }
    }
}
