//! Cassette configuration for composable per-port replay.

use std::path::{Path, PathBuf};

use super::format::Cassette;
use super::replayer::CassetteReplayer;

/// Per-port cassette file paths. Ports without a cassette path panic if
/// called during replay.
#[derive(Debug, Clone, Default)]
pub struct CassetteConfig {
    /// Path to the clock port cassette file.
    pub clock: Option<PathBuf>,
    /// Path to the filesystem port cassette file.
    pub fs: Option<PathBuf>,
    /// Path to the shell port cassette file.
    pub shell: Option<PathBuf>,
    /// Path to the terminal port cassette file.
    pub terminal: Option<PathBuf>,
}

/// Per-port replayers, each with its own interaction stream.
pub struct PortReplayers {
    /// Replayer for the clock port.
    pub clock: Option<CassetteReplayer>,
    /// Replayer for the filesystem port.
    pub fs: Option<CassetteReplayer>,
    /// Replayer for the shell port.
    pub shell: Option<CassetteReplayer>,
    /// Replayer for the terminal port.
    pub terminal: Option<CassetteReplayer>,
}

impl CassetteConfig {
    /// Returns a config where all port paths are `None`.
    #[must_use]
    pub fn panic_on_unspecified() -> Self {
        Self::default()
    }

    /// Points every port at the conventional `<port>.cassette.yaml` file in
    /// `dir`, skipping ports whose file does not exist.
    #[must_use]
    pub fn from_dir(dir: &Path) -> Self {
        let pick = |port: &str| {
            let path = dir.join(format!("{port}.cassette.yaml"));
            path.exists().then_some(path)
        };
        Self {
            clock: pick("clock"),
            fs: pick("fs"),
            shell: pick("shell"),
            terminal: pick("terminal"),
        }
    }

    /// Load a cassette file and create a replayer over it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_cassette(path: &Path) -> Result<CassetteReplayer, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        let cassette: Cassette = serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))?;
        Ok(CassetteReplayer::new(&cassette))
    }

    /// Load all configured per-port cassette files and create replayers.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn load_all(&self) -> Result<PortReplayers, String> {
        Ok(PortReplayers {
            clock: self.clock.as_deref().map(Self::load_cassette).transpose()?,
            fs: self.fs.as_deref().map(Self::load_cassette).transpose()?,
            shell: self.shell.as_deref().map(Self::load_cassette).transpose()?,
            terminal: self.terminal.as_deref().map(Self::load_cassette).transpose()?,
        })
    }
}
