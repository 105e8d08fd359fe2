//! Service context bundling all port trait objects.

use std::path::Path;

use crate::adapters::recording::{
    RecordingClock, RecordingFileSystem, RecordingShellExecutor, RecordingTerminal,
};
use crate::adapters::replaying::{
    ReplayingClock, ReplayingFileSystem, ReplayingShellExecutor, ReplayingTerminal,
};
use crate::cassette::config::CassetteConfig;
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::ports::clock::Clock;
use crate::ports::fetcher::{FetchFuture, Fetcher};
use crate::ports::filesystem::FileSystem;
use crate::ports::shell::{ShellExecutor, ShellOutput};
use crate::ports::terminal::Terminal;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors
/// wire up different adapter implementations (live, recording, replaying).
pub struct ServiceContext {
    /// Clock for build dates.
    pub clock: Box<dyn Clock>,
    /// Filesystem for definitions, generated rules, and installs.
    pub fs: Box<dyn FileSystem>,
    /// Shell executor for `git`.
    pub shell: Box<dyn ShellExecutor>,
    /// Terminal for the interactive tool prompt.
    pub terminal: Box<dyn Terminal>,
    /// Fetcher for branch archive downloads.
    pub fetcher: Box<dyn Fetcher>,
}

impl ServiceContext {
    /// Creates a live context with real adapters for every port.
    #[must_use]
    pub fn live() -> Self {
        use crate::adapters::live::clock::LiveClock;
        use crate::adapters::live::fetcher::LiveFetcher;
        use crate::adapters::live::filesystem::LiveFileSystem;
        use crate::adapters::live::shell::LiveShellExecutor;
        use crate::adapters::live::terminal::LiveTerminal;

        Self {
            clock: Box::new(LiveClock),
            fs: Box::new(LiveFileSystem),
            shell: Box::new(LiveShellExecutor),
            terminal: Box::new(LiveTerminal),
            fetcher: Box::new(LiveFetcher::new()),
        }
    }

    /// Creates a live context whose clock, filesystem, shell, and terminal
    /// interactions are captured by `session`.
    ///
    /// Archive downloads are performed but not recorded. Drop the context
    /// before calling [`RecordingSession::finish`].
    #[must_use]
    pub fn recording(session: &RecordingSession) -> Self {
        let live = Self::live();
        Self {
            clock: Box::new(RecordingClock::new(live.clock, session.clock.clone())),
            fs: Box::new(RecordingFileSystem::new(live.fs, session.fs.clone())),
            shell: Box::new(RecordingShellExecutor::new(live.shell, session.shell.clone())),
            terminal: Box::new(RecordingTerminal::new(live.terminal, session.terminal.clone())),
            fetcher: live.fetcher,
        }
    }

    /// Creates a replaying context from a single cassette holding every port.
    ///
    /// Each port gets its own replayer over the same cassette so that
    /// per-port cursors are independent.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        let cassette: Cassette = serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))?;

        Ok(Self {
            clock: Box::new(ReplayingClock::new(CassetteReplayer::new(&cassette))),
            fs: Box::new(ReplayingFileSystem::new(CassetteReplayer::new(&cassette))),
            shell: Box::new(ReplayingShellExecutor::new(CassetteReplayer::new(&cassette))),
            terminal: Box::new(ReplayingTerminal::new(CassetteReplayer::new(&cassette))),
            fetcher: Box::new(OfflineFetcher),
        })
    }

    /// Creates a replaying context from per-port cassette files.
    ///
    /// Ports without a configured cassette use a panicking adapter that fails
    /// with a clear message when called. Archive downloads are unavailable.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self, String> {
        let replayers = config.load_all()?;

        Ok(Self {
            clock: match replayers.clock {
                Some(r) => Box::new(ReplayingClock::new(r)),
                None => Box::new(PanickingClock),
            },
            fs: match replayers.fs {
                Some(r) => Box::new(ReplayingFileSystem::new(r)),
                None => Box::new(PanickingFileSystem),
            },
            shell: match replayers.shell {
                Some(r) => Box::new(ReplayingShellExecutor::new(r)),
                None => Box::new(PanickingShellExecutor),
            },
            terminal: match replayers.terminal {
                Some(r) => Box::new(ReplayingTerminal::new(r)),
                None => Box::new(PanickingTerminal),
            },
            fetcher: Box::new(OfflineFetcher),
        })
    }
}

// --- Adapters for ports without a cassette ---

const NOT_CONFIGURED: &str = "port not configured in CassetteConfig";

/// Fetcher used during replay: reports itself unavailable.
struct OfflineFetcher;
impl Fetcher for OfflineFetcher {
    fn is_available(&self) -> bool {
        false
    }
    fn fetch(&self, url: &str) -> FetchFuture<'_> {
        let err: Box<dyn std::error::Error + Send + Sync> =
            format!("archive download of {url} is unavailable while replaying").into();
        Box::pin(async move { Err::<Vec<u8>, _>(err) })
    }
}

struct PanickingClock;
impl Clock for PanickingClock {
    fn now(&self) -> chrono::DateTime<chrono::Utc> {
        panic!("Clock {NOT_CONFIGURED}: no cassette loaded for clock");
    }
}

struct PanickingFileSystem;
impl PanickingFileSystem {
    fn fail() -> ! {
        panic!("FileSystem {NOT_CONFIGURED}: no cassette loaded for fs");
    }
}
impl FileSystem for PanickingFileSystem {
    fn read_to_string(
        &self,
        _path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Self::fail()
    }
    fn write(
        &self,
        _path: &Path,
        _contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Self::fail()
    }
    fn exists(&self, _path: &Path) -> bool {
        Self::fail()
    }
    fn is_dir(&self, _path: &Path) -> bool {
        Self::fail()
    }
    fn list_dir(
        &self,
        _path: &Path,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        Self::fail()
    }
    fn walk_files(
        &self,
        _root: &Path,
    ) -> Result<Vec<std::path::PathBuf>, Box<dyn std::error::Error + Send + Sync>> {
        Self::fail()
    }
    fn copy(
        &self,
        _from: &Path,
        _to: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Self::fail()
    }
    fn remove_dir_all(&self, _path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Self::fail()
    }
}

struct PanickingShellExecutor;
impl ShellExecutor for PanickingShellExecutor {
    fn run(&self, _command: &str) -> Result<ShellOutput, Box<dyn std::error::Error + Send + Sync>> {
        panic!("ShellExecutor {NOT_CONFIGURED}: no cassette loaded for shell");
    }
}

struct PanickingTerminal;
impl Terminal for PanickingTerminal {
    fn is_interactive(&self) -> bool {
        panic!("Terminal {NOT_CONFIGURED}: no cassette loaded for terminal");
    }
    fn prompt(&self, _message: &str) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        panic!("Terminal {NOT_CONFIGURED}: no cassette loaded for terminal");
    }
}
