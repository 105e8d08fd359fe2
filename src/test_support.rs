//! Port doubles shared by unit tests.

use std::collections::{HashMap, VecDeque};
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, TimeZone, Utc};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::cassette::config::CassetteConfig;
use crate::context::ServiceContext;
use crate::ports::{Clock, FetchFuture, Fetcher, FileSystem, ShellExecutor, ShellOutput, Terminal};

/// In-memory filesystem keyed by full path.
#[derive(Default)]
pub struct MemFs {
    files: Mutex<HashMap<PathBuf, String>>,
}

impl MemFs {
    pub fn with(files: &[(&str, &str)]) -> Self {
        let fs = Self::default();
        for (path, contents) in files {
            fs.files.lock().unwrap().insert(PathBuf::from(path), (*contents).to_string());
        }
        fs
    }
}

impl FileSystem for MemFs {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| format!("File not found: {}", path.display()).into())
    }

    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.files.lock().unwrap().insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().keys().any(|k| k.starts_with(path))
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.files.lock().unwrap().keys().any(|k| k.starts_with(path) && k != path)
    }

    fn list_dir(
        &self,
        path: &Path,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        let files = self.files.lock().unwrap();
        let mut names: Vec<String> = files
            .keys()
            .filter_map(|k| k.strip_prefix(path).ok())
            .filter_map(|rest| rest.components().next())
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }

    fn walk_files(
        &self,
        root: &Path,
    ) -> Result<Vec<PathBuf>, Box<dyn std::error::Error + Send + Sync>> {
        let mut found: Vec<PathBuf> =
            self.files.lock().unwrap().keys().filter(|k| k.starts_with(root)).cloned().collect();
        found.sort();
        Ok(found)
    }

    fn copy(
        &self,
        from: &Path,
        to: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let contents = self.read_to_string(from)?;
        self.write(to, &contents)
    }

    fn remove_dir_all(
        &self,
        path: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.files.lock().unwrap().retain(|k, _| !k.starts_with(path));
        Ok(())
    }
}

/// Clock pinned to a single instant.
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Terminal with a fixed interactivity flag and queued answers.
pub struct ScriptedTerminal {
    interactive: bool,
    answers: Mutex<VecDeque<String>>,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedTerminal {
    pub fn new(interactive: bool, answers: &[&str]) -> Self {
        Self {
            interactive,
            answers: Mutex::new(answers.iter().map(|a| (*a).to_string()).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

impl Terminal for ScriptedTerminal {
    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn prompt(&self, message: &str) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        self.prompts.lock().unwrap().push(message.to_string());
        self.answers.lock().unwrap().pop_front().ok_or_else(|| "no scripted answer left".into())
    }
}

/// Shell that answers commands by prefix and remembers what it ran.
///
/// Commands without a matching rule exit with status 127.
#[derive(Default)]
pub struct ScriptedShell {
    rules: Vec<(String, i32)>,
    pub commands: Mutex<Vec<String>>,
}

impl ScriptedShell {
    pub fn answering(mut self, prefix: &str, exit_code: i32) -> Self {
        self.rules.push((prefix.to_string(), exit_code));
        self
    }
}

impl ShellExecutor for ScriptedShell {
    fn run(&self, command: &str) -> Result<ShellOutput, Box<dyn std::error::Error + Send + Sync>> {
        self.commands.lock().unwrap().push(command.to_string());
        let exit_code = self
            .rules
            .iter()
            .find(|(prefix, _)| command.starts_with(prefix.as_str()))
            .map_or(127, |(_, code)| *code);
        Ok(ShellOutput { exit_code, stdout: String::new(), stderr: String::new() })
    }
}

/// Fetcher serving a fixed payload, or unavailable when `None`.
pub struct StaticFetcher(pub Option<Vec<u8>>);

impl Fetcher for StaticFetcher {
    fn is_available(&self) -> bool {
        self.0.is_some()
    }

    fn fetch(&self, url: &str) -> FetchFuture<'_> {
        let result: Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>> =
            self.0.clone().ok_or_else(|| format!("no payload for {url}").into());
        Box::pin(async move { result })
    }
}

/// Context over `fs`, pinned to 2025-03-15, with every other port panicking
/// unless replaced by the test.
pub fn context_with(fs: MemFs) -> ServiceContext {
    let mut ctx = ServiceContext::replaying_from(&CassetteConfig::panic_on_unspecified())
        .expect("panic config should always succeed");
    ctx.fs = Box::new(fs);
    ctx.clock = Box::new(FixedClock(Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap()));
    ctx
}

impl ShellExecutor for Arc<ScriptedShell> {
    fn run(&self, command: &str) -> Result<ShellOutput, Box<dyn std::error::Error + Send + Sync>> {
        self.as_ref().run(command)
    }
}

impl Terminal for Arc<ScriptedTerminal> {
    fn is_interactive(&self) -> bool {
        self.as_ref().is_interactive()
    }

    fn prompt(&self, message: &str) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        self.as_ref().prompt(message)
    }
}

/// Zip archive holding `entries` as `(name, contents)` pairs.
pub fn zip_of(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, contents) in entries {
        writer.start_file(*name, SimpleFileOptions::default()).unwrap();
        writer.write_all(contents.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}
