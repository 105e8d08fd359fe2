//! Replaying adapter for the `FileSystem` port.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{extract_result, next_output};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::filesystem::FileSystem;

/// Replays recorded filesystem operations from a cassette.
pub struct ReplayingFileSystem {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingFileSystem {
    /// Creates a new replaying filesystem from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }

    fn unit(&self, method: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let output = next_output(&self.replayer, "fs", method);
        if let Some(err) = output.get("err") {
            let msg = err.as_str().unwrap_or("unknown error").to_string();
            return Err(msg.into());
        }
        Ok(())
    }

    fn flag(&self, method: &str) -> bool {
        next_output(&self.replayer, "fs", method)
            .as_bool()
            .unwrap_or_else(|| panic!("fs::{method}: expected boolean output"))
    }
}

impl FileSystem for ReplayingFileSystem {
    fn read_to_string(
        &self,
        _path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let output = next_output(&self.replayer, "fs", "read_to_string");
        extract_result(&output, "fs::read_to_string")
    }

    fn write(
        &self,
        _path: &Path,
        _contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.unit("write")
    }

    fn exists(&self, _path: &Path) -> bool {
        self.flag("exists")
    }

    fn is_dir(&self, _path: &Path) -> bool {
        self.flag("is_dir")
    }

    fn list_dir(
        &self,
        _path: &Path,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        let output = next_output(&self.replayer, "fs", "list_dir");
        extract_result(&output, "fs::list_dir")
    }

    fn walk_files(
        &self,
        _root: &Path,
    ) -> Result<Vec<PathBuf>, Box<dyn std::error::Error + Send + Sync>> {
        let output = next_output(&self.replayer, "fs", "walk_files");
        extract_result(&output, "fs::walk_files")
    }

    fn copy(
        &self,
        _from: &Path,
        _to: &Path,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.unit("copy")
    }

    fn remove_dir_all(&self, _path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.unit("remove_dir_all")
    }
}
