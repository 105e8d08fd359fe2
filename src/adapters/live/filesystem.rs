//! Live filesystem adapter using `std::fs` and `walkdir`.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::ports::filesystem::FileSystem;

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(std::fs::write(path, contents)?)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn list_dir(
        &self,
        path: &Path,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                entries.push(name.to_string());
            }
        }
        entries.sort();
        Ok(entries)
    }

    fn walk_files(
        &self,
        root: &Path,
    ) -> Result<Vec<PathBuf>, Box<dyn std::error::Error + Send + Sync>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }
        Ok(files)
    }

    fn copy(&self, from: &Path, to: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if let Some(parent) = to.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::copy(from, to)?;
        Ok(())
    }

    fn remove_dir_all(&self, path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(std::fs::remove_dir_all(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_creates_missing_parents() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("rules/cursor/backend/security-x.mdc");

        LiveFileSystem.write(&target, "body").unwrap();

        assert_eq!(LiveFileSystem.read_to_string(&target).unwrap(), "body");
    }

    #[test]
    fn walk_files_recurses_and_skips_directories() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LiveFileSystem;
        fs.write(&dir.path().join("a/b/security-one.md"), "1").unwrap();
        fs.write(&dir.path().join("security-two.md"), "2").unwrap();
        std::fs::create_dir_all(dir.path().join("empty")).unwrap();

        let files = fs.walk_files(dir.path()).unwrap();

        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|p| p.is_file()));
    }

    #[test]
    fn remove_dir_all_deletes_tree() {
        let dir = tempfile::tempdir().unwrap();
        let legacy = dir.path().join("cursor-rules");
        LiveFileSystem.write(&legacy.join("nested/file.mdc"), "x").unwrap();

        LiveFileSystem.remove_dir_all(&legacy).unwrap();

        assert!(!LiveFileSystem.exists(&legacy));
    }
}
