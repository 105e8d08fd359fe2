//! Discovery of canonical definition files.

use std::path::{Path, PathBuf};

use crate::error::RulesError;
use crate::ports::FileSystem;

/// Canonical definitions directory, relative to the repository root.
pub const DEFINITIONS_DIR: &str = "definitions";

/// A definition file located under `definitions/<category>/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionFile {
    /// Category directory name.
    pub category: String,
    /// Full path of the file.
    pub path: PathBuf,
}

/// Lists every `definitions/<category>/*.md` file below `root`, ordered by
/// category then file name.
///
/// # Errors
///
/// Returns [`RulesError::MissingPath`] if `definitions/` does not exist and
/// [`RulesError::Io`] if a directory cannot be listed.
pub fn definition_files(fs: &dyn FileSystem, root: &Path) -> Result<Vec<DefinitionFile>, RulesError> {
    let dir = root.join(DEFINITIONS_DIR);
    if !fs.is_dir(&dir) {
        return Err(RulesError::MissingPath { what: "Definitions directory", path: dir });
    }

    let mut files = Vec::new();
    for category in fs.list_dir(&dir).map_err(|e| RulesError::io(&dir, e))? {
        let category_dir = dir.join(&category);
        if !fs.is_dir(&category_dir) {
            continue;
        }
        let names = fs.list_dir(&category_dir).map_err(|e| RulesError::io(&category_dir, e))?;
        files.extend(
            names
                .into_iter()
                .filter(|name| Path::new(name).extension().is_some_and(|ext| ext == "md"))
                .map(|name| DefinitionFile { category: category.clone(), path: category_dir.join(name) }),
        );
    }
    Ok(files)
}
