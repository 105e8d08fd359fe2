//! Maintenance operations on the local rules repository.

use std::path::{Path, PathBuf};

use crate::catalog;
use crate::context::ServiceContext;
use crate::error::RulesError;
use crate::rules::front_matter;

/// Outcome of [`Cleaner::strip_front_matter`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StripReport {
    /// Definitions examined.
    pub scanned: usize,
    /// Definitions that had a leading block and were rewritten.
    pub stripped: Vec<PathBuf>,
}

/// A deprecated output directory that was deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedDir {
    /// The directory.
    pub path: PathBuf,
    /// Files it contained at deletion time.
    pub contents: Vec<PathBuf>,
}

/// Normalizes definitions and removes deprecated layouts.
pub struct Cleaner<'a> {
    ctx: &'a ServiceContext,
    root: PathBuf,
}

impl<'a> Cleaner<'a> {
    /// Creates a cleaner for the repository at `root`.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, root: &Path) -> Self {
        Self { ctx, root: root.to_path_buf() }
    }

    /// Removes a single leading front-matter block from every definition.
    ///
    /// Files without one are not rewritten.
    ///
    /// # Errors
    ///
    /// Fails if `definitions/` is missing or a file cannot be read or written.
    pub fn strip_front_matter(&self) -> Result<StripReport, RulesError> {
        let files = catalog::definition_files(self.ctx.fs.as_ref(), &self.root)?;
        let mut report = StripReport { scanned: files.len(), stripped: Vec::new() };

        for file in files {
            let text =
                self.ctx.fs.read_to_string(&file.path).map_err(|e| RulesError::io(&file.path, e))?;
            let Some((_, body)) = front_matter::split(&text) else {
                continue;
            };
            self.ctx.fs.write(&file.path, body).map_err(|e| RulesError::io(&file.path, e))?;
            tracing::debug!(path = %file.path.display(), "stripped front matter");
            report.stripped.push(file.path);
        }
        Ok(report)
    }

    /// Deletes each of `dirs` (relative to the root) that exists.
    ///
    /// `before_remove` sees every directory and its files before deletion.
    /// Absent directories are skipped.
    ///
    /// # Errors
    ///
    /// Fails if a directory cannot be listed or removed.
    pub fn remove_legacy_dirs<F>(
        &self,
        dirs: &[&str],
        mut before_remove: F,
    ) -> Result<Vec<RemovedDir>, RulesError>
    where
        F: FnMut(&RemovedDir),
    {
        let mut removed = Vec::new();
        for dir in dirs {
            let path = self.root.join(dir);
            if !self.ctx.fs.is_dir(&path) {
                continue;
            }
            let contents = self.ctx.fs.walk_files(&path).map_err(|e| RulesError::io(&path, e))?;
            let entry = RemovedDir { path, contents };
            before_remove(&entry);
            self.ctx.fs.remove_dir_all(&entry.path).map_err(|e| RulesError::io(&entry.path, e))?;
            removed.push(entry);
        }
        Ok(removed)
    }
}
