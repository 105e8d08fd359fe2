//! Installs published security rules into a consuming project.
//!
//! ```text
//! detect tool ─> fetch rules/<tool> into a scratch dir ─> copy security-* flat
//!                (sparse git clone | branch archive)      into .<tool>/rules/
//! ```

pub mod detect;
pub mod fetch;

use std::path::{Path, PathBuf};

use globset::{Glob, GlobMatcher};

use crate::config::Settings;
use crate::context::ServiceContext;
use crate::error::RulesError;
use crate::rules::definition::RULE_GLOB;
use crate::rules::Tool;

pub use detect::{detect, Detection, Source};
pub use fetch::Method;

/// Outcome of an install run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    /// Tool whose rules were installed.
    pub tool: Tool,
    /// How the rules were fetched.
    pub method: Method,
    /// Rules directory inside the project.
    pub destination: PathBuf,
    /// Installed files, in copy order.
    pub installed: Vec<PathBuf>,
}

/// Fetches the published rules and copies them into a project.
pub struct Installer<'a> {
    ctx: &'a ServiceContext,
    settings: &'a Settings,
    scratch_base: Option<PathBuf>,
}

impl<'a> Installer<'a> {
    /// Creates an installer fetching from the repository in `settings`.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, settings: &'a Settings) -> Self {
        Self { ctx, settings, scratch_base: None }
    }

    /// Creates the scratch workspace below `base` instead of the system
    /// temporary directory.
    #[must_use]
    pub fn with_scratch_base(mut self, base: &Path) -> Self {
        self.scratch_base = Some(base.to_path_buf());
        self
    }

    /// Installs `tool`'s rules into `project`.
    ///
    /// Every file under the fetched `rules/<tool>` tree whose name matches
    /// `security-*` is copied into `.<tool>/rules/` without its category
    /// directory. The scratch workspace is removed when this returns.
    ///
    /// # Errors
    ///
    /// Fails if no fetch mechanism works, the fetched tree lacks
    /// `rules/<tool>`, or a copy fails.
    pub async fn install(&self, tool: Tool, project: &Path) -> Result<InstallReport, RulesError> {
        let method = fetch::choose_method(self.ctx)?;
        let workspace = self.workspace()?;
        tracing::debug!(workspace = %workspace.path().display(), ?method, "fetching rules");

        let source = fetch::fetch(self.ctx, self.settings, tool, method, workspace.path()).await?;
        if !self.ctx.fs.is_dir(&source) {
            return Err(RulesError::MissingPath { what: "Rules directory", path: source });
        }

        let matcher = rule_matcher()?;
        let destination = tool.install_dir(project);
        let mut installed = Vec::new();
        for file in self.ctx.fs.walk_files(&source).map_err(|e| RulesError::io(&source, e))? {
            let Some(name) = file.file_name() else {
                continue;
            };
            if !matcher.is_match(name) {
                continue;
            }
            let target = destination.join(name);
            self.ctx.fs.copy(&file, &target).map_err(|e| RulesError::io(&target, e))?;
            installed.push(target);
        }

        Ok(InstallReport { tool, method, destination, installed })
    }

    fn workspace(&self) -> Result<tempfile::TempDir, RulesError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("secrules-");
        let base = self.scratch_base.clone().unwrap_or_else(std::env::temp_dir);
        builder.tempdir_in(&base).map_err(|e| RulesError::io(base, e))
    }
}

fn rule_matcher() -> Result<GlobMatcher, RulesError> {
    Glob::new(RULE_GLOB)
        .map(|glob| glob.compile_matcher())
        .map_err(|e| RulesError::Environment(format!("invalid rule pattern {RULE_GLOB}: {e}")))
}
