//! Generates tool-specific rule files from canonical definitions.
//!
//! ```text
//! definitions/<category>/<name>.md
//!   ├─> rules/windsurf/<category>/<name>.md   (trigger/title/... front matter)
//!   └─> rules/cursor/<category>/<name>.mdc    (description/globs/alwaysApply)
//! ```

use std::path::PathBuf;

use crate::catalog;
use crate::config::Settings;
use crate::context::ServiceContext;
use crate::error::RulesError;
use crate::rules::front_matter::Stamp;
use crate::rules::{Definition, Tool};

/// Outcome of a build run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Number of definitions processed.
    pub definitions: usize,
    /// Every file written, in write order.
    pub written: Vec<PathBuf>,
}

/// Turns every definition into one generated file per tool.
///
/// All I/O goes through `ctx` so the builder runs against live, recording,
/// and replaying adapters alike.
pub struct Builder<'a> {
    ctx: &'a ServiceContext,
    settings: &'a Settings,
}

impl<'a> Builder<'a> {
    /// Creates a builder for the repository described by `settings`.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext, settings: &'a Settings) -> Self {
        Self { ctx, settings }
    }

    /// Loads every definition, with existing front matter removed.
    ///
    /// # Errors
    ///
    /// Fails if `definitions/` is missing or any file cannot be read.
    pub fn load_definitions(&self) -> Result<Vec<Definition>, RulesError> {
        catalog::definition_files(self.ctx.fs.as_ref(), &self.settings.root)?
            .into_iter()
            .map(|file| {
                let source = self
                    .ctx
                    .fs
                    .read_to_string(&file.path)
                    .map_err(|e| RulesError::io(&file.path, e))?;
                Ok(Definition::from_source(&file.path, &file.category, &source))
            })
            .collect()
    }

    /// Regenerates every rule file, overwriting previous output.
    ///
    /// Aborts on the first unreadable definition or failed write.
    ///
    /// # Errors
    ///
    /// Fails if `definitions/` is missing or any read or write fails.
    pub fn build(&self) -> Result<BuildReport, RulesError> {
        let definitions = self.load_definitions()?;
        let stamp = Stamp {
            author: self.settings.author.clone(),
            version: self.settings.rule_version.clone(),
            date: self.ctx.clock.now().date_naive(),
        };

        let mut report = BuildReport { definitions: definitions.len(), written: Vec::new() };
        for definition in &definitions {
            for tool in Tool::ALL {
                let target = definition.output_path(&self.settings.root, tool);
                self.ctx
                    .fs
                    .write(&target, &definition.render(tool, &stamp))
                    .map_err(|e| RulesError::io(&target, e))?;
                tracing::debug!(
                    source = %definition.path.display(),
                    target = %target.display(),
                    %tool,
                    "generated rule"
                );
                report.written.push(target);
            }
        }
        Ok(report)
    }
}
