//! Runtime settings: built-in defaults, `secrules.yaml`, and environment overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::RulesError;
use crate::ports::FileSystem;

/// Published rules repository fetched by `install`.
pub const DEFAULT_REPO_URL: &str = "https://github.com/secure-rules/security-rules";
/// Branch fetched by `install`.
pub const DEFAULT_BRANCH: &str = "main";
/// Organization credited in Windsurf front matter.
pub const DEFAULT_AUTHOR: &str = "Secure Rules Project";
/// Rule format version stamped into Windsurf front matter.
pub const DEFAULT_RULE_VERSION: &str = "1.0";
/// Optional settings file, relative to the repository root.
pub const CONFIG_FILE: &str = "secrules.yaml";

/// Output layouts from earlier releases removed by `clean --legacy`.
pub const LEGACY_DIRS: &[&str] = &[
    "cursor-rules",
    "windsurf-rules",
    "rules/cursor-rules",
    "rules/windsurf-rules",
];

/// Optional fields read from [`CONFIG_FILE`].
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    repo_url: Option<String>,
    branch: Option<String>,
    author: Option<String>,
    rule_version: Option<String>,
}

/// Resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Repository root holding `definitions/` and `rules/`.
    pub root: PathBuf,
    /// Git URL of the published rules repository.
    pub repo_url: String,
    /// Branch to fetch.
    pub branch: String,
    /// Author stamped into generated rules.
    pub author: String,
    /// Version stamped into generated rules.
    pub rule_version: String,
}

impl Settings {
    /// Built-in defaults rooted at `root`.
    #[must_use]
    pub fn defaults(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            repo_url: DEFAULT_REPO_URL.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            author: DEFAULT_AUTHOR.to_string(),
            rule_version: DEFAULT_RULE_VERSION.to_string(),
        }
    }

    /// Resolves settings: defaults, then `<root>/secrules.yaml`, then
    /// `SECRULES_*` variables from `env`.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError::Config`] if the settings file exists but is not
    /// valid, and [`RulesError::Io`] if it cannot be read.
    pub fn load<F>(root: &Path, fs: &dyn FileSystem, env: F) -> Result<Self, RulesError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::defaults(root);

        let path = root.join(CONFIG_FILE);
        if fs.exists(&path) {
            let text = fs.read_to_string(&path).map_err(|e| RulesError::io(&path, e))?;
            let file: FileSettings = if text.trim().is_empty() {
                FileSettings::default()
            } else {
                serde_yaml::from_str(&text).map_err(|e| RulesError::Config {
                    path: path.clone(),
                    message: e.to_string(),
                })?
            };
            tracing::debug!(path = %path.display(), "loaded settings file");
            settings.apply(file);
        }

        let overrides = FileSettings {
            repo_url: env("SECRULES_REPO_URL"),
            branch: env("SECRULES_BRANCH"),
            author: env("SECRULES_AUTHOR"),
            rule_version: None,
        };
        settings.apply(overrides);
        Ok(settings)
    }

    /// Archive URL for the configured branch.
    #[must_use]
    pub fn archive_url(&self) -> String {
        format!(
            "{}/archive/refs/heads/{}.zip",
            self.repo_url.trim_end_matches('/').trim_end_matches(".git"),
            self.branch
        )
    }

    fn apply(&mut self, file: FileSettings) {
        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        if let Some(v) = non_empty(file.repo_url) {
            self.repo_url = v;
        }
        if let Some(v) = non_empty(file.branch) {
            self.branch = v;
        }
        if let Some(v) = non_empty(file.author) {
            self.author = v;
        }
        if let Some(v) = non_empty(file.rule_version) {
            self.rule_version = v;
        }
    }
}
