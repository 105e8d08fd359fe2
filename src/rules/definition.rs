//! Canonical rule definitions and their per-tool renderings.

use std::path::{Path, PathBuf};

use super::category;
use super::front_matter::{self, FrontMatter, Stamp, MANUAL_TRIGGER};
use super::tool::Tool;

/// File-name pattern shared by every security rule.
pub const RULE_GLOB: &str = "security-*";

/// A hand-authored rule document under `definitions/<category>/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    /// Source path of the definition.
    pub path: PathBuf,
    /// Category, taken from the parent directory name.
    pub category: String,
    /// File name without extension.
    pub stem: String,
    /// Document text with any leading front matter removed.
    pub body: String,
}

impl Definition {
    /// Builds a definition from its source text, dropping existing front matter.
    #[must_use]
    pub fn from_source(path: &Path, category: &str, source: &str) -> Self {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            path: path.to_path_buf(),
            category: category.to_string(),
            stem,
            body: front_matter::strip(source).to_string(),
        }
    }

    /// Text of the first level-1 heading, or the file stem if there is none.
    #[must_use]
    pub fn title(&self) -> String {
        self.heading_position()
            .map_or_else(|| self.stem.clone(), |(_, title)| title.to_string())
    }

    /// First prose line after the title heading, or `"<title> security rules"`.
    ///
    /// List, quote, and table markers are dropped; headings, horizontal rules,
    /// and table separator rows are skipped.
    #[must_use]
    pub fn description(&self) -> String {
        let skip = self.heading_position().map_or(0, |(index, _)| index + 1);
        prose_lines(&self.body)
            .skip_while(|(index, _)| *index < skip)
            .find_map(|(_, line)| plain_text(line))
            .map_or_else(|| format!("{} security rules", self.title()), str::to_string)
    }

    /// Output file name for `tool`, e.g. `security-api.mdc`.
    #[must_use]
    pub fn file_name(&self, tool: Tool) -> String {
        format!("{}.{}", self.stem, tool.extension())
    }

    /// Output path below `root` for `tool`: `rules/<tool>/<category>/<file>`.
    #[must_use]
    pub fn output_path(&self, root: &Path, tool: Tool) -> PathBuf {
        tool.rules_dir(root).join(&self.category).join(self.file_name(tool))
    }

    /// Metadata for `tool`.
    #[must_use]
    pub fn front_matter(&self, tool: Tool, stamp: &Stamp) -> FrontMatter {
        match tool {
            Tool::Windsurf => FrontMatter::Windsurf {
                trigger: MANUAL_TRIGGER.to_string(),
                title: self.title(),
                description: self.description(),
                author: stamp.author.clone(),
                date: stamp.date,
                version: stamp.version.clone(),
            },
            Tool::Cursor => FrontMatter::Cursor {
                description: self.description(),
                globs: category::globs_for(&self.category)
                    .iter()
                    .map(|g| (*g).to_string())
                    .collect(),
                always_apply: false,
            },
        }
    }

    /// Full generated file for `tool`: front matter followed by the body.
    #[must_use]
    pub fn render(&self, tool: Tool, stamp: &Stamp) -> String {
        let mut out = self.front_matter(tool, stamp).render();
        out.push_str(&self.body);
        out
    }

    fn heading_position(&self) -> Option<(usize, &str)> {
        prose_lines(&self.body).find_map(|(index, line)| {
            let title = line.strip_prefix('#')?;
            if !title.starts_with([' ', '\t']) {
                return None;
            }
            let title = title.trim();
            (!title.is_empty()).then_some((index, title))
        })
    }
}

/// Text of a Markdown line without block markup, or `None` if nothing is left.
fn plain_text(line: &str) -> Option<&str> {
    let mut text = line.trim();
    if is_thematic_break(text) {
        return None;
    }
    while let Some(rest) = ["- ", "* ", "+ "]
        .into_iter()
        .find_map(|marker| text.strip_prefix(marker))
        .or_else(|| text.strip_prefix(['>', '|']))
    {
        text = rest.trim_start();
    }
    let text = text.trim_end_matches('|').trim_end();
    let separator_row = text.chars().all(|c| matches!(c, '|' | '-' | ':' | ' ' | '\t'));
    (!text.is_empty() && !separator_row && !text.starts_with('#')).then_some(text)
}

/// `---`, `***`, `___`, optionally spaced.
fn is_thematic_break(line: &str) -> bool {
    let marks: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
    marks.len() >= 3
        && ['-', '*', '_'].iter().any(|mark| marks.iter().all(|c| c == mark))
}

/// Numbered lines of `body` that are outside fenced code blocks.
fn prose_lines(body: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut in_fence = false;
    body.lines().enumerate().filter(move |(_, line)| {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
            return false;
        }
        !in_fence
    })
}
