//! Supported AI coding assistants.

use std::fmt;
use std::path::{Path, PathBuf};

/// An AI coding assistant that consumes security rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    /// Cursor: `.mdc` rules with `globs`/`alwaysApply` metadata.
    Cursor,
    /// Windsurf: `.md` rules with `trigger`/`title` metadata.
    Windsurf,
}

/// Tool installed when detection finds nothing and no terminal is attached.
pub const NON_INTERACTIVE_DEFAULT: Tool = Tool::Windsurf;

impl Tool {
    /// Both tools, in build order.
    pub const ALL: [Tool; 2] = [Tool::Windsurf, Tool::Cursor];

    /// Lower-case name used in paths and on the command line.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Tool::Cursor => "cursor",
            Tool::Windsurf => "windsurf",
        }
    }

    /// Human-facing name.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Tool::Cursor => "Cursor",
            Tool::Windsurf => "Windsurf",
        }
    }

    /// File extension of generated rule files.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Tool::Cursor => "mdc",
            Tool::Windsurf => "md",
        }
    }

    /// Flag that forces this tool at install time.
    #[must_use]
    pub fn flag(self) -> &'static str {
        match self {
            Tool::Cursor => "--cursor",
            Tool::Windsurf => "--windsurf",
        }
    }

    /// Paths whose presence in a project marks this tool as in use.
    #[must_use]
    pub fn markers(self) -> &'static [&'static str] {
        match self {
            Tool::Cursor => &[".cursor", ".cursorrules"],
            Tool::Windsurf => &[".windsurf"],
        }
    }

    /// Rules directory inside a consuming project.
    #[must_use]
    pub fn install_dir(self, project: &Path) -> PathBuf {
        project.join(format!(".{}", self.name())).join("rules")
    }

    /// Generated tree for this tool inside the rules repository.
    #[must_use]
    pub fn rules_dir(self, root: &Path) -> PathBuf {
        root.join("rules").join(self.name())
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_per_tool() {
        let root = Path::new("/repo");
        assert_eq!(Tool::Cursor.rules_dir(root), PathBuf::from("/repo/rules/cursor"));
        assert_eq!(Tool::Windsurf.install_dir(root), PathBuf::from("/repo/.windsurf/rules"));
        assert_eq!(Tool::Cursor.extension(), "mdc");
        assert_eq!(Tool::Windsurf.extension(), "md");
    }

    #[test]
    fn default_is_windsurf() {
        assert_eq!(NON_INTERACTIVE_DEFAULT, Tool::Windsurf);
        assert_eq!(Tool::Cursor.flag(), "--cursor");
    }
}
