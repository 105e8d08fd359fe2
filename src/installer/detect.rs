//! Decides which tool's rules to install into a project.

use std::path::{Path, PathBuf};

use crate::context::ServiceContext;
use crate::rules::tool::{Tool, NON_INTERACTIVE_DEFAULT};

const MENU: &str = "Which AI coding assistant do you use?\n  1) Cursor\n  2) Windsurf\nEnter choice [1-2]: ";

/// How the tool was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// `--cursor` or `--windsurf` was given.
    Flag,
    /// A marker file or directory exists in the project.
    Marker(PathBuf),
    /// The operator picked from the menu.
    Prompt,
    /// The operator's answer was not a menu entry.
    UnrecognizedAnswer(String),
    /// No terminal attached and nothing detected.
    NonInteractive,
}

/// Result of tool detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    /// The tool to install rules for.
    pub tool: Tool,
    /// Why it was chosen.
    pub source: Source,
}

/// Picks the tool for `project`.
///
/// Order: explicit flag, Cursor markers, Windsurf markers, interactive
/// prompt, then [`NON_INTERACTIVE_DEFAULT`].
#[must_use]
pub fn detect(ctx: &ServiceContext, project: &Path, forced: Option<Tool>) -> Detection {
    if let Some(tool) = forced {
        return Detection { tool, source: Source::Flag };
    }

    for tool in [Tool::Cursor, Tool::Windsurf] {
        if let Some(marker) =
            tool.markers().iter().map(|m| project.join(m)).find(|m| ctx.fs.exists(m))
        {
            return Detection { tool, source: Source::Marker(marker) };
        }
    }

    if !ctx.terminal.is_interactive() {
        return Detection { tool: NON_INTERACTIVE_DEFAULT, source: Source::NonInteractive };
    }

    match ctx.terminal.prompt(MENU) {
        Ok(answer) => match parse_choice(&answer) {
            Some(tool) => Detection { tool, source: Source::Prompt },
            None => Detection {
                tool: NON_INTERACTIVE_DEFAULT,
                source: Source::UnrecognizedAnswer(answer.trim().to_string()),
            },
        },
        Err(e) => {
            tracing::warn!(error = %e, "could not read menu answer");
            Detection { tool: NON_INTERACTIVE_DEFAULT, source: Source::UnrecognizedAnswer(String::new()) }
        }
    }
}

fn parse_choice(answer: &str) -> Option<Tool> {
    match answer.trim().to_ascii_lowercase().as_str() {
        "1" | "cursor" => Some(Tool::Cursor),
        "2" | "windsurf" => Some(Tool::Windsurf),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::test_support::{context_with, MemFs, ScriptedTerminal};

    fn context(files: &[(&str, &str)], terminal: ScriptedTerminal) -> ServiceContext {
        let mut ctx = context_with(MemFs::with(files));
        ctx.terminal = Box::new(terminal);
        ctx
    }

    #[test]
    fn flag_beats_markers() {
        let ctx = context(&[("/p/.windsurf/rules/x.md", "")], ScriptedTerminal::new(false, &[]));
        let detection = detect(&ctx, Path::new("/p"), Some(Tool::Cursor));
        assert_eq!(detection, Detection { tool: Tool::Cursor, source: Source::Flag });
    }

    #[test]
    fn cursorrules_file_marks_cursor() {
        let ctx = context(
            &[("/p/.cursorrules", "rules"), ("/p/.windsurf/rules/x.md", "")],
            ScriptedTerminal::new(false, &[]),
        );
        let detection = detect(&ctx, Path::new("/p"), None);
        assert_eq!(detection.tool, Tool::Cursor);
        assert_eq!(detection.source, Source::Marker(PathBuf::from("/p/.cursorrules")));
    }

    #[test]
    fn windsurf_directory_marks_windsurf() {
        let ctx = context(&[("/p/.windsurf/rules/x.md", "")], ScriptedTerminal::new(true, &[]));
        assert_eq!(detect(&ctx, Path::new("/p"), None).tool, Tool::Windsurf);
    }

    #[test]
    fn prompt_answer_selects_tool() {
        let terminal = Arc::new(ScriptedTerminal::new(true, &["1\n"]));
        let mut ctx = context(&[], ScriptedTerminal::new(true, &[]));
        ctx.terminal = Box::new(Arc::clone(&terminal));

        let detection = detect(&ctx, Path::new("/p"), None);

        assert_eq!(detection, Detection { tool: Tool::Cursor, source: Source::Prompt });
        assert!(terminal.prompts.lock().unwrap()[0].contains("1) Cursor"));
    }

    #[test]
    fn unrecognized_answer_falls_back_to_default() {
        let ctx = context(&[], ScriptedTerminal::new(true, &["7"]));
        let detection = detect(&ctx, Path::new("/p"), None);
        assert_eq!(detection.tool, NON_INTERACTIVE_DEFAULT);
        assert_eq!(detection.source, Source::UnrecognizedAnswer("7".into()));
    }

    #[test]
    fn non_interactive_uses_default() {
        let ctx = context(&[], ScriptedTerminal::new(false, &[]));
        let detection = detect(&ctx, Path::new("/p"), None);
        assert_eq!(detection, Detection { tool: Tool::Windsurf, source: Source::NonInteractive });
    }
}
