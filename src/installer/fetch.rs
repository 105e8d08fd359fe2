//! Fetching the published rules tree into a scratch workspace.
//!
//! Two mechanisms, tried in order of preference:
//!
//! 1. a shallow, blob-less, sparse `git clone` limited to `rules/<tool>`;
//! 2. a branch archive (`.zip`) downloaded over HTTPS, from which only
//!    `rules/<tool>` is extracted.
//!
//! Either way the tool's rules end up at `<workspace>/rules/<tool>`.

use std::io::{Cursor, Read};
use std::path::{Component, Path, PathBuf};

use zip::ZipArchive;

use crate::config::Settings;
use crate::context::ServiceContext;
use crate::error::RulesError;
use crate::rules::Tool;

/// Mechanism used to obtain the rules tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Sparse checkout through the `git` CLI.
    SparseClone,
    /// Branch archive download.
    Archive,
}

/// Picks the fetch mechanism available in this environment.
///
/// # Errors
///
/// Returns [`RulesError::Environment`] when neither `git` nor archive
/// downloads are available.
pub fn choose_method(ctx: &ServiceContext) -> Result<Method, RulesError> {
    if git_available(ctx) {
        return Ok(Method::SparseClone);
    }
    if ctx.fetcher.is_available() {
        return Ok(Method::Archive);
    }
    Err(RulesError::Environment(
        "Neither git nor an HTTP downloader is available to fetch rules".to_string(),
    ))
}

fn git_available(ctx: &ServiceContext) -> bool {
    ctx.shell.run("command -v git").is_ok_and(|out| out.success())
}

/// Fetches `rules/<tool>` into `workspace` using `method`.
///
/// Returns the directory holding the tool's rules.
///
/// # Errors
///
/// Returns [`RulesError::Environment`] if git or the download fails and
/// [`RulesError::Archive`] if the archive cannot be read.
pub async fn fetch(
    ctx: &ServiceContext,
    settings: &Settings,
    tool: Tool,
    method: Method,
    workspace: &Path,
) -> Result<PathBuf, RulesError> {
    match method {
        Method::SparseClone => sparse_clone(ctx, settings, tool, workspace)?,
        Method::Archive => {
            let url = settings.archive_url();
            let bytes = ctx
                .fetcher
                .fetch(&url)
                .await
                .map_err(|e| RulesError::Environment(format!("Failed to download rules: {e}")))?;
            let written = extract_rules(ctx, &bytes, tool, workspace)?;
            tracing::debug!(written, %url, "extracted archive");
        }
    }
    Ok(tool.rules_dir(workspace))
}

fn sparse_clone(
    ctx: &ServiceContext,
    settings: &Settings,
    tool: Tool,
    workspace: &Path,
) -> Result<(), RulesError> {
    let checkout = workspace.display().to_string();
    let subtree = format!("rules/{}", tool.name());
    let commands = [
        format!(
            "git clone --quiet --depth 1 --filter=blob:none --sparse --branch {} {} {}",
            shell_quote(&settings.branch),
            shell_quote(&settings.repo_url),
            shell_quote(&checkout)
        ),
        format!("git -C {} sparse-checkout set {}", shell_quote(&checkout), shell_quote(&subtree)),
    ];

    for command in &commands {
        let out = ctx
            .shell
            .run(command)
            .map_err(|e| RulesError::Environment(format!("Failed to run git: {e}")))?;
        if !out.success() {
            return Err(RulesError::Environment(format!(
                "git exited with status {}: {}",
                out.exit_code,
                out.stderr.trim()
            )));
        }
    }
    Ok(())
}

/// Writes every file under `<top>/rules/<tool>/` in the zip `bytes` to
/// `<workspace>/rules/<tool>/`, dropping the archive's top-level directory.
///
/// Non-UTF-8 entries are skipped. Returns the number of files written.
///
/// # Errors
///
/// Returns [`RulesError::Archive`] if the archive is malformed and
/// [`RulesError::Io`] if a file cannot be written.
pub fn extract_rules(
    ctx: &ServiceContext,
    bytes: &[u8],
    tool: Tool,
    workspace: &Path,
) -> Result<usize, RulesError> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| RulesError::Archive(e.to_string()))?;
    let wanted = Path::new("rules").join(tool.name());
    let mut written = 0;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(|e| RulesError::Archive(e.to_string()))?;
        if entry.is_dir() {
            continue;
        }
        let Some(name) = entry.enclosed_name() else {
            continue;
        };
        let relative: PathBuf =
            name.components().skip(1).filter(|c| matches!(c, Component::Normal(_))).collect();
        if !relative.starts_with(&wanted) {
            continue;
        }

        let mut contents = String::new();
        if let Err(e) = entry.read_to_string(&mut contents) {
            tracing::warn!(entry = %relative.display(), error = %e, "skipping unreadable entry");
            continue;
        }
        let target = workspace.join(&relative);
        ctx.fs.write(&target, &contents).map_err(|e| RulesError::io(&target, e))?;
        written += 1;
    }
    Ok(written)
}

/// Single-quotes `value` for `sh`.
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::test_support::{context_with, zip_of, MemFs, ScriptedShell, StaticFetcher};

    #[test]
    fn prefers_git_when_present() {
        let mut ctx = context_with(MemFs::default());
        ctx.shell = Box::new(ScriptedShell::default().answering("command -v git", 0));
        ctx.fetcher = Box::new(StaticFetcher(Some(Vec::new())));
        assert_eq!(choose_method(&ctx).unwrap(), Method::SparseClone);
    }

    #[test]
    fn falls_back_to_archive_without_git() {
        let mut ctx = context_with(MemFs::default());
        ctx.shell = Box::new(ScriptedShell::default());
        ctx.fetcher = Box::new(StaticFetcher(Some(Vec::new())));
        assert_eq!(choose_method(&ctx).unwrap(), Method::Archive);
    }

    #[test]
    fn no_mechanism_is_an_environment_error() {
        let mut ctx = context_with(MemFs::default());
        ctx.shell = Box::new(ScriptedShell::default());
        ctx.fetcher = Box::new(StaticFetcher(None));
        assert!(matches!(choose_method(&ctx), Err(RulesError::Environment(_))));
    }

    #[test]
    fn sparse_clone_limits_checkout_to_tool() {
        let shell = Arc::new(ScriptedShell::default().answering("git ", 0));
        let mut ctx = context_with(MemFs::default());
        ctx.shell = Box::new(Arc::clone(&shell));
        let settings = Settings::defaults(Path::new("/r"));

        sparse_clone(&ctx, &settings, Tool::Cursor, Path::new("/tmp/ws")).unwrap();

        let commands = shell.commands.lock().unwrap();
        assert!(commands[0].starts_with("git clone --quiet --depth 1 --filter=blob:none --sparse"));
        assert!(commands[0].ends_with("'/tmp/ws'"));
        assert_eq!(commands[1], "git -C '/tmp/ws' sparse-checkout set 'rules/cursor'");
    }

    #[test]
    fn failed_clone_is_fatal() {
        let mut ctx = context_with(MemFs::default());
        ctx.shell = Box::new(ScriptedShell::default().answering("git clone", 128));
        let settings = Settings::defaults(Path::new("/r"));

        let err = sparse_clone(&ctx, &settings, Tool::Windsurf, Path::new("/tmp/ws")).unwrap_err();
        assert!(err.to_string().contains("git exited with status 128"));
    }

    #[test]
    fn extracts_only_the_tool_subtree() {
        let ctx = context_with(MemFs::default());
        let bytes = zip_of(&[
            ("security-rules-main/README.md", "readme"),
            ("security-rules-main/rules/cursor/backend/security-api.mdc", "cursor api"),
            ("security-rules-main/rules/windsurf/backend/security-api.md", "windsurf api"),
        ]);

        let written = extract_rules(&ctx, &bytes, Tool::Cursor, Path::new("/ws")).unwrap();

        assert_eq!(written, 1);
        assert_eq!(
            ctx.fs.read_to_string(Path::new("/ws/rules/cursor/backend/security-api.mdc")).unwrap(),
            "cursor api"
        );
        assert!(!ctx.fs.exists(Path::new("/ws/rules/windsurf")));
    }

    #[test]
    fn garbage_archive_is_reported() {
        let ctx = context_with(MemFs::default());
        let err = extract_rules(&ctx, b"not a zip", Tool::Cursor, Path::new("/ws")).unwrap_err();
        assert!(matches!(err, RulesError::Archive(_)));
    }

    #[test]
    fn quoting_escapes_single_quotes() {
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
    }

    #[tokio::test]
    async fn archive_fetch_lands_in_rules_dir() {
        let mut ctx = context_with(MemFs::default());
        ctx.fetcher = Box::new(StaticFetcher(Some(zip_of(&[(
            "repo-main/rules/windsurf/ai/security-llm.md",
            "# LLM\n",
        )]))));
        let settings = Settings::defaults(Path::new("/r"));

        let dir = fetch(&ctx, &settings, Tool::Windsurf, Method::Archive, Path::new("/ws"))
            .await
            .unwrap();

        assert_eq!(dir, PathBuf::from("/ws/rules/windsurf"));
        assert!(ctx.fs.exists(&dir.join("ai/security-llm.md")));
    }
}
