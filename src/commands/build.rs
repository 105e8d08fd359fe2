//! `secrules build` command.

use crate::builder::Builder;
use crate::config::Settings;
use crate::context::ServiceContext;

/// Execute the `build` command.
///
/// # Errors
///
/// Returns an error string if `definitions/` is missing or any definition
/// cannot be read or written.
pub fn run(ctx: &ServiceContext, settings: &Settings) -> Result<(), String> {
    let report = Builder::new(ctx, settings).build().map_err(|e| e.to_string())?;

    for path in &report.written {
        let shown = path.strip_prefix(&settings.root).unwrap_or(path);
        println!("  {}", shown.display());
    }
    println!("Built {} rules ({} files)", report.definitions, report.written.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::test_support::{context_with, MemFs};

    #[test]
    fn build_command_writes_rules() {
        let ctx = context_with(MemFs::with(&[("/r/definitions/ai/security-llm.md", "# LLM\n")]));
        let settings = Settings::defaults(Path::new("/r"));

        run(&ctx, &settings).unwrap();

        assert!(ctx.fs.exists(Path::new("/r/rules/cursor/ai/security-llm.mdc")));
        assert!(ctx.fs.exists(Path::new("/r/rules/windsurf/ai/security-llm.md")));
    }

    #[test]
    fn build_command_reports_missing_definitions() {
        let ctx = context_with(MemFs::default());
        let settings = Settings::defaults(Path::new("/r"));

        let err = run(&ctx, &settings).unwrap_err();
        assert_eq!(err, "Definitions directory not found: /r/definitions");
    }
}
