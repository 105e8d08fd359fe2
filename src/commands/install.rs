//! `secrules install` command.

use std::path::Path;

use crate::config::Settings;
use crate::context::ServiceContext;
use crate::installer::{detect, Detection, Installer, Source};
use crate::rules::Tool;

/// Maps the mutually exclusive tool flags to a forced tool.
#[must_use]
pub fn forced_tool(cursor: bool, windsurf: bool) -> Option<Tool> {
    match (cursor, windsurf) {
        (true, _) => Some(Tool::Cursor),
        (false, true) => Some(Tool::Windsurf),
        (false, false) => None,
    }
}

/// Lines telling the operator how the tool was picked.
#[must_use]
pub fn detection_notices(detection: &Detection) -> Vec<String> {
    let tool = detection.tool;
    match &detection.source {
        Source::Flag | Source::Prompt => Vec::new(),
        Source::Marker(marker) => vec![format!("Detected {tool} ({})", marker.display())],
        Source::UnrecognizedAnswer(answer) => {
            vec![format!("Unrecognized choice '{answer}', defaulting to {tool}")]
        }
        Source::NonInteractive => vec![
            format!("No assistant detected, installing {tool} rules"),
            format!("Hint: use {} to install {} rules", Tool::Cursor.flag(), Tool::Cursor),
        ],
    }
}

/// Execute the `install` command.
///
/// # Errors
///
/// Returns an error string if the rules cannot be fetched or copied.
pub fn run(
    ctx: &ServiceContext,
    settings: &Settings,
    forced: Option<Tool>,
    project: &Path,
) -> Result<(), String> {
    let detection = detect(ctx, project, forced);
    let tool = detection.tool;
    for notice in detection_notices(&detection) {
        println!("{notice}");
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start runtime: {e}"))?;
    let report = runtime
        .block_on(Installer::new(ctx, settings).install(tool, project))
        .map_err(|e| e.to_string())?;

    for path in &report.installed {
        println!("  {}", path.display());
    }
    println!(
        "Installed {} {} rules into {}",
        report.installed.len(),
        report.tool,
        report.destination.display()
    );
    Ok(())
}
