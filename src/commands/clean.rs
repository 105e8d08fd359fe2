//! `secrules clean` command.

use std::path::Path;

use crate::catalog::DEFINITIONS_DIR;
use crate::cleaner::Cleaner;
use crate::config::LEGACY_DIRS;
use crate::context::ServiceContext;

/// Execute the `clean` command.
///
/// With neither flag set both cleanups run, and a missing definitions
/// directory only skips the front-matter strip.
///
/// # Errors
///
/// Returns an error string if a definition cannot be rewritten or a legacy
/// directory cannot be removed.
pub fn run(ctx: &ServiceContext, root: &Path, front_matter: bool, legacy: bool) -> Result<(), String> {
    let implied = !front_matter && !legacy;
    let (mut front_matter, legacy) = if implied { (true, true) } else { (front_matter, legacy) };
    let cleaner = Cleaner::new(ctx, root);

    if implied && !ctx.fs.is_dir(&root.join(DEFINITIONS_DIR)) {
        println!("No {DEFINITIONS_DIR} directory, skipping front-matter strip");
        front_matter = false;
    }

    if front_matter {
        let report = cleaner.strip_front_matter().map_err(|e| e.to_string())?;
        for path in &report.stripped {
            println!("  stripped {}", path.display());
        }
        println!(
            "Stripped front matter from {} of {} definitions",
            report.stripped.len(),
            report.scanned
        );
    }

    if legacy {
        let removed = cleaner
            .remove_legacy_dirs(LEGACY_DIRS, |dir| {
                println!("Removing {} ({} files):", dir.path.display(), dir.contents.len());
                for file in &dir.contents {
                    println!("  {}", file.display());
                }
            })
            .map_err(|e| e.to_string())?;
        if removed.is_empty() {
            println!("No legacy directories found");
        }
    }
    Ok(())
}
