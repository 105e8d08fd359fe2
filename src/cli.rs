//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `secrules`.
#[derive(Debug, Parser)]
#[command(name = "secrules", version, about = "Build, install, and tidy AI assistant security rules")]
pub struct Cli {
    /// Rules repository root holding `definitions/` and `rules/`.
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Log debug diagnostics to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate Cursor and Windsurf rules from `definitions/`.
    Build,
    /// Install the published rules into a project.
    Install {
        /// Install Cursor rules regardless of what is detected.
        #[arg(long, conflicts_with = "windsurf")]
        cursor: bool,
        /// Install Windsurf rules regardless of what is detected.
        #[arg(long)]
        windsurf: bool,
        /// Project to install into.
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Strip front matter from definitions and remove legacy output.
    ///
    /// Without flags both cleanups run.
    Clean {
        /// Only strip leading front matter from definitions.
        #[arg(long)]
        front_matter: bool,
        /// Only remove deprecated output directories.
        #[arg(long)]
        legacy: bool,
    },
}
