// Clinical note editor core: snippet templates, placeholder expansion,
// debounced autosave and the command-line front end.

// Enable coverage attribute on nightly for explicit exclusions
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod autosave;
pub mod commands;
pub mod config;
pub mod editor;
pub mod events;
pub mod paths;
pub mod session;
pub mod snippets;
pub mod storage;
pub mod util;

use clap::Parser;
use tracing_subscriber::EnvFilter;

// Re-export log macros for use throughout the crate
pub use log::{debug, error, info, trace, warn};

/// Command-line entry point: installs logging, parses arguments and runs the command.
/// Note: This function cannot be unit tested as it reads process arguments.
#[cfg_attr(coverage_nightly, coverage(off))]
pub fn run() -> anyhow::Result<()> {
    // Log records go to stderr so command output stays clean on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = commands::Cli::parse();
    debug!("Parsed arguments: {:?}", cli);
    commands::execute(cli)
}
