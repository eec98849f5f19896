//! doclinks - A link and anchor checker for Markdown documentation trees
//!
//! doclinks provides:
//! - Document loading with .gitignore-aware walking
//! - GitHub-style heading slugs and explicit anchors
//! - Broken file and broken anchor detection for relative links
//! - Unified output format (text/json/jsonl/md)

use clap::Parser;
use std::process::ExitCode;

mod check;
mod cli;
mod core;
mod docs;
mod logging;

use check::report::ExitStatus;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    match cli::run(cli) {
        Ok(status) => status.into(),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitStatus::Error.into()
        }
    }
}
