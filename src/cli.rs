//! CLI module - Command-line interface definitions and handlers

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use std::io::IsTerminal as _;
use std::path::PathBuf;

use crate::check::report::ExitStatus;
use crate::core::config::CheckConfig;
use crate::core::render::{OutputFormat, RenderConfig};

/// doclinks - check the links and anchors of a Markdown documentation tree.
#[derive(Parser, Debug)]
#[command(name = "doclinks")]
#[command(
    author,
    version,
    about,
    long_about = r#"doclinks finds links between Markdown documents that point at files or
heading anchors that do not exist.

Every relative link in every document under ROOT is resolved against the
document's own directory. The target file must exist, and when the link
carries a #fragment the target document must define that anchor. External
links (http:, mailto:, ...) are never fetched.

Exit codes:
- 0: no broken links
- 1: at least one broken link
- 2: the check could not run (missing root, unreadable tree, bad arguments)

Output formats:
- text: one line per broken link plus a summary (default)
- json: a single report object
- jsonl: one JSON object per finding, then the summary
- md: human-friendly Markdown tables

Examples:
    doclinks check docs
    doclinks --format json check .
    doclinks anchors docs/guide.md
    doclinks --format jsonl links docs
"#
)]
pub struct Cli {
    /// Output format (text/json/jsonl/md).
    #[arg(
        long,
        global = true,
        default_value = "text",
        value_name = "FORMAT",
        value_parser = ["text", "json", "jsonl", "md"],
        long_help = "Select the output format.\n\n\
Supported values:\n\
- text (default)\n\
- json\n\
- jsonl\n\
- md (markdown)\n\n\
Tip: Prefer json when a CI job needs to parse the report."
    )]
    pub format: String,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(
        long,
        global = true,
        long_help = "Pretty-print JSON and JSONL output with indentation for human readability.\n\n\
Has no effect on text/md formats."
    )]
    pub pretty: bool,

    /// Disable colored output.
    #[arg(
        long,
        global = true,
        long_help = "Disable colored output. Color is also disabled automatically when\n\
stdout is not a terminal."
    )]
    pub no_color: bool,

    /// Quiet mode (errors only on stderr).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Only log errors to stderr. The report itself is still printed to stdout."
    )]
    pub quiet: bool,

    /// Verbose mode (repeat for more).
    #[arg(
        short,
        long,
        global = true,
        action = ArgAction::Count,
        long_help = "Increase diagnostic output on stderr: -v for info, -vv for debug,\n\
-vvv for trace. RUST_LOG overrides this when set."
    )]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check every Markdown link under ROOT.
    #[command(
        long_about = "Load every Markdown document under ROOT, build the anchor index and\n\
report every link whose target file or anchor does not exist.\n\n\
Findings are sorted by source path, line and column, so repeated runs over\n\
the same tree produce identical output.\n\n\
Examples:\n\
  doclinks check docs\n\
  doclinks --format json check .\n\
  doclinks check . --hidden --no-ignore\n"
    )]
    Check {
        /// Root directory of the documentation tree.
        #[arg(value_name = "ROOT")]
        root: PathBuf,

        /// Include hidden files/directories (dotfiles).
        #[arg(
            long,
            long_help = "Include hidden files and directories (dotfiles).\n\n\
By default, hidden entries are skipped."
        )]
        hidden: bool,

        /// Disable .gitignore and other ignore rules.
        #[arg(
            long,
            long_help = "Disable respect for ignore files (.gitignore, .ignore, global ignores).\n\n\
Use this to check every document, even those normally ignored."
        )]
        no_ignore: bool,
    },

    /// List the headings and anchors one document defines.
    #[command(
        long_about = "Print the headings of FILE with their computed slugs, plus explicit\n\
anchors (HTML id/name attributes and {#id} heading attributes).\n\n\
Use this to find the exact fragment to link to.\n\n\
Examples:\n\
  doclinks anchors README.md\n\
  doclinks --format json anchors docs/guide.md\n"
    )]
    Anchors {
        /// Markdown file to outline.
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// List every link extracted from the documents under ROOT.
    #[command(
        long_about = "Print every link found in every Markdown document under ROOT, without\n\
checking it. External links are included and marked as such.\n\n\
Examples:\n\
  doclinks links docs\n\
  doclinks --format jsonl links .\n"
    )]
    Links {
        /// Root directory of the documentation tree.
        #[arg(value_name = "ROOT")]
        root: PathBuf,

        /// Include hidden files/directories (dotfiles).
        #[arg(long)]
        hidden: bool,

        /// Disable .gitignore and other ignore rules.
        #[arg(long)]
        no_ignore: bool,
    },
}

pub fn run(cli: Cli) -> Result<ExitStatus> {
    if cli.no_color || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }
    crate::logging::init_logging(cli.verbose, cli.quiet, cli.no_color)?;

    let format: OutputFormat = cli.format.parse().unwrap_or_default();
    let render_config = RenderConfig::with_pretty(format, cli.pretty);

    match cli.command {
        Commands::Check {
            root,
            hidden,
            no_ignore,
        } => {
            let config = CheckConfig::default()
                .with_hidden(hidden)
                .with_ignore(!no_ignore);
            crate::check::run_check(&root, config, render_config)
        }

        Commands::Anchors { file } => crate::docs::api::run_anchors(&file, render_config),

        Commands::Links {
            root,
            hidden,
            no_ignore,
        } => {
            let config = CheckConfig::default()
                .with_hidden(hidden)
                .with_ignore(!no_ignore);
            crate::docs::api::run_links(&root, config, render_config)
        }
    }
}
