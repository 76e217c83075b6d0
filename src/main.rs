mod commands;
mod navgator;
mod parser;
mod policy;
mod probe;
mod scanner;

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::LevelFilter;

const LOG_ENV: &str = "NAVTAGS_LOG";

#[derive(Parser)]
#[command(
    name = "navtags",
    about = "Keep the tags array of per-repository .navgator.toml files up to date"
)]
struct Cli {
    /// Log skipped candidates and probe failures
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Tag every repository with its primary language (lang/<name>)
    Lang,
    /// Tag organisation-owned repositories with their owner (org/<name>)
    Org,
    /// Print the tags of a directory (defaults to the current one)
    Show { path: Option<PathBuf> },
    /// Add tags to a directory's .navgator.toml, completing each against
    /// tags already in use
    Add {
        #[arg(required = true)]
        tags: Vec<String>,
        /// Directory to edit instead of the current one
        #[arg(long)]
        path: Option<PathBuf>,
        /// Store tags exactly as typed
        #[arg(long)]
        exact: bool,
    },
    /// Remove tags from a directory's .navgator.toml
    Remove {
        #[arg(required = true)]
        tags: Vec<String>,
        /// Directory to edit instead of the current one
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// List candidate repositories with their tags
    List {
        /// Filter: @folder, #tag or a bare word matching either
        query: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match cli.command {
        Command::Lang => commands::lang::run(),
        Command::Org => commands::org::run(),
        Command::Show { path } => commands::show::run(path),
        Command::Add { tags, path, exact } => commands::edit::run_add(&tags, path, exact),
        Command::Remove { tags, path } => commands::edit::run_remove(&tags, path),
        Command::List { query } => commands::list::run(&query.join(" ")),
    }
}

/// Warnings by default; `NAVTAGS_LOG` takes env_logger filter syntax and
/// `--verbose` forces debug.
fn init_logger(verbose: bool) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(LevelFilter::Warn);
    if let Ok(spec) = std::env::var(LOG_ENV) {
        builder.parse_filters(&spec);
    }
    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.format(|buf, record| {
        writeln!(
            buf,
            "  [{}] {}",
            record.level().to_string().to_lowercase(),
            record.args()
        )
    });
    builder.init();
}
