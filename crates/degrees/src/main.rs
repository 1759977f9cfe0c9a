//! Degrees CLI - shortest collaboration paths from the command line.
//!
//! Loads a film dataset into `SQLite` and answers "how are these two people
//! connected" with the shortest chain of shared works.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use colored::Colorize;
use degrees::Config;
use tracing_subscriber::EnvFilter;

mod cli;

/// Degrees: shortest collaboration paths between people.
#[derive(Parser)]
#[command(name = "degrees")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (defaults to ./degrees.yaml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Database file (overrides the configuration)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the tab-separated dataset files from a directory
    Load {
        /// Directory holding title.basics.tsv, title.ratings.tsv, name.basics.tsv
        /// and title.principals.tsv
        #[arg(long, default_value = ".")]
        dir: PathBuf,

        /// Rows per transaction (overrides the configuration)
        #[arg(long)]
        batch_size: Option<usize>,
    },

    /// Delete works and people excluded by the clean rules
    Clean,

    /// Look up a person by id or name
    Person {
        /// Person id, or a name matched as whole words
        query: String,
    },

    /// Find the shortest collaboration path between two people
    Path {
        /// Starting person (id or name)
        from: String,

        /// Target person (id or name)
        to: String,

        /// Longest path to search, in edges (overrides the configuration)
        #[arg(long)]
        max_depth: Option<u32>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show database statistics
    Stats,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => return report(&e.into()),
    };

    // Run the appropriate command
    let result = match cli.command {
        Commands::Load { dir, batch_size } => cli::load::run(&config, &dir, batch_size),
        Commands::Clean => cli::clean::run(&config),
        Commands::Person { query } => cli::person::run(&config, &query),
        Commands::Path {
            from,
            to,
            max_depth,
            json,
        } => cli::path::run(&config, &from, &to, max_depth, json),
        Commands::Stats => cli::stats::run(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => report(&e),
    }
}

/// Resolve the configuration and apply command-line overrides.
fn load_config(cli: &Cli) -> degrees::Result<Config> {
    let cwd = std::env::current_dir()?;
    let mut config = Config::discover(cli.config.as_deref(), &cwd)?;
    if let Some(database) = &cli.database {
        config.database.clone_from(database);
    }
    config.validate()?;
    Ok(config)
}

fn report(e: &cli::CliError) -> ExitCode {
    eprintln!("{}: {e}", "error".red().bold());
    for cause in hidden_causes(e) {
        eprintln!("  {}: {cause}", "caused by".dimmed());
    }
    ExitCode::FAILURE
}

/// Messages in the cause chain that the top-level message does not already
/// spell out. Wrappers that format their source inline add nothing new.
fn hidden_causes(e: &dyn std::error::Error) -> Vec<String> {
    let mut shown = e.to_string();
    let mut causes = Vec::new();
    let mut source = e.source();
    while let Some(cause) = source {
        let message = cause.to_string();
        if !shown.contains(&message) {
            shown.push('\n');
            shown.push_str(&message);
            causes.push(message);
        }
        source = cause.source();
    }
    causes
}

#[cfg(test)]
mod tests {
    use super::*;
    use degrees::{Error, SearchError};

    #[test]
    fn inline_store_error_is_not_repeated() {
        let e = cli::CliError::from(SearchError::Store(Error::Internal(
            "disk I/O error".to_string(),
        )));

        assert!(e.to_string().contains("disk I/O error"));
        assert!(hidden_causes(&e).is_empty());
    }

    #[derive(Debug, thiserror::Error)]
    #[error("load failed")]
    struct Opaque(#[source] std::io::Error);

    #[test]
    fn cause_missing_from_message_is_listed() {
        let e = Opaque(std::io::Error::other("truncated stream"));

        assert_eq!(hidden_causes(&e), vec!["truncated stream".to_string()]);
    }
}
