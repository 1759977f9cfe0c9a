//! `degrees load` command implementation.

use std::path::Path;
use std::time::Instant;

use colored::Colorize;
use degrees::Config;
use degrees::ingest::{DatasetPaths, FileStats, load_dataset};

use super::display::print_warnings;
use super::{CliResult, open_database};

/// Run the load command.
pub fn run(config: &Config, dir: &Path, batch_size: Option<usize>) -> CliResult {
    let paths = DatasetPaths::in_dir(dir);
    paths.check()?;

    let db = open_database(config)?;
    let batch_size = batch_size.unwrap_or(config.ingest.batch_size);

    println!(
        "Loading dataset from {} into {}",
        dir.display().to_string().cyan(),
        config.database.display().to_string().cyan()
    );

    let started = Instant::now();
    let stats = load_dataset(&db, &paths, batch_size)?;

    println!();
    print_file("Works", &stats.works);
    print_file("Ratings", &stats.ratings);
    print_file("People", &stats.people);
    print_file("Appearances", &stats.appearances);
    print_warnings(&stats.warnings, stats.malformed());

    println!();
    println!(
        "Done in {:.1}s. Run '{}' to prune the graph before searching.",
        started.elapsed().as_secs_f64(),
        "degrees clean".cyan()
    );

    Ok(())
}

fn print_file(label: &str, stats: &FileStats) {
    println!(
        "  {}: {} loaded, {} duplicate, {} skipped",
        label.white().bold(),
        stats.inserted.to_string().green(),
        stats.duplicates,
        stats.skipped
    );
}
