//! `degrees stats` command implementation.

use colored::Colorize;
use degrees::Config;

use super::{CliResult, open_database};

/// Run the stats command.
pub fn run(config: &Config) -> CliResult {
    let db = open_database(config)?;

    let db_path = &config.database;
    let db_size_str = match std::fs::metadata(db_path) {
        Ok(meta) => format_size(meta.len()),
        Err(e) => {
            tracing::debug!(error = %e, "Failed to get database file size");
            "size unknown".to_string()
        }
    };

    let stats = db.stats()?;

    println!("{}", "Degrees Database Statistics".cyan().bold());
    println!();
    println!(
        "  {}: {} ({})",
        "Database".white().bold(),
        db_path.display(),
        db_size_str
    );
    println!();

    for (label, count) in [
        ("People", stats.people),
        ("Works", stats.works),
        ("Appearances", stats.appearances),
        ("Ratings", stats.ratings),
    ] {
        println!("  {}: {}", label.white().bold(), count.to_string().green());
    }

    if stats.appearances == 0 {
        println!();
        println!(
            "{}: The graph has no edges. Run '{}' to load a dataset.",
            "hint".dimmed(),
            "degrees load".cyan()
        );
    }

    Ok(())
}

#[allow(clippy::cast_precision_loss)]
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}
