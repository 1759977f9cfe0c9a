//! `degrees clean` command implementation.

use colored::Colorize;
use degrees::Config;
use degrees::ingest::clean;

use super::{CliResult, open_database};

/// Run the clean command.
pub fn run(config: &Config) -> CliResult {
    let db = open_database(config)?;
    let stats = clean(&db, &config.clean)?;

    println!("{}", "Removed".cyan().bold());
    println!(
        "  {}: {} total",
        "Works".white().bold(),
        stats.works_removed().to_string().green()
    );
    println!("    {}: {}", "adult".dimmed(), stats.adult_works);
    println!("    {}: {}", "category".dimmed(), stats.category_works);
    println!("    {}: {}", "too few votes".dimmed(), stats.unpopular_works);
    println!("    {}: {}", "excluded genre".dimmed(), stats.genre_works);
    println!(
        "  {}: {}",
        "People without works".white().bold(),
        stats.orphaned_people.to_string().green()
    );

    Ok(())
}
