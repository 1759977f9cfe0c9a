//! `degrees person` command implementation.

use colored::Colorize;
use degrees::{Config, known_for_titles};

use super::display::{person_label, resolve};
use super::{CliResult, open_database};

/// Run the person command.
pub fn run(config: &Config, query: &str) -> CliResult {
    let db = open_database(config)?;
    let person = resolve(&db, query)?;

    println!("{}", person_label(&person).cyan().bold());

    let titles = known_for_titles(&db, &person)?;
    if titles.is_empty() {
        println!("  {}", "no known-for works in the database".dimmed());
    } else {
        println!("  {}:", "Known for".white().bold());
        for title in titles {
            println!("    {} {title}", "•".dimmed());
        }
    }

    Ok(())
}
