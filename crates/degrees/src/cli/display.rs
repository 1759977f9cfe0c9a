//! Common display utilities for CLI commands.

use colored::Colorize;
use degrees::{Database, LoadWarning, Person, known_for_titles, resolve_person};

const MAX_DISPLAY_ITEMS: usize = 10;

/// Name, id and life span, e.g. `Kevin Bacon (102, b. 1958)`.
pub fn person_label(person: &Person) -> String {
    match (person.birth_year, person.death_year) {
        (Some(born), Some(died)) => format!("{} ({}, {born}-{died})", person.name, person.id),
        (Some(born), None) => format!("{} ({}, b. {born})", person.name, person.id),
        _ => format!("{} ({})", person.name, person.id),
    }
}

/// Resolve a person, listing the candidates first when the name is ambiguous.
pub fn resolve(db: &Database, query: &str) -> Result<Person, degrees::Error> {
    match resolve_person(db, query) {
        Err(degrees::Error::Ambiguous { query, candidates }) => {
            print_candidates(db, &query, &candidates)?;
            Err(degrees::Error::Ambiguous { query, candidates })
        }
        other => other,
    }
}

/// List people sharing a name, with what they are known for.
fn print_candidates(
    db: &Database,
    query: &str,
    candidates: &[Person],
) -> Result<(), degrees::Error> {
    println!(
        "{} people match \"{}\":",
        candidates.len().to_string().yellow().bold(),
        query.cyan()
    );

    let (hidden, shown) = most_likely(candidates);
    if !hidden.is_empty() {
        println!("  {} ... and {} less likely", "•".dimmed(), hidden.len());
    }

    for person in shown {
        let titles = known_for_titles(db, person)?;
        if titles.is_empty() {
            println!("  {} {}", "•".dimmed(), person_label(person));
        } else {
            println!(
                "  {} {} {}",
                "•".dimmed(),
                person_label(person),
                format!("known for {}", titles.join(", ")).dimmed()
            );
        }
    }
    println!();
    Ok(())
}

/// Split candidates into the hidden head and the shown tail. Candidates are
/// ordered most likely last, so the tail is what the user wants to see.
fn most_likely(candidates: &[Person]) -> (&[Person], &[Person]) {
    candidates.split_at(candidates.len().saturating_sub(MAX_DISPLAY_ITEMS))
}

/// Print the first few load warnings and how many were left out.
pub fn print_warnings(warnings: &[LoadWarning], total: u64) {
    if total == 0 {
        return;
    }

    println!();
    println!(
        "  {}: {} malformed rows skipped",
        "Warning".yellow().bold(),
        total.to_string().yellow()
    );
    for warning in warnings.iter().take(MAX_DISPLAY_ITEMS) {
        println!("    {} {warning}", "•".dimmed());
    }

    let shown = warnings.len().min(MAX_DISPLAY_ITEMS) as u64;
    if total > shown {
        println!("    {} ... and {} more", "•".dimmed(), total - shown);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn most_likely_shows_the_tail_of_long_lists() {
        let candidates: Vec<_> = (1..=12)
            .map(|i| Person::named(i, format!("Chris {i}")))
            .collect();

        let (hidden, shown) = most_likely(&candidates);

        assert_eq!(hidden.len(), 2);
        assert_eq!(shown.len(), MAX_DISPLAY_ITEMS);
        assert_eq!(shown.last().map(|p| p.name.as_str()), Some("Chris 12"));
    }

    #[test]
    fn most_likely_shows_short_lists_whole() {
        let candidates = vec![Person::named(1, "Sam Neill"), Person::named(2, "Sam Neill")];

        let (hidden, shown) = most_likely(&candidates);

        assert!(hidden.is_empty());
        assert_eq!(shown.len(), 2);
    }
}
