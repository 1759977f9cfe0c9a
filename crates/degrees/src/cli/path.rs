//! `degrees path` command implementation.

use colored::Colorize;
use degrees::{
    CollaborationPath, Config, PathStep, Person, SearchError, SearchReport, SearchStats,
    SqlGraphStore, describe_path, find_shortest_path_with,
};
use serde::Serialize;

use super::display::{person_label, resolve};
use super::{CliResult, open_database};

/// JSON shape of a path answer.
#[derive(Serialize)]
struct PathOutput<'a> {
    source: &'a Person,
    target: &'a Person,
    connected: bool,
    degrees: Option<usize>,
    path: Option<&'a CollaborationPath>,
    steps: &'a [PathStep],
    stats: Option<SearchStats>,
}

/// Run the path command.
pub fn run(
    config: &Config,
    from: &str,
    to: &str,
    max_depth: Option<u32>,
    json: bool,
) -> CliResult {
    let db = open_database(config)?;
    let source = resolve(&db, from)?;
    let target = resolve(&db, to)?;

    let mut options = config.search.options();
    if let Some(depth) = max_depth {
        options = options.with_max_depth(depth);
    }

    let store = SqlGraphStore::new(&db);
    let report = match find_shortest_path_with(source.id, target.id, &store, &options) {
        Ok(report) => report,
        Err(SearchError::NoPath { .. }) => {
            if json {
                print_json(&PathOutput {
                    source: &source,
                    target: &target,
                    connected: false,
                    degrees: None,
                    path: None,
                    steps: &[],
                    stats: None,
                })?;
            } else {
                println!(
                    "{} and {} are not connected.",
                    person_label(&source).cyan(),
                    person_label(&target).cyan()
                );
            }
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let steps = describe_path(&db, &report.path)?;

    if json {
        print_json(&PathOutput {
            source: &source,
            target: &target,
            connected: true,
            degrees: Some(report.path.degrees()),
            path: Some(&report.path),
            steps: &steps,
            stats: Some(report.stats),
        })?;
    } else {
        print_report(&source, &target, &report, &steps);
    }

    Ok(())
}

fn print_json(output: &PathOutput<'_>) -> CliResult {
    println!("{}", serde_json::to_string_pretty(output)?);
    Ok(())
}

fn print_report(source: &Person, target: &Person, report: &SearchReport, steps: &[PathStep]) {
    let degrees = report.path.degrees();
    let unit = if degrees == 1 { "degree" } else { "degrees" };

    println!(
        "{} {} {}: {} {unit} of separation",
        source.name.cyan().bold(),
        "→".dimmed(),
        target.name.cyan().bold(),
        degrees.to_string().green().bold()
    );
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}. {}", i + 1, step.sentence);
        if let Some(rating) = step.rating {
            if let (Some(average), Some(votes)) = (rating.average, rating.votes) {
                println!(
                    "     {}",
                    format!("rated {average:.1} from {votes} votes").dimmed()
                );
            }
        }
    }
    if !steps.is_empty() {
        println!();
    }

    println!(
        "  {}",
        format!(
            "searched {} layers, {} nodes, {} queries",
            report.stats.layers, report.stats.discovered, report.stats.queries
        )
        .dimmed()
    );
}
