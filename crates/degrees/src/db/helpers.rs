//! Helper functions for database row conversion and parsing.
//!
//! These utilities convert between database representations and domain types.
//! Also provides SQL column list constants to reduce duplication across query modules.

use crate::types::{Person, PersonId, Work, WorkId};

/// SQL column list for people table.
///
/// Use with `row_to_person` for consistent column ordering.
pub(crate) const PEOPLE_COLUMNS: &str = "id, name, birth_year, death_year, known_for";

/// SQL column list for works table.
///
/// Use with `row_to_work` for consistent column ordering.
pub(crate) const WORKS_COLUMNS: &str =
    "id, title, year, category, is_adult, runtime_minutes, genres";

/// Convert a row selected with `PEOPLE_COLUMNS` into a `Person`.
pub(crate) fn row_to_person(row: &rusqlite::Row<'_>) -> rusqlite::Result<Person> {
    let known_for: Option<String> = row.get(4)?;

    Ok(Person {
        id: PersonId(row.get(0)?),
        name: row.get(1)?,
        birth_year: row.get(2)?,
        death_year: row.get(3)?,
        known_for: known_for
            .as_deref()
            .map(parse_id_list)
            .transpose()?
            .unwrap_or_default(),
    })
}

/// Convert a row selected with `WORKS_COLUMNS` into a `Work`.
pub(crate) fn row_to_work(row: &rusqlite::Row<'_>) -> rusqlite::Result<Work> {
    let genres: Option<String> = row.get(6)?;

    Ok(Work {
        id: WorkId(row.get(0)?),
        title: row.get(1)?,
        year: row.get(2)?,
        category: row.get(3)?,
        is_adult: row.get::<_, i64>(4)? != 0,
        runtime_minutes: row.get(5)?,
        genres: genres.as_deref().map(split_list).unwrap_or_default(),
    })
}

/// Parse a comma-separated list of work ids stored in `people.known_for`.
///
/// Returns an error for non-numeric entries, indicating possible database corruption.
pub(crate) fn parse_id_list(s: &str) -> rusqlite::Result<Vec<WorkId>> {
    split_list(s)
        .into_iter()
        .map(|item| {
            item.parse::<i64>().map(WorkId).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    4,
                    rusqlite::types::Type::Text,
                    format!("Invalid work id '{item}' in known_for: {e}").into(),
                )
            })
        })
        .collect()
}

/// Split a comma-separated column into trimmed, non-empty items.
pub(crate) fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join items back into the comma-separated storage form.
///
/// Empty input is stored as `NULL`.
pub(crate) fn join_list<T: ToString>(items: &[T]) -> Option<String> {
    if items.is_empty() {
        return None;
    }
    Some(
        items
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(","),
    )
}
