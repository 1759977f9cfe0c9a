//! Person CRUD and name search.

use rusqlite::{params, Connection, OptionalExtension};

use super::Database;
use super::helpers::{PEOPLE_COLUMNS, join_list, row_to_person};
use crate::error::Result;
use crate::types::{Person, PersonId};

/// Insert a person, ignoring ids that already exist.
///
/// Returns `true` if a row was inserted.
pub(crate) fn insert_person(conn: &Connection, person: &Person) -> rusqlite::Result<bool> {
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO people (id, name, birth_year, death_year, known_for)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            person.id.as_i64(),
            person.name,
            person.birth_year,
            person.death_year,
            join_list(&person.known_for),
        ],
    )?;
    Ok(inserted > 0)
}

/// Whether a person row exists. Usable inside an open transaction.
pub(crate) fn person_id_exists(conn: &Connection, id: PersonId) -> rusqlite::Result<bool> {
    let mut stmt = conn.prepare_cached("SELECT 1 FROM people WHERE id = ?1")?;
    stmt.exists([id.as_i64()])
}

/// Escape `LIKE` wildcards so user input matches literally.
fn escape_like(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

impl Database {
    /// Insert a person, ignoring ids that already exist.
    pub fn insert_person(&self, person: &Person) -> Result<bool> {
        let conn = self.connection()?;
        Ok(insert_person(&conn, person)?)
    }

    /// Get a person by ID.
    pub fn get_person(&self, id: PersonId) -> Result<Option<Person>> {
        let conn = self.connection()?;
        let person = conn
            .query_row(
                &format!("SELECT {PEOPLE_COLUMNS} FROM people WHERE id = ?1"),
                [id.as_i64()],
                row_to_person,
            )
            .optional()?;
        Ok(person)
    }

    /// Check whether a person exists. Reads only the `people` table.
    pub fn person_exists(&self, id: PersonId) -> Result<bool> {
        let conn = self.connection()?;
        Ok(person_id_exists(&conn, id)?)
    }

    /// Find people whose name contains `query` as whole words, ignoring case.
    ///
    /// Results are ordered by the length of their known-for list (shortest first)
    /// and then by id, so the best-known candidates come last. When more than
    /// `limit` people match, the least-known ones are dropped.
    pub fn find_people_by_name(&self, query: &str, limit: usize) -> Result<Vec<Person>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let conn = self.connection()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {PEOPLE_COLUMNS} FROM people
             WHERE name = ?1 COLLATE NOCASE
                OR name LIKE ?2 || ' %' ESCAPE '\\'
                OR name LIKE '% ' || ?2 ESCAPE '\\'
                OR name LIKE '% ' || ?2 || ' %' ESCAPE '\\'
             ORDER BY LENGTH(COALESCE(known_for, '')) DESC, id DESC
             LIMIT ?3"
        ))?;

        // The limit keeps the best-known matches; the result lists them last
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut people = stmt
            .query_map(params![query, escape_like(query), limit], row_to_person)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        people.reverse();

        Ok(people)
    }
}
