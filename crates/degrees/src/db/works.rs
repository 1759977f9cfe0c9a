//! Work CRUD.

use std::collections::HashMap;
use std::rc::Rc;

use rusqlite::types::Value;
use rusqlite::{params, Connection, OptionalExtension};

use super::Database;
use super::helpers::{WORKS_COLUMNS, join_list, row_to_work};
use crate::error::Result;
use crate::types::{Work, WorkId};

/// Insert a work, ignoring ids that already exist.
///
/// Returns `true` if a row was inserted.
pub(crate) fn insert_work(conn: &Connection, work: &Work) -> rusqlite::Result<bool> {
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO works (id, title, year, category, is_adult, runtime_minutes, genres)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            work.id.as_i64(),
            work.title,
            work.year,
            work.category,
            i64::from(work.is_adult),
            work.runtime_minutes,
            join_list(&work.genres),
        ],
    )?;
    Ok(inserted > 0)
}

/// Whether a work row exists. Usable inside an open transaction.
pub(crate) fn work_id_exists(conn: &Connection, id: WorkId) -> rusqlite::Result<bool> {
    let mut stmt = conn.prepare_cached("SELECT 1 FROM works WHERE id = ?1")?;
    stmt.exists([id.as_i64()])
}

impl Database {
    /// Insert a work, ignoring ids that already exist.
    pub fn insert_work(&self, work: &Work) -> Result<bool> {
        let conn = self.connection()?;
        Ok(insert_work(&conn, work)?)
    }

    /// Get a work by ID.
    pub fn get_work(&self, id: WorkId) -> Result<Option<Work>> {
        let conn = self.connection()?;
        let work = conn
            .query_row(
                &format!("SELECT {WORKS_COLUMNS} FROM works WHERE id = ?1"),
                [id.as_i64()],
                row_to_work,
            )
            .optional()?;
        Ok(work)
    }

    /// Look up titles for a batch of works in one query.
    ///
    /// Ids with no matching work are absent from the map.
    pub fn get_titles(&self, ids: &[WorkId]) -> Result<HashMap<WorkId, String>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let conn = self.connection()?;
        let array: Rc<Vec<Value>> =
            Rc::new(ids.iter().map(|id| Value::Integer(id.as_i64())).collect());

        let mut stmt = conn.prepare("SELECT id, title FROM works WHERE id IN rarray(?1)")?;
        let titles = stmt
            .query_map([array], |row| Ok((WorkId(row.get(0)?), row.get(1)?)))?
            .collect::<std::result::Result<HashMap<_, _>, _>>()?;

        Ok(titles)
    }
}
