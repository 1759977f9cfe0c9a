//! `SQLite` storage layer for the collaboration graph.
//!
//! `SQLite` is the source of truth for people, works, appearances and ratings.
//! The search engine never loads the graph; it issues one batched adjacency query
//! per layer through [`crate::store::SqlGraphStore`], which borrows a [`Database`].
//!
//! ## Module Structure
//!
//! - `schema` - Database schema (DDL)
//! - `helpers` - Row conversion and parsing utilities
//! - `people` - Person CRUD and name search
//! - `works` - Work CRUD
//! - `appearances` - Appearance edge CRUD
//! - `ratings` - Rating CRUD

mod appearances;
mod helpers;
mod people;
mod ratings;
mod schema;
mod works;

pub(crate) use appearances::insert_appearance;
pub(crate) use helpers::split_list;
pub(crate) use people::{insert_person, person_id_exists};
pub(crate) use ratings::insert_rating;
pub(crate) use works::{insert_work, work_id_exists};

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use rusqlite::Connection;
use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use schema::{REQUIRED_TABLES, SCHEMA};

/// Row counts for each table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DatabaseStats {
    /// Number of people
    pub people: u64,
    /// Number of works
    pub works: u64,
    /// Number of appearance edges
    pub appearances: u64,
    /// Number of rated works
    pub ratings: u64,
}

/// `SQLite` database wrapper for the collaboration graph.
///
/// The connection is wrapped in a `Mutex` so a search holds it exclusively for
/// each statement; concurrent searches sharing one `Database` never interleave
/// statements on the same connection.
pub struct Database {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl Database {
    /// Open or create the database file.
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        debug!(path = %path.display(), "Opened database");
        Self::init(conn, Some(path.to_path_buf()))
    }

    /// Open a private in-memory database. Used for tests and fixtures.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?, None)
    }

    fn init(conn: Connection, path: Option<PathBuf>) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.execute_batch(SCHEMA)?;

        // Registers `rarray()`, used to bind whole frontiers as one parameter
        rusqlite::vtab::array::load_module(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
            path,
        })
    }

    /// Path of the backing file, `None` for in-memory databases.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Acquire the connection lock.
    ///
    /// Returns a `MutexGuard` providing exclusive access to the underlying connection.
    /// Used internally by all database operations.
    pub(crate) fn connection(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| {
            Error::Internal(format!(
                "database connection mutex poisoned (a thread panicked while holding the lock): {e}"
            ))
        })
    }

    /// Verify every mandatory table exists.
    ///
    /// `open` applies the schema, so this only fails for databases whose tables
    /// were dropped or renamed by something else.
    pub fn check_schema(&self) -> Result<()> {
        let conn = self.connection()?;
        let mut stmt =
            conn.prepare("SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1")?;

        for table in REQUIRED_TABLES {
            if !stmt.exists([table])? {
                return Err(Error::Config(format!(
                    "mandatory table '{table}' not found in database"
                )));
            }
        }

        Ok(())
    }

    /// Count the rows of every table.
    // Row counts are never negative
    #[allow(clippy::cast_sign_loss)]
    pub fn stats(&self) -> Result<DatabaseStats> {
        let conn = self.connection()?;
        let count = |table: &str| -> Result<u64> {
            let n: i64 = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                row.get(0)
            })?;
            Ok(n as u64)
        };

        Ok(DatabaseStats {
            people: count("people")?,
            works: count("works")?,
            appearances: count("appearances")?,
            ratings: count("ratings")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_in_memory_applies_schema() {
        let db = Database::open_in_memory().unwrap();

        db.check_schema().unwrap();
        assert_eq!(db.stats().unwrap(), DatabaseStats::default());
        assert!(db.path().is_none());
    }

    #[test]
    fn open_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("graph.db");

        let db = Database::open(&path).unwrap();

        assert!(path.exists());
        assert_eq!(db.path(), Some(path.as_path()));
    }

    #[test]
    fn check_schema_reports_missing_table() {
        let db = Database::open_in_memory().unwrap();
        db.connection()
            .unwrap()
            .execute_batch("DROP TABLE ratings")
            .unwrap();

        let err = db.check_schema().unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("ratings")));
    }

    #[test]
    fn reopening_file_keeps_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.db");

        {
            let db = Database::open(&path).unwrap();
            db.insert_person(&crate::types::Person::named(1, "Kevin Bacon"))
                .unwrap();
        }

        let db = Database::open(&path).unwrap();
        assert_eq!(db.stats().unwrap().people, 1);
    }
}
