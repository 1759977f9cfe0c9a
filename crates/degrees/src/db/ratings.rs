//! Rating CRUD.

use rusqlite::{params, Connection, OptionalExtension};

use super::Database;
use crate::error::Result;
use crate::types::{Rating, WorkId};

/// Insert or replace the rating of a work.
pub(crate) fn insert_rating(conn: &Connection, rating: &Rating) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO ratings (work_id, average, votes) VALUES (?1, ?2, ?3)",
        params![rating.work_id.as_i64(), rating.average, rating.votes],
    )?;
    Ok(())
}

impl Database {
    /// Insert or replace the rating of a work.
    pub fn insert_rating(&self, rating: &Rating) -> Result<()> {
        let conn = self.connection()?;
        Ok(insert_rating(&conn, rating)?)
    }

    /// Get the rating of a work, if it has one.
    pub fn get_rating(&self, work_id: WorkId) -> Result<Option<Rating>> {
        let conn = self.connection()?;
        let rating = conn
            .query_row(
                "SELECT work_id, average, votes FROM ratings WHERE work_id = ?1",
                [work_id.as_i64()],
                |row| {
                    Ok(Rating {
                        work_id: WorkId(row.get(0)?),
                        average: row.get(1)?,
                        votes: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(rating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Work;

    #[test]
    fn rating_round_trips_and_replaces() {
        let db = Database::open_in_memory().unwrap();
        db.insert_work(&Work::titled(1, "Footloose")).unwrap();

        let mut rating = Rating {
            work_id: WorkId(1),
            average: Some(6.6),
            votes: Some(100),
        };
        db.insert_rating(&rating).unwrap();
        rating.votes = Some(250);
        db.insert_rating(&rating).unwrap();

        assert_eq!(db.get_rating(WorkId(1)).unwrap(), Some(rating));
        assert_eq!(db.stats().unwrap().ratings, 1);
    }

    #[test]
    fn rating_for_unknown_work_violates_foreign_key() {
        let db = Database::open_in_memory().unwrap();
        let rating = Rating {
            work_id: WorkId(42),
            average: None,
            votes: None,
        };

        assert!(db.insert_rating(&rating).is_err());
    }
}
