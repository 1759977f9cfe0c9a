//! Appearance edge CRUD.

use rusqlite::{params, Connection, OptionalExtension};

use super::Database;
use crate::error::Result;
use crate::types::{Appearance, PersonId, Role, WorkId};

/// Insert an appearance edge.
///
/// The `(person_id, work_id)` pair is unique; a second role for the same pair
/// is ignored and `false` is returned.
pub(crate) fn insert_appearance(
    conn: &Connection,
    appearance: &Appearance,
) -> rusqlite::Result<bool> {
    let inserted = conn.execute(
        "INSERT OR IGNORE INTO appearances (person_id, work_id, role) VALUES (?1, ?2, ?3)",
        params![
            appearance.person_id.as_i64(),
            appearance.work_id.as_i64(),
            appearance.role.as_str(),
        ],
    )?;
    Ok(inserted > 0)
}

impl Database {
    /// Insert an appearance edge. Both endpoints must already exist.
    pub fn insert_appearance(&self, appearance: &Appearance) -> Result<bool> {
        let conn = self.connection()?;
        Ok(insert_appearance(&conn, appearance)?)
    }

    /// The role a person had on a work, or `None` if they share no edge.
    pub fn get_role(&self, person_id: PersonId, work_id: WorkId) -> Result<Option<Role>> {
        let conn = self.connection()?;
        let role: Option<String> = conn
            .query_row(
                "SELECT role FROM appearances WHERE person_id = ?1 AND work_id = ?2",
                [person_id.as_i64(), work_id.as_i64()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(role.map(Role::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Person, Work};

    fn appearance(person: i64, work: i64, role: Role) -> Appearance {
        Appearance {
            person_id: PersonId(person),
            work_id: WorkId(work),
            role,
        }
    }

    #[test]
    fn first_role_wins_for_duplicate_pair() {
        let db = Database::open_in_memory().unwrap();
        db.insert_person(&Person::named(1, "Kevin Bacon")).unwrap();
        db.insert_work(&Work::titled(100, "Footloose")).unwrap();

        assert!(db.insert_appearance(&appearance(1, 100, Role::Actor)).unwrap());
        assert!(!db.insert_appearance(&appearance(1, 100, Role::Producer)).unwrap());

        assert_eq!(db.get_role(PersonId(1), WorkId(100)).unwrap(), Some(Role::Actor));
        assert_eq!(db.get_role(PersonId(1), WorkId(200)).unwrap(), None);
    }

    #[test]
    fn edge_to_missing_work_is_rejected() {
        let db = Database::open_in_memory().unwrap();
        db.insert_person(&Person::named(1, "Kevin Bacon")).unwrap();

        assert!(db.insert_appearance(&appearance(1, 404, Role::Actor)).is_err());
    }

    #[test]
    fn deleting_work_cascades_to_edges() {
        let db = Database::open_in_memory().unwrap();
        db.insert_person(&Person::named(1, "Kevin Bacon")).unwrap();
        db.insert_work(&Work::titled(100, "Footloose")).unwrap();
        db.insert_appearance(&appearance(1, 100, Role::Actor)).unwrap();

        db.connection()
            .unwrap()
            .execute("DELETE FROM works WHERE id = 100", [])
            .unwrap();

        assert_eq!(db.stats().unwrap().appearances, 0);
    }
}
