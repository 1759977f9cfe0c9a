//! `SQLite` implementation of [`GraphStore`].
//!
//! Each adjacency call is a single statement. The frontier and the exclusion set
//! are bound as two `rarray()` parameters, so a layer costs one round-trip no
//! matter how many ids it carries and the host-parameter limit never applies.

use std::collections::HashSet;
use std::rc::Rc;

use rusqlite::types::Value;
use tracing::trace;

use super::{GraphStore, Link};
use crate::db::Database;
use crate::error::Result;
use crate::types::{PersonId, WorkId};

/// Works reachable from a set of people, minus already-visited works.
const WORKS_FOR_PEOPLE: &str = "SELECT work_id, person_id
     FROM appearances
     WHERE person_id IN rarray(?1)
       AND work_id NOT IN rarray(?2)";

/// People reachable from a set of works, minus already-visited people.
const PEOPLE_FOR_WORKS: &str = "SELECT person_id, work_id
     FROM appearances
     WHERE work_id IN rarray(?1)
       AND person_id NOT IN rarray(?2)";

/// Graph store backed by the `appearances` table.
///
/// Borrows the caller's [`Database`]; the store itself holds no state, so it is
/// cheap to create one per search.
pub struct SqlGraphStore<'a> {
    db: &'a Database,
}

impl<'a> SqlGraphStore<'a> {
    /// Create a store over an open database.
    #[must_use]
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Run one adjacency statement, mapping both columns through `make`.
    fn links<N, V>(
        &self,
        sql: &str,
        frontier: impl Iterator<Item = i64>,
        excluded: impl Iterator<Item = i64>,
        make: impl Fn(i64, i64) -> Link<N, V>,
    ) -> Result<Vec<Link<N, V>>> {
        let frontier = to_array(frontier);
        if frontier.is_empty() {
            return Ok(Vec::new());
        }
        let excluded = to_array(excluded);

        let conn = self.db.connection()?;
        let mut stmt = conn.prepare_cached(sql)?;
        let links = stmt
            .query_map([frontier, excluded], |row| Ok(make(row.get(0)?, row.get(1)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(links)
    }
}

fn to_array(ids: impl Iterator<Item = i64>) -> Rc<Vec<Value>> {
    Rc::new(ids.map(Value::Integer).collect())
}

impl GraphStore for SqlGraphStore<'_> {
    fn neighbors_of_persons(
        &self,
        person_ids: &HashSet<PersonId>,
        excluded_works: &HashSet<WorkId>,
    ) -> Result<Vec<Link<WorkId, PersonId>>> {
        let links = self.links(
            WORKS_FOR_PEOPLE,
            person_ids.iter().map(|id| id.as_i64()),
            excluded_works.iter().map(|id| id.as_i64()),
            |work, person| Link::new(WorkId(work), PersonId(person)),
        )?;
        trace!(
            frontier = person_ids.len(),
            excluded = excluded_works.len(),
            links = links.len(),
            "works for people"
        );
        Ok(links)
    }

    fn neighbors_of_works(
        &self,
        work_ids: &HashSet<WorkId>,
        excluded_persons: &HashSet<PersonId>,
    ) -> Result<Vec<Link<PersonId, WorkId>>> {
        let links = self.links(
            PEOPLE_FOR_WORKS,
            work_ids.iter().map(|id| id.as_i64()),
            excluded_persons.iter().map(|id| id.as_i64()),
            |person, work| Link::new(PersonId(person), WorkId(work)),
        )?;
        trace!(
            frontier = work_ids.len(),
            excluded = excluded_persons.len(),
            links = links.len(),
            "people for works"
        );
        Ok(links)
    }

    fn person_exists(&self, id: PersonId) -> Result<bool> {
        self.db.person_exists(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Appearance, Person, Role, Work};

    /// Persons {1,2,3,4}, works {100,200}, edges (1,100),(2,100),(2,200),(3,200).
    fn setup_small_graph() -> Database {
        let db = Database::open_in_memory().unwrap();
        for (id, name) in [(1, "Ann"), (2, "Bob"), (3, "Cy"), (4, "Dee")] {
            db.insert_person(&Person::named(id, name)).unwrap();
        }
        db.insert_work(&Work::titled(100, "First")).unwrap();
        db.insert_work(&Work::titled(200, "Second")).unwrap();
        for (person, work) in [(1, 100), (2, 100), (2, 200), (3, 200)] {
            db.insert_appearance(&Appearance {
                person_id: PersonId(person),
                work_id: WorkId(work),
                role: Role::Actor,
            })
            .unwrap();
        }
        db
    }

    fn people(ids: &[i64]) -> HashSet<PersonId> {
        ids.iter().copied().map(PersonId).collect()
    }

    fn works(ids: &[i64]) -> HashSet<WorkId> {
        ids.iter().copied().map(WorkId).collect()
    }

    #[test]
    fn neighbors_of_persons_returns_every_edge() {
        let db = setup_small_graph();
        let store = SqlGraphStore::new(&db);

        let mut links = store
            .neighbors_of_persons(&people(&[1, 2]), &HashSet::new())
            .unwrap();
        links.sort();

        assert_eq!(
            links,
            vec![
                Link::new(WorkId(100), PersonId(1)),
                Link::new(WorkId(100), PersonId(2)),
                Link::new(WorkId(200), PersonId(2)),
            ]
        );
    }

    #[test]
    fn neighbors_of_persons_skips_excluded_works() {
        let db = setup_small_graph();
        let store = SqlGraphStore::new(&db);

        let links = store
            .neighbors_of_persons(&people(&[2]), &works(&[100]))
            .unwrap();

        assert_eq!(links, vec![Link::new(WorkId(200), PersonId(2))]);
    }

    #[test]
    fn neighbors_of_works_skips_excluded_people() {
        let db = setup_small_graph();
        let store = SqlGraphStore::new(&db);

        let mut links = store
            .neighbors_of_works(&works(&[100, 200]), &people(&[2]))
            .unwrap();
        links.sort();

        assert_eq!(
            links,
            vec![
                Link::new(PersonId(1), WorkId(100)),
                Link::new(PersonId(3), WorkId(200)),
            ]
        );
    }

    #[test]
    fn empty_frontier_returns_empty_result() {
        let db = setup_small_graph();
        let store = SqlGraphStore::new(&db);

        assert!(store
            .neighbors_of_persons(&HashSet::new(), &HashSet::new())
            .unwrap()
            .is_empty());
        assert!(store
            .neighbors_of_works(&HashSet::new(), &people(&[1]))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn person_without_edges_has_no_neighbors_but_exists() {
        let db = setup_small_graph();
        let store = SqlGraphStore::new(&db);

        assert!(store.person_exists(PersonId(4)).unwrap());
        assert!(!store.person_exists(PersonId(99)).unwrap());
        assert!(store
            .neighbors_of_persons(&people(&[4]), &HashSet::new())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn large_frontier_is_answered_in_one_call() {
        let db = setup_small_graph();
        let store = SqlGraphStore::new(&db);

        // Far beyond SQLite's default host-parameter limit
        let frontier: HashSet<PersonId> = (1..=50_000).map(PersonId).collect();
        let excluded: HashSet<WorkId> = (1_000..=60_000).map(WorkId).collect();

        let links = store.neighbors_of_persons(&frontier, &excluded).unwrap();
        assert_eq!(links.len(), 4);
    }
}
