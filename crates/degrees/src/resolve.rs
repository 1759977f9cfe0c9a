//! Turning user input into a single person.
//!
//! Input is either a numeric person id or a name. Names are matched as whole
//! words without regard to case. A name shared by several people is reported
//! as [`Error::Ambiguous`] with the candidates, so the caller can ask for an id.

use tracing::debug;

use crate::db::Database;
use crate::error::{Error, Result};
use crate::types::{Person, PersonId};

/// Upper bound on candidates returned for an ambiguous name.
pub const MAX_CANDIDATES: usize = 50;

/// Resolve `input` to exactly one person.
///
/// A numeric input naming an existing person wins outright. Anything else,
/// including a number that is not a known id, is searched as a name.
///
/// # Errors
///
/// - [`Error::NotFound`] when nothing matches
/// - [`Error::Ambiguous`] when several people match. Candidates without any
///   known-for works are dropped from the list unless that would empty it.
/// - [`Error::Database`] on store failure
pub fn resolve_person(db: &Database, input: &str) -> Result<Person> {
    let input = input.trim();
    if input.is_empty() {
        return Err(Error::Config("person query must not be empty".to_string()));
    }

    if let Ok(id) = input.parse::<i64>() {
        if let Some(person) = db.get_person(PersonId(id))? {
            debug!(id, "Resolved person by id");
            return Ok(person);
        }
    }

    let mut candidates = db.find_people_by_name(input, MAX_CANDIDATES)?;
    debug!(query = input, matches = candidates.len(), "Searched people by name");

    match candidates.len() {
        0 => Err(Error::NotFound(format!("no person named '{input}'"))),
        1 => Ok(candidates.remove(0)),
        _ => {
            if candidates.iter().any(|p| !p.known_for.is_empty()) {
                candidates.retain(|p| !p.known_for.is_empty());
            }
            Err(Error::Ambiguous {
                query: input.to_string(),
                candidates,
            })
        }
    }
}

/// Titles of a person's known-for works, in the order they are listed.
///
/// Works missing from the database are skipped.
pub fn known_for_titles(db: &Database, person: &Person) -> Result<Vec<String>> {
    let mut titles = db.get_titles(&person.known_for)?;
    Ok(person
        .known_for
        .iter()
        .filter_map(|id| titles.remove(id))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Work, WorkId};

    fn db_with_people() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.insert_work(&Work::titled(1, "Footloose")).unwrap();
        db.insert_work(&Work::titled(2, "Apollo 13")).unwrap();

        let mut kevin = Person::named(102, "Kevin Bacon");
        kevin.known_for = vec![WorkId(2), WorkId(1), WorkId(999)];
        db.insert_person(&kevin).unwrap();

        let mut tom = Person::named(158, "Tom Hanks");
        tom.known_for = vec![WorkId(2)];
        db.insert_person(&tom).unwrap();

        db.insert_person(&Person::named(5, "Tom Hardy")).unwrap();
        db.insert_person(&Person::named(6, "Sam Neill")).unwrap();
        db.insert_person(&Person::named(7, "Sam Neill")).unwrap();
        db
    }

    #[test]
    fn numeric_input_resolves_by_id() {
        let db = db_with_people();
        assert_eq!(resolve_person(&db, "158").unwrap().name, "Tom Hanks");
    }

    #[test]
    fn unique_name_resolves() {
        let db = db_with_people();
        assert_eq!(resolve_person(&db, "kevin bacon").unwrap().id, PersonId(102));
        assert_eq!(resolve_person(&db, "Bacon").unwrap().id, PersonId(102));
    }

    #[test]
    fn unknown_name_is_not_found() {
        let db = db_with_people();
        let err = resolve_person(&db, "Meryl Streep").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn unknown_numeric_id_falls_back_to_name_search() {
        let db = db_with_people();
        let err = resolve_person(&db, "4242").unwrap_err();
        assert!(matches!(err, Error::NotFound(msg) if msg.contains("4242")));
    }

    #[test]
    fn shared_name_prefers_people_with_known_works() {
        let db = db_with_people();

        let err = resolve_person(&db, "tom").unwrap_err();
        let Error::Ambiguous { candidates, .. } = err else {
            panic!("expected ambiguity, got {err:?}");
        };

        // Tom Hardy has no known-for works and is dropped
        let ids: Vec<_> = candidates.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![PersonId(158)]);
    }

    #[test]
    fn common_name_keeps_best_known_match_past_the_candidate_limit() {
        let db = db_with_people();
        for i in 0..60 {
            db.insert_person(&Person::named(1_000 + i, format!("Chris Obscure{i}")))
                .unwrap();
        }
        let mut evans = Person::named(262_635, "Chris Evans");
        evans.known_for = vec![WorkId(1)];
        db.insert_person(&evans).unwrap();

        let err = resolve_person(&db, "Chris").unwrap_err();
        let Error::Ambiguous { candidates, .. } = err else {
            panic!("expected ambiguity, got {err:?}");
        };

        let ids: Vec<_> = candidates.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![PersonId(262_635)]);
    }

    #[test]
    fn shared_name_without_known_works_keeps_everyone() {
        let db = db_with_people();

        let err = resolve_person(&db, "Sam Neill").unwrap_err();
        let Error::Ambiguous { query, candidates } = err else {
            panic!("expected ambiguity, got {err:?}");
        };

        assert_eq!(query, "Sam Neill");
        assert_eq!(candidates.len(), 2);
    }

    #[test]
    fn empty_input_is_rejected() {
        let db = db_with_people();
        assert!(matches!(resolve_person(&db, "  ").unwrap_err(), Error::Config(_)));
    }

    #[test]
    fn known_for_titles_keep_listed_order_and_skip_missing() {
        let db = db_with_people();
        let kevin = db.get_person(PersonId(102)).unwrap().unwrap();

        assert_eq!(
            known_for_titles(&db, &kevin).unwrap(),
            vec!["Apollo 13".to_string(), "Footloose".to_string()]
        );
    }
}
