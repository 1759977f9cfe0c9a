//! Human-readable rendering of a collaboration path.

use serde::Serialize;

use crate::db::Database;
use crate::error::{Error, Result};
use crate::search::CollaborationPath;
use crate::types::{Person, PersonId, Rating, Role, Work, WorkId};

/// One hop of a path with everything needed to print it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathStep {
    /// The person closer to the source
    pub from: Person,
    /// What `from` did on the work
    pub from_role: Role,
    /// The shared work
    pub work: Work,
    /// Rating of the work, if it has one
    pub rating: Option<Rating>,
    /// The person closer to the target
    pub to: Person,
    /// What `to` did on the work
    pub to_role: Role,
    /// The hop as a sentence
    pub sentence: String,
}

impl PathStep {
    fn new(
        from: Person,
        from_role: Role,
        work: Work,
        rating: Option<Rating>,
        to: Person,
        to_role: Role,
    ) -> Self {
        let title = match work.year {
            Some(year) => format!("{} ({year})", work.title),
            None => work.title.clone(),
        };
        let sentence = format!(
            "{} {} in {title} where {} {}.",
            from.name,
            from_role.phrase(),
            to.name,
            to_role.phrase()
        );
        Self {
            from,
            from_role,
            work,
            rating,
            to,
            to_role,
            sentence,
        }
    }
}

/// Look up names, roles and titles for every hop of `path`.
///
/// A trivial path has no hops and yields an empty list.
///
/// # Errors
///
/// [`Error::NotFound`] if a node or edge on the path has disappeared from the
/// database since the search ran.
pub fn describe_path(db: &Database, path: &CollaborationPath) -> Result<Vec<PathStep>> {
    path.hops()
        .into_iter()
        .map(|hop| {
            let from = person(db, hop.from)?;
            let to = person(db, hop.to)?;
            let work = db
                .get_work(hop.work)?
                .ok_or_else(|| Error::NotFound(format!("work {}", hop.work)))?;
            let from_role = role(db, hop.from, hop.work)?;
            let to_role = role(db, hop.to, hop.work)?;
            let rating = db.get_rating(hop.work)?;
            Ok(PathStep::new(from, from_role, work, rating, to, to_role))
        })
        .collect()
}

fn person(db: &Database, id: PersonId) -> Result<Person> {
    db.get_person(id)?
        .ok_or_else(|| Error::NotFound(format!("person {id}")))
}

fn role(db: &Database, person: PersonId, work: WorkId) -> Result<Role> {
    db.get_role(person, work)?.ok_or_else(|| {
        Error::NotFound(format!("appearance of person {person} in work {work}"))
    })
}
