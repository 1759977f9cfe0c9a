//! Row shapes of the four dataset files and their conversion into entities.
//!
//! Every field is read as text and converted here, because the files mark
//! missing values with `\N` rather than leaving the column empty.

use std::str::FromStr;

use rusqlite::Connection;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::db::{
    insert_appearance, insert_person, insert_rating, insert_work, person_id_exists, split_list,
    work_id_exists,
};
use crate::types::{Appearance, Person, PersonId, Rating, Role, Work, WorkId};

/// Marker the dataset uses for a missing value.
const NULL: &str = "\\N";

/// Prefix of work ids in the dataset (`tt0112384`).
pub(super) const WORK_PREFIX: &str = "tt";

/// Prefix of person ids in the dataset (`nm0000102`).
pub(super) const PERSON_PREFIX: &str = "nm";

/// What happened to one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum RowOutcome {
    Inserted,
    /// The key was already present; the first row wins.
    Duplicate,
    /// The row references an entity that was never loaded.
    Skipped,
}

#[derive(Debug)]
pub(super) enum RowError {
    /// The row is malformed. It is skipped and reported.
    Invalid(String),
    /// The database failed. Loading stops.
    Database(rusqlite::Error),
}

impl From<rusqlite::Error> for RowError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Database(e)
    }
}

pub(super) type RowResult = std::result::Result<RowOutcome, RowError>;

/// A row type that knows how to store itself.
pub(super) trait DatasetRow: DeserializeOwned {
    /// File label used in logs.
    const LABEL: &'static str;

    fn apply(self, conn: &Connection) -> RowResult;
}

fn nullable(s: &str) -> Option<&str> {
    let s = s.trim();
    (!s.is_empty() && s != NULL).then_some(s)
}

fn parse_opt<T: FromStr>(s: &str) -> Option<T> {
    nullable(s).and_then(|v| v.parse().ok())
}

/// Strip a dataset id prefix and parse the numeric part.
pub(super) fn parse_id(s: &str, prefix: &str) -> Result<i64, RowError> {
    let s = s.trim();
    let digits = s
        .strip_prefix(prefix)
        .ok_or_else(|| RowError::Invalid(format!("id '{s}' does not start with '{prefix}'")))?;
    digits
        .parse()
        .map_err(|_| RowError::Invalid(format!("id '{s}' is not numeric")))
}

fn inserted(was_inserted: bool) -> RowOutcome {
    if was_inserted {
        RowOutcome::Inserted
    } else {
        RowOutcome::Duplicate
    }
}

/// `title.basics.tsv`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct TitleRow {
    tconst: String,
    title_type: String,
    primary_title: String,
    is_adult: String,
    start_year: String,
    runtime_minutes: String,
    genres: String,
}

impl TitleRow {
    fn into_work(self) -> Result<Work, RowError> {
        let id = parse_id(&self.tconst, WORK_PREFIX)?;
        let title = nullable(&self.primary_title)
            .ok_or_else(|| RowError::Invalid(format!("work {id} has no title")))?
            .to_string();

        Ok(Work {
            id: WorkId(id),
            title,
            year: parse_opt(&self.start_year),
            category: nullable(&self.title_type).map(str::to_string),
            is_adult: nullable(&self.is_adult) == Some("1"),
            runtime_minutes: parse_opt(&self.runtime_minutes),
            genres: nullable(&self.genres).map(split_list).unwrap_or_default(),
        })
    }
}

impl DatasetRow for TitleRow {
    const LABEL: &'static str = "works";

    fn apply(self, conn: &Connection) -> RowResult {
        let work = self.into_work()?;
        Ok(inserted(insert_work(conn, &work)?))
    }
}

/// `title.ratings.tsv`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RatingRow {
    tconst: String,
    average_rating: String,
    num_votes: String,
}

impl DatasetRow for RatingRow {
    const LABEL: &'static str = "ratings";

    fn apply(self, conn: &Connection) -> RowResult {
        let work_id = WorkId(parse_id(&self.tconst, WORK_PREFIX)?);
        if !work_id_exists(conn, work_id)? {
            return Ok(RowOutcome::Skipped);
        }

        insert_rating(
            conn,
            &Rating {
                work_id,
                average: parse_opt(&self.average_rating),
                votes: parse_opt(&self.num_votes),
            },
        )?;
        Ok(RowOutcome::Inserted)
    }
}

/// `name.basics.tsv`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct NameRow {
    nconst: String,
    primary_name: String,
    birth_year: String,
    death_year: String,
    known_for_titles: String,
}

impl NameRow {
    fn into_person(self) -> Result<Person, RowError> {
        let id = parse_id(&self.nconst, PERSON_PREFIX)?;
        let name = nullable(&self.primary_name)
            .ok_or_else(|| RowError::Invalid(format!("person {id} has no name")))?
            .to_string();

        // Known-for ids are a display hint; unparseable entries are dropped
        let known_for = nullable(&self.known_for_titles)
            .map(split_list)
            .unwrap_or_default()
            .iter()
            .filter_map(|item| parse_id(item, WORK_PREFIX).ok().map(WorkId))
            .collect();

        Ok(Person {
            id: PersonId(id),
            name,
            birth_year: parse_opt(&self.birth_year),
            death_year: parse_opt(&self.death_year),
            known_for,
        })
    }
}

impl DatasetRow for NameRow {
    const LABEL: &'static str = "people";

    fn apply(self, conn: &Connection) -> RowResult {
        let person = self.into_person()?;
        Ok(inserted(insert_person(conn, &person)?))
    }
}

/// `title.principals.tsv`
#[derive(Debug, Deserialize)]
pub(super) struct PrincipalRow {
    tconst: String,
    nconst: String,
    category: String,
}

impl DatasetRow for PrincipalRow {
    const LABEL: &'static str = "appearances";

    fn apply(self, conn: &Connection) -> RowResult {
        let work_id = WorkId(parse_id(&self.tconst, WORK_PREFIX)?);
        let person_id = PersonId(parse_id(&self.nconst, PERSON_PREFIX)?);
        let role = nullable(&self.category).map(Role::parse).ok_or_else(|| {
            RowError::Invalid(format!(
                "appearance of person {person_id} in work {work_id} has no category"
            ))
        })?;

        if !person_id_exists(conn, person_id)? || !work_id_exists(conn, work_id)? {
            return Ok(RowOutcome::Skipped);
        }

        let appearance = Appearance {
            person_id,
            work_id,
            role,
        };
        Ok(inserted(insert_appearance(conn, &appearance)?))
    }
}
