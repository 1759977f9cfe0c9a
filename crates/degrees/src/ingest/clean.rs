//! Pruning works and people that should not take part in searches.
//!
//! Deleting a work cascades to its appearances and rating. People left with
//! no appearances are deleted last.

use std::rc::Rc;

use rusqlite::types::Value;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::db::Database;
use crate::error::Result;

/// Which works survive [`clean`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CleanRules {
    /// Delete works flagged as adult content
    pub drop_adult: bool,
    /// Categories to keep. Works with another known category are deleted;
    /// works with no category are kept. Empty disables the rule.
    pub allowed_categories: Vec<String>,
    /// Delete works with fewer votes than this, or no rating at all. Zero
    /// disables the rule.
    pub min_votes: u32,
    /// Delete works tagged with any of these genres
    pub excluded_genres: Vec<String>,
}

impl Default for CleanRules {
    fn default() -> Self {
        Self {
            drop_adult: true,
            allowed_categories: ["movie", "short", "tvSeries", "tvMiniSeries"]
                .map(String::from)
                .to_vec(),
            min_votes: 20,
            excluded_genres: ["News", "Talk-Show", "Reality-TV", "Adult"]
                .map(String::from)
                .to_vec(),
        }
    }
}

/// Rows deleted by [`clean`], per rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleanStats {
    /// Works deleted for the adult flag
    pub adult_works: u64,
    /// Works deleted for their category
    pub category_works: u64,
    /// Works deleted for too few votes
    pub unpopular_works: u64,
    /// Works deleted for an excluded genre
    pub genre_works: u64,
    /// People deleted for having no appearances left
    pub orphaned_people: u64,
}

impl CleanStats {
    /// Total works deleted.
    #[must_use]
    pub fn works_removed(&self) -> u64 {
        self.adult_works + self.category_works + self.unpopular_works + self.genre_works
    }
}

/// Apply `rules` in one transaction.
///
/// Rules run in the order they are declared on [`CleanRules`], so a work
/// matching several rules is counted under the first.
pub fn clean(db: &Database, rules: &CleanRules) -> Result<CleanStats> {
    let mut conn = db.connection()?;
    let tx = conn.transaction()?;
    let mut stats = CleanStats::default();

    if rules.drop_adult {
        stats.adult_works = tx.execute("DELETE FROM works WHERE is_adult = 1", [])? as u64;
        debug!(deleted = stats.adult_works, "Removed adult works");
    }

    if !rules.allowed_categories.is_empty() {
        let allowed: Rc<Vec<Value>> = Rc::new(
            rules
                .allowed_categories
                .iter()
                .cloned()
                .map(Value::Text)
                .collect(),
        );
        stats.category_works = tx.execute(
            "DELETE FROM works WHERE category IS NOT NULL AND category NOT IN rarray(?1)",
            [allowed],
        )? as u64;
        debug!(
            deleted = stats.category_works,
            "Removed works outside allowed categories"
        );
    }

    if rules.min_votes > 0 {
        stats.unpopular_works = tx.execute(
            "DELETE FROM works WHERE NOT EXISTS (
                 SELECT 1 FROM ratings
                 WHERE ratings.work_id = works.id AND ratings.votes >= ?1
             )",
            [rules.min_votes],
        )? as u64;
        debug!(deleted = stats.unpopular_works, "Removed works below vote threshold");
    }

    {
        let mut stmt = tx.prepare(
            "DELETE FROM works WHERE instr(',' || COALESCE(genres, '') || ',', ',' || ?1 || ',') > 0",
        )?;
        for genre in &rules.excluded_genres {
            stats.genre_works += stmt.execute([genre])? as u64;
        }
    }
    debug!(deleted = stats.genre_works, "Removed works with excluded genres");

    stats.orphaned_people = tx.execute(
        "DELETE FROM people WHERE NOT EXISTS (
             SELECT 1 FROM appearances WHERE appearances.person_id = people.id
         )",
        [],
    )? as u64;

    tx.commit()?;

    info!(
        works = stats.works_removed(),
        people = stats.orphaned_people,
        "Cleaned database"
    );

    Ok(stats)
}
