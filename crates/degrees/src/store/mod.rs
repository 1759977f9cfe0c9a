//! Read-only adjacency access to the collaboration graph.
//!
//! The search engine never walks an in-memory graph. Each BFS layer asks a
//! [`GraphStore`] for the unvisited neighbors of a whole frontier in one call,
//! so the number of store round-trips is bounded by the graph diameter rather
//! than the graph size.
//!
//! ## Implementations
//!
//! | Store | Backing | Used by |
//! |-------|---------|---------|
//! | [`SqlGraphStore`] | `SQLite` `appearances` table, one `rarray()` query per layer | CLI, library users |
//! | [`MemoryGraphStore`] | petgraph `UnGraph` | tests, fixtures |

mod memory;
mod sql;

pub use memory::MemoryGraphStore;
pub use sql::SqlGraphStore;

use std::collections::HashSet;

use crate::error::Result;
use crate::types::{PersonId, WorkId};

/// One edge reported by an adjacency query.
///
/// `node` is a newly reachable neighbor and `via` is the frontier member it is
/// connected to. A neighbor connected to several frontier members appears once
/// per member; choosing among them is the caller's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Link<N, V> {
    /// The discovered neighbor.
    pub node: N,
    /// The frontier member it was reached from.
    pub via: V,
}

impl<N, V> Link<N, V> {
    /// Create a link from `via` to `node`.
    pub fn new(node: N, via: V) -> Self {
        Self { node, via }
    }
}

/// Adjacency queries over the bipartite person-work graph.
///
/// Implementations must:
/// - return every edge from the input set to a neighbor not in the exclusion set
/// - return an empty result (not an error) for an empty input set
/// - answer an arbitrarily large input set with a bounded number of round-trips
/// - have no side effects
///
/// Results carry no ordering guarantee.
pub trait GraphStore: Send + Sync {
    /// Works connected to any of `person_ids`, skipping `excluded_works`.
    fn neighbors_of_persons(
        &self,
        person_ids: &HashSet<PersonId>,
        excluded_works: &HashSet<WorkId>,
    ) -> Result<Vec<Link<WorkId, PersonId>>>;

    /// People connected to any of `work_ids`, skipping `excluded_persons`.
    fn neighbors_of_works(
        &self,
        work_ids: &HashSet<WorkId>,
        excluded_persons: &HashSet<PersonId>,
    ) -> Result<Vec<Link<PersonId, WorkId>>>;

    /// Whether a person with this id exists.
    ///
    /// Must not read appearance edges; it runs before any traversal.
    fn person_exists(&self, id: PersonId) -> Result<bool>;
}

impl<S: GraphStore + ?Sized> GraphStore for &S {
    fn neighbors_of_persons(
        &self,
        person_ids: &HashSet<PersonId>,
        excluded_works: &HashSet<WorkId>,
    ) -> Result<Vec<Link<WorkId, PersonId>>> {
        (**self).neighbors_of_persons(person_ids, excluded_works)
    }

    fn neighbors_of_works(
        &self,
        work_ids: &HashSet<WorkId>,
        excluded_persons: &HashSet<PersonId>,
    ) -> Result<Vec<Link<PersonId, WorkId>>> {
        (**self).neighbors_of_works(work_ids, excluded_persons)
    }

    fn person_exists(&self, id: PersonId) -> Result<bool> {
        (**self).person_exists(id)
    }
}
