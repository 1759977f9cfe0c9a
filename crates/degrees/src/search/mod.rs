//! Shortest collaboration path search.
//!
//! A breadth-first search over the bipartite person-work graph, driven entirely
//! by batched adjacency queries against a [`GraphStore`]:
//!
//! ```text
//! INIT ──(both people exist)──► EXPANDING ──(target visited)──► FOUND ──► reconstruct
//!   │                               │
//!   │ unknown id                    ├──(frontier empty)────────► NoPath
//!   ▼                               └──(depth/visited/timeout)─► Aborted
//! UnknownPerson                     any store failure ─────────► Store
//! ```
//!
//! Each layer expands the *whole* frontier of one kind before the next layer
//! starts, so the first layer that discovers the target gives a shortest path.
//! Among equally short paths the one returned is fixed: every node's parent is
//! the smallest-id frontier member that reached it.

mod frontier;
mod path;

pub use path::{CollaborationPath, Hop};

use std::fmt;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{info, warn};

use crate::error::Error;
use crate::store::GraphStore;
use crate::types::{NodeKind, PersonId};
use frontier::{Frontier, FrontierExpander, SearchState};

/// Limits that stop a search before it resolves.
///
/// All limits are off by default. A search stopped by a limit reports
/// [`SearchError::Aborted`]: the people may still be connected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Maximum path length in edges (two per degree of separation).
    pub max_depth: Option<u32>,
    /// Maximum number of nodes (people and works) to discover.
    pub max_visited: Option<usize>,
    /// Wall-clock budget, checked between layers.
    pub timeout: Option<Duration>,
}

impl SearchOptions {
    /// Limit the path length in edges.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Limit the number of discovered nodes.
    #[must_use]
    pub fn with_max_visited(mut self, max_visited: usize) -> Self {
        self.max_visited = Some(max_visited);
        self
    }

    /// Limit the wall-clock time.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Why a search gave up without an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortReason {
    /// The next layer would exceed the path length limit.
    DepthLimit(u32),
    /// More nodes were discovered than allowed.
    VisitedLimit(usize),
    /// The time budget ran out.
    Timeout(Duration),
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DepthLimit(max) => write!(f, "no path within {max} edges"),
            Self::VisitedLimit(max) => write!(f, "more than {max} nodes discovered"),
            Self::Timeout(budget) => write!(f, "timed out after {budget:?}"),
        }
    }
}

/// Failure outcomes of a search.
///
/// No variant ever carries a partial path.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// One or both endpoints are not people in the store.
    #[error("unknown person id: {}", join_ids(.0))]
    UnknownPerson(Vec<PersonId>),

    /// Both people exist but lie in different components.
    #[error("no connection between {from} and {to}")]
    NoPath {
        /// Source person
        from: PersonId,
        /// Target person
        to: PersonId,
    },

    /// A limit stopped the search; connectivity is unknown.
    #[error("search aborted: {0}")]
    Aborted(AbortReason),

    /// The store failed to answer. Not retried.
    #[error("store error: {0}")]
    Store(#[from] Error),

    /// Parent links did not lead back to the source.
    #[error("inconsistent search state: {0}")]
    Inconsistent(String),
}

fn join_ids(ids: &[PersonId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Counters describing the work a search did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Layers expanded
    pub layers: u32,
    /// Nodes discovered, including the source
    pub discovered: usize,
    /// Adjacency queries issued
    pub queries: usize,
}

/// A found path plus the cost of finding it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchReport {
    /// The shortest path
    pub path: CollaborationPath,
    /// Search counters
    pub stats: SearchStats,
}

/// Find a shortest collaboration path with no limits.
///
/// See [`find_shortest_path_with`].
pub fn find_shortest_path<S: GraphStore + ?Sized>(
    source: PersonId,
    target: PersonId,
    store: &S,
) -> Result<CollaborationPath, SearchError> {
    find_shortest_path_with(source, target, store, &SearchOptions::default())
        .map(|report| report.path)
}

/// Find a shortest collaboration path from `source` to `target`.
///
/// # Errors
///
/// - [`SearchError::UnknownPerson`] if either id is not a person; no adjacency
///   query is issued in that case
/// - [`SearchError::NoPath`] if the people are not connected
/// - [`SearchError::Aborted`] if a limit in `options` was hit first
/// - [`SearchError::Store`] if the store failed
pub fn find_shortest_path_with<S: GraphStore + ?Sized>(
    source: PersonId,
    target: PersonId,
    store: &S,
    options: &SearchOptions,
) -> Result<SearchReport, SearchError> {
    let started = Instant::now();

    let mut missing = Vec::new();
    if !store.person_exists(source)? {
        missing.push(source);
    }
    if target != source && !store.person_exists(target)? {
        missing.push(target);
    }
    if !missing.is_empty() {
        return Err(SearchError::UnknownPerson(missing));
    }

    if source == target {
        return Ok(SearchReport {
            path: CollaborationPath::single(source),
            stats: SearchStats {
                layers: 0,
                discovered: 1,
                queries: 0,
            },
        });
    }

    let mut state = SearchState::new(source);
    let mut expander = FrontierExpander::new(store);
    let mut frontier = Frontier::start(source);

    loop {
        if frontier.is_empty() {
            info!(%source, %target, layers = state.depth, "No path: search exhausted");
            return Err(SearchError::NoPath {
                from: source,
                to: target,
            });
        }

        if let Some(reason) = check_limits(&state, &frontier, options, started) {
            warn!(%source, %target, layers = state.depth, %reason, "Search aborted");
            return Err(SearchError::Aborted(reason));
        }

        frontier = expander.expand(&mut state, &frontier)?;

        if frontier.kind() == NodeKind::Person && state.visited_people.contains(&target) {
            let path = path::reconstruct(target, &state.parents, source, state.depth)?;
            let stats = SearchStats {
                layers: state.depth,
                discovered: state.discovered(),
                queries: expander.queries(),
            };
            info!(
                %source,
                %target,
                degrees = path.degrees(),
                discovered = stats.discovered,
                queries = stats.queries,
                elapsed = ?started.elapsed(),
                "Found path"
            );
            return Ok(SearchReport { path, stats });
        }
    }
}

/// Check every limit before expanding `frontier`.
///
/// The depth limit is only checked before a person layer: a full cycle adds two
/// edges, and a cycle that cannot finish within the limit is not started.
fn check_limits(
    state: &SearchState,
    frontier: &Frontier,
    options: &SearchOptions,
    started: Instant,
) -> Option<AbortReason> {
    if let Some(max) = options.max_depth {
        if frontier.kind() == NodeKind::Person && state.depth + 2 > max {
            return Some(AbortReason::DepthLimit(max));
        }
    }
    if let Some(max) = options.max_visited {
        if state.discovered() > max {
            return Some(AbortReason::VisitedLimit(max));
        }
    }
    if let Some(budget) = options.timeout {
        if started.elapsed() >= budget {
            return Some(AbortReason::Timeout(budget));
        }
    }
    None
}
