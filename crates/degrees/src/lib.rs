//! # Degrees: Shortest Collaboration Paths
//!
//! Degrees finds the shortest chain of shared works linking two people, the
//! "six degrees" question asked of a film database. People and works form a
//! bipartite graph stored in `SQLite`; an appearance of a person in a work is
//! an edge. The graph is never loaded into memory: the search expands one
//! breadth-first layer per query.
//!
//! ## Design Philosophy
//!
//! - **Store is the source of truth** - The search owns nothing but its visited sets
//! - **One query per layer** - Whole frontiers are bound as a single parameter
//! - **Deterministic** - Ties between equally short paths always break the same way
//! - **Library first, CLI second**
//!
//! ## Quick Start
//!
//! ```no_run
//! use degrees::{Database, SqlGraphStore, describe_path, find_shortest_path, resolve_person};
//! use std::path::Path;
//!
//! let db = Database::open(Path::new("degrees.db"))?;
//! let kevin = resolve_person(&db, "Kevin Bacon")?;
//! let tom = resolve_person(&db, "Tom Hanks")?;
//!
//! let store = SqlGraphStore::new(&db);
//! let path = find_shortest_path(kevin.id, tom.id, &store)?;
//!
//! println!("{} degrees of separation", path.degrees());
//! for step in describe_path(&db, &path)? {
//!     println!("{}", step.sentence);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
mod db;
mod describe;
mod error;
pub mod ingest;
mod resolve;
pub mod search;
pub mod store;
mod types;

pub use config::Config;
pub use db::{Database, DatabaseStats};
pub use describe::{PathStep, describe_path};
pub use error::{Error, LoadWarning, Result};
pub use resolve::{MAX_CANDIDATES, known_for_titles, resolve_person};
pub use search::{
    AbortReason, CollaborationPath, Hop, SearchError, SearchOptions, SearchReport, SearchStats,
    find_shortest_path, find_shortest_path_with,
};
pub use store::{GraphStore, Link, MemoryGraphStore, SqlGraphStore};
pub use types::{Appearance, Node, NodeKind, Person, PersonId, Rating, Role, Work, WorkId};
