//! Domain types for the person-work collaboration graph.
//!
//! - **Identifiers**: `PersonId`, `WorkId`, and the tagged `Node` used by the search
//! - **Entities**: `Person`, `Work`, `Rating`, `Appearance` (stored in database)
//! - **Enums**: `NodeKind`, `Role`
//!
//! Entities are read-only from the search engine's point of view. Only the
//! ingestion pipeline creates or prunes them.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Strongly-typed ID wrappers
// ============================================================================

/// A strongly-typed person ID to prevent mixing with work IDs.
///
/// The graph is bipartite and both kinds use plain integers in storage, so a
/// swapped argument would otherwise type-check and silently return nonsense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(pub i64);

impl PersonId {
    /// Extract the raw i64 value.
    #[must_use]
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl From<i64> for PersonId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A strongly-typed work ID to prevent mixing with person IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkId(pub i64);

impl WorkId {
    /// Extract the raw i64 value.
    #[must_use]
    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl From<i64> for WorkId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for WorkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Graph nodes
// ============================================================================

/// The two node kinds of the collaboration graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// A person (actor, director, writer, ...)
    Person,
    /// A work (movie, short, series, ...)
    Work,
}

impl NodeKind {
    /// The kind on the other side of every edge from this kind.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Person => Self::Work,
            Self::Work => Self::Person,
        }
    }

    /// Lowercase name used in logs and output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Work => "work",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node of either kind, tagged so the kind travels with the id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Node {
    /// A person node
    Person(PersonId),
    /// A work node
    Work(WorkId),
}

impl Node {
    /// Which side of the graph this node is on.
    #[must_use]
    pub fn kind(self) -> NodeKind {
        match self {
            Self::Person(_) => NodeKind::Person,
            Self::Work(_) => NodeKind::Work,
        }
    }

    /// The raw id, without its kind.
    #[must_use]
    pub fn raw_id(self) -> i64 {
        match self {
            Self::Person(id) => id.as_i64(),
            Self::Work(id) => id.as_i64(),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Person(id) => write!(f, "Person {id}"),
            Self::Work(id) => write!(f, "Work {id}"),
        }
    }
}

// ============================================================================
// Roles
// ============================================================================

/// What a person did on a work.
///
/// Known categories come from the dataset's principals file. Anything else is
/// preserved verbatim in `Other` so ingestion never drops an edge over a label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Role {
    /// Acted (male-coded category in the dataset)
    Actor,
    /// Acted (female-coded category in the dataset)
    Actress,
    /// Appeared as themselves
    SelfAppearance,
    /// Wrote
    Writer,
    /// Edited
    Editor,
    /// Composed the score
    Composer,
    /// Production design
    ProductionDesigner,
    /// Cinematography
    Cinematographer,
    /// Directed
    Director,
    /// Appears through archive footage
    ArchiveFootage,
    /// Appears through archive sound
    ArchiveSound,
    /// Produced
    Producer,
    /// Any category not listed above
    Other(String),
}

impl Role {
    /// Parse a dataset/database category string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "actor" => Self::Actor,
            "actress" => Self::Actress,
            "self" => Self::SelfAppearance,
            "writer" => Self::Writer,
            "editor" => Self::Editor,
            "composer" => Self::Composer,
            "production_designer" => Self::ProductionDesigner,
            "cinematographer" => Self::Cinematographer,
            "director" => Self::Director,
            "archive_footage" => Self::ArchiveFootage,
            "archive_sound" => Self::ArchiveSound,
            "producer" => Self::Producer,
            other => Self::Other(other.to_string()),
        }
    }

    /// Convert to database string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Actor => "actor",
            Self::Actress => "actress",
            Self::SelfAppearance => "self",
            Self::Writer => "writer",
            Self::Editor => "editor",
            Self::Composer => "composer",
            Self::ProductionDesigner => "production_designer",
            Self::Cinematographer => "cinematographer",
            Self::Director => "director",
            Self::ArchiveFootage => "archive_footage",
            Self::ArchiveSound => "archive_sound",
            Self::Producer => "producer",
            Self::Other(s) => s,
        }
    }

    /// Verb phrase used when describing a collaboration in prose.
    #[must_use]
    pub fn phrase(&self) -> &'static str {
        match self {
            Self::Actor => "was an actor",
            Self::Actress => "was an actress",
            Self::SelfAppearance => "were themselves",
            Self::Writer => "was a writer",
            Self::Editor => "was an editor",
            Self::Composer => "was a composer",
            Self::ProductionDesigner => "was a production designer",
            Self::Cinematographer => "was a cinematographer",
            Self::Director => "was a director",
            Self::ArchiveFootage => "was present in archive footage",
            Self::ArchiveSound => "was in archive sound",
            Self::Producer => "was a producer",
            Self::Other(_) => "worked",
        }
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Entities
// ============================================================================

/// A person in the collaboration graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Database ID
    pub id: PersonId,
    /// Display name
    pub name: String,
    /// Year of birth, if known
    pub birth_year: Option<i32>,
    /// Year of death, if known
    pub death_year: Option<i32>,
    /// Notable work ids, denormalized. Only used for disambiguation.
    pub known_for: Vec<WorkId>,
}

impl Person {
    /// Create a person with only an id and a name.
    #[must_use]
    pub fn named(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: PersonId(id),
            name: name.into(),
            birth_year: None,
            death_year: None,
            known_for: Vec::new(),
        }
    }
}

/// A work in the collaboration graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Work {
    /// Database ID
    pub id: WorkId,
    /// Primary title
    pub title: String,
    /// Release (or start) year
    pub year: Option<i32>,
    /// Category such as `movie`, `short`, `tvSeries`
    pub category: Option<String>,
    /// Adult-content flag
    pub is_adult: bool,
    /// Runtime in minutes
    pub runtime_minutes: Option<u32>,
    /// Genre tags
    pub genres: Vec<String>,
}

impl Work {
    /// Create a work with only an id and a title.
    #[must_use]
    pub fn titled(id: i64, title: impl Into<String>) -> Self {
        Self {
            id: WorkId(id),
            title: title.into(),
            year: None,
            category: None,
            is_adult: false,
            runtime_minutes: None,
            genres: Vec::new(),
        }
    }
}

/// Audience rating of a work.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// The rated work
    pub work_id: WorkId,
    /// Average score
    pub average: Option<f64>,
    /// Number of votes behind the average
    pub votes: Option<u32>,
}

/// An edge of the collaboration graph: one person on one work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appearance {
    /// The person
    pub person_id: PersonId,
    /// The work
    pub work_id: WorkId,
    /// What the person did on the work
    pub role: Role,
}
