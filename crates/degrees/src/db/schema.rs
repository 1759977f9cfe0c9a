//! Database schema definition for the collaboration graph.

/// Tables every operation expects to exist.
pub(crate) const REQUIRED_TABLES: &[&str] = &["people", "works", "appearances", "ratings"];

/// Database schema definition.
pub(crate) const SCHEMA: &str = r"
-- People (graph nodes, one side)
CREATE TABLE IF NOT EXISTS people (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    birth_year INTEGER,
    death_year INTEGER,
    known_for TEXT              -- comma-separated work ids, for disambiguation only
);

CREATE INDEX IF NOT EXISTS idx_people_name ON people(name COLLATE NOCASE);

-- Works (graph nodes, other side)
CREATE TABLE IF NOT EXISTS works (
    id INTEGER PRIMARY KEY,
    title TEXT NOT NULL,
    year INTEGER,
    category TEXT,
    is_adult INTEGER NOT NULL DEFAULT 0,
    runtime_minutes INTEGER,
    genres TEXT                 -- comma-separated genre tags
);

CREATE INDEX IF NOT EXISTS idx_works_category ON works(category);

-- Appearance edges: the only relation the search traverses.
-- Both directions are queried, so both columns lead an index.
CREATE TABLE IF NOT EXISTS appearances (
    person_id INTEGER NOT NULL REFERENCES people(id) ON DELETE CASCADE,
    work_id INTEGER NOT NULL REFERENCES works(id) ON DELETE CASCADE,
    role TEXT NOT NULL,
    PRIMARY KEY (person_id, work_id)
);

CREATE INDEX IF NOT EXISTS idx_appearances_work ON appearances(work_id, person_id);

-- Ratings (display only)
CREATE TABLE IF NOT EXISTS ratings (
    work_id INTEGER PRIMARY KEY REFERENCES works(id) ON DELETE CASCADE,
    average REAL,
    votes INTEGER
);
";
