//! Error types for degrees operations.
//!
//! Errors are split by layer:
//!
//! - **`Error`**: infrastructure and lookup failures (database, I/O, configuration,
//!   name resolution). This is also the store failure surfaced by the search engine.
//! - **`SearchError`** (in [`crate::search`]): the tagged outcomes of a shortest-path
//!   search that did not produce a path.
//! - **`LoadWarning`**: row-level problems found while ingesting a dataset. These are
//!   collected and reported, never thrown.

use std::path::PathBuf;
use thiserror::Error;

use crate::types::Person;

/// Result type for degrees operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for degrees operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Database operation failed
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// File system operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Dataset file could not be read as delimited text
    #[error("dataset error in {path}: {source}")]
    Dataset {
        /// File being read
        path: PathBuf,
        /// Underlying reader failure
        #[source]
        source: csv::Error,
    },

    /// Invalid configuration, arguments, or database layout
    #[error("configuration error: {0}")]
    Config(String),

    /// A requested entity does not exist
    #[error("not found: {0}")]
    NotFound(String),

    /// A name matched more than one person
    #[error("'{query}' matches {} people; use an id to choose one", candidates.len())]
    Ambiguous {
        /// The name that was searched for
        query: String,
        /// Every person the name matched, most likely last
        candidates: Vec<Person>,
    },

    /// Internal invariant was violated
    #[error("internal error: {0}")]
    Internal(String),
}

/// Problem found in a single dataset row.
///
/// Ingestion is best effort: a malformed row is skipped and recorded here while
/// the rest of the file keeps loading.
#[derive(Debug, Clone)]
pub struct LoadWarning {
    /// File the row came from
    pub path: PathBuf,
    /// 1-based line number, when the reader knows it
    pub line: Option<u64>,
    /// Human-readable description
    pub message: String,
}

impl LoadWarning {
    /// Create a new warning for a row.
    #[must_use]
    pub fn new(path: PathBuf, line: Option<u64>, message: impl Into<String>) -> Self {
        Self {
            path,
            line,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{line}: {}", self.path.display(), self.message),
            None => write!(f, "{}: {}", self.path.display(), self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_warning_display_includes_line_when_known() {
        let warning = LoadWarning::new(PathBuf::from("names.tsv"), Some(12), "bad id 'nmX'");

        let display = warning.to_string();
        assert!(display.contains("names.tsv:12"));
        assert!(display.contains("bad id"));
    }

    #[test]
    fn load_warning_display_without_line() {
        let warning = LoadWarning::new(PathBuf::from("names.tsv"), None, "truncated");

        assert_eq!(warning.to_string(), "names.tsv: truncated");
    }

    #[test]
    fn ambiguous_error_reports_candidate_count() {
        let error = Error::Ambiguous {
            query: "Chris".to_string(),
            candidates: vec![Person::named(1, "Chris Evans"), Person::named(2, "Chris Pine")],
        };

        assert_eq!(
            error.to_string(),
            "'Chris' matches 2 people; use an id to choose one"
        );
    }
}
