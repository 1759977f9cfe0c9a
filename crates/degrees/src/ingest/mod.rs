//! Loading the tab-separated film dataset into the database, and pruning it.
//!
//! ## Module Structure
//!
//! - `rows` - Row shapes of each file and their conversion into entities
//! - `clean` - Post-load pruning of works and people that should not be searched
//!
//! Files are loaded in dependency order (works, ratings, people, appearances)
//! so every foreign key can be checked against rows already stored. Each file
//! is written in transactions of `batch_size` rows. A malformed row becomes a
//! [`LoadWarning`] and loading continues; a database failure stops it.

mod clean;
mod rows;

pub use clean::{CleanRules, CleanStats, clean};

use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord};
use serde::Serialize;
use tracing::{debug, info, trace, warn};

use crate::db::Database;
use crate::error::{Error, LoadWarning, Result};
use rows::{DatasetRow, NameRow, PrincipalRow, RatingRow, RowError, RowOutcome, TitleRow};

/// File name of the work list.
pub const TITLE_BASICS_FILE: &str = "title.basics.tsv";

/// File name of the work ratings.
pub const TITLE_RATINGS_FILE: &str = "title.ratings.tsv";

/// File name of the person list.
pub const NAME_BASICS_FILE: &str = "name.basics.tsv";

/// File name of the person-work edges.
pub const TITLE_PRINCIPALS_FILE: &str = "title.principals.tsv";

/// Default number of rows per transaction.
pub const DEFAULT_BATCH_SIZE: usize = 10_000;

/// At most this many warnings are kept; the rest are only counted.
pub const MAX_RECORDED_WARNINGS: usize = 1_000;

/// Locations of the four dataset files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    /// `title.basics.tsv`
    pub titles: PathBuf,
    /// `title.ratings.tsv`
    pub ratings: PathBuf,
    /// `name.basics.tsv`
    pub names: PathBuf,
    /// `title.principals.tsv`
    pub principals: PathBuf,
}

impl DatasetPaths {
    /// The standard file names inside `dir`.
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            titles: dir.join(TITLE_BASICS_FILE),
            ratings: dir.join(TITLE_RATINGS_FILE),
            names: dir.join(NAME_BASICS_FILE),
            principals: dir.join(TITLE_PRINCIPALS_FILE),
        }
    }

    /// Fail with [`Error::NotFound`] naming the first missing file.
    pub fn check(&self) -> Result<()> {
        for path in [&self.titles, &self.ratings, &self.names, &self.principals] {
            if !path.is_file() {
                return Err(Error::NotFound(format!(
                    "dataset file {}",
                    path.display()
                )));
            }
        }
        Ok(())
    }
}

/// Row counts for one file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FileStats {
    /// Rows stored
    pub inserted: u64,
    /// Rows whose key was already stored
    pub duplicates: u64,
    /// Rows referencing a person or work that is not stored
    pub skipped: u64,
    /// Rows that could not be parsed
    pub malformed: u64,
}

impl FileStats {
    /// Every row read from the file.
    #[must_use]
    pub fn rows(&self) -> u64 {
        self.inserted + self.duplicates + self.skipped + self.malformed
    }

    fn record(&mut self, outcome: RowOutcome) {
        match outcome {
            RowOutcome::Inserted => self.inserted += 1,
            RowOutcome::Duplicate => self.duplicates += 1,
            RowOutcome::Skipped => self.skipped += 1,
        }
    }
}

/// Result of [`load_dataset`].
#[derive(Debug, Clone, Default)]
pub struct LoadStats {
    /// `title.basics.tsv`
    pub works: FileStats,
    /// `title.ratings.tsv`
    pub ratings: FileStats,
    /// `name.basics.tsv`
    pub people: FileStats,
    /// `title.principals.tsv`
    pub appearances: FileStats,
    /// The first [`MAX_RECORDED_WARNINGS`] malformed rows
    pub warnings: Vec<LoadWarning>,
}

impl LoadStats {
    /// Malformed rows across all files, including those not kept in `warnings`.
    #[must_use]
    pub fn malformed(&self) -> u64 {
        self.works.malformed
            + self.ratings.malformed
            + self.people.malformed
            + self.appearances.malformed
    }
}

/// Load all four dataset files into `db`.
///
/// Loading is idempotent per key: re-running over the same files only counts
/// duplicates, except for ratings, which are replaced.
///
/// # Errors
///
/// - [`Error::Config`] if `batch_size` is zero
/// - [`Error::NotFound`] if a file is missing
/// - [`Error::Dataset`] if a file cannot be read
/// - [`Error::Database`] if a write fails
pub fn load_dataset(db: &Database, paths: &DatasetPaths, batch_size: usize) -> Result<LoadStats> {
    if batch_size == 0 {
        return Err(Error::Config("batch size must be at least 1".to_string()));
    }
    paths.check()?;

    let mut warnings = Vec::new();
    let works = load_file::<TitleRow>(db, &paths.titles, batch_size, &mut warnings)?;
    let ratings = load_file::<RatingRow>(db, &paths.ratings, batch_size, &mut warnings)?;
    let people = load_file::<NameRow>(db, &paths.names, batch_size, &mut warnings)?;
    let appearances =
        load_file::<PrincipalRow>(db, &paths.principals, batch_size, &mut warnings)?;

    let stats = LoadStats {
        works,
        ratings,
        people,
        appearances,
        warnings,
    };

    info!(
        works = stats.works.inserted,
        ratings = stats.ratings.inserted,
        people = stats.people.inserted,
        appearances = stats.appearances.inserted,
        malformed = stats.malformed(),
        "Dataset loaded"
    );

    Ok(stats)
}

fn load_file<R: DatasetRow>(
    db: &Database,
    path: &Path,
    batch_size: usize,
    warnings: &mut Vec<LoadWarning>,
) -> Result<FileStats> {
    let dataset_error = |source: csv::Error| Error::Dataset {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .quoting(false)
        .flexible(true)
        .from_path(path)
        .map_err(dataset_error)?;
    let headers = reader.headers().map_err(dataset_error)?.clone();
    debug!(file = %path.display(), columns = headers.len(), "Reading dataset file");

    let mut stats = FileStats::default();
    let mut record = StringRecord::new();
    let mut pending = 0usize;

    let mut conn = db.connection()?;
    let mut tx = conn.transaction()?;

    loop {
        match reader.read_record(&mut record) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => return Err(dataset_error(e)),
            Err(e) => {
                stats.malformed += 1;
                let line = e.position().map(csv::Position::line);
                push_warning(warnings, LoadWarning::new(path.to_path_buf(), line, e.to_string()));
                continue;
            }
        }

        let outcome = record
            .deserialize::<R>(Some(&headers))
            .map_err(|e| RowError::Invalid(e.to_string()))
            .and_then(|row| row.apply(&tx));

        match outcome {
            Ok(outcome) => {
                if outcome == RowOutcome::Skipped {
                    let line = record.position().map(csv::Position::line);
                    trace!(table = R::LABEL, ?line, "Skipping row with unknown reference");
                }
                stats.record(outcome);
            }
            Err(RowError::Invalid(message)) => {
                stats.malformed += 1;
                let line = record.position().map(csv::Position::line);
                push_warning(warnings, LoadWarning::new(path.to_path_buf(), line, message));
            }
            Err(RowError::Database(e)) => return Err(e.into()),
        }

        pending += 1;
        if pending >= batch_size {
            tx.commit()?;
            tx = conn.transaction()?;
            pending = 0;
            info!(table = R::LABEL, rows = stats.rows(), "Committed batch");
        }
    }

    tx.commit()?;

    info!(
        table = R::LABEL,
        inserted = stats.inserted,
        duplicates = stats.duplicates,
        skipped = stats.skipped,
        malformed = stats.malformed,
        "Loaded file"
    );

    Ok(stats)
}

fn push_warning(warnings: &mut Vec<LoadWarning>, warning: LoadWarning) {
    if warnings.len() < MAX_RECORDED_WARNINGS {
        warn!(%warning, "Skipping malformed row");
        warnings.push(warning);
    }
}
