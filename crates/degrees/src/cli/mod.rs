//! CLI command implementations.

mod display;

pub mod clean;
pub mod load;
pub mod path;
pub mod person;
pub mod stats;

use degrees::{Config, Database, SearchError};
use tracing::debug;

/// Failure of a CLI command.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Library failure outside a search
    #[error(transparent)]
    Degrees(#[from] degrees::Error),

    /// Search failure
    #[error(transparent)]
    Search(#[from] SearchError),

    /// JSON output could not be produced
    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result of a CLI command.
pub type CliResult = Result<(), CliError>;

/// Open the configured database and make sure it has every table.
fn open_database(config: &Config) -> Result<Database, degrees::Error> {
    debug!(path = %config.database.display(), "Opening database");
    let db = Database::open(&config.database)?;
    db.check_schema()?;
    Ok(db)
}
