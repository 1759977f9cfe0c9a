//! Configuration file support.
//!
//! Settings live in a YAML file, `degrees.yaml` in the working directory by
//! default. Every key is optional; a missing file means all defaults.
//!
//! ```yaml
//! database: data/degrees.db
//! search:
//!   max_depth: 12
//!   max_visited: 1000000
//!   timeout_secs: 30
//! ingest:
//!   batch_size: 10000
//! clean:
//!   min_votes: 20
//!   allowed_categories: [movie, short, tvSeries, tvMiniSeries]
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::ingest::{CleanRules, DEFAULT_BATCH_SIZE};
use crate::search::SearchOptions;

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "degrees.yaml";

/// Database file used when neither the config nor the command line names one
pub const DEFAULT_DATABASE: &str = "degrees.db";

/// Default bound on path length, in edges
pub const DEFAULT_MAX_DEPTH: u32 = 12;

/// Default bound on nodes discovered by one search
pub const DEFAULT_MAX_VISITED: usize = 1_000_000;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Path of the `SQLite` database
    pub database: PathBuf,
    /// Search limits
    pub search: SearchConfig,
    /// Dataset loading
    pub ingest: IngestConfig,
    /// Pruning rules applied by `clean`
    pub clean: CleanRules,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: PathBuf::from(DEFAULT_DATABASE),
            search: SearchConfig::default(),
            ingest: IngestConfig::default(),
            clean: CleanRules::default(),
        }
    }
}

/// Search limits. `None` disables a limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Longest path searched, in edges
    pub max_depth: Option<u32>,
    /// Most nodes a search may discover
    pub max_visited: Option<usize>,
    /// Wall-clock budget per search, in seconds
    pub timeout_secs: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
            max_visited: Some(DEFAULT_MAX_VISITED),
            timeout_secs: None,
        }
    }
}

impl SearchConfig {
    /// The engine options these settings describe.
    #[must_use]
    pub fn options(&self) -> SearchOptions {
        SearchOptions {
            max_depth: self.max_depth,
            max_visited: self.max_visited,
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Dataset loading settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IngestConfig {
    /// Rows per transaction
    pub batch_size: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl Config {
    /// Parse a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Load `explicit` if given, else `degrees.yaml` in `dir` if present,
    /// else defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            debug!("No configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Reject settings no operation can work with.
    pub fn validate(&self) -> Result<()> {
        if self.ingest.batch_size == 0 {
            return Err(Error::Config(
                "ingest.batch_size must be at least 1".to_string(),
            ));
        }
        if self.database.as_os_str().is_empty() {
            return Err(Error::Config("database path must not be empty".to_string()));
        }
        Ok(())
    }
}
