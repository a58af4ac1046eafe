//! Runtime configuration for catalog front ends.
//!
//! # Responsibility
//! - Resolve database path, slot key and logging settings.
//!
//! # Invariants
//! - Precedence is explicit override, then environment, then default.
//! - Blank values count as unset at every level.

use crate::logging::{default_log_level, normalize_level};
use crate::store::collection_store::DEFAULT_STORAGE_KEY;
use directories::ProjectDirs;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "PUNKCARDS_DB_PATH";
pub const STORAGE_KEY_ENV: &str = "PUNKCARDS_STORAGE_KEY";
pub const LOG_LEVEL_ENV: &str = "PUNKCARDS_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "PUNKCARDS_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "punkcards.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidLogLevel(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLogLevel(message) => write!(f, "{message}"),
        }
    }
}

impl Error for ConfigError {}

/// Values supplied explicitly, e.g. from command-line flags.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub db_path: Option<PathBuf>,
    pub storage_key: Option<String>,
    pub log_level: Option<String>,
    pub log_dir: Option<PathBuf>,
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub db_path: PathBuf,
    pub storage_key: String,
    pub log_level: &'static str,
    /// File logging is enabled only when a directory is configured.
    pub log_dir: Option<PathBuf>,
}

impl CatalogConfig {
    /// Resolves against the process environment.
    pub fn resolve(overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        Self::resolve_with(overrides, |name| std::env::var(name).ok())
    }

    /// Resolves against a custom environment lookup.
    pub fn resolve_with(
        overrides: &ConfigOverrides,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let lookup = |name: &str| env(name).and_then(non_blank);

        let db_path = overrides
            .db_path
            .clone()
            .filter(|path| !path.as_os_str().is_empty())
            .or_else(|| lookup(DB_PATH_ENV).map(PathBuf::from))
            .unwrap_or_else(default_db_path);

        let storage_key = overrides
            .storage_key
            .clone()
            .and_then(non_blank)
            .or_else(|| lookup(STORAGE_KEY_ENV))
            .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());

        let log_level = match overrides
            .log_level
            .clone()
            .and_then(non_blank)
            .or_else(|| lookup(LOG_LEVEL_ENV))
        {
            Some(raw) => normalize_level(&raw).map_err(ConfigError::InvalidLogLevel)?,
            None => default_log_level(),
        };

        let log_dir = overrides
            .log_dir
            .clone()
            .filter(|path| !path.as_os_str().is_empty())
            .or_else(|| lookup(LOG_DIR_ENV).map(PathBuf::from));

        Ok(Self {
            db_path,
            storage_key,
            log_level,
            log_dir,
        })
    }
}

/// Default database location: the per-user data directory.
///
/// Falls back to the temp directory only when no home directory can be
/// determined.
pub fn default_db_path() -> PathBuf {
    ProjectDirs::from("org", "punkcards", "punkcards")
        .map(|dirs| dirs.data_dir().join(DEFAULT_DB_FILE_NAME))
        .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME))
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
