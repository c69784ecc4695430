//! Storage configuration.
//!
//! # Responsibility
//! - Resolve the SQLite database path backing the key-value store.
//! - Select the storage key flavor used by a front end.
//!
//! # Invariants
//! - Resolution never fails; unset or invalid values fall back to defaults.

use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::str::FromStr;

pub const DB_PATH_ENV: &str = "TASKDECK_DB_PATH";
pub const PLATFORM_ENV: &str = "TASKDECK_PLATFORM";
pub const DB_FILE_NAME: &str = "taskdeck.sqlite3";

/// Front-end flavor, which decides the storage key names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Platform {
    /// Cross-platform mobile/web client (`@`-prefixed keys).
    #[default]
    Mobile,
    /// Browser-only client (bare keys).
    Web,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPlatform(pub String);

impl Display for UnknownPlatform {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown platform `{}`; expected mobile|web", self.0)
    }
}

impl Error for UnknownPlatform {}

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mobile" => Ok(Self::Mobile),
            "web" => Ok(Self::Web),
            other => Err(UnknownPlatform(other.to_string())),
        }
    }
}

/// Fixed keys partitioning task data and category data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub tasks: String,
    pub categories: String,
}

impl StorageKeys {
    pub fn for_platform(platform: Platform) -> Self {
        let (tasks, categories) = match platform {
            Platform::Mobile => ("@tasks_storage", "@categories_storage"),
            Platform::Web => ("tasks_storage", "categories_storage"),
        };
        Self {
            tasks: tasks.to_string(),
            categories: categories.to_string(),
        }
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::for_platform(Platform::default())
    }
}

/// Resolved storage settings for one task store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub db_path: PathBuf,
    pub platform: Platform,
}

impl StoreConfig {
    /// Resolves settings from `TASKDECK_DB_PATH` and `TASKDECK_PLATFORM`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves settings through `lookup`, falling back to
    /// `<temp_dir>/taskdeck.sqlite3` and the mobile key flavor.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let db_path = lookup(DB_PATH_ENV)
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join(DB_FILE_NAME));

        let platform = match lookup(PLATFORM_ENV) {
            Some(raw) if !raw.trim().is_empty() => raw.parse().unwrap_or_else(|err| {
                warn!("event=config_resolve module=config status=fallback error={err}");
                Platform::default()
            }),
            _ => Platform::default(),
        };

        Self { db_path, platform }
    }

    pub fn keys(&self) -> StorageKeys {
        StorageKeys::for_platform(self.platform)
    }
}
