//! Document storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Roots of the cached and persistent document tiers
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Root of the cached tier (orders)
    #[serde(default = "default_path")]
    pub cached_path: PathBuf,

    /// Root of the persistent tier (catalog, ledger links)
    #[serde(default = "default_path")]
    pub persistent_path: PathBuf,

    /// Remove the cached tier when the process exits
    #[serde(default = "default_clear_cache_on_exit")]
    pub clear_cache_on_exit: bool,
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.cached_path.as_os_str().is_empty() {
            return Err(ValidationError::EmptyStoragePath("storage.cached_path"));
        }
        if self.persistent_path.as_os_str().is_empty() {
            return Err(ValidationError::EmptyStoragePath("storage.persistent_path"));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            cached_path: default_path(),
            persistent_path: default_path(),
            clear_cache_on_exit: default_clear_cache_on_exit(),
        }
    }
}

fn default_path() -> PathBuf {
    PathBuf::from("./data")
}

fn default_clear_cache_on_exit() -> bool {
    true
}
