//! Configuration loading and representation.
//!
//! `POSFLAG_STORE` selects the backend: unset, empty or `memory` keeps state
//! in process; anything else is the path of a JSON store file.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::store::{InMemoryStore, JsonFileStore, PosStore};

/// Environment variable selecting the storage backend.
pub const STORE_ENV: &str = "POSFLAG_STORE";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {STORE_ENV} value: {0}")]
    InvalidStore(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StoreConfig {
    #[default]
    Memory,
    JsonFile(PathBuf),
}

impl StoreConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(STORE_ENV) {
            Ok(value) => Self::parse(&value),
            Err(_) => Ok(Self::Memory),
        }
    }

    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("memory") {
            return Ok(Self::Memory);
        }
        let path = PathBuf::from(value);
        if path.is_dir() {
            return Err(ConfigError::InvalidStore(format!(
                "{} is a directory",
                path.display()
            )));
        }
        Ok(Self::JsonFile(path))
    }

    /// Build the configured backend.
    pub fn open(&self) -> Arc<dyn PosStore> {
        match self {
            StoreConfig::Memory => {
                tracing::info!("using in-memory store");
                Arc::new(InMemoryStore::new())
            }
            StoreConfig::JsonFile(path) => {
                tracing::info!(path = %path.display(), "using JSON file store");
                Arc::new(JsonFileStore::new(path.clone()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_memory_select_in_memory() {
        assert_eq!(StoreConfig::parse("").unwrap(), StoreConfig::Memory);
        assert_eq!(StoreConfig::parse(" MEMORY ").unwrap(), StoreConfig::Memory);
    }

    #[test]
    fn paths_select_json_file() {
        assert_eq!(
            StoreConfig::parse("/tmp/posflag-test.json").unwrap(),
            StoreConfig::JsonFile(PathBuf::from("/tmp/posflag-test.json"))
        );
    }

    #[test]
    fn directories_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = StoreConfig::parse(dir.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidStore(_)));
    }
}
