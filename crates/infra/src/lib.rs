//! Infrastructure layer: storage adapters and configuration.

pub mod config;
pub mod store;

pub use config::{ConfigError, StoreConfig};
pub use store::{CatalogItem, CatalogRegistry, InMemoryStore, JsonFileStore, PosStore};
