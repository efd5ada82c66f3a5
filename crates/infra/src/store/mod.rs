//! Storage adapters for item metadata and global options.

pub mod in_memory;
pub mod item;
pub mod json_file;

use std::sync::Arc;

use posflag_availability::{ItemMetaStore, OptionStore, StoreError};
use posflag_core::ItemId;

pub use in_memory::InMemoryStore;
pub use item::CatalogItem;
pub use json_file::JsonFileStore;

/// Catalog membership, for hosts that keep their item list in these stores.
pub trait CatalogRegistry: Send + Sync {
    /// Register an item. Returns `false` if it was already present.
    fn register_item(&self, item_id: ItemId) -> Result<bool, StoreError>;

    /// Remove an item and its metadata. Returns `false` if it was unknown.
    fn remove_item(&self, item_id: ItemId) -> Result<bool, StoreError>;

    /// All registered items, ordered by identifier.
    fn list_items(&self) -> Result<Vec<ItemId>, StoreError>;
}

impl<S> CatalogRegistry for Arc<S>
where
    S: CatalogRegistry + ?Sized,
{
    fn register_item(&self, item_id: ItemId) -> Result<bool, StoreError> {
        (**self).register_item(item_id)
    }

    fn remove_item(&self, item_id: ItemId) -> Result<bool, StoreError> {
        (**self).remove_item(item_id)
    }

    fn list_items(&self) -> Result<Vec<ItemId>, StoreError> {
        (**self).list_items()
    }
}

/// Everything a single backend provides; lets callers pick one at runtime.
pub trait PosStore: ItemMetaStore + OptionStore + CatalogRegistry {}

impl<T> PosStore for T where T: ItemMetaStore + OptionStore + CatalogRegistry + ?Sized {}
