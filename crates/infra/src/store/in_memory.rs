use std::collections::HashMap;
use std::sync::RwLock;

use posflag_availability::{ItemMetaStore, OptionStore, StoreError};
use posflag_core::{Entity, ItemId};

use super::CatalogRegistry;
use super::item::CatalogItem;

/// In-memory catalog metadata + options for tests/dev.
///
/// Each operation holds the relevant lock for its whole duration, which makes
/// `compare_and_set_meta` atomic per item.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    items: RwLock<HashMap<ItemId, CatalogItem>>,
    options: RwLock<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of a stored item (metadata included).
    pub fn item(&self, item_id: ItemId) -> Option<CatalogItem> {
        self.items.read().ok()?.get(&item_id).cloned()
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("in-memory store lock poisoned".to_string())
}

impl ItemMetaStore for InMemoryStore {
    fn get_meta(&self, item_id: ItemId, key: &str) -> Result<Option<String>, StoreError> {
        let items = self.items.read().map_err(|_| poisoned())?;
        let item = items.get(&item_id).ok_or(StoreError::ItemNotFound(item_id))?;
        Ok(item.meta.get(key).cloned())
    }

    fn set_meta(&self, item_id: ItemId, key: &str, value: Option<&str>) -> Result<(), StoreError> {
        let mut items = self.items.write().map_err(|_| poisoned())?;
        let item = items.get_mut(&item_id).ok_or(StoreError::ItemNotFound(item_id))?;
        item.write_meta(key, value);
        Ok(())
    }

    fn compare_and_set_meta(
        &self,
        item_id: ItemId,
        key: &str,
        expected: Option<&str>,
        value: &str,
    ) -> Result<bool, StoreError> {
        let mut items = self.items.write().map_err(|_| poisoned())?;
        let item = items.get_mut(&item_id).ok_or(StoreError::ItemNotFound(item_id))?;
        Ok(item.swap_meta(key, expected, value))
    }
}

impl OptionStore for InMemoryStore {
    fn get_option(&self, key: &str) -> Result<Option<String>, StoreError> {
        let options = self.options.read().map_err(|_| poisoned())?;
        Ok(options.get(key).cloned())
    }

    fn set_option(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut options = self.options.write().map_err(|_| poisoned())?;
        options.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl CatalogRegistry for InMemoryStore {
    fn register_item(&self, item_id: ItemId) -> Result<bool, StoreError> {
        let mut items = self.items.write().map_err(|_| poisoned())?;
        if items.contains_key(&item_id) {
            return Ok(false);
        }
        let item = CatalogItem::new(item_id);
        items.insert(*item.id(), item);
        Ok(true)
    }

    fn remove_item(&self, item_id: ItemId) -> Result<bool, StoreError> {
        let mut items = self.items.write().map_err(|_| poisoned())?;
        Ok(items.remove(&item_id).is_some())
    }

    fn list_items(&self) -> Result<Vec<ItemId>, StoreError> {
        let items = self.items.read().map_err(|_| poisoned())?;
        let mut ids: Vec<_> = items.keys().copied().collect();
        ids.sort();
        Ok(ids)
    }
}
