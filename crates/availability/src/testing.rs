//! In-crate storage double with failure injection and write counting.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use posflag_core::ItemId;

use crate::ports::{ItemMetaStore, OptionStore, StoreError};

#[derive(Debug, Default)]
pub struct FakeStore {
    items: Mutex<HashMap<ItemId, HashMap<String, String>>>,
    options: Mutex<HashMap<String, String>>,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
    pub writes: AtomicUsize,
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(&self, item_id: ItemId) {
        self.items.lock().unwrap().entry(item_id).or_default();
    }

    pub fn raw_meta(&self, item_id: ItemId, key: &str) -> Option<String> {
        self.items.lock().unwrap().get(&item_id)?.get(key).cloned()
    }

    pub fn put_raw_meta(&self, item_id: ItemId, key: &str, value: &str) {
        self.items
            .lock()
            .unwrap()
            .entry(item_id)
            .or_default()
            .insert(key.to_string(), value.to_string());
    }

    pub fn put_raw_option(&self, key: &str, value: &str) {
        self.options.lock().unwrap().insert(key.to_string(), value.to_string());
    }

    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check_read(&self) -> Result<(), StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("injected read failure".to_string()));
        }
        Ok(())
    }

    fn check_write(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("injected write failure".to_string()));
        }
        Ok(())
    }
}

impl ItemMetaStore for FakeStore {
    fn get_meta(&self, item_id: ItemId, key: &str) -> Result<Option<String>, StoreError> {
        self.check_read()?;
        let items = self.items.lock().unwrap();
        let meta = items.get(&item_id).ok_or(StoreError::ItemNotFound(item_id))?;
        Ok(meta.get(key).cloned())
    }

    fn set_meta(&self, item_id: ItemId, key: &str, value: Option<&str>) -> Result<(), StoreError> {
        self.check_write()?;
        let mut items = self.items.lock().unwrap();
        let meta = items.get_mut(&item_id).ok_or(StoreError::ItemNotFound(item_id))?;
        match value {
            Some(v) => meta.insert(key.to_string(), v.to_string()),
            None => meta.remove(key),
        };
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn compare_and_set_meta(
        &self,
        item_id: ItemId,
        key: &str,
        expected: Option<&str>,
        value: &str,
    ) -> Result<bool, StoreError> {
        self.check_write()?;
        let mut items = self.items.lock().unwrap();
        let meta = items.get_mut(&item_id).ok_or(StoreError::ItemNotFound(item_id))?;
        if meta.get(key).map(String::as_str) != expected {
            return Ok(false);
        }
        meta.insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(true)
    }
}

impl OptionStore for FakeStore {
    fn get_option(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.check_read()?;
        Ok(self.options.lock().unwrap().get(key).cloned())
    }

    fn set_option(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check_write()?;
        self.options.lock().unwrap().insert(key.to_string(), value.to_string());
        Ok(())
    }
}
