//! Single-file JSON persistence.
//!
//! Layout:
//!
//! ```json
//! {
//!   "options": { "pos_sell_all_products_default": "yes" },
//!   "items": { "<item uuid>": { "meta": { "pos_allowed": "no" } } }
//! }
//! ```
//!
//! Every operation loads the document, and writes go back through a synced
//! temp file + rename. Operations hold an in-process mutex plus an advisory
//! lock on a sidecar `<path>.lock` file, so separate handles and separate
//! processes on the same path serialize their load/modify/save cycles.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use fs4::fs_std::FileExt;
use serde::{Deserialize, Serialize};

use posflag_availability::{ItemMetaStore, OptionStore, StoreError};
use posflag_core::ItemId;

use super::CatalogRegistry;

#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    #[serde(default)]
    options: BTreeMap<String, String>,
    #[serde(default)]
    items: BTreeMap<String, ItemRecord>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ItemRecord {
    #[serde(default)]
    meta: BTreeMap<String, String>,
}

/// Advisory lock on the sidecar file, released on drop.
struct FileLock {
    file: File,
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock_path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open (lazily) the store at `path`. A missing file is an empty store.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut lock_path = OsString::from(path.as_os_str());
        lock_path.push(".lock");
        Self {
            path,
            lock_path: PathBuf::from(lock_path),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Document, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Document::default()),
            Err(e) => {
                return Err(StoreError::Unavailable(format!(
                    "read {}: {e}",
                    self.path.display()
                )));
            }
        };
        if text.trim().is_empty() {
            return Ok(Document::default());
        }
        serde_json::from_str(&text)
            .map_err(|e| StoreError::Corrupt(format!("{}: {e}", self.path.display())))
    }

    fn save(&self, doc: &Document) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(doc)
            .map_err(|e| StoreError::Unavailable(format!("encode store: {e}")))?;
        let tmp = self.path.with_extension("json.tmp");
        File::create(&tmp)
            .and_then(|mut file| {
                file.write_all(json.as_bytes())?;
                file.sync_all()
            })
            .and_then(|()| fs::rename(&tmp, &self.path))
            .map_err(|e| StoreError::Unavailable(format!("write {}: {e}", self.path.display())))?;
        tracing::trace!(path = %self.path.display(), "store saved");
        Ok(())
    }

    fn lock_file(&self, exclusive: bool) -> Result<FileLock, StoreError> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&self.lock_path)
            .map_err(|e| {
                StoreError::Unavailable(format!("open {}: {e}", self.lock_path.display()))
            })?;
        let locked = if exclusive {
            FileExt::lock_exclusive(&file)
        } else {
            FileExt::lock_shared(&file)
        };
        locked.map_err(|e| {
            StoreError::Unavailable(format!("lock {}: {e}", self.lock_path.display()))
        })?;
        Ok(FileLock { file })
    }

    fn read<R>(&self, f: impl FnOnce(&Document) -> Result<R, StoreError>) -> Result<R, StoreError> {
        let _guard = self.lock.lock().map_err(|_| poisoned())?;
        let _file_lock = self.lock_file(false)?;
        let doc = self.load()?;
        f(&doc)
    }

    /// Load, mutate, and save only when `f` reports a change.
    fn modify<R>(
        &self,
        f: impl FnOnce(&mut Document) -> Result<(R, bool), StoreError>,
    ) -> Result<R, StoreError> {
        let _guard = self.lock.lock().map_err(|_| poisoned())?;
        let _file_lock = self.lock_file(true)?;
        let mut doc = self.load()?;
        let (result, changed) = f(&mut doc)?;
        if changed {
            self.save(&doc)?;
        }
        Ok(result)
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("json store lock poisoned".to_string())
}

fn item_mut(doc: &mut Document, item_id: ItemId) -> Result<&mut ItemRecord, StoreError> {
    doc.items
        .get_mut(&item_id.to_string())
        .ok_or(StoreError::ItemNotFound(item_id))
}

impl ItemMetaStore for JsonFileStore {
    fn get_meta(&self, item_id: ItemId, key: &str) -> Result<Option<String>, StoreError> {
        self.read(|doc| {
            let item = doc
                .items
                .get(&item_id.to_string())
                .ok_or(StoreError::ItemNotFound(item_id))?;
            Ok(item.meta.get(key).cloned())
        })
    }

    fn set_meta(&self, item_id: ItemId, key: &str, value: Option<&str>) -> Result<(), StoreError> {
        self.modify(|doc| {
            let item = item_mut(doc, item_id)?;
            match value {
                Some(v) => {
                    item.meta.insert(key.to_string(), v.to_string());
                }
                None => {
                    item.meta.remove(key);
                }
            }
            Ok(((), true))
        })
    }

    fn compare_and_set_meta(
        &self,
        item_id: ItemId,
        key: &str,
        expected: Option<&str>,
        value: &str,
    ) -> Result<bool, StoreError> {
        self.modify(|doc| {
            let item = item_mut(doc, item_id)?;
            if item.meta.get(key).map(String::as_str) != expected {
                return Ok((false, false));
            }
            item.meta.insert(key.to_string(), value.to_string());
            Ok((true, true))
        })
    }
}

impl OptionStore for JsonFileStore {
    fn get_option(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.read(|doc| Ok(doc.options.get(key).cloned()))
    }

    fn set_option(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.modify(|doc| {
            doc.options.insert(key.to_string(), value.to_string());
            Ok(((), true))
        })
    }
}

impl CatalogRegistry for JsonFileStore {
    fn register_item(&self, item_id: ItemId) -> Result<bool, StoreError> {
        self.modify(|doc| {
            let key = item_id.to_string();
            if doc.items.contains_key(&key) {
                return Ok((false, false));
            }
            doc.items.insert(key, ItemRecord::default());
            Ok((true, true))
        })
    }

    fn remove_item(&self, item_id: ItemId) -> Result<bool, StoreError> {
        self.modify(|doc| {
            let removed = doc.items.remove(&item_id.to_string()).is_some();
            Ok((removed, removed))
        })
    }

    fn list_items(&self) -> Result<Vec<ItemId>, StoreError> {
        self.read(|doc| {
            let mut ids = doc
                .items
                .keys()
                .map(|k| {
                    k.parse::<ItemId>()
                        .map_err(|e| StoreError::Corrupt(format!("item key {k:?}: {e}")))
                })
                .collect::<Result<Vec<_>, _>>()?;
            ids.sort();
            Ok(ids)
        })
    }
}
