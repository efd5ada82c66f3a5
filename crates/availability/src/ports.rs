//! Storage ports for item metadata and global options.
//!
//! Implementations must be safe to share across threads. The meta store's
//! compare-and-set must be atomic per item: it is what keeps two racing
//! initializers from both materializing a flag.

use std::sync::Arc;

use thiserror::Error;

use posflag_core::ItemId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The host catalog has no item with this identifier.
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),

    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("storage corrupt: {0}")]
    Corrupt(String),
}

/// Labeled metadata fields attached to catalog items.
pub trait ItemMetaStore: Send + Sync {
    /// Read one metadata field. `Ok(None)` means the item exists but the field
    /// was never written.
    fn get_meta(&self, item_id: ItemId, key: &str) -> Result<Option<String>, StoreError>;

    /// Write (or with `None`, delete) one metadata field.
    fn set_meta(&self, item_id: ItemId, key: &str, value: Option<&str>) -> Result<(), StoreError>;

    /// Write `value` only if the field still holds `expected`.
    ///
    /// Returns `Ok(false)` when the current value differs.
    fn compare_and_set_meta(
        &self,
        item_id: ItemId,
        key: &str,
        expected: Option<&str>,
        value: &str,
    ) -> Result<bool, StoreError>;
}

/// Process-wide key/value configuration.
pub trait OptionStore: Send + Sync {
    fn get_option(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set_option(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S> ItemMetaStore for Arc<S>
where
    S: ItemMetaStore + ?Sized,
{
    fn get_meta(&self, item_id: ItemId, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get_meta(item_id, key)
    }

    fn set_meta(&self, item_id: ItemId, key: &str, value: Option<&str>) -> Result<(), StoreError> {
        (**self).set_meta(item_id, key, value)
    }

    fn compare_and_set_meta(
        &self,
        item_id: ItemId,
        key: &str,
        expected: Option<&str>,
        value: &str,
    ) -> Result<bool, StoreError> {
        (**self).compare_and_set_meta(item_id, key, expected, value)
    }
}

impl<S> OptionStore for Arc<S>
where
    S: OptionStore + ?Sized,
{
    fn get_option(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get_option(key)
    }

    fn set_option(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set_option(key, value)
    }
}
