use thiserror::Error;

use posflag_core::ItemId;

use crate::ports::StoreError;

/// Failures surfaced by the availability service.
///
/// Reads never fail (they fall back to the default); only writes end up here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AvailabilityError {
    #[error("failed to persist POS flag for item {item_id}: {source}")]
    StorageWriteFailed {
        item_id: ItemId,
        #[source]
        source: StoreError,
    },

    #[error("failed to persist setting {key}: {source}")]
    SettingWriteFailed {
        key: &'static str,
        #[source]
        source: StoreError,
    },

    /// Explicit administrative writes need an existing item.
    #[error("item not found: {0}")]
    ItemNotFound(ItemId),
}
