//! Per-item POS availability flags with fallback to the global default.

use posflag_core::ItemId;
use posflag_events::CatalogEventSink;

use crate::error::AvailabilityError;
use crate::flag::AvailabilityFlag;
use crate::ports::{ItemMetaStore, OptionStore, StoreError};
use crate::resolver::DefaultResolver;

/// Item metadata key holding the flag.
pub const POS_ALLOWED_META_KEY: &str = "pos_allowed";

/// Outcome of reading an item's flag.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FlagRead {
    /// The host catalog does not know the item.
    Missing,
    /// `raw` is the stored value exactly as read; compare-and-set needs it.
    Found {
        raw: Option<String>,
        flag: AvailabilityFlag,
    },
}

/// Availability store: the query and initialization surface for POS flags.
///
/// Generic over the storage ports, mirroring how the read models are wired:
/// pass concrete stores (or `Arc`s of them) in, get a cheap synchronous
/// service out.
#[derive(Debug, Clone)]
pub struct AvailabilityStore<M, O> {
    items: M,
    defaults: DefaultResolver<O>,
}

impl<M, O> AvailabilityStore<M, O>
where
    M: ItemMetaStore,
    O: OptionStore,
{
    pub fn new(items: M, options: O) -> Self {
        Self::with_resolver(items, DefaultResolver::new(options))
    }

    pub fn with_resolver(items: M, defaults: DefaultResolver<O>) -> Self {
        Self { items, defaults }
    }

    pub fn resolver(&self) -> &DefaultResolver<O> {
        &self.defaults
    }

    /// Whether the item may be sold at the point of sale.
    ///
    /// Nonexistent items are never sellable. Unset flags (including unreadable
    /// ones) resolve through the current global default. Never writes.
    pub fn is_allowed(&self, item_id: ItemId) -> bool {
        match self.read_flag(item_id) {
            FlagRead::Missing => false,
            FlagRead::Found { flag, .. } => match flag {
                AvailabilityFlag::Allowed => true,
                AvailabilityFlag::Disallowed => false,
                AvailabilityFlag::Unset => self.defaults.get_default(),
            },
        }
    }

    /// The stored flag, `None` when the item does not exist.
    pub fn flag(&self, item_id: ItemId) -> Option<AvailabilityFlag> {
        match self.read_flag(item_id) {
            FlagRead::Missing => None,
            FlagRead::Found { flag, .. } => Some(flag),
        }
    }

    /// Keep only the items sellable at the point of sale, preserving order.
    pub fn filter_allowed<I>(&self, item_ids: I) -> Vec<ItemId>
    where
        I: IntoIterator<Item = ItemId>,
    {
        item_ids.into_iter().filter(|id| self.is_allowed(*id)).collect()
    }

    /// Materialize the flag from the current default, once.
    ///
    /// Only an `Unset` flag is written, and only if it is still the value that
    /// was read (compare-and-set). Already materialized flags, missing items
    /// and lost races are silent no-ops.
    pub fn initialize_default_flag(&self, item_id: ItemId) -> Result<(), AvailabilityError> {
        let raw = match self.read_flag(item_id) {
            FlagRead::Missing => {
                tracing::debug!(%item_id, "initialize skipped: item not found");
                return Ok(());
            }
            FlagRead::Found { flag, .. } if flag.is_set() => {
                tracing::debug!(%item_id, %flag, "initialize skipped: flag already set");
                return Ok(());
            }
            FlagRead::Found { raw, .. } => raw,
        };

        let flag = AvailabilityFlag::from_default(self.defaults.get_default());
        let Some(value) = flag.as_meta() else {
            return Ok(());
        };

        match self
            .items
            .compare_and_set_meta(item_id, POS_ALLOWED_META_KEY, raw.as_deref(), value)
        {
            Ok(true) => {
                tracing::info!(%item_id, %flag, "POS flag initialized from default");
                Ok(())
            }
            Ok(false) => {
                tracing::debug!(%item_id, "initialize skipped: flag changed concurrently");
                Ok(())
            }
            Err(StoreError::ItemNotFound(_)) => {
                tracing::debug!(%item_id, "initialize skipped: item removed before write");
                Ok(())
            }
            Err(source) => Err(AvailabilityError::StorageWriteFailed { item_id, source }),
        }
    }

    /// Explicit administrative change of an item's flag.
    ///
    /// This is the only path that overwrites a materialized flag. Writing
    /// `Unset` removes the stored value so the item follows the default again.
    pub fn set_flag(
        &self,
        item_id: ItemId,
        flag: AvailabilityFlag,
    ) -> Result<(), AvailabilityError> {
        match self.items.set_meta(item_id, POS_ALLOWED_META_KEY, flag.as_meta()) {
            Ok(()) => {
                tracing::info!(%item_id, %flag, "POS flag set explicitly");
                Ok(())
            }
            Err(StoreError::ItemNotFound(_)) => Err(AvailabilityError::ItemNotFound(item_id)),
            Err(source) => Err(AvailabilityError::StorageWriteFailed { item_id, source }),
        }
    }

    fn read_flag(&self, item_id: ItemId) -> FlagRead {
        match self.items.get_meta(item_id, POS_ALLOWED_META_KEY) {
            Ok(raw) => {
                let flag = AvailabilityFlag::from_meta(raw.as_deref()).unwrap_or_else(|e| {
                    tracing::warn!(%item_id, error = %e, "treating unrecognized POS flag as unset");
                    AvailabilityFlag::Unset
                });
                FlagRead::Found { raw, flag }
            }
            Err(StoreError::ItemNotFound(_)) => FlagRead::Missing,
            Err(e) => {
                tracing::warn!(%item_id, error = %e, "POS flag read failed; treating as unset");
                FlagRead::Found {
                    raw: None,
                    flag: AvailabilityFlag::Unset,
                }
            }
        }
    }
}

impl<M, O> CatalogEventSink for AvailabilityStore<M, O>
where
    M: ItemMetaStore,
    O: OptionStore,
{
    type Error = AvailabilityError;

    fn on_item_created(&self, item_id: ItemId) -> Result<(), Self::Error> {
        self.initialize_default_flag(item_id)
    }

    fn on_item_updated(&self, item_id: ItemId) -> Result<(), Self::Error> {
        self.initialize_default_flag(item_id)
    }
}
