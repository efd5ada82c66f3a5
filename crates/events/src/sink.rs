use std::sync::Arc;

use posflag_core::ItemId;

use crate::CatalogEvent;

/// Receiver of host catalog lifecycle notifications.
///
/// The host calls into this explicitly whenever a catalog item is created or
/// updated. Deliveries may repeat (a create is usually followed by an update
/// within the same request), so implementations must be idempotent.
///
/// Errors are associated so each sink reports its own failure type; hosts are
/// expected to log them and carry on with the catalog operation.
pub trait CatalogEventSink {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn on_item_created(&self, item_id: ItemId) -> Result<(), Self::Error>;

    fn on_item_updated(&self, item_id: ItemId) -> Result<(), Self::Error>;

    /// Route a typed catalog event to the matching hook.
    fn deliver(&self, event: &CatalogEvent) -> Result<(), Self::Error> {
        match event {
            CatalogEvent::ItemCreated(e) => self.on_item_created(e.item_id),
            CatalogEvent::ItemUpdated(e) => self.on_item_updated(e.item_id),
        }
    }
}

impl<S> CatalogEventSink for Arc<S>
where
    S: CatalogEventSink + ?Sized,
{
    type Error = S::Error;

    fn on_item_created(&self, item_id: ItemId) -> Result<(), Self::Error> {
        (**self).on_item_created(item_id)
    }

    fn on_item_updated(&self, item_id: ItemId) -> Result<(), Self::Error> {
        (**self).on_item_updated(item_id)
    }
}
