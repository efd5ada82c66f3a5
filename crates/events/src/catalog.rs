//! Events emitted by the host catalog when items change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use posflag_core::ItemId;

use crate::Event;

/// Event: ItemCreated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCreated {
    pub item_id: ItemId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemUpdated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemUpdated {
    pub item_id: ItemId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogEvent {
    ItemCreated(ItemCreated),
    ItemUpdated(ItemUpdated),
}

impl CatalogEvent {
    pub fn created(item_id: ItemId) -> Self {
        Self::ItemCreated(ItemCreated {
            item_id,
            occurred_at: Utc::now(),
        })
    }

    pub fn updated(item_id: ItemId) -> Self {
        Self::ItemUpdated(ItemUpdated {
            item_id,
            occurred_at: Utc::now(),
        })
    }

    pub fn item_id(&self) -> ItemId {
        match self {
            CatalogEvent::ItemCreated(e) => e.item_id,
            CatalogEvent::ItemUpdated(e) => e.item_id,
        }
    }
}

impl Event for CatalogEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CatalogEvent::ItemCreated(_) => "catalog.item.created",
            CatalogEvent::ItemUpdated(_) => "catalog.item.updated",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CatalogEvent::ItemCreated(e) => e.occurred_at,
            CatalogEvent::ItemUpdated(e) => e.occurred_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_types_are_stable() {
        let id = ItemId::new();
        assert_eq!(CatalogEvent::created(id).event_type(), "catalog.item.created");
        assert_eq!(CatalogEvent::updated(id).event_type(), "catalog.item.updated");
    }

    #[test]
    fn constructors_stamp_business_time() {
        let before = Utc::now();
        let ev = CatalogEvent::updated(ItemId::new());
        let after = Utc::now();
        assert!(ev.occurred_at() >= before && ev.occurred_at() <= after);
    }

    #[test]
    fn item_id_is_carried_by_both_variants() {
        let id = ItemId::new();
        assert_eq!(CatalogEvent::created(id).item_id(), id);
        assert_eq!(CatalogEvent::updated(id).item_id(), id);
    }

    #[test]
    fn serializes_with_variant_tag() {
        let ev = CatalogEvent::created(ItemId::new());
        let json = serde_json::to_value(&ev).unwrap();
        assert!(json.get("ItemCreated").is_some());
        let back: CatalogEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, ev);
    }
}
