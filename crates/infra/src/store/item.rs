use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use posflag_core::{Entity, ItemId};

/// Host catalog item as seen by this workspace: identity plus metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    #[serde(default)]
    pub meta: BTreeMap<String, String>,
}

impl CatalogItem {
    pub fn new(id: ItemId) -> Self {
        Self {
            id,
            meta: BTreeMap::new(),
        }
    }

    pub(crate) fn write_meta(&mut self, key: &str, value: Option<&str>) {
        match value {
            Some(v) => {
                self.meta.insert(key.to_string(), v.to_string());
            }
            None => {
                self.meta.remove(key);
            }
        }
    }

    /// Compare-and-set on one field; `true` if written.
    pub(crate) fn swap_meta(&mut self, key: &str, expected: Option<&str>, value: &str) -> bool {
        if self.meta.get(key).map(String::as_str) != expected {
            return false;
        }
        self.meta.insert(key.to_string(), value.to_string());
        true
    }
}

impl Entity for CatalogItem {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
