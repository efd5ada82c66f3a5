//! POS availability domain.
//!
//! Decides whether a catalog item may be sold at the point of sale: a per-item
//! tri-state flag that falls back to one admin-configurable default. Storage is
//! reached only through the ports in [`ports`]; adapters live in `posflag-infra`.

pub mod error;
pub mod flag;
pub mod ports;
pub mod resolver;
pub mod settings;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

pub use error::AvailabilityError;
pub use flag::AvailabilityFlag;
pub use ports::{ItemMetaStore, OptionStore, StoreError};
pub use resolver::{DefaultResolver, SELL_ALL_BY_DEFAULT_OPTION};
pub use store::{AvailabilityStore, POS_ALLOWED_META_KEY};
