//! Catalog event contracts consumed by the availability service.

mod catalog;
mod event;
mod sink;

pub use catalog::{CatalogEvent, ItemCreated, ItemUpdated};
pub use event::Event;
pub use sink::CatalogEventSink;
