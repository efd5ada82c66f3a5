//! `posflag-core` — shared domain building blocks.
//!
//! This crate holds **pure** primitives (identifiers, errors, entity marker)
//! shared by the availability service, the event contracts and the storage
//! adapters. No IO lives here.

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::DomainError;
pub use id::ItemId;
