//! Catalog, cart and order domain with its persistence layer.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod notifications;

#[cfg(test)]
mod test;

mod uuids;

pub use uuids::TypedUuid;
