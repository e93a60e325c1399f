//! Orders

pub mod errors;
pub mod records;
mod repository;
pub mod service;
pub mod workflow;

pub use errors::OrdersServiceError;
pub use service::*;
