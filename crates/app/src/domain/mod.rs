//! Rugs Domain Concerns

pub mod access;
pub mod carts;
pub mod items;
pub mod orders;
pub mod users;
pub mod validation;
