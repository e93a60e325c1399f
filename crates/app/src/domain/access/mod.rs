//! Access Policy

mod policy;
mod principal;

pub use policy::*;
pub use principal::Principal;
