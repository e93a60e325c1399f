//! Service test support: a throwaway database per test plus fixtures.

mod context;
pub(crate) mod helpers;

pub(crate) use context::TestContext;
