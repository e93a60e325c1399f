//! Depot helper extensions.

use std::{any::Any, sync::Arc};

use salvo::prelude::Depot;

use rugs_app::domain::access::Principal;

use crate::{errors::ApiError, state::State};

pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError>;

    fn state(&self) -> Result<&Arc<State>, ApiError> {
        self.obtain_or_500::<Arc<State>>()
    }

    fn insert_principal(&mut self, principal: Principal);

    /// The authenticated caller, if the request carried a valid token.
    fn principal(&self) -> Option<Principal>;

    fn principal_or_401(&self) -> Result<Principal, ApiError> {
        self.principal().ok_or(ApiError::Unauthorized)
    }
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError> {
        self.obtain::<T>().map_err(|_missing| ApiError::Internal)
    }

    fn insert_principal(&mut self, principal: Principal) {
        self.inject(principal);
    }

    fn principal(&self) -> Option<Principal> {
        self.obtain::<Principal>().ok().copied()
    }
}
