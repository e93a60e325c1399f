//! Capability table: every operation names the predicates that grant it, and
//! access is granted when any one of them holds.

use thiserror::Error;

use crate::domain::{access::Principal, users::records::UserUuid};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessError {
    /// No credential was presented for an operation that needs one.
    #[error("authentication required")]
    Unauthorized,

    /// The caller is known but not allowed to touch this resource.
    #[error("forbidden")]
    Forbidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// The operation does not mutate anything.
    ReadOnly,
    Authenticated,
    Admin,
    /// The caller owns the resource being acted on.
    Owner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ListItems,
    ReadItem,
    CreateItem,
    UpdateItem,
    DeleteItem,
    ManageCart,
    PlaceOrder,
    ListOrders,
    ReadOrder,
    UpdateOrder,
    DeleteOrder,
    ManageAccount,
    AdminView,
}

impl Action {
    #[must_use]
    pub const fn is_read(self) -> bool {
        matches!(self, Self::ListItems | Self::ReadItem)
    }

    /// Predicates combined with OR.
    #[must_use]
    pub const fn rule(self) -> &'static [Predicate] {
        match self {
            Self::ListItems
            | Self::ReadItem
            | Self::CreateItem
            | Self::UpdateItem
            | Self::DeleteItem => &[Predicate::Admin, Predicate::ReadOnly],
            Self::ManageCart | Self::PlaceOrder | Self::ListOrders | Self::ManageAccount => {
                &[Predicate::Authenticated]
            }
            Self::ReadOrder | Self::UpdateOrder | Self::DeleteOrder => {
                &[Predicate::Admin, Predicate::Owner]
            }
            Self::AdminView => &[Predicate::Admin],
        }
    }
}

impl Predicate {
    #[must_use]
    pub fn holds(self, principal: Option<&Principal>, action: Action, owner: Option<UserUuid>) -> bool {
        match self {
            Self::ReadOnly => action.is_read(),
            Self::Authenticated => principal.is_some(),
            Self::Admin => principal.is_some_and(|principal| principal.is_staff),
            Self::Owner => match (principal, owner) {
                (Some(principal), Some(owner)) => principal.owns(owner),
                _ => false,
            },
        }
    }
}

/// Evaluate `action` for `principal` against a resource owned by `owner`.
///
/// Anonymous callers that are refused get [`AccessError::Unauthorized`];
/// authenticated callers get [`AccessError::Forbidden`], even when the
/// resource exists.
pub fn authorize(
    principal: Option<&Principal>,
    action: Action,
    owner: Option<UserUuid>,
) -> Result<(), AccessError> {
    if action
        .rule()
        .iter()
        .any(|predicate| predicate.holds(principal, action, owner))
    {
        return Ok(());
    }

    match principal {
        None => Err(AccessError::Unauthorized),
        Some(_) => Err(AccessError::Forbidden),
    }
}
