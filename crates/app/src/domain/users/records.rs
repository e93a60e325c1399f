//! User Records

use jiff::Timestamp;

use crate::{domain::orders::records::OrderUuid, uuids::TypedUuid};

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;

/// User Record
///
/// The password hash never leaves the repository layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub uuid: UserUuid,
    pub username: String,
    pub email: String,
    pub is_staff: bool,
    pub receive_emails_order_updates: bool,
    pub receive_emails_new_items: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A user together with the orders they have placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub user: UserRecord,
    pub orders: Vec<OrderUuid>,
}

#[derive(Debug, Clone)]
pub(crate) struct UserCredentials {
    pub user: UserRecord,
    pub password_hash: String,
}
