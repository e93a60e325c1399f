//! Principal

use crate::domain::users::records::UserUuid;

/// The authenticated identity behind a request.
///
/// Anonymous callers are represented by the absence of a principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user: UserUuid,
    pub is_staff: bool,
}

impl Principal {
    #[must_use]
    pub const fn user(user: UserUuid) -> Self {
        Self {
            user,
            is_staff: false,
        }
    }

    #[must_use]
    pub const fn staff(user: UserUuid) -> Self {
        Self {
            user,
            is_staff: true,
        }
    }

    #[must_use]
    pub fn owns(&self, owner: UserUuid) -> bool {
        self.user == owner
    }
}
