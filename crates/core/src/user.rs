//! Signed-in user identity.

use serde::{Deserialize, Serialize};

use crate::types::{Email, UserId, UserRole};

/// The user attached to a visitor's session after signing in.
///
/// This is the record persisted (as JSON) under the session's user key and
/// rehydrated on the next request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub role: UserRole,
}

impl SessionUser {
    /// Whether this user may open the admin dashboard.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// First word of the display name, used for greetings.
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or_default()
    }

    /// Second word of the display name, if any.
    #[must_use]
    pub fn last_name(&self) -> &str {
        self.name.split_whitespace().nth(1).unwrap_or_default()
    }
}
