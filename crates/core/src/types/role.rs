//! User roles.

use serde::{Deserialize, Serialize};

/// Role of a signed-in user.
///
/// Serialized lowercase (`"customer"`, `"admin"`), which is also the shape
/// persisted with the session user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Customer,
    Admin,
}

impl UserRole {
    /// Whether this role may open the admin dashboard.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}
