//! User identity model.

use serde::{Deserialize, Serialize};

/// Role granted to a user within its tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Member,
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Role::Admin => f.write_str("admin"),
            Role::Member => f.write_str("member"),
        }
    }
}

/// Identity record for an authenticated user.
///
/// # Invariants
/// - `email` is the unique lookup key.
/// - A user belongs to exactly one tenant; `tenant_slug` is immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub tenant_slug: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_lowercase() {
        assert_eq!(serde_json::to_value(Role::Admin).unwrap(), "admin");
        let r: Role = serde_json::from_value(serde_json::json!("member")).unwrap();
        assert_eq!(r, Role::Member);
    }
}
