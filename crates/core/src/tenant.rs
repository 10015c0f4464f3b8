//! Tenant model: the isolation boundary for users and their notes.

use serde::{Deserialize, Serialize};

/// Notes allowed under the free plan when a tenant carries no explicit limit.
pub const DEFAULT_FREE_NOTES_LIMIT: u32 = 3;

/// Subscription plan gating resource quotas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Free,
    Pro,
}

impl core::fmt::Display for Plan {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Plan::Free => f.write_str("free"),
            Plan::Pro => f.write_str("pro"),
        }
    }
}

/// A tenant: a group of users sharing one notes space.
///
/// # Invariants
/// - `slug` is the unique lookup key and never changes.
/// - `notes_limit` is only meaningful under [`Plan::Free`]; upgrading to pro
///   clears it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub plan: Plan,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes_limit: Option<u32>,
}

impl Tenant {
    /// Effective note quota, or `None` when the plan is unmetered.
    pub fn effective_limit(&self) -> Option<u32> {
        match self.plan {
            Plan::Free => Some(self.notes_limit.unwrap_or(DEFAULT_FREE_NOTES_LIMIT)),
            Plan::Pro => None,
        }
    }
}

/// Point-in-time usage view for a tenant: note count plus the quota limit
/// (present only under the free plan).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantUsage {
    pub notes_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes_limit: Option<u32>,
}
