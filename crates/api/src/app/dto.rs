//! Request/response DTOs and mapping to/from domain types.

use serde::{Deserialize, Serialize};

use notably_core::{Plan, Role, Tenant, TenantUsage, User};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserBody,
}

#[derive(Debug, Serialize)]
pub struct UserBody {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub tenant: TenantBody,
}

/// Tenant shape mirrored by login and upgrade responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantBody {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub plan: Plan,
    pub notes_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes_limit: Option<u32>,
}

impl TenantBody {
    pub fn from_parts(tenant: &Tenant, usage: &TenantUsage) -> Self {
        Self {
            id: tenant.id.clone(),
            name: tenant.name.clone(),
            slug: tenant.slug.clone(),
            plan: tenant.plan,
            notes_count: usage.notes_count,
            notes_limit: usage.notes_limit,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateNoteRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}
