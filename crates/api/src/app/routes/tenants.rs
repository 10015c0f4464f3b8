use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use notably_auth::{require_own_tenant, require_role, RequestContext};
use notably_core::{Role, TenantUsage};

use crate::app::dto::TenantBody;
use crate::app::{errors, AppServices};

/// POST /tenants/:slug/upgrade - move a tenant to the pro plan.
///
/// Admin-only, and only for the caller's own tenant: an admin of tenant A
/// cannot upgrade tenant B by naming B's slug.
pub async fn upgrade(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    Path(slug): Path<String>,
) -> axum::response::Response {
    if let Err(err) = require_role(&ctx, Role::Admin) {
        return errors::auth_error_to_response(err);
    }
    if let Err(err) = require_own_tenant(&ctx, &slug) {
        return errors::auth_error_to_response(err);
    }

    let Some(tenant) = services.store.upgrade(&slug) else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "tenant not found");
    };

    tracing::info!(%slug, "tenant upgraded to pro");

    let usage = services.store.tenant_usage(&slug).unwrap_or(TenantUsage {
        notes_count: 0,
        notes_limit: None,
    });

    Json(serde_json::json!({
        "tenant": TenantBody::from_parts(&tenant, &usage),
    }))
    .into_response()
}
