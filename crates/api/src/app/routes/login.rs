use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use notably_auth::SessionClaims;
use notably_core::TenantUsage;

use crate::app::dto::{LoginRequest, LoginResponse, TenantBody, UserBody};
use crate::app::{errors, AppServices};

/// POST /login - verify credentials and issue a bearer token.
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<LoginRequest>,
) -> axum::response::Response {
    let (Some(email), Some(password)) = (body.email, body.password) else {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "email and password required",
        );
    };

    // Unknown email and wrong password map to the same response.
    let Some(user) = services.store.verify_credentials(&email, &password) else {
        tracing::debug!(%email, "login rejected");
        return errors::json_error(
            StatusCode::UNAUTHORIZED,
            "invalid_credentials",
            "invalid credentials",
        );
    };

    let Some(tenant) = services.store.tenant_by_slug(&user.tenant_slug) else {
        return errors::json_error(
            StatusCode::UNAUTHORIZED,
            "invalid_credentials",
            "invalid tenant",
        );
    };

    let claims = SessionClaims {
        email: user.email.clone(),
        role: user.role,
        tenant_slug: tenant.slug.clone(),
    };
    let token = match services.codec.issue(&claims, services.config.token_ttl_secs) {
        Ok(token) => token,
        Err(err) => {
            tracing::error!(%err, "token issuance failed");
            return errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "token_error",
                "token issuance failed",
            );
        }
    };

    let usage = services
        .store
        .tenant_usage(&tenant.slug)
        .unwrap_or(TenantUsage {
            notes_count: 0,
            notes_limit: tenant.effective_limit(),
        });

    Json(LoginResponse {
        token,
        user: UserBody {
            id: user.id,
            email: user.email,
            role: user.role,
            tenant: TenantBody::from_parts(&tenant, &usage),
        },
    })
    .into_response()
}
