use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use notably_auth::AuthError;
use notably_store::StoreError;

/// Map an authorization failure to its boundary status.
///
/// `Missing` and `InvalidToken` share 401 on purpose: clients must not be
/// able to tell an expired token from a forged one. Guard failures carry
/// distinct statuses (403, 402) because they have UX value.
pub fn auth_error_to_response(err: AuthError) -> axum::response::Response {
    match err {
        AuthError::Missing => json_error(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "missing bearer credentials",
        ),
        AuthError::InvalidToken => json_error(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "authentication failed",
        ),
        AuthError::Forbidden(msg) => json_error(StatusCode::FORBIDDEN, "forbidden", msg),
        AuthError::QuotaExceeded => quota_exceeded(),
    }
}

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::UnknownTenant => {
            json_error(StatusCode::NOT_FOUND, "not_found", "tenant not found")
        }
        StoreError::QuotaExceeded => quota_exceeded(),
    }
}

pub fn quota_exceeded() -> axum::response::Response {
    json_error(
        StatusCode::PAYMENT_REQUIRED,
        "quota_exceeded",
        "Note limit reached. Upgrade to Pro.",
    )
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
