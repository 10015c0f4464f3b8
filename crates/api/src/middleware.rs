use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use notably_auth::ContextResolver;
use notably_store::InMemoryStore;

use crate::app::errors;

#[derive(Clone)]
pub struct AuthState {
    pub resolver: Arc<ContextResolver<Arc<InMemoryStore>>>,
}

/// Resolve the `Authorization` header and attach the request context.
///
/// Every route behind this middleware can rely on a `RequestContext`
/// extension whose user and tenant belong together.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Response> {
    let header = bearer_header(req.headers());

    let ctx = state
        .resolver
        .resolve(header)
        .map_err(errors::auth_error_to_response)?;

    req.extensions_mut().insert(ctx);
    Ok(next.run(req).await)
}

fn bearer_header(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
}
