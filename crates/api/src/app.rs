use std::sync::Arc;

use axum::{extract::Extension, http::header, http::HeaderValue, http::Method, Router};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use notably_auth::{ContextResolver, TokenCodec};
use notably_store::InMemoryStore;

use crate::config::ApiConfig;
use crate::middleware::{auth_middleware, AuthState};

pub mod dto;
pub mod errors;
pub mod routes;

/// Shared handles available to all handlers via extension.
pub struct AppServices {
    pub store: Arc<InMemoryStore>,
    pub codec: TokenCodec,
    pub config: ApiConfig,
}

/// Build the full application router over a freshly seeded store.
pub fn build_app(config: ApiConfig) -> Router {
    let store = Arc::new(InMemoryStore::seeded());
    build_app_with_store(config, store)
}

/// Build the router over an explicit store handle (tests, alternate seeds).
pub fn build_app_with_store(config: ApiConfig, store: Arc<InMemoryStore>) -> Router {
    let codec = TokenCodec::new(config.jwt_secret.as_bytes());
    let resolver = Arc::new(ContextResolver::new(codec.clone(), store.clone()));

    let services = Arc::new(AppServices {
        store,
        codec,
        config: config.clone(),
    });

    let protected = routes::router().layer(axum::middleware::from_fn_with_state(
        AuthState { resolver },
        auth_middleware,
    ));

    Router::new()
        .merge(routes::public_router())
        .merge(protected)
        .layer(
            ServiceBuilder::new()
                .layer(Extension(services))
                .layer(cors_layer(&config)),
        )
}

fn cors_layer(config: &ApiConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if config.cors_origin == "*" {
        return layer.allow_origin(Any);
    }

    match config.cors_origin.parse::<HeaderValue>() {
        Ok(origin) => layer.allow_origin(origin),
        Err(_) => {
            tracing::warn!(origin = %config.cors_origin, "invalid CORS_ORIGIN; falling back to permissive");
            layer.allow_origin(Any)
        }
    }
}
