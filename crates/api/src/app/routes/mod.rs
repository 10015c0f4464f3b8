use axum::{
    routing::{get, post},
    Router,
};

pub mod login;
pub mod notes;
pub mod system;
pub mod tenants;

/// Router for all authenticated (tenant-scoped) endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/notes", get(notes::list).post(notes::create))
        .route(
            "/notes/:id",
            get(notes::get_one).put(notes::update).delete(notes::delete),
        )
        .route("/tenants/:slug/upgrade", post(tenants::upgrade))
}

/// Router for unauthenticated endpoints.
pub fn public_router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .route("/login", post(login::login))
}
