use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use notably_auth::{check_quota, RequestContext};
use notably_store::{NewNote, NoteUpdate};

use crate::app::dto::{CreateNoteRequest, UpdateNoteRequest};
use crate::app::{errors, AppServices};

/// GET /notes - list the authenticated tenant's notes.
pub async fn list(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
) -> axum::response::Response {
    Json(services.store.list_notes(&ctx.tenant.slug)).into_response()
}

/// POST /notes - create a note, subject to the plan quota.
pub async fn create(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    Json(body): Json<CreateNoteRequest>,
) -> axum::response::Response {
    if let Err(err) = check_quota(&ctx, &services.store) {
        return errors::auth_error_to_response(err);
    }

    let (Some(title), Some(content)) = (body.title, body.content) else {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "title and content required",
        );
    };

    // Admission is re-checked atomically with the insert; the advisory
    // check above cannot be trusted under concurrent creates.
    match services.store.create_note(
        &ctx.tenant.slug,
        NewNote {
            title,
            content,
            author_email: ctx.user.email.clone(),
        },
    ) {
        Ok(note) => (StatusCode::CREATED, Json(note)).into_response(),
        Err(err) => errors::store_error_to_response(err),
    }
}

/// GET /notes/:id
pub async fn get_one(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match services.store.get_note(&ctx.tenant.slug, &id) {
        Some(note) => Json(note).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "note not found"),
    }
}

/// PUT /notes/:id
pub async fn update(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
    Json(body): Json<UpdateNoteRequest>,
) -> axum::response::Response {
    let update = NoteUpdate {
        title: body.title,
        content: body.content,
    };

    match services.store.update_note(&ctx.tenant.slug, &id, update) {
        Some(note) => Json(note).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "note not found"),
    }
}

/// DELETE /notes/:id
pub async fn delete(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if services.store.delete_note(&ctx.tenant.slug, &id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        errors::json_error(StatusCode::NOT_FOUND, "not_found", "note not found")
    }
}
