//! Form management endpoints, scoped to the authenticated owner.
//!
//! Resolution order is fixed across handlers: the form is looked up
//! first, ownership is checked second, and only then is the payload
//! validated. A caller who cannot touch a form learns nothing about
//! what a valid payload would have been.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Extension, Json, Router};
use uuid::Uuid;

use crate::error::{ApiError, ErrorBody, ValidationBody};
use crate::middleware::auth::AuthUser;
use crate::models::{
    CreateFormRequest, Envelope, Form, Submission, UpdateFormRequest,
};
use crate::{policy, schema, slug, ApiState};

/// Routes under `/forms`.
pub fn router() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/", get(list_forms).post(create_form))
        .route("/:id", get(get_form).put(update_form).delete(delete_form))
        .route("/:id/submissions", get(list_submissions))
}

/// List the caller's forms, most recently created first.
#[utoipa::path(
    get,
    path = "/forms",
    tag = "forms",
    responses(
        (status = 200, description = "Forms owned by the caller", body = Vec<Form>),
        (status = 401, description = "Missing or invalid token", body = ErrorBody)
    ),
    security(("bearer" = []))
)]
pub async fn list_forms(
    State(state): State<Arc<ApiState>>,
    Extension(user): Extension<AuthUser>,
) -> Json<Envelope<Vec<Form>>> {
    Json(Envelope::new(state.store.get_forms_for_owner(user.account_id)))
}

/// Create a draft form from a validated payload.
#[utoipa::path(
    post,
    path = "/forms",
    tag = "forms",
    request_body = CreateFormRequest,
    responses(
        (status = 201, description = "Form created as a draft", body = Form),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 422, description = "Payload rejected", body = ValidationBody)
    ),
    security(("bearer" = []))
)]
#[tracing::instrument(skip_all, fields(owner_id = %user.account_id))]
pub async fn create_form(
    State(state): State<Arc<ApiState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<CreateFormRequest>,
) -> Result<(StatusCode, Json<Envelope<Form>>), ApiError> {
    let new_form = schema::validate_create(payload)?;
    let slug = slug::for_title(&new_form.title);
    let form = state
        .store
        .create_form(user.account_id, new_form.title, slug, new_form.fields)
        .map_err(|err| ApiError::Internal(err.to_string()))?;
    tracing::info!(form_id = %form.id, slug = %form.slug, "created form");
    Ok((StatusCode::CREATED, Json(Envelope::new(form))))
}

/// Fetch one of the caller's forms.
#[utoipa::path(
    get,
    path = "/forms/{id}",
    tag = "forms",
    params(("id" = Uuid, Path, description = "Form id")),
    responses(
        (status = 200, description = "The form", body = Form),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Form belongs to another account", body = ErrorBody),
        (status = 404, description = "No such form", body = ErrorBody)
    ),
    security(("bearer" = []))
)]
pub async fn get_form(
    State(state): State<Arc<ApiState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<Form>>, ApiError> {
    let form = state.store.get_form(id).ok_or(ApiError::NotFound("form not found"))?;
    if !policy::can_view(user.account_id, &form) {
        return Err(ApiError::Forbidden);
    }
    Ok(Json(Envelope::new(form)))
}

/// Apply a partial update to one of the caller's forms.
#[utoipa::path(
    put,
    path = "/forms/{id}",
    tag = "forms",
    params(("id" = Uuid, Path, description = "Form id")),
    request_body = UpdateFormRequest,
    responses(
        (status = 200, description = "Updated form", body = Form),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Form belongs to another account", body = ErrorBody),
        (status = 404, description = "No such form", body = ErrorBody),
        (status = 422, description = "Payload rejected", body = ValidationBody)
    ),
    security(("bearer" = []))
)]
#[tracing::instrument(skip_all, fields(form_id = %id))]
pub async fn update_form(
    State(state): State<Arc<ApiState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateFormRequest>,
) -> Result<Json<Envelope<Form>>, ApiError> {
    let form = state.store.get_form(id).ok_or(ApiError::NotFound("form not found"))?;
    if !policy::can_mutate(user.account_id, &form) {
        return Err(ApiError::Forbidden);
    }
    let changes = schema::validate_update(payload)?;
    let updated = state
        .store
        .update_form(id, changes)
        .ok_or(ApiError::NotFound("form not found"))?;
    tracing::info!(status = %updated.status, "updated form");
    Ok(Json(Envelope::new(updated)))
}

/// Delete one of the caller's forms along with its submissions.
#[utoipa::path(
    delete,
    path = "/forms/{id}",
    tag = "forms",
    params(("id" = Uuid, Path, description = "Form id")),
    responses(
        (status = 204, description = "Form deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Form belongs to another account", body = ErrorBody),
        (status = 404, description = "No such form", body = ErrorBody)
    ),
    security(("bearer" = []))
)]
#[tracing::instrument(skip_all, fields(form_id = %id))]
pub async fn delete_form(
    State(state): State<Arc<ApiState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let form = state.store.get_form(id).ok_or(ApiError::NotFound("form not found"))?;
    if !policy::can_mutate(user.account_id, &form) {
        return Err(ApiError::Forbidden);
    }
    state.store.delete_form(id);
    tracing::info!("deleted form");
    Ok(StatusCode::NO_CONTENT)
}

/// List submissions collected by one of the caller's forms.
#[utoipa::path(
    get,
    path = "/forms/{id}/submissions",
    tag = "forms",
    params(("id" = Uuid, Path, description = "Form id")),
    responses(
        (status = 200, description = "Submissions, oldest first", body = Vec<Submission>),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Form belongs to another account", body = ErrorBody),
        (status = 404, description = "No such form", body = ErrorBody)
    ),
    security(("bearer" = []))
)]
pub async fn list_submissions(
    State(state): State<Arc<ApiState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<Vec<Submission>>>, ApiError> {
    let form = state.store.get_form(id).ok_or(ApiError::NotFound("form not found"))?;
    if !policy::can_mutate(user.account_id, &form) {
        return Err(ApiError::Forbidden);
    }
    Ok(Json(Envelope::new(state.store.get_submissions_for_form(id))))
}
