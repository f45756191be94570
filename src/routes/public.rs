//! Public form access and submission endpoints.
//!
//! Everything here is keyed by slug and requires no authentication.
//! Draft forms and unknown slugs are indistinguishable from the
//! outside: both answer 404 with the same body.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::error::{ApiError, ErrorBody, ValidationBody};
use crate::models::{Envelope, Form, FormStatus, SubmitRequest, Submission};
use crate::{schema, ApiState};

/// Routes under `/public/forms`.
pub fn router() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/:slug", get(get_public_form))
        .route("/:slug/submit", post(submit_form))
}

fn published_form(state: &ApiState, slug: &str) -> Result<Form, ApiError> {
    state
        .store
        .get_form_by_slug(slug)
        .filter(|form| form.status == FormStatus::Published)
        .ok_or(ApiError::NotFound("form not found"))
}

/// Fetch a published form by slug.
#[utoipa::path(
    get,
    path = "/public/forms/{slug}",
    tag = "public",
    params(("slug" = String, Path, description = "Public form slug")),
    responses(
        (status = 200, description = "The published form", body = Form),
        (status = 404, description = "Unknown slug or unpublished form", body = ErrorBody)
    )
)]
pub async fn get_public_form(
    State(state): State<Arc<ApiState>>,
    Path(slug): Path<String>,
) -> Result<Json<Envelope<Form>>, ApiError> {
    let form = published_form(&state, &slug)?;
    Ok(Json(Envelope::new(form)))
}

/// Accept a submission for a published form.
#[utoipa::path(
    post,
    path = "/public/forms/{slug}/submit",
    tag = "public",
    params(("slug" = String, Path, description = "Public form slug")),
    request_body = SubmitRequest,
    responses(
        (status = 201, description = "Submission stored", body = Submission),
        (status = 404, description = "Unknown slug or unpublished form", body = ErrorBody),
        (status = 422, description = "Payload rejected", body = ValidationBody)
    )
)]
#[tracing::instrument(skip_all, fields(slug = %slug))]
pub async fn submit_form(
    State(state): State<Arc<ApiState>>,
    Path(slug): Path<String>,
    Json(payload): Json<SubmitRequest>,
) -> Result<(StatusCode, Json<Envelope<Submission>>), ApiError> {
    let form = published_form(&state, &slug)?;
    let data = schema::validate_submission(payload)?;
    let submission = state
        .store
        .create_submission(form.id, data)
        .ok_or(ApiError::NotFound("form not found"))?;
    tracing::info!(form_id = %form.id, submission_id = %submission.id, "stored submission");
    Ok((StatusCode::CREATED, Json(Envelope::new(submission))))
}
