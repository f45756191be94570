//! Request-boundary error taxonomy.
//!
//! Every failure a handler can surface is one of the [`ApiError`]
//! variants, and each variant maps to exactly one HTTP status code.
//! Handlers never build status codes by hand.

use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

/// Validation failures accumulated across a whole payload, keyed by
/// dotted field path (`title`, `fields.2.name`, `fields.0.options.1.value`).
///
/// Serializes as a plain path-to-messages map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// Empty error set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure message under `path`.
    pub fn add(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.entry(path.into()).or_default().push(message.into());
    }

    /// Fold another error set into this one.
    pub fn merge(&mut self, other: ValidationErrors) {
        for (path, messages) in other.errors {
            self.errors.entry(path).or_default().extend(messages);
        }
    }

    /// True when no failure has been recorded.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether `path` has at least one recorded failure.
    pub fn contains(&self, path: &str) -> bool {
        self.errors.contains_key(path)
    }

    /// First message in path order, used as the response summary line.
    pub fn first_message(&self) -> Option<&str> {
        self.errors
            .values()
            .next()
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }
}

/// Terminal request errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Payload rejected by schema validation; carries the full error map.
    #[error("validation failed")]
    Validation(ValidationErrors),
    /// Missing or unverifiable bearer token.
    #[error("unauthenticated")]
    Unauthenticated,
    /// Authenticated caller is not permitted to touch the resource.
    #[error("forbidden")]
    Forbidden,
    /// Resource absent, or hidden from this caller.
    #[error("{0}")]
    NotFound(&'static str),
    /// Invariant breakage inside the service itself.
    #[error("{0}")]
    Internal(String),
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

/// Body shape for non-validation errors.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable summary.
    pub message: String,
}

/// Body shape for `422 Unprocessable Entity` responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationBody {
    /// First failure message, as a summary line.
    pub message: String,
    /// Map of dotted field path to failure messages.
    #[schema(value_type = Object)]
    pub errors: ValidationErrors,
}

impl ErrorBody {
    fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                let message = errors
                    .first_message()
                    .unwrap_or("the given data was invalid")
                    .to_string();
                let body = ValidationBody { message, errors };
                (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
            }
            ApiError::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, Json(ErrorBody::new("unauthenticated"))).into_response()
            }
            ApiError::Forbidden => {
                (StatusCode::FORBIDDEN, Json(ErrorBody::new("forbidden"))).into_response()
            }
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(ErrorBody::new(message))).into_response()
            }
            ApiError::Internal(message) => {
                tracing::error!(error = %message, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorBody::new("internal error")),
                )
                    .into_response()
            }
        }
    }
}
