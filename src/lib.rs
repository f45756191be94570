//! OpenForm API
//!
//! Backend for a form builder: authenticated owners create forms out of
//! typed field definitions, publish them under a slug, and review the
//! submissions collected from the public endpoints.
//!
//! Request flow is deliberately layered. The auth middleware resolves
//! the caller, [`schema`] validates payloads whole, [`policy`] answers
//! ownership questions, and [`store`] applies each operation atomically.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod policy;
pub mod routes;
pub mod schema;
pub mod slug;
pub mod store;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::ServerConfig;
use crate::store::FormStore;

/// Shared state threaded through every handler.
pub struct ApiState {
    /// Form and submission persistence.
    pub store: FormStore,
    /// Runtime configuration.
    pub config: ServerConfig,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "OpenForm API",
        version = "0.1.0",
        description = "Form builder backend: create forms, publish them, collect submissions"
    ),
    paths(
        routes::health::health_check,
        routes::forms::list_forms,
        routes::forms::create_form,
        routes::forms::get_form,
        routes::forms::update_form,
        routes::forms::delete_form,
        routes::forms::list_submissions,
        routes::public::get_public_form,
        routes::public::submit_form,
    ),
    components(schemas(
        models::Form,
        models::FormStatus,
        models::Submission,
        models::FieldBase,
        models::FieldOption,
        models::CreateFormRequest,
        models::UpdateFormRequest,
        models::SubmitRequest,
        error::ErrorBody,
        error::ValidationBody,
        routes::health::HealthResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Liveness probes"),
        (name = "forms", description = "Form management for authenticated owners"),
        (name = "public", description = "Public form access and submission")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Build the API router with all routes, documentation and middleware.
pub fn build_router(state: ApiState) -> Router {
    let state = Arc::new(state);

    // Everything under /forms sits behind bearer auth; the public and
    // health routes do not.
    let owner_routes = Router::new()
        .nest("/forms", routes::forms::router())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(routes::health::health_check))
        .nest("/public/forms", routes::public::router())
        .merge(owner_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
