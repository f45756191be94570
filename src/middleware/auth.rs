//! Bearer-token authentication.
//!
//! The caller is resolved once at the request boundary and threaded into
//! handlers as an [`AuthUser`] extension. Nothing past this layer ever
//! consults headers or ambient auth state, which keeps handlers testable
//! with a plain identity value.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::ApiState;

/// Authenticated caller identity, as resolved by [`require_auth`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    /// Account id carried in the token subject.
    pub account_id: Uuid,
}

/// Claims carried by access tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, the account id.
    pub sub: String,
    /// Expiry as a unix timestamp.
    pub exp: usize,
}

/// Mint an HS256 access token for `account_id`, valid for `ttl_secs`.
pub fn issue_token(
    account_id: Uuid,
    secret: &str,
    ttl_secs: u64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        sub: account_id.to_string(),
        exp: Utc::now().timestamp() as usize + ttl_secs as usize,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
}

/// Verify a bearer token against `secret` and pull out the caller.
///
/// Expired tokens, bad signatures and non-UUID subjects all collapse to
/// `None`; the response never says which check failed.
pub fn verify_token(token: &str, secret: &str) -> Option<AuthUser> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .ok()?;
    let account_id = Uuid::parse_str(&data.claims.sub).ok()?;
    Some(AuthUser { account_id })
}

/// Middleware for owner routes: requires a valid bearer token and
/// attaches the caller as an [`AuthUser`] extension.
pub async fn require_auth(
    State(state): State<Arc<ApiState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(&req).ok_or(ApiError::Unauthenticated)?;
    let user = verify_token(token, &state.config.auth_secret).ok_or_else(|| {
        tracing::debug!("rejected bearer token");
        ApiError::Unauthenticated
    })?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

fn bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    value.strip_prefix("Bearer ")
}
