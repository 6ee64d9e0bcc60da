//! Acting-user identity
//!
//! Authentication itself happens upstream. This module only carries the
//! identity it produced: `attach_acting_user` stores it in the request
//! extensions and `ActingUser` hands it to the handlers that need it.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::errors::ApiError;

/// Header carrying the identity resolved by the authentication layer
pub const ACTING_USER_HEADER: &str = "x-user-id";

/// The user on whose behalf a request is made
///
/// The identifier is opaque here; the store checks its format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActingUser(pub String);

impl<S> FromRequestParts<S> for ActingUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<ActingUser>()
            .cloned()
            .ok_or(ApiError::Unauthorized)
    }
}

/// Middleware attaching the acting user to each request
///
/// Uses the `x-user-id` header when present, otherwise the configured
/// fallback identity. Requests with neither pass through unannotated.
pub async fn attach_acting_user(
    State(fallback): State<Option<String>>,
    mut request: Request,
    next: Next,
) -> Response {
    let from_header = request
        .headers()
        .get(ACTING_USER_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string);

    match from_header.or(fallback) {
        Some(user_id) => {
            debug!(user_id = %user_id, "Attached acting user");
            request.extensions_mut().insert(ActingUser(user_id));
        }
        None => debug!("No acting user for request"),
    }

    next.run(request).await
}
