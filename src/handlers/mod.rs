/// Web API Handlers
///
/// This module contains the handlers for the RESTful API endpoints.
/// Each handler extracts its inputs, performs exactly one store operation
/// and maps the outcome to a response through `errors::resolve`.

mod user_handlers;
mod card_handlers;

// Re-export all handlers
pub use user_handlers::*;
pub use card_handlers::*;

use crate::errors::{ApiError, ROUTE_NOT_FOUND_MESSAGE};

/// Fallback for requests that match no route
pub async fn not_found_handler() -> ApiError {
    ApiError::NotFound(ROUTE_NOT_FOUND_MESSAGE)
}
