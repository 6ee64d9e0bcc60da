/// Mesto: a photo-sharing API
///
/// This library provides request handlers for two resources, users and
/// photo cards, backed by an embedded SQLite document store.
///
/// ### Modules
///
/// - `db`: Connection pool and store error categories
/// - `models`: Users and cards, with their schema validation
/// - `repo`: Store operations
/// - `handlers`: HTTP handlers, one store operation each
/// - `errors`: Mapping of store outcomes to HTTP responses
/// - `auth`: Acting-user identity supplied by upstream middleware
/// - `config`: Layered configuration
///
/// ### Web API
///
/// - `GET /users`, `POST /users`: List or create users
/// - `GET /users/{id}`: Get a user
/// - `GET /users/me`, `PATCH /users/me`: Read or update the acting user's profile
/// - `PATCH /users/me/avatar`: Update the acting user's avatar
/// - `GET /cards`, `POST /cards`: List or create cards
/// - `DELETE /cards/{id}`: Delete a card
/// - `PUT /cards/{id}/likes`, `DELETE /cards/{id}/likes`: Like or unlike a card

pub mod auth;
pub mod config;
pub mod db;
pub mod dto;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod repo;
pub mod schema;

use axum::{
    middleware,
    routing::{delete, get, patch, put},
    Router,
};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use handlers::*;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Creates the application router with all routes
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `acting_user_id` - Identity used when a request carries no `x-user-id`
///
/// ### Returns
///
/// An Axum Router configured with all routes and the database pool as state
pub fn create_app(pool: Arc<db::DbPool>, acting_user_id: Option<String>) -> Router {
    Router::new()
        .route("/users", get(list_users_handler).post(create_user_handler))
        .route("/users/me", get(get_current_user_handler).patch(update_profile_handler))
        .route("/users/me/avatar", patch(update_avatar_handler))
        .route("/users/{user_id}", get(get_user_handler))
        .route("/cards", get(list_cards_handler).post(create_card_handler))
        .route("/cards/{card_id}", delete(delete_card_handler))
        .route("/cards/{card_id}/likes", put(like_card_handler).delete(dislike_card_handler))
        .fallback(not_found_handler)
        .method_not_allowed_fallback(not_found_handler)
        .layer(middleware::from_fn_with_state(acting_user_id, auth::attach_acting_user))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(pool)
}

/// Runs the embedded migrations
///
/// ### Arguments
///
/// * `conn` - A mutable reference to a SQLite connection
pub fn run_migrations(conn: &mut diesel::SqliteConnection) -> anyhow::Result<()> {
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))?;
    Ok(())
}
