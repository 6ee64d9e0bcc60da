use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use crate::auth::ActingUser;
use crate::db::DbPool;
use crate::dto::{CreateUserDto, UpdateAvatarDto, UpdateProfileDto};
use crate::errors::{messages, resolve, ApiError};
use crate::models::User;
use crate::repo;

/// Handler for listing all users
///
/// This function handles GET requests to `/users`.
///
/// ### Returns
///
/// All users as a JSON array, empty when there are none
#[instrument(skip(pool))]
pub async fn list_users_handler(
    State(pool): State<Arc<DbPool>>,
) -> Result<Json<Vec<User>>, ApiError> {
    debug!("Listing users");

    let users = repo::list_users(&pool)
        .await
        .map_err(ApiError::server_fault)?;

    Ok(Json(users))
}

/// Handler for retrieving a specific user
///
/// This function handles GET requests to `/users/{user_id}`.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `user_id` - The ID of the user to retrieve, extracted from the URL path
///
/// ### Returns
///
/// The requested user as JSON, 400 for a malformed ID, 404 if absent
#[instrument(skip(pool))]
pub async fn get_user_handler(
    State(pool): State<Arc<DbPool>>,
    WithRejection(Path(user_id), _): WithRejection<Path<String>, ApiError>,
) -> Result<Json<User>, ApiError> {
    debug!("Getting user");

    let user = resolve(repo::get_user(&pool, &user_id).await, &messages::GET_USER)?;

    Ok(Json(user))
}

/// Handler for retrieving the acting user's own record
///
/// This function handles GET requests to `/users/me`.
#[instrument(skip(pool, user_id))]
pub async fn get_current_user_handler(
    State(pool): State<Arc<DbPool>>,
    ActingUser(user_id): ActingUser,
) -> Result<Json<User>, ApiError> {
    debug!(user_id = %user_id, "Getting current user");

    let user = resolve(repo::get_user(&pool, &user_id).await, &messages::CURRENT_USER)?;

    Ok(Json(user))
}

/// Handler for creating a new user
///
/// This function handles POST requests to `/users`.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `payload` - Name, about and avatar; omitted fields get schema defaults
///
/// ### Returns
///
/// 201 with the newly created user as JSON
#[instrument(skip(pool, payload))]
pub async fn create_user_handler(
    State(pool): State<Arc<DbPool>>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateUserDto>, ApiError>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    info!("Creating new user");

    let user = repo::create_user(&pool, payload.name, payload.about, payload.avatar)
        .await
        .map_err(|err| ApiError::from_store(err, &messages::CREATE_USER))?;

    info!("Successfully created user with id: {}", user.get_id());

    Ok((StatusCode::CREATED, Json(user)))
}

/// Handler for updating the acting user's name and about text
///
/// This function handles PATCH requests to `/users/me`.
///
/// ### Returns
///
/// The updated user as JSON; fields missing from the body are left as they were
#[instrument(skip(pool, user_id, payload))]
pub async fn update_profile_handler(
    State(pool): State<Arc<DbPool>>,
    ActingUser(user_id): ActingUser,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateProfileDto>, ApiError>,
) -> Result<Json<User>, ApiError> {
    info!(user_id = %user_id, "Updating profile");

    let user = resolve(
        repo::update_user_profile(&pool, &user_id, payload.name, payload.about).await,
        &messages::UPDATE_PROFILE,
    )?;

    Ok(Json(user))
}

/// Handler for updating the acting user's avatar
///
/// This function handles PATCH requests to `/users/me/avatar`.
#[instrument(skip(pool, user_id, payload))]
pub async fn update_avatar_handler(
    State(pool): State<Arc<DbPool>>,
    ActingUser(user_id): ActingUser,
    WithRejection(Json(payload), _): WithRejection<Json<UpdateAvatarDto>, ApiError>,
) -> Result<Json<User>, ApiError> {
    info!(user_id = %user_id, "Updating avatar");

    let user = resolve(
        repo::update_user_avatar(&pool, &user_id, payload.avatar).await,
        &messages::UPDATE_AVATAR,
    )?;

    Ok(Json(user))
}
