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
use crate::dto::CreateCardDto;
use crate::errors::{messages, resolve, ApiError};
use crate::models::Card;
use crate::repo;

/// Handler for listing all cards
///
/// This function handles GET requests to `/cards`.
///
/// ### Returns
///
/// All cards, oldest first, each with its like-set
#[instrument(skip(pool))]
pub async fn list_cards_handler(
    State(pool): State<Arc<DbPool>>,
) -> Result<Json<Vec<Card>>, ApiError> {
    debug!("Listing cards");

    let cards = repo::list_cards(&pool)
        .await
        .map_err(ApiError::server_fault)?;

    Ok(Json(cards))
}

/// Handler for creating a new card owned by the acting user
///
/// This function handles POST requests to `/cards`.
///
/// ### Arguments
///
/// * `pool` - The database connection pool
/// * `user_id` - The acting user, who becomes the owner
/// * `payload` - The card's name and link
///
/// ### Returns
///
/// 201 with the newly created card as JSON
#[instrument(skip(pool, user_id, payload))]
pub async fn create_card_handler(
    State(pool): State<Arc<DbPool>>,
    ActingUser(user_id): ActingUser,
    WithRejection(Json(payload), _): WithRejection<Json<CreateCardDto>, ApiError>,
) -> Result<(StatusCode, Json<Card>), ApiError> {
    info!(owner = %user_id, "Creating new card");

    let card = repo::create_card(&pool, payload.name, payload.link, &user_id)
        .await
        .map_err(|err| ApiError::from_store(err, &messages::CREATE_CARD))?;

    info!("Successfully created card with id: {}", card.get_id());

    Ok((StatusCode::CREATED, Json(card)))
}

/// Handler for deleting a card
///
/// This function handles DELETE requests to `/cards/{card_id}`.
///
/// ### Returns
///
/// The deleted card as JSON
#[instrument(skip(pool))]
pub async fn delete_card_handler(
    State(pool): State<Arc<DbPool>>,
    WithRejection(Path(card_id), _): WithRejection<Path<String>, ApiError>,
) -> Result<Json<Card>, ApiError> {
    info!("Deleting card");

    let card = resolve(repo::delete_card(&pool, &card_id).await, &messages::CARD_BY_ID)?;

    Ok(Json(card))
}

/// Handler for liking a card
///
/// This function handles PUT requests to `/cards/{card_id}/likes`.
/// Liking twice leaves a single like.
#[instrument(skip(pool, user_id))]
pub async fn like_card_handler(
    State(pool): State<Arc<DbPool>>,
    WithRejection(Path(card_id), _): WithRejection<Path<String>, ApiError>,
    ActingUser(user_id): ActingUser,
) -> Result<Json<Card>, ApiError> {
    debug!(user_id = %user_id, "Liking card");

    let card = resolve(
        repo::like_card(&pool, &card_id, &user_id).await,
        &messages::CARD_BY_ID,
    )?;

    Ok(Json(card))
}

/// Handler for removing the acting user's like from a card
///
/// This function handles DELETE requests to `/cards/{card_id}/likes`.
#[instrument(skip(pool, user_id))]
pub async fn dislike_card_handler(
    State(pool): State<Arc<DbPool>>,
    WithRejection(Path(card_id), _): WithRejection<Path<String>, ApiError>,
    ActingUser(user_id): ActingUser,
) -> Result<Json<Card>, ApiError> {
    debug!(user_id = %user_id, "Removing like");

    let card = resolve(
        repo::dislike_card(&pool, &card_id, &user_id).await,
        &messages::CARD_BY_ID,
    )?;

    Ok(Json(card))
}
