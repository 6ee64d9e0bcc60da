use crate::db::{parse_id, with_connection, DbPool, StoreError};
use crate::models::{Card, CardRecord};
use crate::schema::{card_likes, cards};
use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use std::collections::HashMap;
use tracing::{debug, info, instrument};
use validator::Validate;

/// Loads the like-set of a single card
fn load_likes(conn: &mut SqliteConnection, card_id: &str) -> QueryResult<Vec<String>> {
    card_likes::table
        .filter(card_likes::card_id.eq(card_id))
        .order(card_likes::created_at.asc())
        .select(card_likes::user_id)
        .load(conn)
}

/// Loads a card together with its like-set
fn find_card(conn: &mut SqliteConnection, card_id: &str) -> QueryResult<Option<Card>> {
    let record = cards::table
        .find(card_id)
        .select(CardRecord::as_select())
        .first(conn)
        .optional()?;

    match record {
        Some(record) => {
            let likes = load_likes(conn, card_id)?;
            Ok(Some(Card::from_record(record, likes)))
        }
        None => Ok(None),
    }
}

/// Retrieves all cards, oldest first, each with its like-set
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
///
/// ### Returns
///
/// A Result containing a vector of all Cards
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database query fails
#[instrument(skip(pool))]
pub async fn list_cards(pool: &DbPool) -> Result<Vec<Card>, StoreError> {
    debug!("Listing all cards");

    let result = with_connection(pool, |conn| {
        let records = cards::table
            .order(cards::created_at.asc())
            .select(CardRecord::as_select())
            .load(conn)?;

        let mut likes: HashMap<String, Vec<String>> = HashMap::new();
        let pairs = card_likes::table
            .order(card_likes::created_at.asc())
            .select((card_likes::card_id, card_likes::user_id))
            .load::<(String, String)>(conn)?;
        for (card_id, user_id) in pairs {
            likes.entry(card_id).or_default().push(user_id);
        }

        Ok(records
            .into_iter()
            .map(|record| {
                let set = likes.remove(&record.get_id()).unwrap_or_default();
                Card::from_record(record, set)
            })
            .collect::<Vec<_>>())
    })
    .await?;

    info!("Retrieved {} cards", result.len());

    Ok(result)
}

/// Retrieves a card from the database by its ID
///
/// ### Returns
///
/// A Result containing an Option with the Card if found, or None if not found
#[instrument(skip(pool))]
pub async fn get_card(pool: &DbPool, card_id: &str) -> Result<Option<Card>, StoreError> {
    debug!("Retrieving card by id");

    let id = parse_id(card_id)?;

    with_connection(pool, move |conn| Ok(find_card(conn, &id)?)).await
}

/// Creates a new card owned by `owner`
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `name` - The card caption
/// * `link` - The image URI
/// * `owner` - The ID of the creating user
///
/// ### Returns
///
/// A Result containing the newly created Card, with an empty like-set
///
/// ### Errors
///
/// Returns an error if:
/// - `owner` is not a store identifier
/// - The card breaks the card schema (missing or invalid name or link)
/// - The database insert operation fails
#[instrument(skip(pool))]
pub async fn create_card(
    pool: &DbPool,
    name: Option<String>,
    link: Option<String>,
    owner: &str,
) -> Result<Card, StoreError> {
    debug!("Creating new card");

    let owner = parse_id(owner)?;
    // Missing required fields fail the same length/url rules as empty ones
    let record = CardRecord::new(name.unwrap_or_default(), link.unwrap_or_default(), owner);
    record.validate()?;

    let card = with_connection(pool, move |conn| {
        diesel::insert_into(cards::table)
            .values(&record)
            .execute(conn)?;
        Ok(Card::from_record(record, Vec::new()))
    })
    .await?;

    info!("Successfully created card with id: {}", card.get_id());

    Ok(card)
}

/// Deletes a card and its like-set
///
/// ### Returns
///
/// A Result containing the deleted Card as it was before deletion, or None
/// if no card has that ID
#[instrument(skip(pool))]
pub async fn delete_card(pool: &DbPool, card_id: &str) -> Result<Option<Card>, StoreError> {
    debug!("Deleting card by id");

    let id = parse_id(card_id)?;

    let result = with_connection(pool, move |conn| {
        conn.immediate_transaction::<_, StoreError, _>(|conn| {
            let Some(card) = find_card(conn, &id)? else {
                return Ok(None);
            };
            // card_likes rows go with the card through ON DELETE CASCADE
            diesel::delete(cards::table.find(&id)).execute(conn)?;
            Ok(Some(card))
        })
    })
    .await?;

    if result.is_some() {
        info!("Successfully deleted card");
    }

    Ok(result)
}

/// Adds `user_id` to the card's like-set
///
/// Adding a user that already likes the card changes nothing.
///
/// ### Returns
///
/// A Result containing the updated Card, or None if no card has that ID
#[instrument(skip(pool))]
pub async fn like_card(pool: &DbPool, card_id: &str, user_id: &str) -> Result<Option<Card>, StoreError> {
    debug!("Liking card");

    let card_id = parse_id(card_id)?;
    let user_id = parse_id(user_id)?;

    with_connection(pool, move |conn| {
        conn.immediate_transaction::<_, StoreError, _>(|conn| {
            let exists = cards::table
                .find(&card_id)
                .select(cards::id)
                .first::<String>(conn)
                .optional()?
                .is_some();
            if !exists {
                return Ok(None);
            }

            diesel::insert_or_ignore_into(card_likes::table)
                .values((
                    card_likes::card_id.eq(&card_id),
                    card_likes::user_id.eq(&user_id),
                    card_likes::created_at.eq(Utc::now().naive_utc()),
                ))
                .execute(conn)?;

            Ok(find_card(conn, &card_id)?)
        })
    })
    .await
}

/// Removes `user_id` from the card's like-set
///
/// Removing a user that does not like the card changes nothing.
///
/// ### Returns
///
/// A Result containing the updated Card, or None if no card has that ID
#[instrument(skip(pool))]
pub async fn dislike_card(pool: &DbPool, card_id: &str, user_id: &str) -> Result<Option<Card>, StoreError> {
    debug!("Removing like from card");

    let card_id = parse_id(card_id)?;
    let user_id = parse_id(user_id)?;

    with_connection(pool, move |conn| {
        conn.immediate_transaction::<_, StoreError, _>(|conn| {
            diesel::delete(
                card_likes::table
                    .filter(card_likes::card_id.eq(&card_id))
                    .filter(card_likes::user_id.eq(&user_id)),
            )
            .execute(conn)?;

            Ok(find_card(conn, &card_id)?)
        })
    })
    .await
}
