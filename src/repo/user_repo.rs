use crate::db::{parse_id, with_connection, DbPool, StoreError};
use crate::models::{User, UserChanges};
use crate::schema::users;
use diesel::prelude::*;
use tracing::{debug, info, instrument};
use validator::Validate;

/// Retrieves all users from the database
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
///
/// ### Returns
///
/// A Result containing a vector of all Users, in store order
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database query fails
#[instrument(skip(pool))]
pub async fn list_users(pool: &DbPool) -> Result<Vec<User>, StoreError> {
    debug!("Listing all users");

    let result = with_connection(pool, |conn| {
        Ok(users::table.select(User::as_select()).load(conn)?)
    })
    .await?;

    info!("Retrieved {} users", result.len());

    Ok(result)
}

/// Retrieves a user from the database by its ID
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `user_id` - The ID of the user to retrieve
///
/// ### Returns
///
/// A Result containing an Option with the User if found, or None if not found
///
/// ### Errors
///
/// Returns `StoreError::MalformedId` if `user_id` is not a store identifier,
/// otherwise any connection or query failure.
#[instrument(skip(pool))]
pub async fn get_user(pool: &DbPool, user_id: &str) -> Result<Option<User>, StoreError> {
    debug!("Retrieving user by id");

    let id = parse_id(user_id)?;

    let result = with_connection(pool, move |conn| {
        Ok(users::table
            .find(id)
            .select(User::as_select())
            .first(conn)
            .optional()?)
    })
    .await?;

    if result.is_none() {
        debug!("User not found");
    }

    Ok(result)
}

/// Creates a new user in the database
///
/// Omitted fields take the schema defaults; the resulting document is
/// validated before it is inserted.
///
/// ### Errors
///
/// Returns `StoreError::Validation` if the document breaks the user schema.
#[instrument(skip(pool))]
pub async fn create_user(
    pool: &DbPool,
    name: Option<String>,
    about: Option<String>,
    avatar: Option<String>,
) -> Result<User, StoreError> {
    debug!("Creating new user");

    let new_user = User::new(name, about, avatar);
    new_user.validate()?;

    let user = with_connection(pool, move |conn| {
        diesel::insert_into(users::table)
            .values(&new_user)
            .execute(conn)?;
        Ok(new_user)
    })
    .await?;

    info!("Successfully created user with id: {}", user.get_id());

    Ok(user)
}

/// Applies a partial update to a user and returns the updated document
///
/// Changes are validated against the user schema before anything is
/// written. Empty changes write nothing and return the current document.
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `user_id` - The ID of the user to update
/// * `changes` - The fields to overwrite
///
/// ### Returns
///
/// A Result containing the updated User, or None if no user has that ID
#[instrument(skip(pool))]
pub async fn update_user(
    pool: &DbPool,
    user_id: &str,
    changes: UserChanges,
) -> Result<Option<User>, StoreError> {
    debug!("Updating user");

    let id = parse_id(user_id)?;
    changes.validate()?;

    let result = with_connection(pool, move |conn| {
        if changes.is_empty() {
            return Ok(users::table
                .find(id)
                .select(User::as_select())
                .first(conn)
                .optional()?);
        }

        Ok(diesel::update(users::table.find(id))
            .set(&changes)
            .returning(User::as_returning())
            .get_result(conn)
            .optional()?)
    })
    .await?;

    match result {
        Some(_) => info!("Successfully updated user"),
        None => debug!("User not found"),
    }

    Ok(result)
}

/// Overwrites a user's name and/or about text
pub async fn update_user_profile(
    pool: &DbPool,
    user_id: &str,
    name: Option<String>,
    about: Option<String>,
) -> Result<Option<User>, StoreError> {
    update_user(pool, user_id, UserChanges::profile(name, about)).await
}

/// Overwrites a user's avatar
pub async fn update_user_avatar(
    pool: &DbPool,
    user_id: &str,
    avatar: Option<String>,
) -> Result<Option<User>, StoreError> {
    update_user(pool, user_id, UserChanges::avatar(avatar)).await
}
