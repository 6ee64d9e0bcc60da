use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::db::new_id;

/// A stored card row, without its like-set
///
/// Validation rules here are the store's schema for cards.
#[derive(Queryable, Selectable, Insertable, Validate, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::cards)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CardRecord {
    id: String,

    #[validate(length(min = 2, max = 30))]
    name: String,

    #[validate(url)]
    link: String,

    /// Fixed at creation
    owner: String,

    created_at: NaiveDateTime,
}

impl CardRecord {
    /// Creates a new card record owned by `owner`
    pub fn new(name: String, link: String, owner: String) -> Self {
        Self {
            id: new_id(),
            name,
            link,
            owner,
            created_at: Utc::now().naive_utc(),
        }
    }

    pub fn get_id(&self) -> String {
        self.id.clone()
    }

    pub fn get_owner(&self) -> String {
        self.owner.clone()
    }
}

/// A photo card as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Unique identifier for the card (UUID v4 as string)
    #[serde(rename = "_id")]
    id: String,

    /// Caption
    name: String,

    /// Image URI
    link: String,

    /// ID of the user who created the card
    owner: String,

    /// IDs of the users who liked the card, each at most once
    likes: Vec<String>,

    /// When the card was created
    created_at: DateTime<Utc>,
}

impl Card {
    /// Assembles a card from its stored row and like-set
    ///
    /// ### Arguments
    ///
    /// * `record` - The stored card row
    /// * `likes` - User IDs in the card's like-set
    pub fn from_record(record: CardRecord, likes: Vec<String>) -> Self {
        Self {
            id: record.id,
            name: record.name,
            link: record.link,
            owner: record.owner,
            likes,
            created_at: DateTime::from_naive_utc_and_offset(record.created_at, Utc),
        }
    }

    pub fn get_id(&self) -> String {
        self.id.clone()
    }

    pub fn get_name(&self) -> String {
        self.name.clone()
    }

    pub fn get_link(&self) -> String {
        self.link.clone()
    }

    pub fn get_owner(&self) -> String {
        self.owner.clone()
    }

    pub fn get_likes(&self) -> &[String] {
        &self.likes
    }

    /// Whether `user_id` is in the card's like-set
    pub fn is_liked_by(&self, user_id: &str) -> bool {
        self.likes.iter().any(|id| id == user_id)
    }

    pub fn get_created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
