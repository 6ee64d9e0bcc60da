use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::db::new_id;

pub const DEFAULT_USER_NAME: &str = "Жак-Ив Кусто";
pub const DEFAULT_USER_ABOUT: &str = "Исследователь";
pub const DEFAULT_USER_AVATAR: &str =
    "https://pictures.s3.yandex.net/resources/jacques-cousteau_1604399756.png";

/// Represents a user profile
///
/// The validation rules on this struct are the store's schema for users; they
/// are checked before every insert.
#[derive(Queryable, Selectable, Insertable, Validate, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct User {
    /// Unique identifier for the user (UUID v4 as string)
    #[serde(rename = "_id")]
    id: String,

    /// Display name
    #[validate(length(min = 2, max = 30))]
    name: String,

    /// Short biography
    #[validate(length(min = 2, max = 30))]
    about: String,

    /// Avatar image URI
    #[validate(url)]
    avatar: String,
}

impl User {
    /// Creates a new user, filling omitted fields with the schema defaults
    ///
    /// ### Arguments
    ///
    /// * `name` - The display name, or `None` for the default
    /// * `about` - The biography, or `None` for the default
    /// * `avatar` - The avatar URI, or `None` for the default
    pub fn new(name: Option<String>, about: Option<String>, avatar: Option<String>) -> Self {
        Self {
            id: new_id(),
            name: name.unwrap_or_else(|| DEFAULT_USER_NAME.to_string()),
            about: about.unwrap_or_else(|| DEFAULT_USER_ABOUT.to_string()),
            avatar: avatar.unwrap_or_else(|| DEFAULT_USER_AVATAR.to_string()),
        }
    }

    /// Creates a user with all fields specified
    pub fn new_with_fields(id: String, name: String, about: String, avatar: String) -> Self {
        Self { id, name, about, avatar }
    }

    pub fn get_id(&self) -> String {
        self.id.clone()
    }

    pub fn get_name(&self) -> String {
        self.name.clone()
    }

    pub fn get_about(&self) -> String {
        self.about.clone()
    }

    pub fn get_avatar(&self) -> String {
        self.avatar.clone()
    }
}

/// Partial update of a user's mutable fields
///
/// `None` fields are left untouched by the update and skipped by validation.
#[derive(AsChangeset, Validate, Debug, Clone, Default, PartialEq, Eq)]
#[diesel(table_name = crate::schema::users)]
pub struct UserChanges {
    #[validate(length(min = 2, max = 30))]
    pub name: Option<String>,

    #[validate(length(min = 2, max = 30))]
    pub about: Option<String>,

    #[validate(url)]
    pub avatar: Option<String>,
}

impl UserChanges {
    /// Changes touching only the profile text fields
    pub fn profile(name: Option<String>, about: Option<String>) -> Self {
        Self { name, about, avatar: None }
    }

    /// Changes touching only the avatar
    pub fn avatar(avatar: Option<String>) -> Self {
        Self { avatar, ..Self::default() }
    }

    /// Whether applying these changes would modify nothing
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.about.is_none() && self.avatar.is_none()
    }
}
