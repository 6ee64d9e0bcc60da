/// Data models module
///
/// This module defines the documents owned by the store: users and photo
/// cards. Each model carries the store's schema validation rules.

mod user;
pub use user::{User, UserChanges, DEFAULT_USER_ABOUT, DEFAULT_USER_AVATAR, DEFAULT_USER_NAME};

mod card;
pub use card::{Card, CardRecord};
