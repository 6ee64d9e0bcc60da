use serde::Deserialize;

/// Data transfer object for creating a new user
///
/// Every field is optional here; defaults and validation belong to the store.
#[derive(Deserialize, Debug, Default)]
pub struct CreateUserDto {
    /// Display name
    pub name: Option<String>,

    /// Short biography
    pub about: Option<String>,

    /// Avatar image URI
    pub avatar: Option<String>,
}

/// Data transfer object for updating the acting user's profile
#[derive(Deserialize, Debug, Default)]
pub struct UpdateProfileDto {
    pub name: Option<String>,
    pub about: Option<String>,
}

/// Data transfer object for updating the acting user's avatar
#[derive(Deserialize, Debug, Default)]
pub struct UpdateAvatarDto {
    pub avatar: Option<String>,
}

/// Data transfer object for creating a new card
///
/// The owner is never taken from the body; it is the acting user.
#[derive(Deserialize, Debug, Default)]
pub struct CreateCardDto {
    /// Caption
    pub name: Option<String>,

    /// Image URI
    pub link: Option<String>,
}
