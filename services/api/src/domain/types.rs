use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Registered account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One per user; owns the bookmark set.
#[derive(Debug, Clone)]
pub struct Profile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bio: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct Recipe {
    pub id: i32,
    pub title: String,
    pub author_id: Uuid,
    pub category_id: i32,
    pub picture: Option<String>,
    pub description: String,
    pub cook_time_minutes: i32,
    pub ingredients: String,
    pub procedure: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A recipe together with how many users like it.
#[derive(Debug, Clone)]
pub struct RecipeSummary {
    pub recipe: Recipe,
    pub total_likes: u64,
}

/// Fields supplied when creating a recipe. The author is the caller.
#[derive(Debug, Clone)]
pub struct NewRecipe {
    pub title: String,
    pub category_id: i32,
    pub picture: Option<String>,
    pub description: String,
    pub cook_time_minutes: i32,
    pub ingredients: String,
    pub procedure: String,
}

/// Partial update. `None` leaves a field unchanged; `picture: Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct RecipePatch {
    pub title: Option<String>,
    pub category_id: Option<i32>,
    pub picture: Option<Option<String>>,
    pub description: Option<String>,
    pub cook_time_minutes: Option<i32>,
    pub ingredients: Option<String>,
    pub procedure: Option<String>,
}

/// A rendered email ready for a [`Mailer`](crate::domain::repository::Mailer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Maximum recipe title length, in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum category name length, in characters.
pub const MAX_CATEGORY_NAME_LEN: usize = 100;

/// Non-empty after trimming, at most `max` characters.
pub fn validate_label(value: &str, max: usize) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed.chars().count() <= max
}
