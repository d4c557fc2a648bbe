#![allow(async_fn_in_trait)]

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use cookbook_domain::pagination::PageRequest;

use crate::domain::types::{
    Category, NewRecipe, OutgoingEmail, Profile, Recipe, RecipePatch, User,
};
use crate::error::{ApiError, MailError};

/// Repository for accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError>;

    /// Insert the user and its profile atomically.
    /// Fails with `UserAlreadyExists` on a duplicate username or email.
    async fn create_with_profile(&self, user: &User, profile: &Profile) -> Result<(), ApiError>;

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), ApiError>;

    /// Every user, oldest first.
    async fn list_all(&self) -> Result<Vec<User>, ApiError>;
}

pub trait ProfileRepository: Send + Sync {
    /// Fetch the user's profile, creating an empty one if it is missing.
    async fn get_or_create(&self, user_id: Uuid) -> Result<Profile, ApiError>;
    async fn update_bio(&self, user_id: Uuid, bio: &str) -> Result<Profile, ApiError>;
}

pub trait CategoryRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Category>, ApiError>;
    async fn exists(&self, id: i32) -> Result<bool, ApiError>;

    /// Fails with `CategoryAlreadyExists` on a duplicate name.
    async fn create(&self, name: &str) -> Result<Category, ApiError>;
}

pub trait RecipeRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Recipe>, ApiError>;
    async fn exists(&self, id: i32) -> Result<bool, ApiError>;

    /// Newest first, optionally restricted to one category.
    async fn list(
        &self,
        category_id: Option<i32>,
        page: PageRequest,
    ) -> Result<Vec<Recipe>, ApiError>;

    async fn list_by_ids(&self, ids: &[i32]) -> Result<Vec<Recipe>, ApiError>;
    async fn create(&self, author_id: Uuid, recipe: &NewRecipe) -> Result<Recipe, ApiError>;
    async fn update(&self, id: i32, patch: &RecipePatch) -> Result<Recipe, ApiError>;

    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: i32) -> Result<bool, ApiError>;
}

/// The `(user, recipe)` like ledger.
pub trait LikeRepository: Send + Sync {
    /// Insert unless the pair exists. Returns `true` if a row was inserted.
    async fn insert(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, ApiError>;

    /// Returns `true` if a row was deleted.
    async fn delete(&self, user_id: Uuid, recipe_id: i32) -> Result<bool, ApiError>;

    /// Like counts keyed by recipe id. Recipes without likes are absent.
    async fn count_by_recipe(&self, recipe_ids: &[i32]) -> Result<HashMap<i32, u64>, ApiError>;

    /// Total likes across every recipe authored by `author_id`.
    async fn count_for_author(&self, author_id: Uuid) -> Result<u64, ApiError>;
}

/// The `(profile, recipe)` bookmark set.
pub trait BookmarkRepository: Send + Sync {
    /// Returns `true` if the bookmark was new.
    async fn add(&self, profile_id: Uuid, recipe_id: i32) -> Result<bool, ApiError>;

    /// Returns `true` if a bookmark was removed.
    async fn remove(&self, profile_id: Uuid, recipe_id: i32) -> Result<bool, ApiError>;

    /// Recipe ids, most recently bookmarked first.
    async fn list_recipe_ids(&self, profile_id: Uuid) -> Result<Vec<i32>, ApiError>;
}

/// Blacklist of refresh tokens invalidated by logout or rotation.
pub trait RevokedTokenRepository: Send + Sync {
    /// Conditional insert. `false` means the `jti` was already revoked, so at
    /// most one caller ever wins a given token.
    async fn revoke(
        &self,
        jti: Uuid,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<bool, ApiError>;
}

/// Per-day claims for scheduled jobs.
pub trait JobRunRepository: Send + Sync {
    /// Record that `job_name` started for `date`. Returns `false` if it was already claimed.
    async fn claim(&self, job_name: &str, date: NaiveDate) -> Result<bool, ApiError>;
}

/// Credential hashing. Implementations may block; callers should not.
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> Result<String, ApiError>;

    /// `Ok(false)` for a wrong password. A malformed stored hash is an error.
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, ApiError>;
}

/// Outbound email transport.
#[async_trait::async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError>;
}
