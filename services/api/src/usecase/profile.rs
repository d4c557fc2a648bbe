use uuid::Uuid;

use crate::domain::repository::{ProfileRepository, UserRepository};
use crate::error::ApiError;

/// Maximum bio length, in characters.
pub const MAX_BIO_LEN: usize = 2000;

/// A user's public-facing account details.
#[derive(Debug, Clone)]
pub struct ProfileView {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub bio: String,
}

// ── GetProfile ───────────────────────────────────────────────────────────────

pub struct GetProfileUseCase<U: UserRepository, P: ProfileRepository> {
    pub users: U,
    pub profiles: P,
}

impl<U: UserRepository, P: ProfileRepository> GetProfileUseCase<U, P> {
    pub async fn execute(&self, user_id: Uuid) -> Result<ProfileView, ApiError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        let profile = self.profiles.get_or_create(user_id).await?;
        Ok(ProfileView {
            user_id: user.id,
            username: user.username,
            email: user.email,
            bio: profile.bio,
        })
    }
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

pub struct UpdateProfileUseCase<U: UserRepository, P: ProfileRepository> {
    pub users: U,
    pub profiles: P,
}

impl<U: UserRepository, P: ProfileRepository> UpdateProfileUseCase<U, P> {
    pub async fn execute(&self, user_id: Uuid, bio: &str) -> Result<ProfileView, ApiError> {
        if bio.chars().count() > MAX_BIO_LEN {
            return Err(ApiError::InvalidPayload(format!(
                "bio must be at most {MAX_BIO_LEN} characters"
            )));
        }
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        let profile = self.profiles.update_bio(user_id, bio).await?;
        Ok(ProfileView {
            user_id: user.id,
            username: user.username,
            email: user.email,
            bio: profile.bio,
        })
    }
}
