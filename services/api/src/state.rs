use std::sync::Arc;

use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use cookbook_auth_types::identity::JwtSecret;

use crate::domain::repository::Mailer;
use crate::infra::db::{
    DbBookmarkRepository, DbCategoryRepository, DbLikeRepository, DbProfileRepository,
    DbRecipeRepository, DbRevokedTokenRepository, DbUserRepository,
};
use crate::infra::password::Argon2PasswordHasher;
use crate::jobs::JobRegistry;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: JwtSecret,
    pub jobs: Arc<JobRegistry>,
    pub mailer: Arc<dyn Mailer>,
}

impl FromRef<AppState> for JwtSecret {
    fn from_ref(state: &AppState) -> Self {
        state.jwt_secret.clone()
    }
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn profile_repo(&self) -> DbProfileRepository {
        DbProfileRepository {
            db: self.db.clone(),
        }
    }

    pub fn category_repo(&self) -> DbCategoryRepository {
        DbCategoryRepository {
            db: self.db.clone(),
        }
    }

    pub fn recipe_repo(&self) -> DbRecipeRepository {
        DbRecipeRepository {
            db: self.db.clone(),
        }
    }

    pub fn like_repo(&self) -> DbLikeRepository {
        DbLikeRepository {
            db: self.db.clone(),
        }
    }

    pub fn bookmark_repo(&self) -> DbBookmarkRepository {
        DbBookmarkRepository {
            db: self.db.clone(),
        }
    }

    pub fn revoked_token_repo(&self) -> DbRevokedTokenRepository {
        DbRevokedTokenRepository {
            db: self.db.clone(),
        }
    }

    pub fn password_hasher(&self) -> Argon2PasswordHasher {
        Argon2PasswordHasher::default()
    }
}
