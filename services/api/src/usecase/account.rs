use chrono::{DateTime, Utc};
use uuid::Uuid;

use cookbook_auth_types::identity::JwtSecret;
use cookbook_auth_types::token::{
    TokenInfo, TokenKind, TokenPair, issue_token_pair, validate_token,
};
use cookbook_domain::account::{
    normalize_email, validate_email, validate_password, validate_username,
};

use crate::domain::repository::{PasswordHasher, RevokedTokenRepository, UserRepository};
use crate::domain::types::{Profile, User};
use crate::error::ApiError;

/// A user together with a freshly issued token pair.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: User,
    pub tokens: TokenPair,
}

fn issue_pair(user_id: Uuid, secret: &JwtSecret) -> Result<TokenPair, ApiError> {
    issue_token_pair(user_id, secret.as_str())
        .map_err(|e| anyhow::Error::new(e).context("issue token pair").into())
}

fn validate_refresh(token: &str, secret: &JwtSecret) -> Result<TokenInfo, ApiError> {
    validate_token(token, TokenKind::Refresh, secret.as_str()).map_err(|_| ApiError::InvalidToken)
}

fn expiry(exp: u64) -> DateTime<Utc> {
    i64::try_from(exp)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

pub struct RegisterUseCase<U: UserRepository, H: PasswordHasher> {
    pub users: U,
    pub hasher: H,
    pub jwt_secret: JwtSecret,
}

impl<U: UserRepository, H: PasswordHasher> RegisterUseCase<U, H> {
    /// Creates the user and an empty profile together.
    pub async fn execute(&self, input: RegisterInput) -> Result<AuthSession, ApiError> {
        let username = input.username.trim().to_owned();
        let email = normalize_email(&input.email);
        validate_username(&username)?;
        validate_email(&email)?;
        validate_password(&input.password)?;

        let password_hash = self.hasher.hash(&input.password).await?;
        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            username,
            email,
            password_hash,
            created_at: now,
            updated_at: now,
        };
        let profile = Profile {
            id: Uuid::now_v7(),
            user_id: user.id,
            bio: String::new(),
            updated_at: now,
        };
        self.users.create_with_profile(&user, &profile).await?;

        let tokens = issue_pair(user.id, &self.jwt_secret)?;
        Ok(AuthSession { user, tokens })
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginUseCase<U: UserRepository, H: PasswordHasher> {
    pub users: U,
    pub hasher: H,
    pub jwt_secret: JwtSecret,
}

impl<U: UserRepository, H: PasswordHasher> LoginUseCase<U, H> {
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn execute(&self, email: &str, password: &str) -> Result<AuthSession, ApiError> {
        let user = self
            .users
            .find_by_email(&normalize_email(email))
            .await?
            .ok_or(ApiError::InvalidCredentials)?;
        if !self.hasher.verify(password, &user.password_hash).await? {
            return Err(ApiError::InvalidCredentials);
        }
        let tokens = issue_pair(user.id, &self.jwt_secret)?;
        Ok(AuthSession { user, tokens })
    }
}

// ── RefreshToken ─────────────────────────────────────────────────────────────

pub struct RefreshTokenUseCase<U: UserRepository, T: RevokedTokenRepository> {
    pub users: U,
    pub revoked: T,
    pub jwt_secret: JwtSecret,
}

impl<U: UserRepository, T: RevokedTokenRepository> RefreshTokenUseCase<U, T> {
    /// Rotates: the presented refresh token is revoked and a new pair issued.
    /// Revoking is the claim, so of two concurrent refreshes only one succeeds.
    pub async fn execute(&self, refresh_token: &str) -> Result<TokenPair, ApiError> {
        let info = validate_refresh(refresh_token, &self.jwt_secret)?;
        if self.users.find_by_id(info.user_id).await?.is_none() {
            return Err(ApiError::InvalidToken);
        }
        if !self
            .revoked
            .revoke(info.jti, info.user_id, expiry(info.exp))
            .await?
        {
            return Err(ApiError::InvalidToken);
        }
        issue_pair(info.user_id, &self.jwt_secret)
    }
}

// ── Logout ───────────────────────────────────────────────────────────────────

pub struct LogoutUseCase<T: RevokedTokenRepository> {
    pub revoked: T,
    pub jwt_secret: JwtSecret,
}

impl<T: RevokedTokenRepository> LogoutUseCase<T> {
    /// Logging out twice with the same token is not an error.
    pub async fn execute(&self, caller: Uuid, refresh_token: &str) -> Result<(), ApiError> {
        let info = validate_refresh(refresh_token, &self.jwt_secret)?;
        if info.user_id != caller {
            return Err(ApiError::InvalidToken);
        }
        self.revoked
            .revoke(info.jti, info.user_id, expiry(info.exp))
            .await?;
        Ok(())
    }
}

// ── ChangePassword ───────────────────────────────────────────────────────────

pub struct ChangePasswordUseCase<U: UserRepository, H: PasswordHasher> {
    pub users: U,
    pub hasher: H,
}

impl<U: UserRepository, H: PasswordHasher> ChangePasswordUseCase<U, H> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        if !self.hasher.verify(old_password, &user.password_hash).await? {
            return Err(ApiError::InvalidCredentials);
        }
        validate_password(new_password)?;
        let password_hash = self.hasher.hash(new_password).await?;
        self.users.update_password(user_id, &password_hash).await
    }
}
