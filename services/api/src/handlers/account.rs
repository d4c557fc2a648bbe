use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use cookbook_auth_types::identity::Identity;
use cookbook_auth_types::token::TokenPair;

use crate::domain::types::User;
use crate::error::ApiError;
use crate::jobs::signup::SignupEmailJob;
use crate::state::AppState;
use crate::usecase::account::{
    AuthSession, ChangePasswordUseCase, LoginUseCase, LogoutUseCase, RefreshTokenUseCase,
    RegisterInput, RegisterUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(serialize_with = "cookbook_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct TokensResponse {
    pub access: String,
    pub refresh: String,
}

impl From<TokenPair> for TokensResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access: pair.access.token,
            refresh: pair.refresh.token,
        }
    }
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub tokens: TokensResponse,
}

impl From<AuthSession> for AuthResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            user: session.user.into(),
            tokens: session.tokens.into(),
        }
    }
}

// ── POST /users/register ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let usecase = RegisterUseCase {
        users: state.user_repo(),
        hasher: state.password_hasher(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let session = usecase
        .execute(RegisterInput {
            username: body.username,
            email: body.email,
            password: body.password,
        })
        .await?;

    // Fire-and-forget; a failed welcome email never fails the registration.
    state
        .jobs
        .enqueue(SignupEmailJob::new(state.mailer.clone(), &session.user));

    Ok((StatusCode::CREATED, Json(session.into())))
}

// ── POST /users/login ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        hasher: state.password_hasher(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let session = usecase.execute(&body.email, &body.password).await?;
    Ok(Json(session.into()))
}

// ── POST /users/token/refresh ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

pub async fn refresh_token(
    State(state): State<AppState>,
    Json(body): Json<RefreshRequest>,
) -> Result<Json<TokensResponse>, ApiError> {
    let usecase = RefreshTokenUseCase {
        users: state.user_repo(),
        revoked: state.revoked_token_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let pair = usecase.execute(&body.refresh).await?;
    Ok(Json(pair.into()))
}

// ── POST /users/logout ───────────────────────────────────────────────────────

pub async fn logout(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<RefreshRequest>,
) -> Result<StatusCode, ApiError> {
    let usecase = LogoutUseCase {
        revoked: state.revoked_token_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    usecase.execute(identity.user_id, &body.refresh).await?;
    Ok(StatusCode::RESET_CONTENT)
}

// ── PATCH /users/password ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

pub async fn change_password(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let usecase = ChangePasswordUseCase {
        users: state.user_repo(),
        hasher: state.password_hasher(),
    };
    usecase
        .execute(identity.user_id, &body.old_password, &body.new_password)
        .await?;
    Ok(Json(MessageResponse {
        message: "password updated",
    }))
}
