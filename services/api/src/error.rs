use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// API error variants. Each maps to one status code and a stable `kind`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("recipe is already liked")]
    RecipeAlreadyLiked,
    #[error("recipe is not liked")]
    RecipeNotLiked,
    #[error("{0}")]
    InvalidPayload(String),
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid token")]
    InvalidToken,
    #[error("forbidden")]
    Forbidden,
    #[error("user not found")]
    UserNotFound,
    #[error("recipe not found")]
    RecipeNotFound,
    #[error("category not found")]
    CategoryNotFound,
    #[error("user already exists")]
    UserAlreadyExists,
    #[error("category already exists")]
    CategoryAlreadyExists,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RecipeAlreadyLiked => "RECIPE_ALREADY_LIKED",
            Self::RecipeNotLiked => "RECIPE_NOT_LIKED",
            Self::InvalidPayload(_) => "INVALID_PAYLOAD",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::Forbidden => "FORBIDDEN",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::RecipeNotFound => "RECIPE_NOT_FOUND",
            Self::CategoryNotFound => "CATEGORY_NOT_FOUND",
            Self::UserAlreadyExists => "USER_ALREADY_EXISTS",
            Self::CategoryAlreadyExists => "CATEGORY_ALREADY_EXISTS",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl From<cookbook_domain::account::InvalidField> for ApiError {
    fn from(field: cookbook_domain::account::InvalidField) -> Self {
        Self::InvalidPayload(field.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::RecipeAlreadyLiked
            | Self::RecipeNotLiked
            | Self::InvalidPayload(_)
            | Self::InvalidCredentials => StatusCode::BAD_REQUEST,
            Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::UserNotFound | Self::RecipeNotFound | Self::CategoryNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::UserAlreadyExists | Self::CategoryAlreadyExists => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}

/// Failure to hand a message to the mail transport.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("invalid address: {0}")]
    Address(String),
    #[error("failed to build message")]
    Build(#[source] lettre::error::Error),
    #[error("transport failed: {0}")]
    Transport(String),
    #[error("failed to write outbox file")]
    Outbox(#[source] std::io::Error),
}
