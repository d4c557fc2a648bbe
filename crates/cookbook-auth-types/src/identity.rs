//! Bearer-token identity extractor.

use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use http::header::AUTHORIZATION;
use http::request::Parts;
use uuid::Uuid;

use cookbook_core::error::AppError;

use crate::token::{TokenKind, validate_token};

/// HMAC secret used to verify access tokens. Provide it from router state via [`FromRef`].
#[derive(Clone)]
pub struct JwtSecret(pub Arc<str>);

impl JwtSecret {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self(secret.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The caller, authenticated by an `Authorization: Bearer <access token>` header.
///
/// Rejects with 401 if the header is missing, not a bearer token, or the token
/// fails validation (bad signature, expired, or a refresh token).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
}

impl<S> FromRequestParts<S> for Identity
where
    JwtSecret: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    // Read everything from `parts` up front so the returned future is 'static.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let secret = JwtSecret::from_ref(state);
        let bearer = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(|t| t.trim().to_owned());

        async move {
            let token = bearer.ok_or(AppError::Unauthorized)?;
            let info = validate_token(&token, TokenKind::Access, secret.as_str())
                .map_err(|_| AppError::Unauthorized)?;
            Ok(Self {
                user_id: info.user_id,
            })
        }
    }
}
