//! JWT access and refresh tokens.

use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    get_current_timestamp,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access-token lifetime in seconds (1 hour).
pub const ACCESS_TOKEN_TTL_SECS: u64 = 3600;

/// Refresh-token lifetime in seconds (7 days).
pub const REFRESH_TOKEN_TTL_SECS: u64 = 604_800;

/// Which side of the token pair a JWT was minted as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    fn ttl_secs(self) -> u64 {
        match self {
            Self::Access => ACCESS_TOKEN_TTL_SECS,
            Self::Refresh => REFRESH_TOKEN_TTL_SECS,
        }
    }
}

/// JWT claims payload.
///
/// | Field | Meaning |
/// |-------|---------|
/// | `sub` | user id (UUID string) |
/// | `typ` | `access` or `refresh` |
/// | `jti` | unique token id, used by the logout blacklist |
/// | `exp` | expiry, seconds since UNIX epoch |
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub typ: TokenKind,
    pub jti: String,
    pub exp: u64,
}

/// Validated token contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    pub user_id: Uuid,
    pub jti: Uuid,
    pub exp: u64,
}

/// A freshly signed token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub jti: Uuid,
    pub exp: u64,
}

/// Access + refresh tokens handed out at registration and login.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: IssuedToken,
    pub refresh: IssuedToken,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("expected a {expected:?} token")]
    WrongKind { expected: TokenKind },
    #[error("failed to sign token")]
    Sign(#[source] jsonwebtoken::errors::Error),
}

/// Sign a token of `kind` for `user_id`, expiring `kind`'s TTL from now.
pub fn issue_token(user_id: Uuid, kind: TokenKind, secret: &str) -> Result<IssuedToken, AuthError> {
    let jti = Uuid::new_v4();
    let exp = get_current_timestamp() + kind.ttl_secs();
    let claims = JwtClaims {
        sub: user_id.to_string(),
        typ: kind,
        jti: jti.to_string(),
        exp,
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(AuthError::Sign)?;
    Ok(IssuedToken { token, jti, exp })
}

pub fn issue_token_pair(user_id: Uuid, secret: &str) -> Result<TokenPair, AuthError> {
    Ok(TokenPair {
        access: issue_token(user_id, TokenKind::Access, secret)?,
        refresh: issue_token(user_id, TokenKind::Refresh, secret)?,
    })
}

/// Decode a JWT, check signature and expiry (60s leeway), and require it to be of `kind`.
pub fn validate_token(token: &str, kind: TokenKind, secret: &str) -> Result<TokenInfo, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.set_required_spec_claims(&["exp", "sub"]);

    let claims = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?
    .claims;

    if claims.typ != kind {
        return Err(AuthError::WrongKind { expected: kind });
    }
    let user_id = claims.sub.parse().map_err(|_| AuthError::Malformed)?;
    let jti = claims.jti.parse().map_err(|_| AuthError::Malformed)?;
    Ok(TokenInfo {
        user_id,
        jti,
        exp: claims.exp,
    })
}
