//! Bearer-token helpers for integration tests.
//!
//! `MockAuth` signs a real access token with the test secret, so requests pass
//! through the production `Identity` extractor unchanged.

use http::header::AUTHORIZATION;
use http::{HeaderMap, HeaderName, HeaderValue};
use uuid::Uuid;

use cookbook_auth_types::token::{TokenKind, issue_token};

/// Secret shared by test routers and `MockAuth`.
pub const TEST_JWT_SECRET: &str = "test-jwt-secret-for-unit-tests-only";

/// Identity injected into test requests.
pub struct MockAuth {
    pub user_id: Uuid,
    pub access_token: String,
}

impl MockAuth {
    pub fn new(user_id: Uuid) -> Self {
        Self::with_secret(user_id, TEST_JWT_SECRET)
    }

    pub fn with_secret(user_id: Uuid, secret: &str) -> Self {
        let issued = issue_token(user_id, TokenKind::Access, secret)
            .expect("signing a test token cannot fail");
        Self {
            user_id,
            access_token: issued.token,
        }
    }

    /// `Authorization: Bearer ...` as a name/value pair.
    pub fn header(&self) -> (HeaderName, HeaderValue) {
        let value = HeaderValue::from_str(&format!("Bearer {}", self.access_token))
            .expect("JWTs are valid header values");
        (AUTHORIZATION, value)
    }

    pub fn headers(&self) -> HeaderMap {
        let (name, value) = self.header();
        let mut map = HeaderMap::new();
        map.insert(name, value);
        map
    }
}
