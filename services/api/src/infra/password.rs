use argon2::{
    Argon2, PasswordHash, PasswordVerifier,
    password_hash::{PasswordHasher as _, SaltString, rand_core::OsRng},
};

use crate::domain::repository::PasswordHasher;
use crate::error::ApiError;

/// Argon2id with default parameters. Hashing runs on the blocking pool.
#[derive(Clone, Default)]
pub struct Argon2PasswordHasher {
    hasher: Argon2<'static>,
}

impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, ApiError> {
        let password = password.to_owned();
        let hasher = self.hasher.clone();
        let hashed = tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            hasher
                .hash_password(password.as_bytes(), &salt)
                .map(|h| h.to_string())
                .map_err(|e| anyhow::anyhow!("hash password: {e}"))
        })
        .await
        .map_err(|e| anyhow::anyhow!("password hashing task failed: {e}"))??;
        Ok(hashed)
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, ApiError> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        let hasher = self.hasher.clone();
        let matches = tokio::task::spawn_blocking(move || {
            let parsed =
                PasswordHash::new(&hash).map_err(|e| anyhow::anyhow!("parse stored hash: {e}"))?;
            Ok::<_, anyhow::Error>(hasher.verify_password(password.as_bytes(), &parsed).is_ok())
        })
        .await
        .map_err(|e| anyhow::anyhow!("password verification task failed: {e}"))??;
        Ok(matches)
    }
}
