use crate::application::{
    error::{ApplicationError, ApplicationResult},
    ports::security::PasswordHasher,
};
use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use async_trait::async_trait;

/// Argon2id with the crate defaults, run on the blocking pool.
#[derive(Default, Clone)]
pub struct Argon2PasswordHasher;

fn blocking_failure(err: tokio::task::JoinError) -> ApplicationError {
    ApplicationError::infrastructure(format!("password worker failed: {err}"))
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> ApplicationResult<String> {
        let secret = password.as_bytes().to_vec();
        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            Argon2::default()
                .hash_password(&secret, &salt)
                .map(|digest| digest.to_string())
                .map_err(|err| {
                    ApplicationError::infrastructure(format!("password hashing failed: {err}"))
                })
        })
        .await
        .map_err(blocking_failure)?
    }

    async fn verify(&self, password: &str, expected_hash: &str) -> ApplicationResult<()> {
        let secret = password.as_bytes().to_vec();
        let stored = expected_hash.to_owned();
        tokio::task::spawn_blocking(move || {
            let parsed = PasswordHash::new(&stored).map_err(|err| {
                tracing::error!(error = %err, "stored password hash is unreadable");
                ApplicationError::infrastructure("stored password hash is unreadable")
            })?;
            Argon2::default()
                .verify_password(&secret, &parsed)
                .map_err(|_| ApplicationError::unauthorized("invalid credentials"))
        })
        .await
        .map_err(blocking_failure)?
    }
}
