//! Argon2id password hashing.
//!
//! Request handlers go through [`hash`] and [`verify`], which move the work
//! onto the blocking pool. Seeding happens before the server starts and
//! calls [`hash_blocking`] directly.

use argon2::{
    password_hash::{Error as PhcError, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

use crate::error::ApiError;

/// PHC string for `plain` with a fresh random salt.
pub async fn hash(plain: String) -> Result<String, ApiError> {
    off_runtime("Error hashing password", move || hash_blocking(&plain)).await
}

/// Whether `plain` matches the stored PHC string. A mismatch is `Ok(false)`;
/// a stored value that is not a PHC string is an internal error.
pub async fn verify(plain: String, stored: String) -> Result<bool, ApiError> {
    off_runtime("Error checking password", move || {
        verify_blocking(&plain, &stored)
    })
    .await
}

pub fn hash_blocking(plain: &str) -> Result<String, PhcError> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(plain.as_bytes(), &salt)?
        .to_string())
}

fn verify_blocking(plain: &str, stored: &str) -> Result<bool, PhcError> {
    let parsed = PasswordHash::new(stored)?;
    match Argon2::default().verify_password(plain.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(PhcError::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

async fn off_runtime<T, F>(context: &'static str, job: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, PhcError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(job)
        .await
        .map_err(|e| ApiError::internal(context, e))?
        .map_err(|e| ApiError::internal(context, anyhow::anyhow!("argon2: {e}")))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::*;

    #[tokio::test]
    async fn hashed_password_verifies() {
        let stored = hash("password123".into()).await.unwrap();
        assert!(stored.starts_with("$argon2id$"));
        assert!(verify("password123".into(), stored.clone()).await.unwrap());
        assert!(!verify("password124".into(), stored).await.unwrap());
    }

    #[test]
    fn each_hash_gets_its_own_salt() {
        let a = hash_blocking("hopper1906").unwrap();
        let b = hash_blocking("hopper1906").unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn stored_plaintext_is_an_internal_error() {
        let err = verify("anything".into(), "plaintext-password".into())
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Error checking password");
    }
}
