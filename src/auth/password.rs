use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::rngs::OsRng;

use super::AuthError;

/// Hash with Argon2id on the blocking pool
pub async fn hash_password(password: String) -> Result<String, AuthError> {
    tokio::task::spawn_blocking(move || hash_password_sync(&password))
        .await
        .map_err(|e| AuthError::Hashing(e.to_string()))?
}

/// `Ok(false)` on mismatch; `Err` only when the stored hash is unreadable
pub async fn verify_password(password: String, hash: String) -> Result<bool, AuthError> {
    tokio::task::spawn_blocking(move || verify_password_sync(&password, &hash))
        .await
        .map_err(|e| AuthError::Hashing(e.to_string()))?
}

fn hash_password_sync(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Hashing(e.to_string()))
}

fn verify_password_sync(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(hash).map_err(|e| AuthError::Hashing(e.to_string()))?;
    Ok(Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_verifies_only_the_original_password() {
        let hash = hash_password("bamboo123".to_string()).await.unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("bamboo123".to_string(), hash.clone()).await.unwrap());
        assert!(!verify_password("bamboo124".to_string(), hash).await.unwrap());
    }

    #[tokio::test]
    async fn malformed_hash_is_an_error() {
        let result = verify_password("x".to_string(), "not-a-hash".to_string()).await;
        assert!(matches!(result, Err(AuthError::Hashing(_))));
    }
}
