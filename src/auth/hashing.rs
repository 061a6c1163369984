//! Salted password hashing.
//!
//! The client hashes a password before it is sent for account creation and
//! the server compares login attempts against the stored hash. Both sides go
//! through [`PasswordHashing`] so the algorithm can be swapped in one place.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, SaltString},
    Argon2, PasswordVerifier,
};

#[derive(Debug, thiserror::Error)]
pub enum HashingError {
    #[error("Invalid salt: {0}")]
    InvalidSalt(String),
    #[error("Password hashing failed: {0}")]
    Failed(String),
}

pub trait PasswordHashing: Send + Sync {
    /// Fresh random salt, encoded so it can be passed back to [`Self::hash`].
    fn generate_salt(&self) -> String;

    fn hash(&self, password: &str, salt: &str) -> Result<String, HashingError>;

    /// Compares `password` against a stored hash without comparing raw strings.
    /// Malformed hashes never match.
    fn compare(&self, password: &str, hash: &str) -> bool;

    /// Whether `candidate` is a hash this scheme produced, as opposed to plaintext.
    fn recognizes(&self, candidate: &str) -> bool;

    fn hash_with_new_salt(&self, password: &str) -> Result<String, HashingError> {
        let salt = self.generate_salt();
        self.hash(password, &salt)
    }
}

/// Argon2id with default parameters, producing PHC strings.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Hashing;

impl PasswordHashing for Argon2Hashing {
    fn generate_salt(&self) -> String {
        SaltString::generate(&mut OsRng).as_str().to_string()
    }

    fn hash(&self, password: &str, salt: &str) -> Result<String, HashingError> {
        let salt = SaltString::from_b64(salt).map_err(|e| HashingError::InvalidSalt(e.to_string()))?;
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| HashingError::Failed(e.to_string()))
    }

    fn compare(&self, password: &str, hash: &str) -> bool {
        if let Ok(parsed_hash) = PasswordHash::new(hash) {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok()
        } else {
            false
        }
    }

    fn recognizes(&self, candidate: &str) -> bool {
        PasswordHash::new(candidate)
            .map(|parsed| parsed.salt.is_some() && parsed.hash.is_some())
            .unwrap_or(false)
    }
}
