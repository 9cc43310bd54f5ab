//! Password value object and verification capability.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier as _, SaltString},
    Argon2,
};

use crate::config::MIN_PASSWORD_LENGTH;
use crate::errors::{AppError, AppResult};

/// Checks a plain text password against a stored hash.
///
/// Login goes through this trait so deployments can choose whether
/// credentials are enforced.
pub trait PasswordVerifier: Send + Sync {
    fn verify(&self, plain_text: &str, hash: &str) -> bool;
}

/// Argon2 verification against PHC-format hashes.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2Verifier;

impl PasswordVerifier for Argon2Verifier {
    fn verify(&self, plain_text: &str, hash: &str) -> bool {
        Password::from_hash(hash.to_string()).verify(plain_text)
    }
}

/// Accepts every password. Only for deployments that still rely on
/// username-only login.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAnyPassword;

impl PasswordVerifier for AcceptAnyPassword {
    fn verify(&self, _plain_text: &str, _hash: &str) -> bool {
        true
    }
}

/// Hashed password value object.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a plain text password.
    ///
    /// # Errors
    /// Returns a validation error if the password is shorter than
    /// `MIN_PASSWORD_LENGTH`.
    pub fn new(plain_text: &str) -> AppResult<Self> {
        if plain_text.len() < MIN_PASSWORD_LENGTH as usize {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let hash = Self::hash(plain_text)?;
        Ok(Self { hash })
    }

    /// Wrap an existing hash loaded from the database.
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    pub fn as_str(&self) -> &str {
        &self.hash
    }

    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash.
    /// Malformed hashes never verify.
    pub fn verify(&self, plain_text: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok()
    }

    fn hash(plain_text: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?;
        Ok(hash.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_and_verify() {
        let plain = "SecurePassword123!";
        let password = Password::new(plain).unwrap();

        assert!(password.verify(plain));
        assert!(!password.verify("WrongPassword123"));
    }

    #[test]
    fn test_same_password_different_salts() {
        let pass1 = Password::new("SamePassword123").unwrap();
        let pass2 = Password::new("SamePassword123").unwrap();

        assert_ne!(pass1.as_str(), pass2.as_str());
    }

    #[test]
    fn test_password_too_short() {
        assert!(matches!(Password::new("short"), Err(AppError::Validation(_))));
        assert!(Password::new("12345678").is_ok());
    }

    #[test]
    fn test_argon2_verifier() {
        let hash = Password::new("CorrectHorse1").unwrap().into_string();

        assert!(Argon2Verifier.verify("CorrectHorse1", &hash));
        assert!(!Argon2Verifier.verify("BatteryStaple1", &hash));
    }

    #[test]
    fn test_argon2_verifier_rejects_unhashed_value() {
        // Rows written before hashing was enabled hold the raw password.
        assert!(!Argon2Verifier.verify("plaintext-pw", "plaintext-pw"));
    }

    #[test]
    fn test_accept_any_password() {
        assert!(AcceptAnyPassword.verify("anything", "not-a-hash"));
    }
}
