//! Password hashing and verification (Argon2id, PHC string format).

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

/// Errors returned by [`hash_password`].
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hashing(String),
}

/// Hash a plaintext password with a per-call random salt.
///
/// Output is a PHC string embedding algorithm, parameters, salt and digest,
/// so verification needs no separate salt storage.
pub fn hash_password(plain: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| PasswordError::Hashing(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC string.
///
/// Returns `false` on mismatch or on an unparseable stored hash; never errors.
pub fn verify_password(plain: &str, stored: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored) else {
        return false;
    };
    Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_hash_and_verify() {
        let hashed = hash_password("S3cret!").unwrap();
        assert_ne!(hashed, "S3cret!");
        assert!(verify_password("S3cret!", &hashed));
    }

    #[test]
    fn should_reject_wrong_password() {
        let hashed = hash_password("S3cret!").unwrap();
        assert!(!verify_password("wrong", &hashed));
    }

    #[test]
    fn should_salt_each_hash() {
        let a = hash_password("same-input").unwrap();
        let b = hash_password("same-input").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("same-input", &a));
        assert!(verify_password("same-input", &b));
    }

    #[test]
    fn should_return_false_for_garbage_stored_hash() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }
}
