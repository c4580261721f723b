use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::Error as PasswordHashError;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Password hashing implementation.
///
/// Produces self-contained PHC strings (internally Argon2id), so a stored hash
/// carries its own algorithm, parameters and salt.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Shortest password accepted by [`PasswordHasher::hash`].
    pub const MIN_LENGTH: usize = 6;

    /// Create a new password hasher instance.
    ///
    /// # Returns
    /// PasswordHasher instance configured with secure defaults
    pub fn new() -> Self {
        Self {
            params: Params::default(),
        }
    }

    /// Create a hasher with explicit Argon2 cost parameters.
    ///
    /// Hashes produced with other parameters still verify, because the
    /// parameters are read back from the PHC string.
    pub fn with_params(params: Params) -> Self {
        Self { params }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a plaintext password securely.
    ///
    /// Uses Argon2id with random salt generation.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `EmptyPassword` - Password is empty
    /// * `PasswordTooShort` - Password has fewer than 6 characters
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        if password.is_empty() {
            return Err(PasswordError::EmptyPassword);
        }

        let length = password.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(PasswordError::PasswordTooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }

        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// A mismatch is reported as `Ok(false)`, so callers can tell "verification
    /// ran and failed" apart from "verification could not run".
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash in PHC string format
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `InvalidHashFormat` - Either input is empty, or the hash cannot be parsed or used
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        if password.is_empty() || hash.is_empty() {
            return Err(PasswordError::InvalidHashFormat(
                "password and hash must not be empty".to_string(),
            ));
        }

        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| PasswordError::InvalidHashFormat(e.to_string()))?;

        // Output comparison inside verify_password is constant time.
        match self
            .argon2()
            .verify_password(password.as_bytes(), &parsed_hash)
        {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(e) => Err(PasswordError::InvalidHashFormat(e.to_string())),
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
