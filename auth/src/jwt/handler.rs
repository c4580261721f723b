use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde::Serialize;

use super::errors::JwtError;

/// Signing algorithms accepted on decode. Anything outside the HMAC family
/// is rejected before the signature is checked.
const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// JWT token handler bound to a single HMAC secret.
///
/// Generic over the claims type. Signs with HS256 by default and only
/// verifies tokens whose header names an HMAC algorithm.
/// Expiry is not checked here; callers compare `exp` against their own clock.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Returns
    /// JwtHandler instance configured with HS256 algorithm
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Create a handler that signs with another HMAC algorithm.
    ///
    /// # Errors
    /// * `InvalidConfiguration` - `algorithm` is not HS256, HS384 or HS512
    pub fn with_algorithm(secret: &[u8], algorithm: Algorithm) -> Result<Self, JwtError> {
        if !HMAC_ALGORITHMS.contains(&algorithm) {
            return Err(JwtError::InvalidConfiguration(format!(
                "{:?} is not an HMAC algorithm",
                algorithm
            )));
        }

        Ok(Self {
            algorithm,
            ..Self::new(secret)
        })
    }

    /// Encode claims into a signed JWT.
    ///
    /// # Arguments
    /// * `claims` - Claims to encode (must implement Serialize)
    ///
    /// # Returns
    /// JWT token string
    ///
    /// # Errors
    /// * `SigningFailed` - Token encoding failed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::SigningFailed(e.to_string()))
    }

    /// Decode a JWT and verify its signature.
    ///
    /// # Arguments
    /// * `token` - JWT token string to decode
    ///
    /// # Returns
    /// Decoded claims
    ///
    /// # Errors
    /// * `InvalidToken` - Signature is invalid, the token is malformed, or the
    ///   header names a non-HMAC algorithm
    pub fn decode<T: for<'de> Deserialize<'de>>(&self, token: &str) -> Result<T, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.algorithms = HMAC_ALGORITHMS.to_vec();
        validation.validate_exp = false;
        validation.leeway = 0;

        let token_data = decode::<T>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                _ => JwtError::InvalidToken(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }
}
