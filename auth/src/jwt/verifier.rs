use jsonwebtoken::decode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;

use super::claims::AccessClaims;
use super::errors::JwtError;

/// Validates token signatures and expiry, and extracts the embedded claims.
///
/// Pure computation plus a clock read; performs no I/O. Expiry is checked
/// with zero leeway, so a token is rejected from the first second past its
/// `exp` claim.
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Create a new token verifier with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key the tokens were signed with
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Decode and validate a token.
    ///
    /// # Arguments
    /// * `token` - Compact JWT string
    ///
    /// # Returns
    /// The embedded access claims
    ///
    /// # Errors
    /// * `TokenExpired` - Current time is past the `exp` claim
    /// * `TokenInvalid` - Bad signature, malformed token, or missing claims
    pub fn verify(&self, token: &str) -> Result<AccessClaims, JwtError> {
        let token_data =
            decode::<AccessClaims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                    _ => JwtError::TokenInvalid(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}
