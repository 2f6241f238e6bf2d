//! Clerk session token verification.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::server::error::Error;

/// Claims read from a Clerk session token.
///
/// Profile claims are only present when the Clerk session token template includes them.
#[derive(Clone, Debug, Deserialize)]
pub struct ClerkClaims {
    /// Clerk user ID
    pub sub: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub image_url: Option<String>,
}

/// Verifies session token signatures, expiry, not-before and optionally the issuer.
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Verifier for RS256 tokens signed by Clerk, from the instance's PEM encoded public key.
    ///
    /// # Returns
    /// - `Ok(TokenVerifier)` - Key parsed
    /// - `Err(Error::JwtError)` - The PEM is not a valid RSA public key
    pub fn from_rsa_pem(pem: &[u8], issuer: Option<&str>) -> Result<Self, Error> {
        let key = DecodingKey::from_rsa_pem(pem)?;

        Ok(Self::new(key, Algorithm::RS256, issuer))
    }

    /// Verifier for HS256 tokens signed with a shared secret, used by tests.
    pub fn from_secret(secret: &[u8], issuer: Option<&str>) -> Self {
        Self::new(DecodingKey::from_secret(secret), Algorithm::HS256, issuer)
    }

    fn new(key: DecodingKey, algorithm: Algorithm, issuer: Option<&str>) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.validate_nbf = true;
        // Clerk session tokens carry no audience
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "sub"]);
        if let Some(issuer) = issuer {
            validation.set_issuer(&[issuer]);
        }

        Self { key, validation }
    }

    /// Decodes and validates a token.
    ///
    /// # Returns
    /// - `Ok(ClerkClaims)` - Token is authentic and current
    /// - `Err(Error::JwtError)` - Bad signature, expired, not yet valid, wrong issuer or malformed
    pub fn verify(&self, token: &str) -> Result<ClerkClaims, Error> {
        let data = decode::<ClerkClaims>(token, &self.key, &self.validation)?;

        Ok(data.claims)
    }
}
