//! Session token helpers.
//!
//! Clerk signs session tokens with RS256 in production. Tests sign with HS256 using
//! [`TEST_JWT_SECRET`] so no key pair has to be checked in.

use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;

use crate::{
    constant::{TEST_CLERK_ISSUER, TEST_EMAIL_DOMAIN, TEST_JWT_SECRET},
    error::TestError,
};

/// Create a signed session token for the given Clerk user ID.
///
/// # Arguments
/// - `sub` - Clerk user ID placed in the `sub` claim
/// - `email` - Optional email claim; `None` omits the claim entirely
/// - `expires_in_secs` - Seconds from now until `exp`; negative values produce an expired token
pub fn create_test_token(
    sub: &str,
    email: Option<&str>,
    expires_in_secs: i64,
) -> Result<String, TestError> {
    let now = Utc::now().timestamp();

    let mut claims = json!({
        "sub": sub,
        "iss": TEST_CLERK_ISSUER,
        "iat": now,
        "nbf": now,
        "exp": now + expires_in_secs,
        "first_name": "Test",
        "last_name": "User",
    });

    if let Some(email) = email {
        claims["email"] = json!(email);
    }

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )?;

    Ok(token)
}

/// Email address the user fixtures derive for a Clerk user ID.
pub fn test_email(clerk_user_id: &str) -> String {
    format!("{}@{}", clerk_user_id, TEST_EMAIL_DOMAIN)
}
