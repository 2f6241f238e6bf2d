//! Constants shared by test fixtures and token helpers.
//!
//! These are placeholder values, not real credentials.

/// HMAC secret used to sign session tokens in tests.
///
/// The helpdesk token verifier accepts HS256 tokens signed with this secret when built
/// with `TokenVerifier::from_secret`.
pub static TEST_JWT_SECRET: &str = "helpdesk_test_jwt_secret";

/// Issuer claim placed in test tokens.
pub static TEST_CLERK_ISSUER: &str = "https://clerk.helpdesk.test";

/// Domain used for generated fixture email addresses.
pub static TEST_EMAIL_DOMAIN: &str = "helpdesk.test";

/// Default category color for fixtures.
pub static TEST_CATEGORY_COLOR: &str = "#3366FF";
