//! Token minting for integration tests.

use chrono::Duration;
use uuid::Uuid;
use vidlet_api::auth::JwtVerifier;

/// Shared signing secret (must be at least 32 characters).
pub const TEST_JWT_SECRET: &str = "integration-test-secret-0123456789abcdef";

/// Mint a token for the given subject, valid for one hour.
pub fn token_for(subject: Uuid) -> String {
    JwtVerifier::new(TEST_JWT_SECRET.to_string())
        .issue(subject, Duration::hours(1))
        .expect("Failed to issue test token")
}

/// Same as [`token_for`], formatted as an Authorization header value.
pub fn bearer_for(subject: Uuid) -> String {
    format!("Bearer {}", token_for(subject))
}

/// Mint a token signed with a secret the server does not trust.
pub fn bearer_with_wrong_secret(subject: Uuid) -> String {
    let token = JwtVerifier::new("some-other-secret-0123456789abcdefghij".to_string())
        .issue(subject, Duration::hours(1))
        .expect("Failed to issue test token");
    format!("Bearer {token}")
}
