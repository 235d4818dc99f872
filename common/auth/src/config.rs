/// Fixed session lifetime. Tokens carry no refresh path; clients sign in
/// again once this elapses.
pub const DEFAULT_TTL_SECONDS: i64 = 3 * 60 * 60;

/// Runtime configuration for token issuance and verification.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Shared HS256 signing secret.
    pub secret: String,
    /// Lifetime applied to every issued token.
    pub ttl_seconds: i64,
}

impl TokenConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ttl_seconds: DEFAULT_TTL_SECONDS,
        }
    }

    /// Adjust the token lifetime (used by tests to mint expired tokens).
    pub fn with_ttl(mut self, seconds: i64) -> Self {
        self.ttl_seconds = seconds;
        self
    }
}
