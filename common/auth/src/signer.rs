use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::claims::{Claims, ClaimsRepr};
use crate::config::TokenConfig;
use crate::error::{AuthError, AuthResult};

/// Issues and verifies the HS256 session tokens. The signed token is the
/// only session state; nothing is persisted server-side.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_seconds: i64,
}

impl TokenService {
    pub fn new(config: TokenConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            ttl_seconds: config.ttl_seconds,
        }
    }

    /// Sign a token for the given email with the fixed lifetime.
    pub fn issue(&self, email: &str) -> AuthResult<String> {
        let now = Utc::now();
        let claims = ClaimsRepr {
            email: email.trim().to_owned(),
            exp: (now + Duration::seconds(self.ttl_seconds)).timestamp(),
            iat: Some(now.timestamp()),
            jti: Some(Uuid::new_v4().to_string()),
        };
        if claims.email.is_empty() {
            return Err(AuthError::InvalidClaim("email", String::new()));
        }
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|err| AuthError::Signing(err.to_string()))
    }

    /// Decode and validate a token, yielding the email claim.
    pub fn verify(&self, token: &str) -> AuthResult<Claims> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Value>(token, &self.decoding_key, &validation)?;
        let claims = Claims::try_from(data.claims)?;
        debug!(email = %claims.email, "verified session token");
        Ok(claims)
    }
}
