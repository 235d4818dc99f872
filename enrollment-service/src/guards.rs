use common_auth::{Claims, Role};
use common_http_errors::ApiError;
use sqlx::PgPool;
use tracing::warn;

use crate::repo;

/// Look up the caller's stored role by the token's email claim and require
/// an exact match. A missing user row fails the same way as a wrong role.
pub async fn ensure_role(db: &PgPool, claims: &Claims, required: Role) -> Result<(), ApiError> {
    let stored = repo::users::role_by_email(db, &claims.email)
        .await
        .map_err(ApiError::internal)?;
    let actual = stored.as_deref().map(Role::parse).unwrap_or(Role::None);
    if actual == required {
        return Ok(());
    }
    warn!(email = %claims.email, %required, %actual, "role check failed");
    Err(ApiError::Forbidden)
}

/// The email a route operates on must be the token's own email.
pub fn ensure_self(claims: &Claims, email: &str) -> Result<(), ApiError> {
    if claims.email == email {
        return Ok(());
    }
    warn!(token_email = %claims.email, requested_email = %email, "identity check failed");
    Err(ApiError::Forbidden)
}
