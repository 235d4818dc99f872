use axum::extract::{Path, State};
use axum::Json;
use common_auth::{AuthContext, AuthError, Role};
use common_http_errors::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::guards::ensure_role;
use crate::repo;
use crate::AppState;

#[derive(Deserialize)]
pub struct TokenRequest {
    pub email: String,
}

#[derive(Serialize)]
pub struct TokenResponse {
    pub token: String,
}

pub async fn issue_token(
    State(state): State<AppState>,
    Json(req): Json<TokenRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let token = state.tokens.issue(&req.email).map_err(|err| match err {
        AuthError::InvalidClaim(_, _) => {
            ApiError::bad_request("invalid_email", "email must not be empty")
        }
        other => ApiError::internal(other),
    })?;
    Ok(Json(TokenResponse { token }))
}

pub async fn all_instructors(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<repo::users::User>>> {
    let instructors = repo::users::list_instructors(&state.db)
        .await
        .map_err(ApiError::internal)?;
    Ok(Json(instructors))
}

pub async fn popular_instructors(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<repo::users::InstructorProfile>>> {
    let instructors = repo::users::popular_instructors(&state.db)
        .await
        .map_err(ApiError::internal)?;
    Ok(Json(instructors))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUserRequest {
    pub name: String,
    pub email: String,
    pub photo_url: Option<String>,
}

/// First-sign-in upsert keyed by email. Posting the same email twice is a
/// no-op that reports the duplicate instead of mutating anything.
pub async fn upsert_user(
    State(state): State<AppState>,
    Json(req): Json<NewUserRequest>,
) -> ApiResult<Json<Value>> {
    let inserted =
        repo::users::insert_if_absent(&state.db, &req.name, &req.email, req.photo_url.as_deref())
            .await
            .map_err(ApiError::internal)?;
    match inserted {
        Some(user) => {
            info!(email = %user.email, "registered new user");
            Ok(Json(serde_json::to_value(user).map_err(ApiError::internal)?))
        }
        None => Ok(Json(json!({ "message": "user already exists" }))),
    }
}

pub async fn all_users(
    State(state): State<AppState>,
    auth: AuthContext,
) -> ApiResult<Json<Vec<repo::users::User>>> {
    ensure_role(&state.db, &auth.claims, Role::Admin).await?;
    let users = repo::users::list_all(&state.db)
        .await
        .map_err(ApiError::internal)?;
    Ok(Json(users))
}

pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Value>> {
    ensure_role(&state.db, &auth.claims, Role::Admin).await?;
    if !repo::users::delete(&state.db, id)
        .await
        .map_err(ApiError::internal)?
    {
        return Err(ApiError::not_found("user_not_found"));
    }
    info!(user_id = %id, "deleted user");
    Ok(Json(json!({ "deleted": true })))
}

pub async fn make_admin(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<repo::users::User>> {
    assign_role(state, auth, id, Role::Admin).await
}

pub async fn make_instructor(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<repo::users::User>> {
    assign_role(state, auth, id, Role::Instructor).await
}

async fn assign_role(
    state: AppState,
    auth: AuthContext,
    id: Uuid,
    role: Role,
) -> ApiResult<Json<repo::users::User>> {
    ensure_role(&state.db, &auth.claims, Role::Admin).await?;
    let user = repo::users::set_role(&state.db, id, role)
        .await
        .map_err(ApiError::internal)?
        .ok_or(ApiError::not_found("user_not_found"))?;
    info!(user_id = %id, %role, "assigned role");
    Ok(Json(user))
}

pub async fn check_admin(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(email): Path<String>,
) -> ApiResult<Json<Value>> {
    self_role_check(state, auth, email, Role::Admin, "admin").await
}

pub async fn check_instructor(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(email): Path<String>,
) -> ApiResult<Json<Value>> {
    self_role_check(state, auth, email, Role::Instructor, "instructor").await
}

pub async fn check_student(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(email): Path<String>,
) -> ApiResult<Json<Value>> {
    self_role_check(state, auth, email, Role::Student, "student").await
}

/// Self-identity check. An email mismatch short-circuits with a negative
/// answer before any lookup happens.
async fn self_role_check(
    state: AppState,
    auth: AuthContext,
    email: String,
    role: Role,
    key: &'static str,
) -> ApiResult<Json<Value>> {
    if auth.email() != email {
        return Ok(Json(json!({ key: false })));
    }
    let stored = repo::users::role_by_email(&state.db, &email)
        .await
        .map_err(ApiError::internal)?;
    let matches = stored.as_deref().map(Role::parse) == Some(role);
    Ok(Json(json!({ key: matches })))
}
