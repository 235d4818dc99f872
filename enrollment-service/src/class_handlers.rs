use axum::extract::{Path, Query, State};
use axum::Json;
use common_auth::{AuthContext, Role};
use common_http_errors::{ApiError, ApiResult};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::guards::{ensure_role, ensure_self};
use crate::repo;
use crate::repo::classes::{Class, ClassStatus, NewClass, UpdateClass};
use crate::AppState;

pub async fn all_classes(State(state): State<AppState>) -> ApiResult<Json<Vec<Class>>> {
    let classes = repo::classes::list_approved(&state.db)
        .await
        .map_err(ApiError::internal)?;
    Ok(Json(classes))
}

/// Admin dashboard variant: every class regardless of status.
pub async fn all_classes_admin(
    State(state): State<AppState>,
    auth: AuthContext,
) -> ApiResult<Json<Vec<Class>>> {
    ensure_role(&state.db, &auth.claims, Role::Admin).await?;
    let classes = repo::classes::list_all(&state.db)
        .await
        .map_err(ApiError::internal)?;
    Ok(Json(classes))
}

pub async fn popular_classes(State(state): State<AppState>) -> ApiResult<Json<Vec<Class>>> {
    let classes = repo::classes::popular(&state.db)
        .await
        .map_err(ApiError::internal)?;
    Ok(Json(classes))
}

pub async fn get_class(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Class>> {
    let class = repo::classes::find(&state.db, id)
        .await
        .map_err(ApiError::internal)?
        .ok_or(ApiError::not_found("class_not_found"))?;
    Ok(Json(class))
}

pub async fn add_class(
    State(state): State<AppState>,
    Json(new): Json<NewClass>,
) -> ApiResult<Json<Class>> {
    let class = repo::classes::insert(&state.db, &new)
        .await
        .map_err(ApiError::internal)?;
    info!(class_id = %class.id, instructor = %class.instructor_email, "class submitted");
    Ok(Json(class))
}

pub async fn approve_class(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Class>> {
    transition(state, auth, id, ClassStatus::Approved).await
}

pub async fn deny_class(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Class>> {
    transition(state, auth, id, ClassStatus::Denied).await
}

async fn transition(
    state: AppState,
    auth: AuthContext,
    id: Uuid,
    status: ClassStatus,
) -> ApiResult<Json<Class>> {
    ensure_role(&state.db, &auth.claims, Role::Admin).await?;
    let class = repo::classes::set_status(&state.db, id, status)
        .await
        .map_err(ApiError::internal)?
        .ok_or(ApiError::not_found("class_not_found"))?;
    info!(class_id = %id, status = status.as_str(), "class status updated");
    Ok(Json(class))
}

#[derive(Deserialize)]
pub struct FeedbackRequest {
    pub feedback: String,
}

pub async fn set_feedback(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
    Json(req): Json<FeedbackRequest>,
) -> ApiResult<Json<Class>> {
    ensure_role(&state.db, &auth.claims, Role::Admin).await?;
    let class = repo::classes::set_feedback(&state.db, id, &req.feedback)
        .await
        .map_err(ApiError::internal)?
        .ok_or(ApiError::not_found("class_not_found"))?;
    Ok(Json(class))
}

pub async fn update_class(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(fields): Json<UpdateClass>,
) -> ApiResult<Json<Class>> {
    let class = repo::classes::update_fields(&state.db, id, &fields)
        .await
        .map_err(ApiError::internal)?
        .ok_or(ApiError::not_found("class_not_found"))?;
    Ok(Json(class))
}

#[derive(Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

pub async fn my_classes(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(query): Query<EmailQuery>,
) -> ApiResult<Json<Vec<Class>>> {
    ensure_self(&auth.claims, &query.email)?;
    let classes = repo::classes::by_instructor(&state.db, &query.email)
        .await
        .map_err(ApiError::internal)?;
    Ok(Json(classes))
}
