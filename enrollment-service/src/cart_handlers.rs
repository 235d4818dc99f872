use axum::extract::{Path, Query, State};
use axum::Json;
use common_auth::AuthContext;
use common_http_errors::{ApiError, ApiResult};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::class_handlers::EmailQuery;
use crate::guards::ensure_self;
use crate::repo;
use crate::repo::carts::{NewSelectedClass, SelectedClass};
use crate::AppState;

pub async fn all_selected_classes(
    State(state): State<AppState>,
    auth: AuthContext,
    Query(query): Query<EmailQuery>,
) -> ApiResult<Json<Vec<SelectedClass>>> {
    ensure_self(&auth.claims, &query.email)?;
    let selected = repo::carts::list_by_email(&state.db, &query.email)
        .await
        .map_err(ApiError::internal)?;
    Ok(Json(selected))
}

pub async fn add_selected_class(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(new): Json<NewSelectedClass>,
) -> ApiResult<Json<SelectedClass>> {
    ensure_self(&auth.claims, &new.email)?;
    let selected = repo::carts::insert(&state.db, &new)
        .await
        .map_err(ApiError::internal)?;
    Ok(Json(selected))
}

/// The delete is scoped to the token's email, so a row id belonging to
/// another student reads as missing.
pub async fn delete_selected_class(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Value>> {
    if !repo::carts::delete(&state.db, id, auth.email())
        .await
        .map_err(ApiError::internal)?
    {
        return Err(ApiError::not_found("cart_item_not_found"));
    }
    Ok(Json(json!({ "deleted": true })))
}
