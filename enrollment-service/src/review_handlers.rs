use axum::extract::State;
use axum::Json;
use common_http_errors::{ApiError, ApiResult};

use crate::repo;
use crate::repo::reviews::Review;
use crate::AppState;

pub async fn all_reviews(State(state): State<AppState>) -> ApiResult<Json<Vec<Review>>> {
    let reviews = repo::reviews::list_all(&state.db)
        .await
        .map_err(ApiError::internal)?;
    Ok(Json(reviews))
}
