use axum::http::StatusCode;
use axum::response::IntoResponse;
use common_http_errors::ApiError;

async fn body_json(resp: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(resp.into_body(), 16 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn unauthorized_variant() {
    let resp = ApiError::Unauthorized.into_response();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(resp.headers().get("X-Error-Code").unwrap(), "unauthorized");
    let body = body_json(resp).await;
    assert_eq!(body["error"], true);
    assert_eq!(body["message"], "unauthorized access");
}

#[tokio::test]
async fn forbidden_variant() {
    let resp = ApiError::Forbidden.into_response();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(resp.headers().get("X-Error-Code").unwrap(), "forbidden");
    let body = body_json(resp).await;
    assert_eq!(body["error"], true);
    assert_eq!(body["message"], "forbidden access");
}

#[tokio::test]
async fn not_found_variant() {
    let resp = ApiError::not_found("class_not_found").into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        resp.headers().get("X-Error-Code").unwrap(),
        "class_not_found"
    );
}

#[tokio::test]
async fn conflict_variant() {
    let resp = ApiError::conflict("class_full", "no seats available").into_response();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(resp.headers().get("X-Error-Code").unwrap(), "class_full");
    let body = body_json(resp).await;
    assert_eq!(body["message"], "no seats available");
}

#[tokio::test]
async fn internal_variant() {
    let resp = ApiError::internal("boom").into_response();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        resp.headers().get("X-Error-Code").unwrap(),
        "internal_error"
    );
}
