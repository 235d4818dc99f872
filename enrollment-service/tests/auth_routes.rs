use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

mod support;
use support::{body_json, get, json_request, test_app};

#[tokio::test]
async fn missing_token_yields_unauthorized_envelope() {
    let (app, _) = test_app();
    let resp = app
        .oneshot(get("/all-selected-classes?email=a@example.com", None))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["error"], true);
    assert_eq!(body["message"], "unauthorized access");
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    let (app, _) = test_app();
    let resp = app
        .oneshot(get(
            "/all-selected-classes?email=a@example.com",
            Some("not.a.token"),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["message"], "unauthorized access");
}

#[tokio::test]
async fn expired_token_is_rejected() {
    use common_auth::{TokenConfig, TokenService};

    let (app, _) = test_app();
    // Same secret as the app, lifetime far in the past.
    let stale = TokenService::new(TokenConfig::new("test-secret").with_ttl(-3600));
    let token = stale.issue("a@example.com").unwrap();
    let resp = app
        .oneshot(get("/all-selected-classes?email=a@example.com", Some(&token)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn jwt_route_issues_verifiable_token() {
    let (app, tokens) = test_app();
    let resp = app
        .oneshot(json_request(
            "POST",
            "/jwt",
            None,
            json!({ "email": "camper@example.com" }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let claims = tokens.verify(body["token"].as_str().unwrap()).unwrap();
    assert_eq!(claims.email, "camper@example.com");
}

#[tokio::test]
async fn my_classes_rejects_foreign_email_before_any_query() {
    let (app, tokens) = test_app();
    let token = tokens.issue("a@example.com").unwrap();
    // The lazy pool cannot serve queries, so anything but the short-circuit
    // 403 would surface as a 500 here.
    let resp = app
        .oneshot(get("/my-classes?email=b@example.com", Some(&token)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body = body_json(resp).await;
    assert_eq!(body["error"], true);
    assert_eq!(body["message"], "forbidden access");
}

#[tokio::test]
async fn liveness_and_health_routes_respond() {
    let (app, _) = test_app();
    let resp = app.clone().oneshot(get("/", None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = app.oneshot(get("/healthz", None)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
