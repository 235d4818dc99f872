use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

mod support;
use support::{body_json, json_request, test_app};

#[tokio::test]
async fn intent_requires_a_token() {
    let (app, _) = test_app();
    let resp = app
        .oneshot(json_request(
            "POST",
            "/create-payment-intent",
            None,
            json!({ "price": 12.5 }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn intent_amount_is_price_in_cents() {
    let (app, tokens) = test_app();
    let token = tokens.issue("camper@example.com").unwrap();
    let resp = app
        .oneshot(json_request(
            "POST",
            "/create-payment-intent",
            Some(&token),
            json!({ "price": 12.5 }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    // The stub gateway embeds the minor-unit amount it was handed.
    assert_eq!(body["clientSecret"], "pi_stub_1250_secret_usd");
}

#[tokio::test]
async fn intent_rejects_negative_price() {
    let (app, tokens) = test_app();
    let token = tokens.issue("camper@example.com").unwrap();
    let resp = app
        .oneshot(json_request(
            "POST",
            "/create-payment-intent",
            Some(&token),
            json!({ "price": -1.0 }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_json(resp).await;
    assert_eq!(body["error"], true);
}
