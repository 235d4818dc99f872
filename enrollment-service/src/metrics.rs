use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use once_cell::sync::Lazy;
use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, TextEncoder};

static HTTP_ERRORS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    let counter = IntCounterVec::new(
        Opts::new(
            "enrollment_http_errors_total",
            "Error responses served by the enrollment API",
        ),
        &["code", "status"],
    )
    .expect("enrollment_http_errors_total");
    let _ = prometheus::default_registry().register(Box::new(counter.clone()));
    counter
});

/// Completed checkouts, incremented next to the transaction that records
/// them.
pub static PAYMENTS_RECORDED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    let counter = IntCounter::new(
        "enrollment_payments_recorded_total",
        "Payments recorded through the checkout flow",
    )
    .expect("enrollment_payments_recorded_total");
    let _ = prometheus::default_registry().register(Box::new(counter.clone()));
    counter
});

/// Counts every error response, keyed by the `X-Error-Code` header the
/// error types attach.
pub async fn track_http_errors(req: Request, next: Next) -> Response {
    let resp = next.run(req).await;
    let status = resp.status();
    if status.is_client_error() || status.is_server_error() {
        let code = resp
            .headers()
            .get("X-Error-Code")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("unknown");
        HTTP_ERRORS_TOTAL
            .with_label_values(&[code, status.as_str()])
            .inc();
    }
    resp
}

pub async fn render_metrics() -> Result<String, StatusCode> {
    let mut buffer = Vec::new();
    TextEncoder::new()
        .encode(&prometheus::gather(), &mut buffer)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    String::from_utf8(buffer).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}
