use axum::extract::{Path, State};
use axum::Json;
use common_auth::AuthContext;
use common_http_errors::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::guards::ensure_self;
use crate::metrics;
use crate::repo;
use crate::repo::classes::Class;
use crate::repo::payments::{NewPayment, Payment};
use crate::AppState;

#[derive(Deserialize)]
pub struct CreateIntentRequest {
    pub price: f64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIntentResponse {
    pub client_secret: String,
}

pub async fn create_payment_intent(
    State(state): State<AppState>,
    _auth: AuthContext,
    Json(req): Json<CreateIntentRequest>,
) -> ApiResult<Json<CreateIntentResponse>> {
    if !req.price.is_finite() || req.price < 0.0 {
        return Err(ApiError::bad_request(
            "invalid_price",
            "price must be a non-negative number",
        ));
    }
    // Provider amounts are minor units (cents).
    let amount_minor = (req.price * 100.0).round() as i64;
    let intent = state
        .gateway
        .create_intent(amount_minor, "usd")
        .await
        .map_err(ApiError::internal)?;
    Ok(Json(CreateIntentResponse {
        client_secret: intent.client_secret,
    }))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub payment: Payment,
    pub removed_from_cart: bool,
}

pub async fn record_payment(
    State(state): State<AppState>,
    auth: AuthContext,
    Json(new): Json<NewPayment>,
) -> ApiResult<Json<PaymentReceipt>> {
    ensure_self(&auth.claims, &new.email)?;
    let payment = repo::payments::record(&state.db, &new)
        .await
        .map_err(ApiError::internal)?
        .ok_or(ApiError::not_found("cart_item_not_found"))?;
    metrics::PAYMENTS_RECORDED_TOTAL.inc();
    info!(email = %payment.email, class_id = %payment.class_id, "payment recorded");
    Ok(Json(PaymentReceipt {
        payment,
        removed_from_cart: true,
    }))
}

/// Post-payment seat adjustment, issued separately by the client.
pub async fn enroll_student(
    State(state): State<AppState>,
    _auth: AuthContext,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Class>> {
    if let Some(class) = repo::classes::enroll(&state.db, id)
        .await
        .map_err(ApiError::internal)?
    {
        return Ok(Json(class));
    }
    // Distinguish a full class from a missing one.
    match repo::classes::find(&state.db, id)
        .await
        .map_err(ApiError::internal)?
    {
        Some(_) => Err(ApiError::conflict("class_full", "no seats available")),
        None => Err(ApiError::not_found("class_not_found")),
    }
}

pub async fn payment_history(
    State(state): State<AppState>,
    auth: AuthContext,
    Path(email): Path<String>,
) -> ApiResult<Json<Vec<Payment>>> {
    ensure_self(&auth.claims, &email)?;
    let payments = repo::payments::list_by_email(&state.db, &email)
        .await
        .map_err(ApiError::internal)?;
    Ok(Json(payments))
}
