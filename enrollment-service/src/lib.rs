use std::sync::Arc;

use axum::extract::FromRef;
use axum::routing::{delete, get, patch, post};
use axum::{middleware, Router};
use common_auth::TokenService;
use sqlx::PgPool;
use tower_http::cors::CorsLayer;

use crate::gateway::PaymentGateway;

pub mod cart_handlers;
pub mod class_handlers;
pub mod gateway;
pub mod guards;
pub mod metrics;
pub mod payment_handlers;
pub mod repo;
pub mod review_handlers;
pub mod user_handlers;

/// Shared per-process handles, injected rather than ambient so tests can
/// build their own (stub gateway, scratch pool).
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub tokens: Arc<TokenService>,
    pub gateway: Arc<dyn PaymentGateway>,
}

impl FromRef<AppState> for Arc<TokenService> {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "The server is running" }))
        .route("/healthz", get(|| async { "ok" }))
        .route("/metrics", get(metrics::render_metrics))
        .route("/internal/metrics", get(metrics::render_metrics))
        .route("/jwt", post(user_handlers::issue_token))
        .route("/all-instructors", get(user_handlers::all_instructors))
        .route(
            "/popular-instructors",
            get(user_handlers::popular_instructors),
        )
        .route("/all-classes", get(class_handlers::all_classes))
        .route("/all-classes-admin", get(class_handlers::all_classes_admin))
        .route("/popular-classes", get(class_handlers::popular_classes))
        .route("/classes/:id", get(class_handlers::get_class))
        .route("/add-a-class", post(class_handlers::add_class))
        .route("/approve-class/:id", patch(class_handlers::approve_class))
        .route("/deny-class/:id", patch(class_handlers::deny_class))
        .route("/feedback/:id", patch(class_handlers::set_feedback))
        .route("/update-a-class/:id", patch(class_handlers::update_class))
        .route("/my-classes", get(class_handlers::my_classes))
        .route(
            "/users",
            post(user_handlers::upsert_user).get(user_handlers::all_users),
        )
        .route("/users/:id", delete(user_handlers::delete_user))
        .route(
            "/users/admin/:id",
            get(user_handlers::check_admin).patch(user_handlers::make_admin),
        )
        .route(
            "/users/instructor/:id",
            get(user_handlers::check_instructor).patch(user_handlers::make_instructor),
        )
        .route("/users/student/:email", get(user_handlers::check_student))
        .route(
            "/all-selected-classes",
            get(cart_handlers::all_selected_classes),
        )
        .route("/selected-classes", post(cart_handlers::add_selected_class))
        .route(
            "/selected-classes/:id",
            delete(cart_handlers::delete_selected_class),
        )
        .route(
            "/create-payment-intent",
            post(payment_handlers::create_payment_intent),
        )
        .route("/payments", post(payment_handlers::record_payment))
        .route("/payments/:email", get(payment_handlers::payment_history))
        .route("/update-card/:id", patch(payment_handlers::enroll_student))
        .route("/reviews", get(review_handlers::all_reviews))
        .with_state(state)
        .layer(middleware::from_fn(metrics::track_http_errors))
        .layer(CorsLayer::permissive())
}
