use std::{
    env,
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use anyhow::Context;
use common_auth::{TokenConfig, TokenService};
use enrollment_service::gateway::{HttpGateway, PaymentGateway};
use enrollment_service::{router, AppState};
use sqlx::PgPool;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let db = PgPool::connect(&database_url).await?;

    let secret = env::var("ACCESS_TOKEN_SECRET").context("ACCESS_TOKEN_SECRET must be set")?;
    let tokens = Arc::new(TokenService::new(TokenConfig::new(secret)));

    let payment_key =
        env::var("PAYMENT_SECRET_KEY").context("PAYMENT_SECRET_KEY must be set")?;
    let gateway: Arc<dyn PaymentGateway> = Arc::new(HttpGateway::new(payment_key));

    let state = AppState {
        db,
        tokens,
        gateway,
    };
    let app = router(state);

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5000);
    let ip: IpAddr = host.parse()?;
    let addr = SocketAddr::from((ip, port));

    info!(%addr, "starting enrollment-service");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
