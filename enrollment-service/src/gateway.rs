use anyhow::{anyhow, Result};
use serde::Deserialize;

const DEFAULT_ENDPOINT: &str = "https://api.stripe.com/v1/payment_intents";

/// Provider-issued intent handle; the client confirms the payment against
/// the `client_secret` on its side.
#[derive(Debug, Clone)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
    pub amount_minor: i64,
    pub currency: String,
}

#[async_trait::async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn create_intent(&self, amount_minor: i64, currency: &str) -> Result<PaymentIntent>;
}

/// Speaks the hosted provider's form-encoded payment-intents API.
pub struct HttpGateway {
    client: reqwest::Client,
    secret_key: String,
    endpoint: String,
}

impl HttpGateway {
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            secret_key: secret_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[derive(Deserialize)]
struct IntentRepr {
    id: String,
    client_secret: String,
}

#[async_trait::async_trait]
impl PaymentGateway for HttpGateway {
    async fn create_intent(&self, amount_minor: i64, currency: &str) -> Result<PaymentIntent> {
        let params = [
            ("amount", amount_minor.to_string()),
            ("currency", currency.to_string()),
            ("payment_method_types[]", "card".to_string()),
        ];
        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.secret_key)
            .form(&params)
            .send()
            .await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow!("payment provider returned {status}: {body}"));
        }
        let repr: IntentRepr = resp.json().await?;
        Ok(PaymentIntent {
            id: repr.id,
            client_secret: repr.client_secret,
            amount_minor,
            currency: currency.to_string(),
        })
    }
}

/// Deterministic gateway for tests; never leaves the process.
pub struct StubGateway;

impl StubGateway {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StubGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl PaymentGateway for StubGateway {
    async fn create_intent(&self, amount_minor: i64, currency: &str) -> Result<PaymentIntent> {
        Ok(PaymentIntent {
            id: format!("pi_stub_{amount_minor}"),
            client_secret: format!("pi_stub_{amount_minor}_secret_{currency}"),
            amount_minor,
            currency: currency.to_string(),
        })
    }
}
