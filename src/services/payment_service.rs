use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::utils::AppError;

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct PaymentIntentRequest {
    pub price: f64,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub client_secret: String,
}

/// The external processor that turns an amount into a client-completable payment.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Currency every intent is created in.
    fn currency(&self) -> &str;

    /// Creates an intent for `amount` minor units of [`currency`](Self::currency).
    async fn create_payment_intent(&self, amount: i64) -> Result<PaymentIntent, AppError>;
}

/// Converts a decimal price to the smallest currency unit (two-decimal currencies).
pub fn to_minor_units(price: f64) -> Result<i64, AppError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(AppError::InvalidRequest("price must be a positive number".into()));
    }
    let amount = (price * 100.0).round();
    if amount > i64::MAX as f64 {
        return Err(AppError::InvalidRequest("price is too large".into()));
    }
    Ok(amount as i64)
}

pub async fn create_intent(
    processor: &dyn PaymentProcessor,
    request: &PaymentIntentRequest,
) -> Result<PaymentIntentResponse, AppError> {
    let amount = to_minor_units(request.price)?;
    log::info!("💳 Creating payment intent: {} {}", amount, processor.currency());

    let intent = processor.create_payment_intent(amount).await?;

    log::info!("✅ Payment intent created: {}", intent.id);

    Ok(PaymentIntentResponse {
        client_secret: intent.client_secret,
    })
}

/// Stripe's REST API, form-encoded.
pub struct StripeClient {
    http: reqwest::Client,
    api_base: String,
    secret_key: String,
    currency: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    message: Option<String>,
}

impl StripeClient {
    pub fn new(api_base: &str, secret_key: &str, currency: &str) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
            secret_key: secret_key.to_string(),
            currency: currency.to_lowercase(),
        })
    }
}

#[async_trait]
impl PaymentProcessor for StripeClient {
    fn currency(&self) -> &str {
        &self.currency
    }

    async fn create_payment_intent(&self, amount: i64) -> Result<PaymentIntent, AppError> {
        let url = format!("{}/v1/payment_intents", self.api_base);
        let amount = amount.to_string();
        let form = [
            ("amount", amount.as_str()),
            ("currency", self.currency.as_str()),
            ("payment_method_types[]", "card"),
        ];

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.secret_key)
            .form(&form)
            .send()
            .await
            .map_err(|e| AppError::PaymentError(format!("Failed to reach processor: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let message = response
                .json::<StripeErrorBody>()
                .await
                .ok()
                .and_then(|body| body.error.message)
                .unwrap_or_else(|| "no details".to_string());
            return Err(AppError::PaymentError(format!("{}: {}", status, message)));
        }

        response
            .json::<PaymentIntent>()
            .await
            .map_err(|e| AppError::PaymentError(format!("Failed to parse payment intent: {}", e)))
    }
}
