use serde::{Deserialize, Serialize};

use super::{InsertSummary, UpdateSummary};

pub const ORDERS_COLLECTION: &str = "order";
pub const PAYMENTS_COLLECTION: &str = "payments";

/// Body of `POST /order`. Unknown fields are stored alongside the known ones.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct NewOrder {
    pub email: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OrderQuery {
    pub email: Option<String>,
}

/// Body of `PATCH /order/{id}`; logged verbatim in the payments collection.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PaymentConfirmation {
    #[serde(rename = "transactionId")]
    pub transaction_id: String,
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PaymentConfirmationResponse {
    pub payment: InsertSummary,
    pub order: UpdateSummary,
}
