use mongodb::bson::{self, doc, Document};

use crate::database::DocumentStore;
use crate::models::{
    parse_object_id, InsertSummary, NewOrder, PaymentConfirmation, PaymentConfirmationResponse,
    ORDERS_COLLECTION, PAYMENTS_COLLECTION,
};
use crate::services::auth_service::Claims;
use crate::utils::AppError;

/// Orders of one owner. A requested email other than the caller's own is refused.
pub async fn list_orders(
    store: &dyn DocumentStore,
    caller: &Claims,
    requested_email: Option<&str>,
) -> Result<Vec<Document>, AppError> {
    let email = requested_email.unwrap_or(&caller.email);
    if email != caller.email {
        return Err(AppError::Forbidden("Forbidden access".into()));
    }
    store.find(ORDERS_COLLECTION, doc! { "email": email }).await
}

pub async fn create_order(store: &dyn DocumentStore, order: NewOrder) -> Result<InsertSummary, AppError> {
    if !order.price.is_finite() || order.price < 0.0 {
        return Err(AppError::InvalidRequest("price must be a non-negative number".into()));
    }
    let mut document = bson::to_document(&order)?;
    document.remove("_id");
    store.insert_one(ORDERS_COLLECTION, document).await
}

/// Logs the payment, then marks the order paid.
///
/// The two writes are independent: if marking the order fails, or no order has that id,
/// the payment entry stays and the order remains unpaid.
pub async fn confirm_payment(
    store: &dyn DocumentStore,
    order_id: &str,
    confirmation: PaymentConfirmation,
) -> Result<PaymentConfirmationResponse, AppError> {
    let oid = parse_object_id(order_id)?;

    let mut entry = bson::to_document(&confirmation)?;
    entry.remove("_id");
    entry.insert("orderId", order_id);
    let payment = store.insert_one(PAYMENTS_COLLECTION, entry).await?;
    log::info!("💳 Payment {} logged for order {}", confirmation.transaction_id, order_id);

    let order = store
        .set_fields(
            ORDERS_COLLECTION,
            doc! { "_id": oid },
            doc! { "paid": true, "transactionId": &confirmation.transaction_id },
            false,
        )
        .await
        .map_err(|e| {
            log::error!(
                "❌ Payment {} logged but order {} not updated: {}",
                confirmation.transaction_id, order_id, e
            );
            e
        })?;

    if order.matched_count == 0 {
        log::warn!(
            "⚠️ Payment {} logged for unknown order {}",
            confirmation.transaction_id, order_id
        );
        return Err(AppError::NotFound(format!("order {}", order_id)));
    }

    Ok(PaymentConfirmationResponse { payment, order })
}
