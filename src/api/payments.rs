use actix_web::{web, HttpResponse};

use crate::services::payment_service::{
    self, PaymentIntentRequest, PaymentIntentResponse, PaymentProcessor,
};
use crate::utils::AppError;

#[utoipa::path(
    post,
    path = "/create-payment-intent",
    tag = "Payments",
    request_body = PaymentIntentRequest,
    responses(
        (status = 200, description = "Payment intent created", body = PaymentIntentResponse),
        (status = 400, description = "Price missing, not positive, or not a number"),
        (status = 502, description = "Payment processor rejected or unreachable")
    )
)]
pub async fn create_payment_intent(
    processor: web::Data<dyn PaymentProcessor>,
    request: web::Json<PaymentIntentRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("💳 POST /create-payment-intent - price: {}", request.price);

    match payment_service::create_intent(processor.get_ref(), &request).await {
        Ok(response) => Ok(HttpResponse::Ok().json(response)),
        Err(e) => {
            log::error!("❌ Payment intent failed: {}", e);
            Err(e)
        }
    }
}
