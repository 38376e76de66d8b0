use actix_web::web;

use crate::middleware::{AdminGate, TokenVerifier};
use crate::utils::AppError;

pub mod health;
pub mod orders;
pub mod payments;
pub mod resources;
pub mod swagger;
pub mod users;


/// Every route of the service. Expects `Data<dyn DocumentStore>`, `Data<JwtKeys>`
/// and `Data<dyn PaymentProcessor>` on the app.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::InvalidRequest(err.to_string()).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        AppError::InvalidRequest(err.to_string()).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::InvalidRequest(err.to_string()).into()
    }))
    .route("/", web::get().to(health::root))
    .route("/health", web::get().to(health::health_check))
    // Users
    .service(
        web::resource("/user")
            .wrap(TokenVerifier)
            .route(web::get().to(users::list_users)),
    )
    .service(
        web::resource("/user/admin/{email}")
            .wrap(AdminGate)
            .wrap(TokenVerifier)
            .route(web::put().to(users::make_admin)),
    )
    .route("/user/{email}", web::put().to(users::upsert_user))
    .service(
        web::resource("/admin/{email}")
            .wrap(TokenVerifier)
            .route(web::get().to(users::admin_status)),
    )
    // Payments
    .route(
        "/create-payment-intent",
        web::post().to(payments::create_payment_intent),
    )
    .configure(orders::configure)
    .configure(resources::configure);
}
