use utoipa::OpenApi;
use utoipa::openapi::security::{SecurityScheme, HttpAuthScheme, HttpBuilder};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Agency Server API",
        version = "1.0.0",
        description = "Courses, travel, blogs, blood and patient records, reviews, orders, users and payments.\n\n**Authentication:** `PUT /user/{email}` returns a JWT; protected endpoints take it as `Authorization: Bearer <token>`. Admin endpoints additionally require the stored user role `admin`.\n\nGeneric resources (`/course`, `/travel`, `/blogs`, `/blood`, `/patient`, `/reviews`, `/userProfile`) accept and return arbitrary JSON documents."
    ),
    paths(
        // Health
        crate::api::health::root,
        crate::api::health::health_check,

        // Users
        crate::api::users::upsert_user,
        crate::api::users::list_users,
        crate::api::users::admin_status,
        crate::api::users::make_admin,

        // Orders
        crate::api::orders::list_orders,

        // Payments
        crate::api::payments::create_payment_intent,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::models::UpsertUserResponse,
            crate::models::AdminStatus,
            crate::models::InsertSummary,
            crate::models::UpdateSummary,
            crate::models::DeleteSummary,
            crate::services::payment_service::PaymentIntentRequest,
            crate::services::payment_service::PaymentIntentResponse,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and store connectivity."),
        (name = "Users", description = "User upsert with token issuance, role lookup and admin promotion."),
        (name = "Orders", description = "Orders owned by the authenticated caller."),
        (name = "Payments", description = "Payment intents created through the payment processor."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token returned by PUT /user/{email}"))
                        .build()
                ),
            );
        }
    }
}
