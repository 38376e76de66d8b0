use actix_web::{guard, web, HttpResponse};

use crate::database::DocumentStore;
use crate::middleware::{auth::Claims, TokenVerifier};
use crate::models::{
    document_to_json, documents_to_json, NewOrder, OrderQuery, PaymentConfirmation,
    ORDERS_COLLECTION,
};
use crate::services::{order_service, resource_service};
use crate::utils::AppError;

// ==================== ORDERS API ====================
// Listing is token-gated; the remaining verbs are open.

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/order")
            .service(
                web::resource("")
                    .guard(guard::Get())
                    .wrap(TokenVerifier)
                    .route(web::get().to(list_orders)),
            )
            .service(web::resource("").route(web::post().to(create_order)))
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_order))
                    .route(web::put().to(replace_order))
                    .route(web::patch().to(confirm_payment))
                    .route(web::delete().to(delete_order)),
            ),
    )
    // Older clients read single orders from the plural path.
    .route("/orders/{id}", web::get().to(get_order));
}

/// 🔒 GET /order?email= - pedidos do próprio usuário
#[utoipa::path(
    get,
    path = "/order",
    tag = "Orders",
    params(OrderQuery),
    responses(
        (status = 200, description = "Orders owned by the caller"),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Invalid token or email belongs to someone else")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_orders(
    user: web::ReqData<Claims>,
    store: web::Data<dyn DocumentStore>,
    query: web::Query<OrderQuery>,
) -> Result<HttpResponse, AppError> {
    log::info!("📊 GET /order for {}", user.email);

    let orders = order_service::list_orders(store.get_ref(), &user, query.email.as_deref())
        .await
        .map_err(|e| {
            log::warn!("❌ Order listing refused for {}: {}", user.email, e);
            e
        })?;

    Ok(HttpResponse::Ok().json(documents_to_json(orders)))
}

/// POST /order
pub async fn create_order(
    store: web::Data<dyn DocumentStore>,
    order: web::Json<NewOrder>,
) -> Result<HttpResponse, AppError> {
    let order = order.into_inner();
    log::info!("➕ POST /order - {} ({:.2})", order.email, order.price);

    let result = order_service::create_order(store.get_ref(), order).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// GET /order/{id}
pub async fn get_order(
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let order = resource_service::get(store.get_ref(), ORDERS_COLLECTION, &path).await?;
    Ok(HttpResponse::Ok().json(document_to_json(order)))
}

/// PUT /order/{id} - substitui o pedido inteiro (upsert)
pub async fn replace_order(
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
    body: web::Json<serde_json::Value>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    log::info!("✏️ PUT /order/{}", id);

    let result = resource_service::replace(store.get_ref(), ORDERS_COLLECTION, &id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// PATCH /order/{id} - confirma pagamento
pub async fn confirm_payment(
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
    body: web::Json<PaymentConfirmation>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    log::info!("💳 PATCH /order/{} - transaction {}", id, body.transaction_id);

    let result = order_service::confirm_payment(store.get_ref(), &id, body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(result))
}

/// DELETE /order/{id}
pub async fn delete_order(
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    log::info!("🗑️ DELETE /order/{}", id);

    let result = resource_service::delete(store.get_ref(), ORDERS_COLLECTION, &id).await?;
    Ok(HttpResponse::Ok().json(result))
}
