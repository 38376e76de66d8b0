use actix_web::{web, HttpRequest, HttpResponse};

use crate::database::DocumentStore;
use crate::middleware::auth::Claims;
use crate::models::{documents_to_json, AdminStatus, UpsertUserResponse};
use crate::services::{auth_service, auth_service::JwtKeys, user_service};
use crate::utils::AppError;

/// PUT /user/{email} - cria/atualiza usuário e emite token
#[utoipa::path(
    put,
    path = "/user/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "User email")),
    responses(
        (status = 200, description = "User upserted, token issued", body = UpsertUserResponse),
        (status = 401, description = "User exists and no token was presented"),
        (status = 403, description = "Token invalid or for another email")
    )
)]
pub async fn upsert_user(
    req: HttpRequest,
    store: web::Data<dyn DocumentStore>,
    keys: web::Data<JwtKeys>,
    path: web::Path<String>,
    body: web::Json<serde_json::Value>,
) -> Result<HttpResponse, AppError> {
    let email = path.into_inner();
    log::info!("👤 PUT /user/{}", email);

    let caller = auth_service::verify_request(req.headers(), &keys);
    let result = user_service::upsert_user(store.get_ref(), &email, body.into_inner(), caller).await?;
    let token = keys.issue(&email)?;

    log::info!("✅ User upserted: {} (matched: {})", email, result.matched_count);
    Ok(HttpResponse::Ok().json(UpsertUserResponse { result, token }))
}

/// 🔒 GET /user
#[utoipa::path(
    get,
    path = "/user",
    tag = "Users",
    responses(
        (status = 200, description = "All user documents"),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Invalid token")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_users(
    user: web::ReqData<Claims>,
    store: web::Data<dyn DocumentStore>,
) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET /user by {}", user.email);
    let users = user_service::list_users(store.get_ref()).await?;
    Ok(HttpResponse::Ok().json(documents_to_json(users)))
}

/// 🔒 GET /admin/{email} - only for the caller's own email
#[utoipa::path(
    get,
    path = "/admin/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "User email")),
    responses(
        (status = 200, description = "Whether the user is an admin", body = AdminStatus),
        (status = 403, description = "Token email differs from path email")
    ),
    security(("bearer_auth" = []))
)]
pub async fn admin_status(
    user: web::ReqData<Claims>,
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let email = path.into_inner();
    if email != user.email {
        log::warn!("❌ GET /admin/{} with token for {}", email, user.email);
        return Err(AppError::Forbidden("Forbidden access".into()));
    }

    let admin = user_service::is_admin(store.get_ref(), &email).await?;
    Ok(HttpResponse::Ok().json(AdminStatus { admin }))
}

/// 🔒🛡️ PUT /user/admin/{email}
#[utoipa::path(
    put,
    path = "/user/admin/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "Email of the user to promote")),
    responses(
        (status = 200, description = "User promoted", body = crate::models::UpdateSummary),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "No such user")
    ),
    security(("bearer_auth" = []))
)]
pub async fn make_admin(
    user: web::ReqData<Claims>,
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let email = path.into_inner();
    log::info!("🛡️ PUT /user/admin/{} by {}", email, user.email);

    let result = user_service::make_admin(store.get_ref(), &email).await?;
    Ok(HttpResponse::Ok().json(result))
}
