use actix_web::{web, HttpResponse};

use crate::database::DocumentStore;
use crate::models::{document_to_json, documents_to_json, Capability, ResourceSpec, RESOURCES};
use crate::services::resource_service;
use crate::utils::AppError;

/// Registers every resource family with exactly the verbs its capability table lists.
pub fn configure(cfg: &mut web::ServiceConfig) {
    for spec in RESOURCES {
        let mut collection = web::resource("");
        if spec.supports(Capability::List) {
            collection = collection.route(web::get().to(list));
        }
        if spec.supports(Capability::Create) {
            collection = collection.route(web::post().to(create));
        }

        let mut scope = web::scope(spec.path)
            .app_data(web::Data::new(*spec))
            .service(collection);

        if spec.has_item_routes() {
            let mut item = web::resource("/{id}");
            if spec.supports(Capability::Get) {
                item = item.route(web::get().to(get));
            }
            if spec.supports(Capability::Update) {
                item = item.route(web::put().to(update));
            }
            if spec.supports(Capability::Delete) {
                item = item.route(web::delete().to(delete));
            }
            scope = scope.service(item);
        }

        cfg.service(scope);
    }
}

async fn list(
    spec: web::Data<ResourceSpec>,
    store: web::Data<dyn DocumentStore>,
) -> Result<HttpResponse, AppError> {
    let documents = resource_service::list(store.get_ref(), spec.collection).await?;
    log::info!("📋 GET {} - {} documents", spec.path, documents.len());
    Ok(HttpResponse::Ok().json(documents_to_json(documents)))
}

async fn get(
    spec: web::Data<ResourceSpec>,
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let document = resource_service::get(store.get_ref(), spec.collection, &path).await?;
    Ok(HttpResponse::Ok().json(document_to_json(document)))
}

async fn create(
    spec: web::Data<ResourceSpec>,
    store: web::Data<dyn DocumentStore>,
    body: web::Json<serde_json::Value>,
) -> Result<HttpResponse, AppError> {
    let result = resource_service::create(store.get_ref(), spec.collection, body.into_inner()).await?;
    log::info!("➕ POST {} - inserted {}", spec.path, result.inserted_id);
    Ok(HttpResponse::Ok().json(result))
}

async fn update(
    spec: web::Data<ResourceSpec>,
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
    body: web::Json<serde_json::Value>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let result = resource_service::update(store.get_ref(), spec.collection, &id, body.into_inner())
        .await
        .map_err(|e| {
            log::error!("❌ PUT {}/{} failed: {}", spec.path, id, e);
            e
        })?;
    Ok(HttpResponse::Ok().json(result))
}

async fn delete(
    spec: web::Data<ResourceSpec>,
    store: web::Data<dyn DocumentStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let result = resource_service::delete(store.get_ref(), spec.collection, &id).await?;
    log::info!("🗑️ DELETE {}/{}", spec.path, id);
    Ok(HttpResponse::Ok().json(result))
}
