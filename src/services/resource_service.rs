use mongodb::bson::{doc, Document};

use crate::database::DocumentStore;
use crate::models::{
    json_to_document, parse_object_id, DeleteSummary, InsertSummary, UpdateSummary,
};
use crate::utils::AppError;

pub async fn list(store: &dyn DocumentStore, collection: &str) -> Result<Vec<Document>, AppError> {
    store.find(collection, doc! {}).await
}

pub async fn get(store: &dyn DocumentStore, collection: &str, id: &str) -> Result<Document, AppError> {
    let oid = parse_object_id(id)?;
    store
        .find_one(collection, doc! { "_id": oid })
        .await?
        .ok_or_else(|| AppError::NotFound(format!("{} {}", collection, id)))
}

pub async fn create(
    store: &dyn DocumentStore,
    collection: &str,
    body: serde_json::Value,
) -> Result<InsertSummary, AppError> {
    let mut document = json_to_document(body)?;
    document.remove("_id");
    store.insert_one(collection, document).await
}

/// Field-level update; a missing id is created with the given fields.
pub async fn update(
    store: &dyn DocumentStore,
    collection: &str,
    id: &str,
    body: serde_json::Value,
) -> Result<UpdateSummary, AppError> {
    let oid = parse_object_id(id)?;
    let mut fields = json_to_document(body)?;
    fields.remove("_id");
    store
        .set_fields(collection, doc! { "_id": oid }, fields, true)
        .await
}

/// Whole-document replacement keyed by id, creating it if absent.
pub async fn replace(
    store: &dyn DocumentStore,
    collection: &str,
    id: &str,
    body: serde_json::Value,
) -> Result<UpdateSummary, AppError> {
    let oid = parse_object_id(id)?;
    let mut document = json_to_document(body)?;
    document.remove("_id");
    store
        .replace_one(collection, doc! { "_id": oid }, document, true)
        .await
}

pub async fn delete(store: &dyn DocumentStore, collection: &str, id: &str) -> Result<DeleteSummary, AppError> {
    let oid = parse_object_id(id)?;
    let result = store.delete_one(collection, doc! { "_id": oid }).await?;
    if result.deleted_count == 0 {
        return Err(AppError::NotFound(format!("{} {}", collection, id)));
    }
    Ok(result)
}
