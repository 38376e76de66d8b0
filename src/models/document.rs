use mongodb::bson::{self, oid::ObjectId, Bson, Document};
use serde::{Deserialize, Serialize};

use crate::utils::AppError;

// Write results, shaped like the driver results clients already consume.

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InsertSummary {
    pub acknowledged: bool,
    pub inserted_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSummary {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_count: u64,
    pub upserted_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteSummary {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

/// Renders an id the way clients see it: ObjectIds as hex, anything else as relaxed JSON text.
pub fn id_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.clone().into_relaxed_extjson().to_string(),
    }
}

pub fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::InvalidRequest(format!("Invalid id: {}", id)))
}

/// Converts a JSON request body into a BSON document. Only objects are accepted.
pub fn json_to_document(value: serde_json::Value) -> Result<Document, AppError> {
    if !value.is_object() {
        return Err(AppError::InvalidRequest("Body must be a JSON object".into()));
    }
    Ok(bson::to_document(&value)?)
}

/// Converts a stored document to JSON with `_id` flattened to a hex string.
pub fn document_to_json(mut doc: Document) -> serde_json::Value {
    if let Some(id) = doc.get("_id").map(id_to_string) {
        doc.insert("_id", id);
    }
    Bson::Document(doc).into_relaxed_extjson()
}

pub fn documents_to_json(docs: Vec<Document>) -> serde_json::Value {
    serde_json::Value::Array(docs.into_iter().map(document_to_json).collect())
}
