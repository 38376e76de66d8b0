use async_trait::async_trait;
use mongodb::bson::Document;

use crate::models::{DeleteSummary, InsertSummary, UpdateSummary};
use crate::utils::AppError;

mod mongo;
#[cfg(test)]
pub mod memory;

pub use mongo::MongoStore;

/// Operations the handlers issue against the document store.
///
/// Each call is a single store operation; there is no transaction spanning calls.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents matching `filter`, in store order.
    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>, AppError>;

    async fn find_one(&self, collection: &str, filter: Document) -> Result<Option<Document>, AppError>;

    async fn insert_one(&self, collection: &str, document: Document) -> Result<InsertSummary, AppError>;

    /// Field-level `$set` on the first match. With `upsert`, a missing document is created
    /// from the equality fields of `filter` plus `fields`.
    async fn set_fields(
        &self,
        collection: &str,
        filter: Document,
        fields: Document,
        upsert: bool,
    ) -> Result<UpdateSummary, AppError>;

    async fn replace_one(
        &self,
        collection: &str,
        filter: Document,
        document: Document,
        upsert: bool,
    ) -> Result<UpdateSummary, AppError>;

    async fn delete_one(&self, collection: &str, filter: Document) -> Result<DeleteSummary, AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}
