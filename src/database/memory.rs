//! In-process store for request-level tests. Filters are top-level equality matches.

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use super::DocumentStore;
use crate::models::{id_to_string, DeleteSummary, InsertSummary, UpdateSummary};
use crate::utils::AppError;

#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<Document>>>,
    failing_updates: Mutex<HashSet<String>>,
    unreachable: AtomicBool,
}

impl MemoryStore {
    /// Every later update or replace on `collection` fails with a database error.
    pub fn fail_updates_on(&self, collection: &str) {
        self.failing_updates.lock().unwrap().insert(collection.to_string());
    }

    /// Every later ping fails, as if the server went away.
    pub fn fail_ping(&self) {
        self.unreachable.store(true, Ordering::SeqCst);
    }

    pub fn documents(&self, collection: &str) -> Vec<Document> {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    fn check_update_allowed(&self, collection: &str) -> Result<(), AppError> {
        if self.failing_updates.lock().unwrap().contains(collection) {
            return Err(AppError::DatabaseError(format!("injected fault on {}", collection)));
        }
        Ok(())
    }
}

fn matches(document: &Document, filter: &Document) -> bool {
    filter.iter().all(|(key, expected)| document.get(key) == Some(expected))
}

fn with_id(mut document: Document) -> (Document, Bson) {
    let id = match document.get("_id") {
        Some(id) => id.clone(),
        None => {
            let id = Bson::ObjectId(ObjectId::new());
            document.insert("_id", id.clone());
            id
        }
    };
    (document, id)
}

/// The document an upsert creates: equality fields of the filter overlaid with `fields`.
fn upserted(filter: &Document, fields: Document) -> (Document, Bson) {
    let mut document = filter.clone();
    document.extend(fields);
    with_id(document)
}

fn upsert_summary(id: &Bson) -> UpdateSummary {
    UpdateSummary {
        acknowledged: true,
        matched_count: 0,
        modified_count: 0,
        upserted_count: 1,
        upserted_id: Some(id_to_string(id)),
    }
}

fn matched_summary(modified: bool) -> UpdateSummary {
    UpdateSummary {
        acknowledged: true,
        matched_count: 1,
        modified_count: u64::from(modified),
        upserted_count: 0,
        upserted_id: None,
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>, AppError> {
        Ok(self
            .documents(collection)
            .into_iter()
            .filter(|d| matches(d, &filter))
            .collect())
    }

    async fn find_one(&self, collection: &str, filter: Document) -> Result<Option<Document>, AppError> {
        Ok(self
            .documents(collection)
            .into_iter()
            .find(|d| matches(d, &filter)))
    }

    async fn insert_one(&self, collection: &str, document: Document) -> Result<InsertSummary, AppError> {
        let (document, id) = with_id(document);
        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .push(document);
        Ok(InsertSummary {
            acknowledged: true,
            inserted_id: id_to_string(&id),
        })
    }

    async fn set_fields(
        &self,
        collection: &str,
        filter: Document,
        fields: Document,
        upsert: bool,
    ) -> Result<UpdateSummary, AppError> {
        self.check_update_allowed(collection)?;
        let mut collections = self.collections.lock().unwrap();
        let documents = collections.entry(collection.to_string()).or_default();

        if let Some(existing) = documents.iter_mut().find(|d| matches(d, &filter)) {
            let before = existing.clone();
            existing.extend(fields);
            return Ok(matched_summary(*existing != before));
        }
        if !upsert {
            return Ok(UpdateSummary {
                acknowledged: true,
                matched_count: 0,
                modified_count: 0,
                upserted_count: 0,
                upserted_id: None,
            });
        }
        let (document, id) = upserted(&filter, fields);
        documents.push(document);
        Ok(upsert_summary(&id))
    }

    async fn replace_one(
        &self,
        collection: &str,
        filter: Document,
        document: Document,
        upsert: bool,
    ) -> Result<UpdateSummary, AppError> {
        self.check_update_allowed(collection)?;
        let mut collections = self.collections.lock().unwrap();
        let documents = collections.entry(collection.to_string()).or_default();

        if let Some(existing) = documents.iter_mut().find(|d| matches(d, &filter)) {
            let mut replacement = document;
            if let Some(id) = existing.get("_id") {
                replacement.insert("_id", id.clone());
            }
            let modified = *existing != replacement;
            *existing = replacement;
            return Ok(matched_summary(modified));
        }
        if !upsert {
            return Ok(UpdateSummary {
                acknowledged: true,
                matched_count: 0,
                modified_count: 0,
                upserted_count: 0,
                upserted_id: None,
            });
        }
        let (document, id) = upserted(&filter, document);
        documents.push(document);
        Ok(upsert_summary(&id))
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> Result<DeleteSummary, AppError> {
        let mut collections = self.collections.lock().unwrap();
        let documents = collections.entry(collection.to_string()).or_default();
        let deleted_count = match documents.iter().position(|d| matches(d, &filter)) {
            Some(index) => {
                documents.remove(index);
                1
            }
            None => 0,
        };
        Ok(DeleteSummary {
            acknowledged: true,
            deleted_count,
        })
    }

    async fn ping(&self) -> Result<(), AppError> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(AppError::DatabaseError("injected ping failure".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[actix_web::test]
    async fn test_set_fields_upserts_once_per_filter() {
        let store = MemoryStore::default();

        let first = store
            .set_fields("users", doc! { "email": "a@x.com" }, doc! { "name": "A" }, true)
            .await
            .unwrap();
        assert_eq!(first.upserted_count, 1);

        let second = store
            .set_fields("users", doc! { "email": "a@x.com" }, doc! { "name": "B" }, true)
            .await
            .unwrap();
        assert_eq!(second.matched_count, 1);
        assert_eq!(second.modified_count, 1);

        let users = store.documents("users");
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].get_str("name").unwrap(), "B");
        assert_eq!(users[0].get_str("email").unwrap(), "a@x.com");
    }

    #[actix_web::test]
    async fn test_replace_keeps_id_and_drops_old_fields() {
        let store = MemoryStore::default();
        let inserted = store
            .insert_one("order", doc! { "email": "a@x.com", "phone": "123" })
            .await
            .unwrap();
        let id = ObjectId::parse_str(&inserted.inserted_id).unwrap();

        store
            .replace_one("order", doc! { "_id": id }, doc! { "email": "a@x.com", "status": "shipped" }, true)
            .await
            .unwrap();

        let order = store.find_one("order", doc! { "_id": id }).await.unwrap().unwrap();
        assert_eq!(order.get_str("status").unwrap(), "shipped");
        assert!(order.get("phone").is_none());
    }

    #[actix_web::test]
    async fn test_injected_update_fault() {
        let store = MemoryStore::default();
        store.fail_updates_on("order");
        let result = store
            .set_fields("order", doc! { "email": "a@x.com" }, doc! { "paid": true }, false)
            .await;
        assert!(matches!(result, Err(AppError::DatabaseError(_))));
    }
}
