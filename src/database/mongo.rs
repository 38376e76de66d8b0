use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, Database, IndexModel};

use super::DocumentStore;
use crate::models::{
    id_to_string, DeleteSummary, InsertSummary, UpdateSummary, ORDERS_COLLECTION, USERS_COLLECTION,
};
use crate::utils::AppError;

#[derive(Clone)]
pub struct MongoStore {
    client: Client,
    db: Database,
}

impl MongoStore {
    pub async fn connect(uri: &str, db_name: &str) -> Result<Self, AppError> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        client_options.app_name = Some("agency-server".to_string());
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(2);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));
        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        // Test connection
        db.run_command(doc! { "ping": 1 }).await?;

        let store = Self { client, db };
        store.ensure_indexes().await;

        Ok(store)
    }

    async fn ensure_indexes(&self) {
        log::info!("🔧 Creating database indexes...");

        let users_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        match self.collection(USERS_COLLECTION).create_index(users_index).await {
            Ok(_) => log::info!("   ✅ Index created: users(email, unique)"),
            Err(e) => log::warn!("   ⚠️  Could not create users(email) index: {}", e),
        }

        let orders_index = IndexModel::builder().keys(doc! { "email": 1 }).build();

        match self.collection(ORDERS_COLLECTION).create_index(orders_index).await {
            Ok(_) => log::info!("   ✅ Index created: order(email)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }
    }

    fn collection(&self, name: &str) -> Collection<Document> {
        self.db.collection(name)
    }

    /// Closes pooled connections. Call once the server has stopped.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>, AppError> {
        let cursor = self.collection(collection).find(filter).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;
        Ok(documents)
    }

    async fn find_one(&self, collection: &str, filter: Document) -> Result<Option<Document>, AppError> {
        Ok(self.collection(collection).find_one(filter).await?)
    }

    async fn insert_one(&self, collection: &str, document: Document) -> Result<InsertSummary, AppError> {
        let result = self.collection(collection).insert_one(document).await?;
        Ok(InsertSummary {
            acknowledged: true,
            inserted_id: id_to_string(&result.inserted_id),
        })
    }

    async fn set_fields(
        &self,
        collection: &str,
        filter: Document,
        fields: Document,
        upsert: bool,
    ) -> Result<UpdateSummary, AppError> {
        let result = self
            .collection(collection)
            .update_one(filter, doc! { "$set": fields })
            .upsert(upsert)
            .await?;
        Ok(update_summary(result))
    }

    async fn replace_one(
        &self,
        collection: &str,
        filter: Document,
        document: Document,
        upsert: bool,
    ) -> Result<UpdateSummary, AppError> {
        let result = self
            .collection(collection)
            .replace_one(filter, document)
            .upsert(upsert)
            .await?;
        Ok(update_summary(result))
    }

    async fn delete_one(&self, collection: &str, filter: Document) -> Result<DeleteSummary, AppError> {
        let result = self.collection(collection).delete_one(filter).await?;
        Ok(DeleteSummary {
            acknowledged: true,
            deleted_count: result.deleted_count,
        })
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

fn update_summary(result: mongodb::results::UpdateResult) -> UpdateSummary {
    UpdateSummary {
        acknowledged: true,
        matched_count: result.matched_count,
        modified_count: result.modified_count,
        upserted_count: u64::from(result.upserted_id.is_some()),
        upserted_id: result.upserted_id.as_ref().map(id_to_string),
    }
}
