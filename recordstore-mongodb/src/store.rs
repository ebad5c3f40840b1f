use async_trait::async_trait;
use bson::Document;
use futures::TryStreamExt;
use mongodb::{Client, Collection as MongoCollection, options::ClientOptions};

use recordstore_core::{
    backend::{DeleteOutcome, ReplaceOutcome, StoreBackend, StoreBackendBuilder},
    error::{StoreError, StoreResult},
    filter::Filter,
    record::{RecordId, ensure_document_identity},
};

use crate::filter::to_query_document;


#[derive(Debug, Clone)]
pub struct MongoStore {
    client: Client,
    database: String,
}

impl MongoStore {
    pub fn new(client: Client, database: String) -> Self {
        Self { client, database }
    }

    pub fn builder(dsn: &str, database: &str) -> MongoStoreBuilder {
        MongoStoreBuilder::new(dsn, database)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn database_name(&self) -> &str {
        &self.database
    }

    fn get_collection(&self, collection_name: &str) -> MongoCollection<Document> {
        self.client
            .database(&self.database)
            .collection(collection_name)
    }

    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }
}

#[async_trait]
impl StoreBackend for MongoStore {
    async fn insert_one(&self, mut document: Document, collection: &str) -> StoreResult<()> {
        ensure_document_identity(&mut document);

        self.get_collection(collection)
            .insert_one(document)
            .await
            .map_err(|e| StoreError::DatabaseOperationFailed(e.to_string()))?;

        Ok(())
    }

    async fn insert_many(&self, documents: Vec<Document>, collection: &str) -> StoreResult<()> {
        self.get_collection(collection)
            .insert_many(
                documents
                    .into_iter()
                    .map(|mut document| {
                        ensure_document_identity(&mut document);
                        document
                    })
                    .collect::<Vec<Document>>(),
            )
            .await
            .map_err(|e| StoreError::DatabaseOperationFailed(e.to_string()))?;

        Ok(())
    }

    async fn find(&self, filter: Filter, collection: &str) -> StoreResult<Vec<Document>> {
        Ok(
            self.get_collection(collection)
                .find(to_query_document(&filter))
                .await
                .map_err(|e| StoreError::DatabaseOperationFailed(e.to_string()))?
                .try_collect::<Vec<Document>>()
                .await
                .map_err(|e| StoreError::DatabaseOperationFailed(e.to_string()))?
        )
    }

    async fn replace_one(
        &self,
        filter: Filter,
        mut document: Document,
        collection: &str,
    ) -> StoreResult<ReplaceOutcome> {
        ensure_document_identity(&mut document);

        let result = self.get_collection(collection)
            .replace_one(to_query_document(&filter), document)
            .upsert(true)
            .await
            .map_err(|e| StoreError::DatabaseOperationFailed(e.to_string()))?;

        // The driver reports failures as errors rather than flags.
        Ok(ReplaceOutcome {
            acknowledged: true,
            upserted_id: result.upserted_id.as_ref().and_then(RecordId::from_bson),
        })
    }

    async fn delete_one(&self, filter: Filter, collection: &str) -> StoreResult<DeleteOutcome> {
        let result = self.get_collection(collection)
            .delete_one(to_query_document(&filter))
            .await
            .map_err(|e| StoreError::DatabaseOperationFailed(e.to_string()))?;

        Ok(DeleteOutcome {
            acknowledged: true,
            deleted_count: result.deleted_count,
        })
    }
}

pub struct MongoStoreBuilder {
    dsn: String,
    database: String,
}

impl MongoStoreBuilder {
    pub fn new(dsn: &str, database: &str) -> Self {
        Self {
            dsn: dsn.to_string(),
            database: database.to_string(),
        }
    }
}

#[async_trait]
impl StoreBackendBuilder for MongoStoreBuilder {
    type Backend = MongoStore;

    async fn build(self) -> StoreResult<Self::Backend> {
        Ok(MongoStore::new(
            Client::with_options(
                ClientOptions::parse(&self.dsn)
                    .await
                    .map_err(|e| StoreError::Initialization(e.to_string()))?,
            )
            .map_err(|e| StoreError::Initialization(e.to_string()))?,
            self.database,
        ))
    }
}

pub async fn connect(dsn: &str, database: &str) -> StoreResult<MongoStore> {
    MongoStoreBuilder::new(dsn, database).build().await
}
