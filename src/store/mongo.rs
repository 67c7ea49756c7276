use std::{future::{Future, IntoFuture}, time::Duration};

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{bson::{self, doc, Document}, options::IndexOptions, Client, Database, IndexModel};
use secrecy::ExposeSecret;

use crate::{configuration::DatabaseSettings, domain::{order_summary::{order_summary_pipeline, OrderSummary}, pagination::{Page, PageWindow}}};

use super::{Changes, Collection, DocumentStore, StoreError, UpdateAck, UpdateMode};

/// MongoDB backed store. Every call is abandoned after `timeout`.
#[derive(Clone, Debug)]
pub struct MongoStore{
    database: Database,
    timeout: Duration
}

impl MongoStore {
    #[tracing::instrument(
        "Connecting to document store",
        skip(settings),
        fields(database = %settings.name)
    )]
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(settings.uri.expose_secret()).await?;

        Ok(Self{
            database: client.database(&settings.name),
            timeout: settings.timeout()
        })
    }

    fn collection(&self, collection: Collection) -> mongodb::Collection<Document> {
        self.database.collection(collection.name())
    }

    /// Unique indexes on every public id and on the user's email and phone.
    /// Idempotent, run on every startup.
    #[tracing::instrument("Creating unique indexes", skip(self))]
    pub async fn ensure_indexes(&self) -> Result<(), StoreError> {
        for collection in Collection::ALL {
            let indexes: Vec<IndexModel> = std::iter::once(collection.id_field())
                .chain(collection.unique_fields().iter().copied())
                .map(|field| {
                    IndexModel::builder()
                        .keys(doc! { field: 1 })
                        .options(IndexOptions::builder().unique(true).build())
                        .build()
                })
                .collect();

            self.bounded(collection, self.collection(collection).create_indexes(indexes).into_future())
                .await?;
        }

        Ok(())
    }

    async fn bounded<T, F>(&self, collection: Collection, operation: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, mongodb::error::Error>> + Send
    {
        match tokio::time::timeout(self.timeout, operation).await {
            Ok(result) => result.map_err(|e| classify(collection, e)),
            Err(_) => {
                tracing::warn!(collection = collection.name(), "Store operation timed out");
                Err(StoreError::Timeout(self.timeout))
            }
        }
    }
}

// E11000 is the server's duplicate key code; the index name tells which field
fn classify(collection: Collection, error: mongodb::error::Error) -> StoreError {
    let message = error.to_string();
    if !message.contains("E11000") {
        return StoreError::QueryError(error);
    }

    let field = std::iter::once(collection.id_field())
        .chain(collection.unique_fields().iter().copied())
        .find(|field| message.contains(&format!("{}_1", field)))
        .unwrap_or(collection.id_field());

    StoreError::Duplicate(field.to_string())
}

#[async_trait]
impl DocumentStore for MongoStore {
    #[tracing::instrument("Inserting document", skip(self, document), fields(collection = collection.name()))]
    async fn insert_one(&self, collection: Collection, document: Document) -> Result<(), StoreError> {
        self.bounded(collection, self.collection(collection).insert_one(document).into_future())
            .await?;
        Ok(())
    }

    #[tracing::instrument("Inserting documents", skip(self, documents), fields(collection = collection.name()))]
    async fn insert_many(&self, collection: Collection, documents: Vec<Document>) -> Result<(), StoreError> {
        self.bounded(collection, self.collection(collection).insert_many(documents).into_future())
            .await?;
        Ok(())
    }

    #[tracing::instrument("Finding document", skip(self), fields(collection = collection.name()))]
    async fn find_one(&self, collection: Collection, field: &str, value: &str) -> Result<Option<Document>, StoreError> {
        self.bounded(collection, self.collection(collection).find_one(doc! { field: value }).into_future())
            .await
    }

    #[tracing::instrument("Listing documents", skip(self), fields(collection = collection.name()))]
    async fn find_all(&self, collection: Collection) -> Result<Vec<Document>, StoreError> {
        let handle = self.collection(collection);

        self.bounded(collection, async move {
            let cursor = handle.find(doc! {}).await?;
            cursor.try_collect::<Vec<Document>>().await
        })
        .await
    }

    #[tracing::instrument("Counting documents", skip(self), fields(collection = collection.name()))]
    async fn count(&self, collection: Collection, field: &str, value: &str) -> Result<u64, StoreError> {
        self.bounded(collection, self.collection(collection).count_documents(doc! { field: value }).into_future())
            .await
    }

    #[tracing::instrument("Updating document", skip(self, changes), fields(collection = collection.name()))]
    async fn update_one(
        &self,
        collection: Collection,
        id: &str,
        changes: &Changes,
        mode: UpdateMode
    ) -> Result<UpdateAck, StoreError> {
        let id_field = collection.id_field();
        let filter = doc! { id_field: id };
        let handle = self.collection(collection);
        let update = handle
            .update_one(filter, changes.to_update_document())
            .upsert(mode == UpdateMode::Upsert)
            .into_future();

        let result = self.bounded(collection, update).await?;

        Ok(UpdateAck{
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            upserted_id: result.upserted_id.map(|_| id.to_string())
        })
    }

    #[tracing::instrument("Paginating documents", skip(self), fields(collection = collection.name()))]
    async fn paginate(&self, collection: Collection, window: PageWindow) -> Result<Page<Document>, StoreError> {
        let handle = self.collection(collection);

        let groups = self.bounded(collection, async move {
            let cursor = handle.aggregate(window.pipeline()).await?;
            cursor.try_collect::<Vec<Document>>().await
        })
        .await?;

        // an empty collection produces no group at all
        match groups.into_iter().next() {
            Some(group) => Ok(bson::from_document(group)?),
            None => Ok(Page::empty())
        }
    }

    #[tracing::instrument("Aggregating order items", skip(self))]
    async fn order_summaries(&self, order_id: &str) -> Result<Vec<OrderSummary>, StoreError> {
        let handle = self.collection(Collection::OrderItem);
        let pipeline = order_summary_pipeline(order_id);

        let groups = self.bounded(Collection::OrderItem, async move {
            let cursor = handle.aggregate(pipeline).await?;
            cursor.try_collect::<Vec<Document>>().await
        })
        .await?;

        groups
            .into_iter()
            .map(|group| Ok(bson::from_document::<OrderSummary>(group)?.settled()?))
            .collect()
    }
}
