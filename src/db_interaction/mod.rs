use std::sync::Arc;

use mongodb::bson::{self, Document};
use serde::{de::DeserializeOwned, Serialize};

use crate::{domain::pagination::{Page, PageWindow}, error::ApiError, store::{Changes, Collection, DocumentStore, StoreError, UpdateAck, UpdateMode}, utils::now};

pub mod food;
pub mod invoices;
pub mod menu;
pub mod order_items;
pub mod orders;
pub mod table;
pub mod user;

/// Shared by every request: the store handle and the partial update policy.
pub struct AppContext{
    pub store: Arc<dyn DocumentStore>,
    pub update_mode: UpdateMode
}

fn decode<T: DeserializeOwned>(document: Document) -> Result<T, ApiError> {
    Ok(bson::from_document(document).map_err(StoreError::from)?)
}

impl AppContext {
    pub fn new(store: Arc<dyn DocumentStore>, update_mode: UpdateMode) -> Self {
        Self{ store, update_mode }
    }

    pub async fn fetch<T: DeserializeOwned>(&self, collection: Collection, id: &str) -> Result<T, ApiError> {
        match self.store.find_one(collection, collection.id_field(), id).await? {
            Some(document) => decode(document),
            None => Err(ApiError::not_found(collection.label(), id))
        }
    }

    pub async fn fetch_all<T: DeserializeOwned>(&self, collection: Collection) -> Result<Vec<T>, ApiError> {
        self.store
            .find_all(collection)
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }

    // Referenced entities must exist before anything points at them
    pub async fn ensure_exists(&self, collection: Collection, id: &str) -> Result<(), ApiError> {
        match self.store.count(collection, collection.id_field(), id).await? {
            0 => Err(ApiError::not_found(collection.label(), id)),
            _ => Ok(())
        }
    }

    pub async fn insert<T: Serialize>(&self, collection: Collection, record: &T) -> Result<(), ApiError> {
        let document = bson::to_document(record).map_err(StoreError::from)?;
        self.store.insert_one(collection, document).await?;
        Ok(())
    }

    pub async fn insert_many<T: Serialize>(&self, collection: Collection, records: &[T]) -> Result<(), ApiError> {
        let documents = records
            .iter()
            .map(|record| bson::to_document(record).map_err(StoreError::from))
            .collect::<Result<Vec<_>, _>>()?;
        self.store.insert_many(collection, documents).await?;
        Ok(())
    }

    /// Writes the staged fields plus a fresh `updated_at`. Under the strict
    /// policy a missing id is reported and nothing is written. Under the
    /// upsert policy a missing id is only inserted when the staged fields
    /// make a complete record.
    pub async fn apply_update(&self, collection: Collection, id: &str, mut changes: Changes) -> Result<UpdateAck, ApiError> {
        changes.touch(now())?;

        let missing = changes.missing(collection.required_fields());
        let mode = match self.update_mode {
            UpdateMode::Upsert if !missing.is_empty() => UpdateMode::Strict,
            mode => mode
        };

        let ack = self.store.update_one(collection, id, &changes, mode).await?;
        if mode == UpdateMode::Strict && ack.matched_count == 0 {
            return match self.update_mode {
                UpdateMode::Strict => Err(ApiError::not_found(collection.label(), id)),
                UpdateMode::Upsert => Err(ApiError::BadRequest(format!(
                    "{} {} does not exist and cannot be created without {}",
                    collection.label(),
                    id,
                    missing.join(", ")
                )))
            };
        }

        Ok(ack)
    }

    pub async fn paginate<T: DeserializeOwned>(&self, collection: Collection, window: PageWindow) -> Result<Page<T>, ApiError> {
        let page = self.store.paginate(collection, window).await?;

        Ok(Page{
            total_count: page.total_count,
            items: page.items.into_iter().map(decode).collect::<Result<_, _>>()?
        })
    }
}
