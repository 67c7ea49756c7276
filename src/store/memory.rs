use std::collections::HashMap;

use async_trait::async_trait;
use mongodb::bson::{self, Bson, Document};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;

use crate::{domain::{order_summary::{summarize_order, OrderSummary}, pagination::{Page, PageWindow}}, models::{Food, Order, OrderItem, Table}};

use super::{Changes, Collection, DocumentStore, StoreError, UpdateAck, UpdateMode};

/// In-process store holding every collection as a vector of documents in
/// insertion order. Enforces the same unique fields as the indexes built by
/// [`super::MongoStore::ensure_indexes`].
#[derive(Debug, Default)]
pub struct MemoryStore{
    collections: RwLock<HashMap<Collection, Vec<Document>>>
}

fn field_matches(document: &Document, field: &str, value: &str) -> bool {
    matches!(document.get(field), Some(Bson::String(s)) if s == value)
}

// First unique field of `candidate` already held by another document
fn conflicting_field(
    collection: Collection,
    documents: &[Document],
    candidate: &Document,
    skip: Option<usize>
) -> Option<String> {
    std::iter::once(collection.id_field())
        .chain(collection.unique_fields().iter().copied())
        .find(|field| {
            let value = match candidate.get(*field) {
                Some(Bson::Null) | None => return false,
                Some(value) => value
            };
            documents
                .iter()
                .enumerate()
                .any(|(i, doc)| Some(i) != skip && doc.get(*field) == Some(value))
        })
        .map(str::to_string)
}

// Join side of the aggregation: a document missing required fields is
// skipped, like a lookup that finds nothing
fn decode_joinable<'a, T, I>(collection: Collection, documents: I) -> Vec<T>
where
    T: DeserializeOwned,
    I: IntoIterator<Item = &'a Document>
{
    documents
        .into_iter()
        .filter_map(|document| match bson::from_document(document.clone()) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(collection = collection.name(), error = %e, "Skipping undecodable document");
                None
            }
        })
        .collect()
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    #[tracing::instrument("Inserting document", skip(self, document), fields(collection = collection.name()))]
    async fn insert_one(&self, collection: Collection, document: Document) -> Result<(), StoreError> {
        self.insert_many(collection, vec![document]).await
    }

    // All or nothing, unlike an unordered server side insert
    #[tracing::instrument("Inserting documents", skip(self, documents), fields(collection = collection.name()))]
    async fn insert_many(&self, collection: Collection, documents: Vec<Document>) -> Result<(), StoreError> {
        let mut collections = self.collections.write();
        let existing = collections.entry(collection).or_default();

        let mut staged = existing.clone();
        for document in documents {
            if let Some(field) = conflicting_field(collection, &staged, &document, None) {
                return Err(StoreError::Duplicate(field));
            }
            staged.push(document);
        }

        *existing = staged;
        Ok(())
    }

    async fn find_one(&self, collection: Collection, field: &str, value: &str) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read();

        Ok(collections
            .get(&collection)
            .and_then(|docs| docs.iter().find(|d| field_matches(d, field, value)))
            .cloned())
    }

    async fn find_all(&self, collection: Collection) -> Result<Vec<Document>, StoreError> {
        Ok(self.collections.read().get(&collection).cloned().unwrap_or_default())
    }

    async fn count(&self, collection: Collection, field: &str, value: &str) -> Result<u64, StoreError> {
        let collections = self.collections.read();

        Ok(collections
            .get(&collection)
            .map(|docs| docs.iter().filter(|d| field_matches(d, field, value)).count() as u64)
            .unwrap_or(0))
    }

    #[tracing::instrument("Updating document", skip(self, changes), fields(collection = collection.name()))]
    async fn update_one(
        &self,
        collection: Collection,
        id: &str,
        changes: &Changes,
        mode: UpdateMode
    ) -> Result<UpdateAck, StoreError> {
        let mut collections = self.collections.write();
        let documents = collections.entry(collection).or_default();
        let position = documents.iter().position(|d| field_matches(d, collection.id_field(), id));

        match (position, mode) {
            (Some(index), _) => {
                let mut updated = documents[index].clone();
                updated.extend(changes.set.clone());

                if let Some(field) = conflicting_field(collection, documents, &updated, Some(index)) {
                    return Err(StoreError::Duplicate(field));
                }

                let modified = updated != documents[index];
                documents[index] = updated;

                Ok(UpdateAck{
                    matched_count: 1,
                    modified_count: u64::from(modified),
                    upserted_id: None
                })
            },
            (None, UpdateMode::Upsert) => {
                let mut inserted = Document::new();
                inserted.insert(collection.id_field(), id);
                inserted.extend(changes.set_on_insert.clone());
                inserted.extend(changes.set.clone());

                if let Some(field) = conflicting_field(collection, documents, &inserted, None) {
                    return Err(StoreError::Duplicate(field));
                }

                documents.push(inserted);

                Ok(UpdateAck{
                    matched_count: 0,
                    modified_count: 0,
                    upserted_id: Some(id.to_string())
                })
            },
            (None, UpdateMode::Strict) => Ok(UpdateAck{
                matched_count: 0,
                modified_count: 0,
                upserted_id: None
            })
        }
    }

    async fn paginate(&self, collection: Collection, window: PageWindow) -> Result<Page<Document>, StoreError> {
        let collections = self.collections.read();
        let documents = match collections.get(&collection) {
            Some(docs) if !docs.is_empty() => docs,
            _ => return Ok(Page::empty())
        };

        Ok(Page{
            total_count: documents.len() as u64,
            items: documents[window.bounds(documents.len())].to_vec()
        })
    }

    #[tracing::instrument("Aggregating order items", skip(self))]
    async fn order_summaries(&self, order_id: &str) -> Result<Vec<OrderSummary>, StoreError> {
        let collections = self.collections.read();
        let documents = |collection: Collection| collections.get(&collection).into_iter().flatten();

        let items: Vec<OrderItem> = decode_joinable(
            Collection::OrderItem,
            documents(Collection::OrderItem).filter(|d| field_matches(d, "order_id", order_id))
        );
        let foods: Vec<Food> = decode_joinable(Collection::Food, documents(Collection::Food));
        let orders: Vec<Order> = decode_joinable(Collection::Order, documents(Collection::Order));
        let tables: Vec<Table> = decode_joinable(Collection::Table, documents(Collection::Table));

        Ok(summarize_order(order_id, &items, &foods, &orders, &tables)?)
    }
}
