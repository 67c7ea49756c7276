use std::{error::Error, fmt::Debug, time::Duration};

use async_trait::async_trait;
use mongodb::bson::{self, doc, Document};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{domain::{money::MoneyError, order_summary::OrderSummary, pagination::{Page, PageWindow}}, utils::error_fmt_chain};

mod memory;
mod mongo;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// One collection per entity, each addressed by its own public id field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection{
    User,
    Menu,
    Food,
    Table,
    Order,
    OrderItem,
    Invoice
}

impl Collection {
    pub const ALL: [Collection; 7] = [
        Collection::User,
        Collection::Menu,
        Collection::Food,
        Collection::Table,
        Collection::Order,
        Collection::OrderItem,
        Collection::Invoice,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Collection::User => "user",
            Collection::Menu => "menu",
            Collection::Food => "food",
            Collection::Table => "table",
            Collection::Order => "order",
            Collection::OrderItem => "orderItem",
            Collection::Invoice => "invoice"
        }
    }

    pub fn id_field(&self) -> &'static str {
        match self {
            Collection::User => "user_id",
            Collection::Menu => "menu_id",
            Collection::Food => "food_id",
            Collection::Table => "table_id",
            Collection::Order => "order_id",
            Collection::OrderItem => "order_item_id",
            Collection::Invoice => "invoice_id"
        }
    }

    // Fields other than the id that no two documents may share
    pub fn unique_fields(&self) -> &'static [&'static str] {
        match self {
            Collection::User => &["email", "phone"],
            _ => &[]
        }
    }

    /// Fields a document needs to be read back, besides the id and the
    /// timestamps. An upsert that would insert without them is refused.
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            Collection::User => &["first_name", "last_name", "password", "email", "phone"],
            Collection::Menu => &["name", "category"],
            Collection::Food => &["name", "price", "food_image", "menu_id"],
            Collection::Table => &["number_of_guests", "table_number"],
            Collection::Order => &["order_date"],
            Collection::OrderItem => &["quantity", "unit_price", "food_id", "order_id"],
            Collection::Invoice => &["order_id", "payment_status", "payment_due_date"]
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Collection::OrderItem => "order item",
            other => other.name()
        }
    }
}

/// What a partial update does when no document carries the target id.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UpdateMode{
    /// Nothing is written; the caller reports the id as missing.
    #[default]
    Strict,
    /// A new document is inserted with the id and the staged fields.
    Upsert
}

/// Fields staged by a partial update. Only staged fields are written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Changes{
    pub set: Document,
    pub set_on_insert: Document
}

impl Changes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage<T: Serialize>(&mut self, key: &str, value: Option<T>) -> Result<&mut Self, StoreError> {
        if let Some(value) = value {
            self.set.insert(key, bson::to_bson(&value)?);
        }
        Ok(self)
    }

    pub fn is_staged(&self, key: &str) -> bool {
        self.set.contains_key(key)
    }

    pub fn missing<'a>(&self, fields: &[&'a str]) -> Vec<&'a str> {
        fields
            .iter()
            .copied()
            .filter(|field| !self.set.contains_key(*field) && !self.set_on_insert.contains_key(*field))
            .collect()
    }

    // updated_at on every write, created_at only when an upsert inserts
    pub fn touch(&mut self, now: chrono::DateTime<chrono::Utc>) -> Result<&mut Self, StoreError> {
        let stamp = bson::to_bson(&now)?;
        self.set.insert("updated_at", stamp.clone());
        self.set_on_insert.insert("created_at", stamp);
        Ok(self)
    }

    // Empty operators are rejected by the server, so they are left out
    pub fn to_update_document(&self) -> Document {
        let mut update = doc! {};
        if !self.set.is_empty() {
            update.insert("$set", self.set.clone());
        }
        if !self.set_on_insert.is_empty() {
            update.insert("$setOnInsert", self.set_on_insert.clone());
        }
        update
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct InsertAck{
    pub inserted_id: String
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UpdateAck{
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_id: Option<String>
}

#[derive(Error)]
pub enum StoreError{
    #[error("store operation did not finish within {0:?}")]
    Timeout(Duration),
    #[error("{0} already exists")]
    Duplicate(String),
    #[error("document store query failed")]
    QueryError(#[from] mongodb::error::Error),
    #[error("failed to encode document")]
    EncodeError(#[from] bson::ser::Error),
    #[error("failed to decode document")]
    DecodeError(#[from] bson::de::Error),
    #[error("failed to total order items")]
    MoneyError(#[from] MoneyError)
}

impl Debug for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

/// Typed access to the entity collections. Documents are looked up by their
/// public string ids, never by the store's own identifiers.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert_one(&self, collection: Collection, document: Document) -> Result<(), StoreError>;

    async fn insert_many(&self, collection: Collection, documents: Vec<Document>) -> Result<(), StoreError>;

    async fn find_one(&self, collection: Collection, field: &str, value: &str) -> Result<Option<Document>, StoreError>;

    async fn find_all(&self, collection: Collection) -> Result<Vec<Document>, StoreError>;

    async fn count(&self, collection: Collection, field: &str, value: &str) -> Result<u64, StoreError>;

    async fn update_one(
        &self,
        collection: Collection,
        id: &str,
        changes: &Changes,
        mode: UpdateMode
    ) -> Result<UpdateAck, StoreError>;

    /// Total count and one window of the collection in a single pass.
    async fn paginate(&self, collection: Collection, window: PageWindow) -> Result<Page<Document>, StoreError>;

    /// Order items of one order joined and grouped per (order, table).
    async fn order_summaries(&self, order_id: &str) -> Result<Vec<OrderSummary>, StoreError>;
}
