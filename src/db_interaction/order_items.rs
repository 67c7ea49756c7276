use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{domain::{money::round_currency, order_summary::OrderSummary}, error::ApiError, models::OrderItem, store::{Changes, Collection, UpdateAck}, utils::{new_public_id, now}};

use super::{orders::{create_order, OrderForm}, AppContext};

#[derive(Serialize, Deserialize, Debug, Validate)]
pub struct OrderItemForm{
    #[validate(range(min = 1, max = 10_000))]
    pub quantity: i32,
    #[validate(range(min = 0.0, max = 1_000_000.0))]
    pub unit_price: f64,
    #[validate(length(min = 1))]
    pub food_id: String
}

/// Items taken together, they become one new order on the given table.
#[derive(Deserialize, Debug, Validate)]
pub struct OrderItemPack{
    #[validate(length(min = 1))]
    pub table_id: Option<String>,
    #[validate(length(min = 1), nested)]
    pub order_items: Vec<OrderItemForm>
}

#[derive(Deserialize, Debug, Default, Validate)]
pub struct OrderItemChanges{
    #[validate(range(min = 1, max = 10_000))]
    pub quantity: Option<i32>,
    #[validate(range(min = 0.0, max = 1_000_000.0))]
    pub unit_price: Option<f64>,
    #[validate(length(min = 1))]
    pub food_id: Option<String>
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OrderItemPackAck{
    pub order_id: String,
    pub inserted_ids: Vec<String>
}

/// Nothing is written unless every item is valid and every food resolves.
#[tracing::instrument("Creating order items", skip(ctx, pack), fields(items = pack.order_items.len()))]
pub async fn create_order_items(ctx: &AppContext, pack: OrderItemPack) -> Result<OrderItemPackAck, ApiError> {
    pack.validate()?;
    for item in &pack.order_items {
        ctx.ensure_exists(Collection::Food, &item.food_id).await?;
    }

    let order = create_order(ctx, OrderForm{ order_date: None, table_id: pack.table_id }).await?;

    let timestamp = now();
    let items: Vec<OrderItem> = pack
        .order_items
        .into_iter()
        .map(|item| OrderItem{
            quantity: item.quantity,
            unit_price: round_currency(item.unit_price),
            food_id: item.food_id,
            order_id: order.inserted_id.clone(),
            created_at: timestamp,
            updated_at: timestamp,
            order_item_id: new_public_id()
        })
        .collect();
    ctx.insert_many(Collection::OrderItem, &items).await?;

    Ok(OrderItemPackAck{
        order_id: order.inserted_id,
        inserted_ids: items.into_iter().map(|item| item.order_item_id).collect()
    })
}

#[tracing::instrument("Getting order item", skip(ctx))]
pub async fn get_order_item(ctx: &AppContext, order_item_id: &str) -> Result<OrderItem, ApiError> {
    ctx.fetch(Collection::OrderItem, order_item_id).await
}

#[tracing::instrument("Listing order items", skip(ctx))]
pub async fn list_order_items(ctx: &AppContext) -> Result<Vec<OrderItem>, ApiError> {
    ctx.fetch_all(Collection::OrderItem).await
}

/// Summary groups of one order, empty when the order has no items.
#[tracing::instrument("Getting items by order", skip(ctx))]
pub async fn items_by_order(ctx: &AppContext, order_id: &str) -> Result<Vec<OrderSummary>, ApiError> {
    Ok(ctx.store.order_summaries(order_id).await?)
}

#[tracing::instrument("Updating order item", skip(ctx))]
pub async fn update_order_item(ctx: &AppContext, order_item_id: &str, form: OrderItemChanges) -> Result<UpdateAck, ApiError> {
    form.validate()?;
    if let Some(food_id) = &form.food_id {
        ctx.ensure_exists(Collection::Food, food_id).await?;
    }

    let mut changes = Changes::new();
    changes
        .stage("quantity", form.quantity)?
        .stage("unit_price", form.unit_price.map(round_currency))?
        .stage("food_id", form.food_id)?;

    ctx.apply_update(Collection::OrderItem, order_item_id, changes).await
}
