use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::{error::ApiError, models::Order, store::{Changes, Collection, InsertAck, UpdateAck}, utils::{new_public_id, now}};

use super::AppContext;

#[derive(Deserialize, Debug, Default, Validate)]
pub struct OrderForm{
    pub order_date: Option<DateTime<Utc>>,
    #[validate(length(min = 1))]
    pub table_id: Option<String>
}

#[derive(Deserialize, Debug, Default, Validate)]
pub struct OrderChanges{
    pub order_date: Option<DateTime<Utc>>,
    #[validate(length(min = 1))]
    pub table_id: Option<String>
}

// Also the first step of taking an order item pack
#[tracing::instrument("Creating order", skip(ctx))]
pub async fn create_order(ctx: &AppContext, form: OrderForm) -> Result<InsertAck, ApiError> {
    form.validate()?;
    if let Some(table_id) = &form.table_id {
        ctx.ensure_exists(Collection::Table, table_id).await?;
    }

    let timestamp = now();
    let order = Order{
        order_date: form.order_date.unwrap_or(timestamp),
        table_id: form.table_id,
        created_at: timestamp,
        updated_at: timestamp,
        order_id: new_public_id()
    };
    ctx.insert(Collection::Order, &order).await?;

    Ok(InsertAck{ inserted_id: order.order_id })
}

#[tracing::instrument("Getting order", skip(ctx))]
pub async fn get_order(ctx: &AppContext, order_id: &str) -> Result<Order, ApiError> {
    ctx.fetch(Collection::Order, order_id).await
}

#[tracing::instrument("Listing orders", skip(ctx))]
pub async fn list_orders(ctx: &AppContext) -> Result<Vec<Order>, ApiError> {
    ctx.fetch_all(Collection::Order).await
}

#[tracing::instrument("Updating order", skip(ctx))]
pub async fn update_order(ctx: &AppContext, order_id: &str, form: OrderChanges) -> Result<UpdateAck, ApiError> {
    form.validate()?;
    if let Some(table_id) = &form.table_id {
        ctx.ensure_exists(Collection::Table, table_id).await?;
    }

    let mut changes = Changes::new();
    changes
        .stage("order_date", form.order_date)?
        .stage("table_id", form.table_id)?;

    ctx.apply_update(Collection::Order, order_id, changes).await
}
