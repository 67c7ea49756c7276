use serde::Deserialize;
use validator::Validate;

use crate::{error::ApiError, models::Table, store::{Changes, Collection, InsertAck, UpdateAck}, utils::{new_public_id, now}};

use super::AppContext;

#[derive(Deserialize, Debug, Validate)]
pub struct TableForm{
    #[validate(range(min = 1))]
    pub number_of_guests: i32,
    #[validate(range(min = 1))]
    pub table_number: i32
}

#[derive(Deserialize, Debug, Default, Validate)]
pub struct TableChanges{
    #[validate(range(min = 1))]
    pub number_of_guests: Option<i32>,
    #[validate(range(min = 1))]
    pub table_number: Option<i32>
}

#[tracing::instrument("Creating table", skip(ctx))]
pub async fn create_table(ctx: &AppContext, form: TableForm) -> Result<InsertAck, ApiError> {
    form.validate()?;

    let timestamp = now();
    let table = Table{
        number_of_guests: form.number_of_guests,
        table_number: form.table_number,
        created_at: timestamp,
        updated_at: timestamp,
        table_id: new_public_id()
    };
    ctx.insert(Collection::Table, &table).await?;

    Ok(InsertAck{ inserted_id: table.table_id })
}

#[tracing::instrument("Getting table", skip(ctx))]
pub async fn get_table(ctx: &AppContext, table_id: &str) -> Result<Table, ApiError> {
    ctx.fetch(Collection::Table, table_id).await
}

#[tracing::instrument("Listing tables", skip(ctx))]
pub async fn list_tables(ctx: &AppContext) -> Result<Vec<Table>, ApiError> {
    ctx.fetch_all(Collection::Table).await
}

#[tracing::instrument("Updating table", skip(ctx))]
pub async fn update_table(ctx: &AppContext, table_id: &str, form: TableChanges) -> Result<UpdateAck, ApiError> {
    form.validate()?;

    let mut changes = Changes::new();
    changes
        .stage("number_of_guests", form.number_of_guests)?
        .stage("table_number", form.table_number)?;

    ctx.apply_update(Collection::Table, table_id, changes).await
}
