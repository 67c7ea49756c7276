use serde::Deserialize;
use validator::Validate;

use crate::{domain::{money::round_currency, pagination::{Page, PageWindow}}, error::ApiError, models::Food, store::{Changes, Collection, InsertAck, UpdateAck}, utils::{new_public_id, now}};

use super::AppContext;

#[derive(Deserialize, Debug, Validate)]
pub struct FoodForm{
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    #[validate(range(exclusive_min = 0.0, max = 1_000_000.0))]
    pub price: f64,
    #[validate(length(min = 1))]
    pub food_image: String,
    #[validate(length(min = 1))]
    pub menu_id: String
}

#[derive(Deserialize, Debug, Default, Validate)]
pub struct FoodChanges{
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,
    #[validate(range(exclusive_min = 0.0, max = 1_000_000.0))]
    pub price: Option<f64>,
    #[validate(length(min = 1))]
    pub food_image: Option<String>,
    pub menu_id: Option<String>
}

#[tracing::instrument("Creating food", skip(ctx))]
pub async fn create_food(ctx: &AppContext, form: FoodForm) -> Result<InsertAck, ApiError> {
    form.validate()?;
    ctx.ensure_exists(Collection::Menu, &form.menu_id).await?;

    let timestamp = now();
    let food = Food{
        name: form.name,
        price: round_currency(form.price),
        food_image: form.food_image,
        menu_id: form.menu_id,
        created_at: timestamp,
        updated_at: timestamp,
        food_id: new_public_id()
    };
    ctx.insert(Collection::Food, &food).await?;

    Ok(InsertAck{ inserted_id: food.food_id })
}

#[tracing::instrument("Getting food", skip(ctx))]
pub async fn get_food(ctx: &AppContext, food_id: &str) -> Result<Food, ApiError> {
    ctx.fetch(Collection::Food, food_id).await
}

#[tracing::instrument("Listing foods", skip(ctx))]
pub async fn list_foods(ctx: &AppContext, window: PageWindow) -> Result<Page<Food>, ApiError> {
    ctx.paginate(Collection::Food, window).await
}

#[tracing::instrument("Updating food", skip(ctx))]
pub async fn update_food(ctx: &AppContext, food_id: &str, form: FoodChanges) -> Result<UpdateAck, ApiError> {
    form.validate()?;
    if let Some(menu_id) = &form.menu_id {
        ctx.ensure_exists(Collection::Menu, menu_id).await?;
    }

    let mut changes = Changes::new();
    changes
        .stage("name", form.name)?
        .stage("price", form.price.map(round_currency))?
        .stage("food_image", form.food_image)?
        .stage("menu_id", form.menu_id)?;

    ctx.apply_update(Collection::Food, food_id, changes).await
}
