use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::{error::ApiError, models::Menu, store::{Changes, Collection, InsertAck, UpdateAck}, utils::{new_public_id, now}};

use super::AppContext;

fn ordered_window(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Result<(), ValidationError> {
    match (start, end) {
        (Some(start), Some(end)) if start >= end => Err(ValidationError::new("start_date_after_end_date")),
        _ => Ok(())
    }
}

fn validate_new_window(form: &MenuForm) -> Result<(), ValidationError> {
    ordered_window(form.start_date, form.end_date)
}

fn validate_changed_window(form: &MenuChanges) -> Result<(), ValidationError> {
    ordered_window(form.start_date, form.end_date)
}

#[derive(Deserialize, Debug, Validate)]
#[validate(schema(function = "validate_new_window"))]
pub struct MenuForm{
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub category: String,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>
}

#[derive(Deserialize, Debug, Default, Validate)]
#[validate(schema(function = "validate_changed_window"))]
pub struct MenuChanges{
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(length(min = 1))]
    pub category: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>
}

#[tracing::instrument("Creating menu", skip(ctx))]
pub async fn create_menu(ctx: &AppContext, form: MenuForm) -> Result<InsertAck, ApiError> {
    form.validate()?;

    let timestamp = now();
    let menu = Menu{
        name: form.name,
        category: form.category,
        start_date: form.start_date,
        end_date: form.end_date,
        created_at: timestamp,
        updated_at: timestamp,
        menu_id: new_public_id()
    };
    ctx.insert(Collection::Menu, &menu).await?;

    Ok(InsertAck{ inserted_id: menu.menu_id })
}

#[tracing::instrument("Getting menu", skip(ctx))]
pub async fn get_menu(ctx: &AppContext, menu_id: &str) -> Result<Menu, ApiError> {
    ctx.fetch(Collection::Menu, menu_id).await
}

#[tracing::instrument("Listing menus", skip(ctx))]
pub async fn list_menus(ctx: &AppContext) -> Result<Vec<Menu>, ApiError> {
    ctx.fetch_all(Collection::Menu).await
}

#[tracing::instrument("Updating menu", skip(ctx))]
pub async fn update_menu(ctx: &AppContext, menu_id: &str, form: MenuChanges) -> Result<UpdateAck, ApiError> {
    form.validate()?;

    // The window moves as a whole and must still be open
    match (form.start_date, form.end_date) {
        (None, None) => {},
        (Some(_), Some(end)) if end > now() => {},
        (Some(_), Some(_)) => return Err(ApiError::BadRequest("kindly retype the time, the menu window has already ended".to_string())),
        _ => return Err(ApiError::BadRequest("please supply both the start and end date".to_string()))
    }

    let mut changes = Changes::new();
    changes
        .stage("name", form.name)?
        .stage("category", form.category)?
        .stage("start_date", form.start_date)?
        .stage("end_date", form.end_date)?;

    ctx.apply_update(Collection::Menu, menu_id, changes).await
}
