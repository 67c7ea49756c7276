use actix_web::{web, HttpResponse};

use crate::{auth::extractors::Authenticated, db_interaction::{food::{create_food, get_food, list_foods, update_food, FoodChanges, FoodForm}, AppContext}, domain::pagination::{PageQuery, PageWindow}, error::ApiError};

#[tracing::instrument("Get foods", skip(ctx, _user))]
pub async fn get_foods(
    ctx: web::Data<AppContext>,
    query: web::Query<PageQuery>,
    _user: Authenticated
) -> Result<HttpResponse, ApiError>{
    let page = list_foods(&ctx, PageWindow::from_query(&query)).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[tracing::instrument("Get food", skip(ctx, _user))]
pub async fn get_food_by_id(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
    _user: Authenticated
) -> Result<HttpResponse, ApiError>{
    Ok(HttpResponse::Ok().json(get_food(&ctx, &path).await?))
}

#[tracing::instrument("Post food", skip(ctx, form, _user))]
pub async fn post_food(
    ctx: web::Data<AppContext>,
    form: web::Json<FoodForm>,
    _user: Authenticated
) -> Result<HttpResponse, ApiError>{
    Ok(HttpResponse::Ok().json(create_food(&ctx, form.into_inner()).await?))
}

#[tracing::instrument("Update food", skip(ctx, form, _user))]
pub async fn patch_food(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
    form: web::Json<FoodChanges>,
    _user: Authenticated
) -> Result<HttpResponse, ApiError>{
    Ok(HttpResponse::Ok().json(update_food(&ctx, &path, form.into_inner()).await?))
}
