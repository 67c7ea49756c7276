use actix_web::{web, HttpResponse};

use crate::{auth::extractors::Authenticated, db_interaction::{order_items::{create_order_items, get_order_item, items_by_order, list_order_items, update_order_item, OrderItemChanges, OrderItemPack}, AppContext}, error::ApiError};

#[tracing::instrument("Get order items", skip(ctx, _user))]
pub async fn get_order_items(
    ctx: web::Data<AppContext>,
    _user: Authenticated
) -> Result<HttpResponse, ApiError>{
    Ok(HttpResponse::Ok().json(list_order_items(&ctx).await?))
}

#[tracing::instrument("Get order item", skip(ctx, _user))]
pub async fn get_order_item_by_id(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
    _user: Authenticated
) -> Result<HttpResponse, ApiError>{
    Ok(HttpResponse::Ok().json(get_order_item(&ctx, &path).await?))
}

#[tracing::instrument("Get order items by order", skip(ctx, _user))]
pub async fn get_order_items_by_order(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
    _user: Authenticated
) -> Result<HttpResponse, ApiError>{
    Ok(HttpResponse::Ok().json(items_by_order(&ctx, &path).await?))
}

#[tracing::instrument("Post order items", skip(ctx, pack, _user))]
pub async fn post_order_items(
    ctx: web::Data<AppContext>,
    pack: web::Json<OrderItemPack>,
    _user: Authenticated
) -> Result<HttpResponse, ApiError>{
    Ok(HttpResponse::Ok().json(create_order_items(&ctx, pack.into_inner()).await?))
}

#[tracing::instrument("Update order item", skip(ctx, form, _user))]
pub async fn patch_order_item(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
    form: web::Json<OrderItemChanges>,
    _user: Authenticated
) -> Result<HttpResponse, ApiError>{
    Ok(HttpResponse::Ok().json(update_order_item(&ctx, &path, form.into_inner()).await?))
}
