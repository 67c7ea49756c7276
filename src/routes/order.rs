use actix_web::{web, HttpResponse};

use crate::{auth::extractors::Authenticated, db_interaction::{orders::{create_order, get_order, list_orders, update_order, OrderChanges, OrderForm}, AppContext}, error::ApiError};

#[tracing::instrument("Get orders", skip(ctx, _user))]
pub async fn get_orders(
    ctx: web::Data<AppContext>,
    _user: Authenticated
) -> Result<HttpResponse, ApiError>{
    Ok(HttpResponse::Ok().json(list_orders(&ctx).await?))
}

#[tracing::instrument("Get order", skip(ctx, _user))]
pub async fn get_order_by_id(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
    _user: Authenticated
) -> Result<HttpResponse, ApiError>{
    Ok(HttpResponse::Ok().json(get_order(&ctx, &path).await?))
}

#[tracing::instrument("Post order", skip(ctx, form, _user))]
pub async fn post_order(
    ctx: web::Data<AppContext>,
    form: web::Json<OrderForm>,
    _user: Authenticated
) -> Result<HttpResponse, ApiError>{
    Ok(HttpResponse::Ok().json(create_order(&ctx, form.into_inner()).await?))
}

#[tracing::instrument("Update order", skip(ctx, form, _user))]
pub async fn patch_order(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
    form: web::Json<OrderChanges>,
    _user: Authenticated
) -> Result<HttpResponse, ApiError>{
    Ok(HttpResponse::Ok().json(update_order(&ctx, &path, form.into_inner()).await?))
}
