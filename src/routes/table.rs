use actix_web::{web, HttpResponse};

use crate::{auth::extractors::Authenticated, db_interaction::{table::{create_table, get_table, list_tables, update_table, TableChanges, TableForm}, AppContext}, error::ApiError};

#[tracing::instrument("Get tables", skip(ctx, _user))]
pub async fn get_tables(
    ctx: web::Data<AppContext>,
    _user: Authenticated
) -> Result<HttpResponse, ApiError>{
    Ok(HttpResponse::Ok().json(list_tables(&ctx).await?))
}

#[tracing::instrument("Get table", skip(ctx, _user))]
pub async fn get_table_by_id(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
    _user: Authenticated
) -> Result<HttpResponse, ApiError>{
    Ok(HttpResponse::Ok().json(get_table(&ctx, &path).await?))
}

#[tracing::instrument("Post table", skip(ctx, form, _user))]
pub async fn post_table(
    ctx: web::Data<AppContext>,
    form: web::Json<TableForm>,
    _user: Authenticated
) -> Result<HttpResponse, ApiError>{
    Ok(HttpResponse::Ok().json(create_table(&ctx, form.into_inner()).await?))
}

#[tracing::instrument("Update table", skip(ctx, form, _user))]
pub async fn patch_table(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
    form: web::Json<TableChanges>,
    _user: Authenticated
) -> Result<HttpResponse, ApiError>{
    Ok(HttpResponse::Ok().json(update_table(&ctx, &path, form.into_inner()).await?))
}
