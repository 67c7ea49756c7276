use actix_web::{web, HttpResponse};

use crate::{auth::extractors::Authenticated, db_interaction::{menu::{create_menu, get_menu, list_menus, update_menu, MenuChanges, MenuForm}, AppContext}, error::ApiError};

#[tracing::instrument("Get menus", skip(ctx, _user))]
pub async fn get_menus(
    ctx: web::Data<AppContext>,
    _user: Authenticated
) -> Result<HttpResponse, ApiError>{
    Ok(HttpResponse::Ok().json(list_menus(&ctx).await?))
}

#[tracing::instrument("Get menu", skip(ctx, _user))]
pub async fn get_menu_by_id(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
    _user: Authenticated
) -> Result<HttpResponse, ApiError>{
    Ok(HttpResponse::Ok().json(get_menu(&ctx, &path).await?))
}

#[tracing::instrument("Post menu", skip(ctx, form, _user))]
pub async fn post_menu(
    ctx: web::Data<AppContext>,
    form: web::Json<MenuForm>,
    _user: Authenticated
) -> Result<HttpResponse, ApiError>{
    Ok(HttpResponse::Ok().json(create_menu(&ctx, form.into_inner()).await?))
}

#[tracing::instrument("Update menu", skip(ctx, form, _user))]
pub async fn patch_menu(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
    form: web::Json<MenuChanges>,
    _user: Authenticated
) -> Result<HttpResponse, ApiError>{
    Ok(HttpResponse::Ok().json(update_menu(&ctx, &path, form.into_inner()).await?))
}
