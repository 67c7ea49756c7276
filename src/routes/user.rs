use actix_web::{web, HttpResponse};

use crate::{auth::{extractors::Authenticated, jwt::Tokenizer}, db_interaction::{user::{get_user, list_users, login, sign_up, update_user, LoginForm, SignUpForm, UserChanges}, AppContext}, domain::pagination::{PageQuery, PageWindow}, error::ApiError};

#[tracing::instrument(
    "Sign up",
    skip(ctx, tokenizer, form)
)]
pub async fn post_signup(
    ctx: web::Data<AppContext>,
    tokenizer: web::Data<Tokenizer>,
    form: web::Json<SignUpForm>
) -> Result<HttpResponse, ApiError>{
    let ack = sign_up(&ctx, &tokenizer, form.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ack))
}

#[tracing::instrument(
    "Log in",
    skip(ctx, tokenizer, form)
)]
pub async fn post_login(
    ctx: web::Data<AppContext>,
    tokenizer: web::Data<Tokenizer>,
    form: web::Json<LoginForm>
) -> Result<HttpResponse, ApiError>{
    let user = login(&ctx, &tokenizer, form.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

#[tracing::instrument(
    "Get users",
    skip(ctx, _user)
)]
pub async fn get_users(
    ctx: web::Data<AppContext>,
    query: web::Query<PageQuery>,
    _user: Authenticated
) -> Result<HttpResponse, ApiError>{
    let page = list_users(&ctx, PageWindow::from_query(&query)).await?;
    Ok(HttpResponse::Ok().json(page))
}

#[tracing::instrument(
    "Get user",
    skip(ctx, _user)
)]
pub async fn get_user_by_id(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
    _user: Authenticated
) -> Result<HttpResponse, ApiError>{
    let user = get_user(&ctx, &path).await?;
    Ok(HttpResponse::Ok().json(user))
}

#[tracing::instrument(
    "Update user",
    skip(ctx, form, _user)
)]
pub async fn patch_user(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
    form: web::Json<UserChanges>,
    _user: Authenticated
) -> Result<HttpResponse, ApiError>{
    let ack = update_user(&ctx, &path, form.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ack))
}
