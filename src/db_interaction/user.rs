use anyhow::Context;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::{auth::jwt::{Subject, TokenPair, Tokenizer}, domain::{pagination::{Page, PageWindow}, phone_number::validate_phone}, error::ApiError, models::{SessionView, User, UserView}, password::{hash_password, verify_password}, store::{Changes, Collection, UpdateAck}, utils::{new_public_id, now}};

use super::{decode, AppContext};

// The secret never leaves the form, so it is checked at the form level
fn validate_password(form: &SignUpForm) -> Result<(), ValidationError> {
    if form.password.expose_secret().chars().count() < 6 {
        return Err(ValidationError::new("password_too_short"));
    }
    Ok(())
}

#[derive(Deserialize, Debug, Validate)]
#[validate(schema(function = "validate_password"))]
pub struct SignUpForm{
    #[validate(length(min = 2, max = 100))]
    pub first_name: String,
    #[validate(length(min = 2, max = 100))]
    pub last_name: String,
    pub password: SecretString,
    #[validate(email)]
    pub email: String,
    pub avatar: Option<String>,
    #[validate(custom(function = "validate_phone"))]
    pub phone: String
}

#[derive(Deserialize, Debug, Validate)]
pub struct LoginForm{
    #[validate(email)]
    pub email: String,
    pub password: SecretString
}

#[derive(Deserialize, Debug, Default, Validate)]
pub struct UserChanges{
    #[validate(length(min = 2, max = 100))]
    pub first_name: Option<String>,
    #[validate(length(min = 2, max = 100))]
    pub last_name: Option<String>,
    pub avatar: Option<String>,
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SignUpAck{
    pub inserted_id: String,
    pub token: String,
    pub refresh_token: String
}

fn issue_tokens(tokenizer: &Tokenizer, user_id: &str, email: &str, first_name: &str, last_name: &str) -> Result<TokenPair, anyhow::Error> {
    tokenizer
        .generate_pair(Subject{ user_id, email, first_name, last_name })
        .context("Failed to sign token pair")
}

// Counted up front for a precise message; the unique index still settles races
async fn ensure_unused(ctx: &AppContext, field: &str, value: &str) -> Result<(), ApiError> {
    if ctx.store.count(Collection::User, field, value).await? > 0 {
        return Err(ApiError::Conflict(format!("this {} already exists", field)));
    }
    Ok(())
}

#[tracing::instrument(
    "Signing up new user",
    skip(ctx, tokenizer, form),
    fields(email = %form.email)
)]
pub async fn sign_up(ctx: &AppContext, tokenizer: &Tokenizer, form: SignUpForm) -> Result<SignUpAck, ApiError> {
    form.validate()?;

    ensure_unused(ctx, "email", &form.email).await?;
    ensure_unused(ctx, "phone", &form.phone).await?;

    let password = hash_password(form.password).await?;
    let user_id = new_public_id();
    let tokens = issue_tokens(tokenizer, &user_id, &form.email, &form.first_name, &form.last_name)?;
    let timestamp = now();

    let user = User{
        first_name: form.first_name,
        last_name: form.last_name,
        password,
        email: form.email,
        avatar: form.avatar,
        phone: form.phone,
        token: Some(tokens.token.clone()),
        refresh_token: Some(tokens.refresh_token.clone()),
        created_at: timestamp,
        updated_at: timestamp,
        user_id: user_id.clone()
    };
    ctx.insert(Collection::User, &user).await?;

    tracing::info!(user_id = %user_id, "Signed up new user");
    Ok(SignUpAck{
        inserted_id: user_id,
        token: tokens.token,
        refresh_token: tokens.refresh_token
    })
}

#[tracing::instrument(
    "Logging in user",
    skip(ctx, tokenizer, form),
    fields(email = %form.email)
)]
pub async fn login(ctx: &AppContext, tokenizer: &Tokenizer, form: LoginForm) -> Result<SessionView, ApiError> {
    form.validate()?;

    let user: User = match ctx.store.find_one(Collection::User, "email", &form.email).await? {
        Some(document) => decode(document)?,
        None => return Err(ApiError::NotFound("user not found, login seems to be incorrect".to_string()))
    };

    if !verify_password(form.password, user.password.clone()).await? {
        return Err(ApiError::Unauthorized("login or password is incorrect".to_string()));
    }

    let tokens = issue_tokens(tokenizer, &user.user_id, &user.email, &user.first_name, &user.last_name)?;
    let mut changes = Changes::new();
    changes
        .stage("token", Some(&tokens.token))?
        .stage("refresh_token", Some(&tokens.refresh_token))?;
    ctx.apply_update(Collection::User, &user.user_id, changes).await?;

    let user: User = ctx.fetch(Collection::User, &user.user_id).await?;
    Ok(SessionView{
        user: user.into(),
        token: tokens.token,
        refresh_token: tokens.refresh_token
    })
}

#[tracing::instrument("Getting user", skip(ctx))]
pub async fn get_user(ctx: &AppContext, user_id: &str) -> Result<UserView, ApiError> {
    let user: User = ctx.fetch(Collection::User, user_id).await?;
    Ok(user.into())
}

#[tracing::instrument("Listing users", skip(ctx))]
pub async fn list_users(ctx: &AppContext, window: PageWindow) -> Result<Page<UserView>, ApiError> {
    let page = ctx.paginate::<User>(Collection::User, window).await?;

    Ok(Page{
        total_count: page.total_count,
        items: page.items.into_iter().map(UserView::from).collect()
    })
}

#[tracing::instrument("Updating user", skip(ctx, form))]
pub async fn update_user(ctx: &AppContext, user_id: &str, form: UserChanges) -> Result<UpdateAck, ApiError> {
    form.validate()?;

    let mut changes = Changes::new();
    changes
        .stage("first_name", form.first_name)?
        .stage("last_name", form.last_name)?
        .stage("avatar", form.avatar)?
        .stage("phone", form.phone)?;

    ctx.apply_update(Collection::User, user_id, changes).await
}
