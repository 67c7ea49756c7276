use actix_web::{web, HttpResponse};

use crate::{auth::extractors::Authenticated, db_interaction::{invoices::{create_invoice, get_invoice_view, list_invoices, update_invoice, InvoiceChanges, InvoiceForm}, AppContext}, error::ApiError};

#[tracing::instrument("Get invoices", skip(ctx, _user))]
pub async fn get_invoices(
    ctx: web::Data<AppContext>,
    _user: Authenticated
) -> Result<HttpResponse, ApiError>{
    Ok(HttpResponse::Ok().json(list_invoices(&ctx).await?))
}

#[tracing::instrument("Get invoice", skip(ctx, _user))]
pub async fn get_invoice_by_id(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
    _user: Authenticated
) -> Result<HttpResponse, ApiError>{
    Ok(HttpResponse::Ok().json(get_invoice_view(&ctx, &path).await?))
}

#[tracing::instrument("Post invoice", skip(ctx, form, _user))]
pub async fn post_invoice(
    ctx: web::Data<AppContext>,
    form: web::Json<InvoiceForm>,
    _user: Authenticated
) -> Result<HttpResponse, ApiError>{
    Ok(HttpResponse::Ok().json(create_invoice(&ctx, form.into_inner()).await?))
}

#[tracing::instrument("Update invoice", skip(ctx, form, _user))]
pub async fn patch_invoice(
    ctx: web::Data<AppContext>,
    path: web::Path<String>,
    form: web::Json<InvoiceChanges>,
    _user: Authenticated
) -> Result<HttpResponse, ApiError>{
    Ok(HttpResponse::Ok().json(update_invoice(&ctx, &path, form.into_inner()).await?))
}
