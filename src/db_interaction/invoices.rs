use chrono::Duration;
use serde::Deserialize;
use validator::Validate;

use crate::{error::ApiError, models::{Invoice, InvoiceView, PaymentMethod, PaymentStatus}, store::{Changes, Collection, InsertAck, UpdateAck}, utils::{new_public_id, now}};

use super::AppContext;

#[derive(Deserialize, Debug, Validate)]
pub struct InvoiceForm{
    #[validate(length(min = 1))]
    pub order_id: String,
    pub payment_method: Option<PaymentMethod>,
    pub payment_status: Option<PaymentStatus>
}

#[derive(Deserialize, Debug, Default)]
pub struct InvoiceChanges{
    pub payment_method: Option<PaymentMethod>,
    pub payment_status: Option<PaymentStatus>
}

#[tracing::instrument("Creating invoice", skip(ctx))]
pub async fn create_invoice(ctx: &AppContext, form: InvoiceForm) -> Result<InsertAck, ApiError> {
    form.validate()?;
    ctx.ensure_exists(Collection::Order, &form.order_id).await?;

    let timestamp = now();
    let invoice = Invoice{
        order_id: form.order_id,
        payment_method: form.payment_method,
        payment_status: form.payment_status.unwrap_or_default(),
        payment_due_date: timestamp + Duration::days(1),
        created_at: timestamp,
        updated_at: timestamp,
        invoice_id: new_public_id()
    };
    ctx.insert(Collection::Invoice, &invoice).await?;

    Ok(InsertAck{ inserted_id: invoice.invoice_id })
}

/// The invoice merged with the summary of its order. An order without any
/// item has nothing to bill and is reported as missing.
#[tracing::instrument("Composing invoice view", skip(ctx))]
pub async fn get_invoice_view(ctx: &AppContext, invoice_id: &str) -> Result<InvoiceView, ApiError> {
    let invoice: Invoice = ctx.fetch(Collection::Invoice, invoice_id).await?;

    let summary = ctx
        .store
        .order_summaries(&invoice.order_id)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| ApiError::NotFound(format!("order {} has no items to bill", invoice.order_id)))?;

    Ok(InvoiceView{
        invoice_id: invoice.invoice_id,
        payment_method: invoice
            .payment_method
            .map(|method| method.as_str())
            .unwrap_or("null")
            .to_string(),
        order_id: invoice.order_id,
        payment_status: invoice.payment_status,
        payment_due: summary.payment_due,
        table_number: summary.table_number,
        payment_due_date: invoice.payment_due_date,
        order_details: summary.order_items
    })
}

#[tracing::instrument("Listing invoices", skip(ctx))]
pub async fn list_invoices(ctx: &AppContext) -> Result<Vec<Invoice>, ApiError> {
    ctx.fetch_all(Collection::Invoice).await
}

#[tracing::instrument("Updating invoice", skip(ctx))]
pub async fn update_invoice(ctx: &AppContext, invoice_id: &str, form: InvoiceChanges) -> Result<UpdateAck, ApiError> {
    let mut changes = Changes::new();
    changes
        .stage("payment_method", form.payment_method)?
        .stage("payment_status", form.payment_status)?;

    ctx.apply_update(Collection::Invoice, invoice_id, changes).await
}
