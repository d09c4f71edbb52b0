use chrono::{NaiveDate, Utc};
use models::{company, invoice};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, FromQueryResult, QueryOrder, QuerySelect, Set,
};
use serde::Serialize;
use tracing::instrument;

use crate::errors::ServiceError;

/// Listing projection: only id and company code.
#[derive(Clone, Debug, PartialEq, FromQueryResult, Serialize)]
pub struct InvoiceSummary {
    pub id: i32,
    pub comp_code: String,
}

/// Invoice with its company embedded in place of `comp_code`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct InvoiceDetail {
    pub id: i32,
    pub amt: f64,
    pub paid: bool,
    pub add_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
    pub company: company::Model,
}

impl InvoiceDetail {
    pub fn new(inv: invoice::Model, company: company::Model) -> Self {
        Self {
            id: inv.id,
            amt: inv.amt,
            paid: inv.paid,
            add_date: inv.add_date,
            paid_date: inv.paid_date,
            company,
        }
    }
}

/// List `(id, comp_code)` for all invoices ordered by id.
pub async fn list_invoices(db: &DatabaseConnection) -> Result<Vec<InvoiceSummary>, ServiceError> {
    let rows = invoice::Entity::find()
        .select_only()
        .column(invoice::Column::Id)
        .column(invoice::Column::CompCode)
        .order_by_asc(invoice::Column::Id)
        .into_model::<InvoiceSummary>()
        .all(db)
        .await?;
    Ok(rows)
}

/// Get an invoice joined with its company.
pub async fn get_invoice(db: &DatabaseConnection, id: i32) -> Result<InvoiceDetail, ServiceError> {
    match invoice::Entity::find_by_id(id)
        .find_also_related(company::Entity)
        .one(db)
        .await?
    {
        Some((inv, Some(c))) => Ok(InvoiceDetail::new(inv, c)),
        _ => Err(ServiceError::not_found("invoice", "id", id)),
    }
}

/// Create an unpaid invoice for `comp_code`.
#[instrument(skip(db))]
pub async fn create_invoice(db: &DatabaseConnection, comp_code: &str, amt: f64) -> Result<invoice::Model, ServiceError> {
    invoice::create(db, comp_code, amt)
        .await
        .map_err(|e| ServiceError::from(e).missing_reference("company", "code", comp_code))
}

/// Update amount and, when `paid` is given, payment state.
///
/// Paying an unpaid invoice stamps today's date; un-paying clears it.
/// An unknown id is reported before an invalid amount.
#[instrument(skip(db))]
pub async fn update_invoice(
    db: &DatabaseConnection,
    id: i32,
    amt: f64,
    paid: Option<bool>,
) -> Result<invoice::Model, ServiceError> {
    let existing = invoice::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("invoice", "id", id))?;
    invoice::validate_amount(amt)?;
    let was_paid = existing.paid;
    let current_paid_date = existing.paid_date;

    let mut am: invoice::ActiveModel = existing.into();
    am.amt = Set(amt);
    if let Some(paid) = paid {
        let today = Utc::now().date_naive();
        am.paid = Set(paid);
        am.paid_date = Set(invoice::next_paid_date(was_paid, current_paid_date, paid, today));
    }
    Ok(am.update(db).await?)
}

/// Delete invoice by id.
#[instrument(skip(db))]
pub async fn delete_invoice(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let res = invoice::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("invoice", "id", id));
    }
    Ok(())
}
