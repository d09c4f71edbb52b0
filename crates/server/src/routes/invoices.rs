use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};
use common::types::StatusMessage;
use models::invoice;
use serde::{Deserialize, Serialize};
use service::db::invoice_service::{self, InvoiceDetail, InvoiceSummary};
use tracing::info;

use crate::{errors::ApiError, routes::AppState};

#[derive(Debug, Serialize)]
pub struct InvoicesBody {
    pub invoices: Vec<InvoiceSummary>,
}

#[derive(Debug, Serialize)]
pub struct InvoiceDetailBody {
    pub invoice: InvoiceDetail,
}

#[derive(Debug, Serialize)]
pub struct InvoiceBody {
    pub invoice: invoice::Model,
}

#[derive(Debug, Deserialize)]
pub struct CreateInvoiceInput {
    pub comp_code: String,
    #[serde(deserialize_with = "amount::deserialize")]
    pub amt: f64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateInvoiceInput {
    #[serde(deserialize_with = "amount::deserialize")]
    pub amt: f64,
    #[serde(default)]
    pub paid: Option<bool>,
}

/// Amounts arrive either as JSON numbers or as numeric strings.
mod amount {
    use serde::{de, Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
        match Raw::deserialize(d)? {
            Raw::Number(n) => Ok(n),
            Raw::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| de::Error::custom(format!("amt is not a number: {s:?}"))),
        }
    }
}

#[utoipa::path(
    get, path = "/invoices", tag = "invoices",
    responses((status = 200, description = "Invoice ids with company codes"))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<InvoicesBody>, ApiError> {
    let invoices = invoice_service::list_invoices(&state.db).await?;
    info!(count = invoices.len(), "list invoices");
    Ok(Json(InvoicesBody { invoices }))
}

#[utoipa::path(
    get, path = "/invoices/{id}", tag = "invoices",
    params(("id" = i32, Path, description = "Invoice id")),
    responses(
        (status = 200, description = "Invoice with its company"),
        (status = 404, description = "Unknown invoice", body = crate::openapi::ErrorBody)
    )
)]
pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<InvoiceDetailBody>, ApiError> {
    let Path(id) = id?;
    let invoice = invoice_service::get_invoice(&state.db, id).await?;
    Ok(Json(InvoiceDetailBody { invoice }))
}

#[utoipa::path(
    post, path = "/invoices", tag = "invoices",
    request_body = crate::openapi::CreateInvoiceDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Invalid body or unknown company", body = crate::openapi::ErrorBody)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateInvoiceInput>, JsonRejection>,
) -> Result<(StatusCode, Json<InvoiceBody>), ApiError> {
    let Json(input) = payload?;
    let invoice = invoice_service::create_invoice(&state.db, &input.comp_code, input.amt).await?;
    info!(id = invoice.id, comp_code = %invoice.comp_code, "invoice created");
    Ok((StatusCode::CREATED, Json(InvoiceBody { invoice })))
}

#[utoipa::path(
    put, path = "/invoices/{id}", tag = "invoices",
    params(("id" = i32, Path, description = "Invoice id")),
    request_body = crate::openapi::UpdateInvoiceDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Invalid body", body = crate::openapi::ErrorBody),
        (status = 404, description = "Unknown invoice", body = crate::openapi::ErrorBody)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateInvoiceInput>, JsonRejection>,
) -> Result<Json<InvoiceBody>, ApiError> {
    let Path(id) = id?;
    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => {
            invoice_service::get_invoice(&state.db, id).await?;
            return Err(rejection.into());
        }
    };
    let invoice = invoice_service::update_invoice(&state.db, id, input.amt, input.paid).await?;
    Ok(Json(InvoiceBody { invoice }))
}

#[utoipa::path(
    delete, path = "/invoices/{id}", tag = "invoices",
    params(("id" = i32, Path, description = "Invoice id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Unknown invoice", body = crate::openapi::ErrorBody)
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<StatusMessage>, ApiError> {
    let Path(id) = id?;
    invoice_service::delete_invoice(&state.db, id).await?;
    info!(id, "invoice deleted");
    Ok(Json(StatusMessage::deleted()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_accepts_numbers_and_numeric_strings() {
        let a: CreateInvoiceInput = serde_json::from_str(r#"{"comp_code":"sb","amt":200}"#).unwrap();
        assert_eq!(a.amt, 200.0);
        let b: CreateInvoiceInput = serde_json::from_str(r#"{"comp_code":"sb","amt":"12.5"}"#).unwrap();
        assert_eq!(b.amt, 12.5);
    }

    #[test]
    fn amount_rejects_non_numeric_strings() {
        let res: Result<UpdateInvoiceInput, _> = serde_json::from_str(r#"{"amt":"lots"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn paid_is_optional() {
        let u: UpdateInvoiceInput = serde_json::from_str(r#"{"amt":10}"#).unwrap();
        assert_eq!(u.paid, None);
        let u: UpdateInvoiceInput = serde_json::from_str(r#"{"amt":10,"paid":true}"#).unwrap();
        assert_eq!(u.paid, Some(true));
    }
}
