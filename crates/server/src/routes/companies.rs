use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use common::types::StatusMessage;
use models::company;
use serde::{Deserialize, Serialize};
use service::db::company_service;
use tracing::info;

use crate::{errors::ApiError, routes::AppState};

#[derive(Debug, Serialize)]
pub struct CompaniesBody {
    pub companies: Vec<company::Model>,
}

#[derive(Debug, Serialize)]
pub struct CompanyBody {
    pub company: company::Model,
}

#[derive(Debug, Deserialize)]
pub struct CreateCompanyInput {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCompanyInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[utoipa::path(
    get, path = "/companies", tag = "companies",
    responses((status = 200, description = "All companies ordered by code"))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<CompaniesBody>, ApiError> {
    let companies = company_service::list_companies(&state.db).await?;
    info!(count = companies.len(), "list companies");
    Ok(Json(CompaniesBody { companies }))
}

#[utoipa::path(
    get, path = "/companies/{code}", tag = "companies",
    params(("code" = String, Path, description = "Company code")),
    responses(
        (status = 200, description = "Company found"),
        (status = 404, description = "Unknown company", body = crate::openapi::ErrorBody)
    )
)]
pub async fn get(State(state): State<AppState>, Path(code): Path<String>) -> Result<Json<CompanyBody>, ApiError> {
    let company = company_service::get_company(&state.db, &code).await?;
    Ok(Json(CompanyBody { company }))
}

#[utoipa::path(
    post, path = "/companies", tag = "companies",
    request_body = crate::openapi::CreateCompanyDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Invalid body", body = crate::openapi::ErrorBody),
        (status = 409, description = "Duplicate code or name", body = crate::openapi::ErrorBody)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateCompanyInput>, JsonRejection>,
) -> Result<(StatusCode, Json<CompanyBody>), ApiError> {
    let Json(input) = payload?;
    let company = company_service::create_company(
        &state.db,
        &input.code,
        &input.name,
        input.description.as_deref(),
    )
    .await?;
    info!(code = %company.code, "company created");
    Ok((StatusCode::CREATED, Json(CompanyBody { company })))
}

#[utoipa::path(
    put, path = "/companies/{code}", tag = "companies",
    params(("code" = String, Path, description = "Company code")),
    request_body = crate::openapi::UpdateCompanyDoc,
    responses(
        (status = 200, description = "Updated"),
        (status = 400, description = "Invalid body", body = crate::openapi::ErrorBody),
        (status = 404, description = "Unknown company", body = crate::openapi::ErrorBody)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(code): Path<String>,
    payload: Result<Json<UpdateCompanyInput>, JsonRejection>,
) -> Result<Json<CompanyBody>, ApiError> {
    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => {
            // An unknown company is reported before a malformed body.
            company_service::get_company(&state.db, &code).await?;
            return Err(rejection.into());
        }
    };
    let company =
        company_service::update_company(&state.db, &code, &input.name, input.description.as_deref()).await?;
    Ok(Json(CompanyBody { company }))
}

#[utoipa::path(
    delete, path = "/companies/{code}", tag = "companies",
    params(("code" = String, Path, description = "Company code")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "Unknown company", body = crate::openapi::ErrorBody)
    )
)]
pub async fn delete(State(state): State<AppState>, Path(code): Path<String>) -> Result<Json<StatusMessage>, ApiError> {
    company_service::delete_company(&state.db, &code).await?;
    info!(%code, "company deleted");
    Ok(Json(StatusMessage::deleted()))
}
