use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use models::{company_industry, industry};
use serde::{Deserialize, Serialize};
use service::db::industry_service::{self, Association, IndustryWithCompanies};
use tracing::info;

use crate::{errors::ApiError, routes::AppState};

#[derive(Debug, Serialize)]
pub struct IndustriesBody {
    pub industries: Vec<IndustryWithCompanies>,
}

#[derive(Debug, Serialize)]
pub struct IndustryBody {
    pub industry: industry::Model,
}

/// `{"already_associated": link}` or `{"associated": link}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssociationBody {
    AlreadyAssociated(company_industry::Model),
    Associated(company_industry::Model),
}

impl From<Association> for AssociationBody {
    fn from(a: Association) -> Self {
        match a {
            Association::Existing(link) => Self::AlreadyAssociated(link),
            Association::Created(link) => Self::Associated(link),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateIndustryInput {
    pub code: String,
    pub industry: String,
}

#[derive(Debug, Deserialize)]
pub struct AssociateInput {
    #[serde(rename = "compCode", alias = "comp_code")]
    pub comp_code: String,
}

#[utoipa::path(
    get, path = "/industries", tag = "industries",
    responses((status = 200, description = "Industries with associated company codes"))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<IndustriesBody>, ApiError> {
    let industries = industry_service::list_industries(&state.db).await?;
    info!(count = industries.len(), "list industries");
    Ok(Json(IndustriesBody { industries }))
}

#[utoipa::path(
    post, path = "/industries", tag = "industries",
    request_body = crate::openapi::CreateIndustryDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Invalid body", body = crate::openapi::ErrorBody),
        (status = 409, description = "Duplicate code", body = crate::openapi::ErrorBody)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateIndustryInput>, JsonRejection>,
) -> Result<(StatusCode, Json<IndustryBody>), ApiError> {
    let Json(input) = payload?;
    let industry = industry_service::create_industry(&state.db, &input.code, &input.industry).await?;
    info!(code = %industry.code, "industry created");
    Ok((StatusCode::CREATED, Json(IndustryBody { industry })))
}

#[utoipa::path(
    post, path = "/industries/{ind_code}", tag = "industries",
    params(("ind_code" = String, Path, description = "Industry code")),
    request_body = crate::openapi::AssociateDoc,
    responses(
        (status = 200, description = "Linked, or already linked"),
        (status = 400, description = "Invalid body", body = crate::openapi::ErrorBody),
        (status = 404, description = "Unknown industry or company", body = crate::openapi::ErrorBody)
    )
)]
pub async fn associate(
    State(state): State<AppState>,
    Path(ind_code): Path<String>,
    payload: Result<Json<AssociateInput>, JsonRejection>,
) -> Result<Json<AssociationBody>, ApiError> {
    let Json(input) = payload?;
    let outcome = industry_service::associate(&state.db, &ind_code, &input.comp_code).await?;
    Ok(Json(outcome.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link() -> company_industry::Model {
        company_industry::Model { comp_code: "sb".into(), ind_code: "tech".into() }
    }

    #[test]
    fn association_body_is_keyed_by_outcome() {
        let existing = serde_json::to_value(AssociationBody::from(Association::Existing(link()))).unwrap();
        assert_eq!(existing, serde_json::json!({ "already_associated": { "comp_code": "sb", "ind_code": "tech" } }));
        let created = serde_json::to_value(AssociationBody::from(Association::Created(link()))).unwrap();
        assert_eq!(created, serde_json::json!({ "associated": { "comp_code": "sb", "ind_code": "tech" } }));
    }

    #[test]
    fn associate_input_accepts_both_spellings() {
        let a: AssociateInput = serde_json::from_str(r#"{"compCode":"sb"}"#).unwrap();
        let b: AssociateInput = serde_json::from_str(r#"{"comp_code":"sb"}"#).unwrap();
        assert_eq!(a.comp_code, b.comp_code);
    }
}
