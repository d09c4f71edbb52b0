use models::{company, company_industry, industry};
use sea_orm::{
    DatabaseConnection, EntityTrait, FromQueryResult, JoinType, QueryOrder, QuerySelect, RelationTrait,
};
use serde::Serialize;
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::grouping::{group_rows, FlatRow, GroupedParent};

/// One row of `industries LEFT JOIN company_industries`.
#[derive(Clone, Debug, PartialEq, FromQueryResult)]
pub struct IndustryCompanyRow {
    pub code: String,
    pub industry: String,
    pub company_code: Option<String>,
}

impl From<IndustryCompanyRow> for FlatRow<String, String, String> {
    fn from(row: IndustryCompanyRow) -> Self {
        FlatRow::new(row.code, row.industry, row.company_code)
    }
}

/// An industry with the codes of its associated companies.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct IndustryWithCompanies {
    pub code: String,
    pub industry: String,
    pub companies: Vec<String>,
}

impl From<GroupedParent<String, String, String>> for IndustryWithCompanies {
    fn from(g: GroupedParent<String, String, String>) -> Self {
        Self { code: g.key, industry: g.attrs, companies: g.children }
    }
}

/// Outcome of an association request.
#[derive(Clone, Debug, PartialEq)]
pub enum Association {
    /// The pair was already linked; nothing was written.
    Existing(company_industry::Model),
    Created(company_industry::Model),
}

/// Fold join rows into one entry per industry, in first-seen order.
pub fn group_industries(rows: Vec<IndustryCompanyRow>) -> Vec<IndustryWithCompanies> {
    group_rows(rows.into_iter().map(FlatRow::from))
        .into_iter()
        .map(IndustryWithCompanies::from)
        .collect()
}

/// List every industry with its associated company codes.
pub async fn list_industries(db: &DatabaseConnection) -> Result<Vec<IndustryWithCompanies>, ServiceError> {
    let rows = industry::Entity::find()
        .select_only()
        .column(industry::Column::Code)
        .column(industry::Column::Industry)
        .column_as(company_industry::Column::CompCode, "company_code")
        .join(JoinType::LeftJoin, industry::Relation::CompanyIndustry.def())
        .order_by_asc(industry::Column::Code)
        .order_by_asc(company_industry::Column::CompCode)
        .into_model::<IndustryCompanyRow>()
        .all(db)
        .await?;
    Ok(group_industries(rows))
}

/// Create an industry.
#[instrument(skip(db))]
pub async fn create_industry(db: &DatabaseConnection, code: &str, label: &str) -> Result<industry::Model, ServiceError> {
    Ok(industry::create(db, code, label).await?)
}

/// Link `comp_code` to `ind_code` unless the link already exists.
#[instrument(skip(db))]
pub async fn associate(db: &DatabaseConnection, ind_code: &str, comp_code: &str) -> Result<Association, ServiceError> {
    let existing = company_industry::Entity::find_by_id((comp_code.to_string(), ind_code.to_string()))
        .one(db)
        .await?;
    if let Some(link) = existing {
        info!(%ind_code, %comp_code, "association already present");
        return Ok(Association::Existing(link));
    }

    if industry::Entity::find_by_id(ind_code.to_string()).one(db).await?.is_none() {
        return Err(ServiceError::not_found("industry", "code", ind_code));
    }
    if company::Entity::find_by_id(comp_code.to_string()).one(db).await?.is_none() {
        return Err(ServiceError::not_found("company", "code", comp_code));
    }

    let link = company_industry::create(db, comp_code, ind_code).await?;
    Ok(Association::Created(link))
}
