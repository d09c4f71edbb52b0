use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

use crate::{company_industry, errors, industry, invoice};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "companies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Invoice,
    CompanyIndustry,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Invoice => Entity::has_many(invoice::Entity).into(),
            Relation::CompanyIndustry => Entity::has_many(company_industry::Entity).into(),
        }
    }
}

impl Related<invoice::Entity> for Entity {
    fn to() -> RelationDef { Relation::Invoice.def() }
}

impl Related<company_industry::Entity> for Entity {
    fn to() -> RelationDef { Relation::CompanyIndustry.def() }
}

impl Related<industry::Entity> for Entity {
    fn to() -> RelationDef { company_industry::Relation::Industry.def() }
    fn via() -> Option<RelationDef> { Some(company_industry::Relation::Company.def().rev()) }
}

impl ActiveModelBehavior for ActiveModel {}

/// Company codes are short identifiers used in URLs.
pub fn validate_code(code: &str) -> Result<(), errors::ModelError> {
    if code.trim().is_empty() {
        return Err(errors::ModelError::Validation("code required".into()));
    }
    if code.len() > 64 || code.chars().any(|c| c.is_whitespace() || c == '/') {
        return Err(errors::ModelError::Validation("code must be at most 64 characters without spaces or '/'".into()));
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() { return Err(errors::ModelError::Validation("name required".into())); }
    Ok(())
}

pub async fn create(
    db: &DatabaseConnection,
    code: &str,
    name: &str,
    description: Option<&str>,
) -> Result<Model, errors::ModelError> {
    validate_code(code)?;
    validate_name(name)?;
    let am = ActiveModel {
        code: Set(code.to_string()),
        name: Set(name.to_string()),
        description: Set(description.map(str::to_string)),
    };
    Ok(am.insert(db).await?)
}
