use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

use crate::{company, company_industry, errors};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "industries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub code: String,
    pub industry: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { CompanyIndustry }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::CompanyIndustry => Entity::has_many(company_industry::Entity).into(),
        }
    }
}

impl Related<company_industry::Entity> for Entity {
    fn to() -> RelationDef { Relation::CompanyIndustry.def() }
}

impl Related<company::Entity> for Entity {
    fn to() -> RelationDef { company_industry::Relation::Company.def() }
    fn via() -> Option<RelationDef> { Some(company_industry::Relation::Industry.def().rev()) }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_label(industry: &str) -> Result<(), errors::ModelError> {
    if industry.trim().is_empty() { return Err(errors::ModelError::Validation("industry required".into())); }
    Ok(())
}

pub async fn create(db: &DatabaseConnection, code: &str, industry: &str) -> Result<Model, errors::ModelError> {
    company::validate_code(code)?;
    validate_label(industry)?;
    let am = ActiveModel {
        code: Set(code.to_string()),
        industry: Set(industry.to_string()),
    };
    Ok(am.insert(db).await?)
}
