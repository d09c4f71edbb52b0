use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

use crate::{company, errors, industry};

/// Association row between a company and an industry.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "company_industries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub comp_code: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub ind_code: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Company, Industry }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Company => Entity::belongs_to(company::Entity)
                .from(Column::CompCode)
                .to(company::Column::Code)
                .into(),
            Relation::Industry => Entity::belongs_to(industry::Entity)
                .from(Column::IndCode)
                .to(industry::Column::Code)
                .into(),
        }
    }
}

impl Related<company::Entity> for Entity {
    fn to() -> RelationDef { Relation::Company.def() }
}

impl Related<industry::Entity> for Entity {
    fn to() -> RelationDef { Relation::Industry.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create(db: &DatabaseConnection, comp_code: &str, ind_code: &str) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        comp_code: Set(comp_code.to_string()),
        ind_code: Set(ind_code.to_string()),
    };
    Ok(am.insert(db).await?)
}
