use chrono::NaiveDate;
use sea_orm::{entity::prelude::*, DatabaseConnection, NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::{company, errors};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "invoices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub comp_code: String,
    #[sea_orm(column_type = "Double")]
    pub amt: f64,
    pub paid: bool,
    pub add_date: Date,
    pub paid_date: Option<Date>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Company }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Company => Entity::belongs_to(company::Entity)
                .from(Column::CompCode)
                .to(company::Column::Code)
                .into(),
        }
    }
}

impl Related<company::Entity> for Entity {
    fn to() -> RelationDef { Relation::Company.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Invoice amounts must be finite and strictly positive.
pub fn validate_amount(amt: f64) -> Result<(), errors::ModelError> {
    if !amt.is_finite() || amt <= 0.0 {
        return Err(errors::ModelError::Validation("amt must be a positive number".into()));
    }
    Ok(())
}

/// `paid_date` after a payment-state change: paying stamps `today`,
/// un-paying clears it, anything else keeps the current value.
pub fn next_paid_date(
    was_paid: bool,
    current: Option<NaiveDate>,
    paid: bool,
    today: NaiveDate,
) -> Option<NaiveDate> {
    match (was_paid, paid) {
        (false, true) => Some(today),
        (true, false) => None,
        _ => current,
    }
}

/// Insert an unpaid invoice; `add_date` comes from the column default.
pub async fn create(db: &DatabaseConnection, comp_code: &str, amt: f64) -> Result<Model, errors::ModelError> {
    crate::company::validate_code(comp_code)?;
    validate_amount(amt)?;
    let am = ActiveModel {
        id: NotSet,
        comp_code: Set(comp_code.to_string()),
        amt: Set(amt),
        paid: Set(false),
        add_date: NotSet,
        paid_date: Set(None),
    };
    Ok(am.insert(db).await?)
}
