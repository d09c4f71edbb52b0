use models::company;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use tracing::instrument;

use crate::errors::ServiceError;

/// List all companies ordered by code.
pub async fn list_companies(db: &DatabaseConnection) -> Result<Vec<company::Model>, ServiceError> {
    let rows = company::Entity::find()
        .order_by_asc(company::Column::Code)
        .all(db)
        .await?;
    Ok(rows)
}

/// Get company by code.
pub async fn get_company(db: &DatabaseConnection, code: &str) -> Result<company::Model, ServiceError> {
    company::Entity::find_by_id(code.to_string())
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("company", "code", code))
}

/// Create a company.
#[instrument(skip(db, description))]
pub async fn create_company(
    db: &DatabaseConnection,
    code: &str,
    name: &str,
    description: Option<&str>,
) -> Result<company::Model, ServiceError> {
    Ok(company::create(db, code, name, description).await?)
}

/// Replace name and description of an existing company.
///
/// An unknown code is reported before an invalid name.
#[instrument(skip(db, description))]
pub async fn update_company(
    db: &DatabaseConnection,
    code: &str,
    name: &str,
    description: Option<&str>,
) -> Result<company::Model, ServiceError> {
    let existing = get_company(db, code).await?;
    company::validate_name(name)?;
    let mut am: company::ActiveModel = existing.into();
    am.name = Set(name.to_string());
    am.description = Set(description.map(str::to_string));
    Ok(am.update(db).await?)
}

/// Delete company; invoices and industry links cascade.
#[instrument(skip(db))]
pub async fn delete_company(db: &DatabaseConnection, code: &str) -> Result<(), ServiceError> {
    let res = company::Entity::delete_by_id(code.to_string()).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("company", "code", code));
    }
    Ok(())
}
