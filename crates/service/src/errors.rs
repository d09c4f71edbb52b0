use models::errors::ModelError;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    /// A foreign key points at a row that does not exist.
    #[error("{0}")]
    InvalidReference(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(entity: &str, field: &str, value: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("Can't find {} with {} {}", entity, field, value))
    }

    /// Replace a generic foreign-key failure with one naming the missing row.
    pub fn missing_reference(self, entity: &str, field: &str, value: impl std::fmt::Display) -> Self {
        match self {
            Self::InvalidReference(_) => {
                Self::InvalidReference(format!("Can't find {} with {} {}", entity, field, value))
            }
            other => other,
        }
    }
}

impl From<DbErr> for ServiceError {
    fn from(e: DbErr) -> Self {
        match e.sql_err() {
            Some(sql) => sql.into(),
            None => Self::Db(e.to_string()),
        }
    }
}

impl From<SqlErr> for ServiceError {
    fn from(e: SqlErr) -> Self {
        match e {
            SqlErr::UniqueConstraintViolation(msg) => Self::Conflict(msg),
            // Postgres detail names tables and constraints
            SqlErr::ForeignKeyConstraintViolation(_) => {
                Self::InvalidReference("referenced record does not exist".into())
            }
            other => Self::Db(other.to_string()),
        }
    }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => Self::Validation(msg),
            ModelError::Db(db) => db.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity_and_key() {
        let e = ServiceError::not_found("company", "code", "iv");
        assert_eq!(e.to_string(), "Can't find company with code iv");
    }

    #[test]
    fn model_validation_maps_to_validation() {
        let e: ServiceError = ModelError::Validation("name required".into()).into();
        assert!(matches!(e, ServiceError::Validation(ref m) if m == "name required"));
    }

    #[test]
    fn foreign_key_violation_hides_database_detail() {
        let raw = "insert or update on table \"invoices\" violates foreign key constraint \"fk_invoices_comp_code\"";
        let e: ServiceError = SqlErr::ForeignKeyConstraintViolation(raw.into()).into();
        assert!(matches!(e, ServiceError::InvalidReference(_)));
        assert!(!e.to_string().contains("fk_invoices_comp_code"));
    }

    #[test]
    fn missing_reference_names_the_row() {
        let e: ServiceError = SqlErr::ForeignKeyConstraintViolation("detail".into()).into();
        let e = e.missing_reference("company", "code", "ghost");
        assert_eq!(e.to_string(), "Can't find company with code ghost");
    }

    #[test]
    fn missing_reference_leaves_other_errors_alone() {
        let e = ServiceError::Validation("amt must be a positive number".into()).missing_reference("company", "code", "sb");
        assert!(matches!(e, ServiceError::Validation(_)));
    }

    #[test]
    fn unique_violation_is_a_conflict() {
        let e: ServiceError = SqlErr::UniqueConstraintViolation("duplicate key".into()).into();
        assert!(matches!(e, ServiceError::Conflict(_)));
    }

    #[test]
    fn plain_db_errors_stay_db_errors() {
        let e: ServiceError = DbErr::Custom("boom".into()).into();
        assert!(matches!(e, ServiceError::Db(_)));
    }
}
