use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors returned by every service operation.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The caller supplied something the operation cannot accept.
    #[error("{0}")]
    InvalidInput(String),

    /// A uniqueness rule would be broken (duplicate class code, existing membership, ...).
    #[error("{0}")]
    Conflict(String),

    /// A project or stage is not in a state that allows the requested move.
    #[error("{0}")]
    InvalidTransition(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Scoring failed: {0}")]
    Scoring(String),
}

impl ServiceError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }
}

/// True when the storage layer rejected a write because of a unique index.
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_human_readable() {
        assert_eq!(ServiceError::NotFound("Class").to_string(), "Class not found");
        assert_eq!(
            ServiceError::invalid("project is not an assignment").to_string(),
            "project is not an assignment"
        );
        let db = ServiceError::from(DbErr::Custom("boom".into()));
        assert!(db.to_string().starts_with("Database error"));
    }

    #[test]
    fn custom_errors_are_not_unique_violations() {
        assert!(!is_unique_violation(&DbErr::Custom("x".into())));
    }
}
