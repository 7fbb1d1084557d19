//! # Store Errors
//!
//! What can go wrong between a repository call and the SQLite file.
//!
//! ```text
//!   sqlx::Error ──► DbError ──► AppError (fleet-cli) ──► "✗ message" in the menu
//! ```
//!
//! Three variants carry meaning the session acts on: [`DbError::NotFound`],
//! [`DbError::UniqueViolation`] and [`DbError::Conflict`]. The rest mean the
//! store could not do its job and are reported generically.

use sqlx::error::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    /// The addressed row does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A primary key or the user email is already taken.
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// A guarded update found the row, but not in the state the caller
    /// planned from.
    ///
    /// ```text
    /// UPDATE vehicles SET ... WHERE id = 'M001' AND status = 'available'
    ///   0 rows, M001 exists    → Conflict
    ///   0 rows, M001 missing   → NotFound
    /// ```
    #[error("{entity} {id} changed concurrently: {reason}")]
    Conflict {
        entity: String,
        id: String,
        reason: String,
    },

    /// A CHECK or NOT NULL rule in the schema rejected the row.
    #[error("Rejected by schema: {0}")]
    CheckViolation(String),

    /// The file could not be opened, or the pool is closed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// No connection became free within the acquire timeout.
    #[error("Connection pool exhausted")]
    PoolExhausted,

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        DbError::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn conflict(entity: impl Into<String>, id: impl Into<String>, reason: impl Into<String>) -> Self {
        DbError::Conflict {
            entity: entity.into(),
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// The store is unreachable, as opposed to the request being wrong.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, DbError::ConnectionFailed(_) | DbError::PoolExhausted)
    }
}

/// `"UNIQUE constraint failed: users.email"` → `"users.email"`.
fn constrained_column(message: &str) -> String {
    message
        .rsplit(": ")
        .next()
        .filter(|column| !column.is_empty() && *column != message)
        .unwrap_or("unknown")
        .to_string()
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Record", "unknown"),
            sqlx::Error::Database(db_err) => match db_err.kind() {
                // Repositories replace the value with the key they tried to write
                ErrorKind::UniqueViolation => DbError::duplicate(constrained_column(db_err.message()), "unknown"),
                ErrorKind::CheckViolation | ErrorKind::NotNullViolation => {
                    DbError::CheckViolation(db_err.message().to_string())
                }
                _ => DbError::Internal(db_err.message().to_string()),
            },
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("pool is closed".to_string()),
            sqlx::Error::Io(e) => DbError::ConnectionFailed(e.to_string()),
            other => DbError::Internal(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_errors_are_unavailable() {
        assert!(DbError::from(sqlx::Error::PoolTimedOut).is_unavailable());
        assert!(DbError::from(sqlx::Error::PoolClosed).is_unavailable());
        assert!(!DbError::not_found("Vehicle", "M001").is_unavailable());
    }

    #[test]
    fn test_messages_name_the_record() {
        assert_eq!(
            DbError::not_found("Vehicle", "M009").to_string(),
            "Vehicle not found: M009"
        );
        assert_eq!(
            DbError::duplicate("vehicle id", "M002").to_string(),
            "Duplicate vehicle id: 'M002' already exists"
        );
    }

    #[test]
    fn test_constrained_column() {
        assert_eq!(constrained_column("UNIQUE constraint failed: users.email"), "users.email");
        assert_eq!(constrained_column("something odd"), "unknown");
    }
}
