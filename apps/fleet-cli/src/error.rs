//! # Command Errors
//!
//! Every command returns [`AppResult`]. The menus never end the session on an
//! [`AppError`]; they print its message after a red cross and show the menu
//! again.
//!
//! ```text
//!   CoreError::RentalConflict ─┐
//!   DbError::Conflict ─────────┼──► AppError { code: Conflict, message }
//!   ValidationError ───────────┤          │
//!   ConfigError, io::Error ────┘          ▼
//!                                 "✗ Vehicle M003 is already rented"
//! ```
//!
//! The [`ErrorCode`] is what tests and callers branch on; the message is
//! for the person at the terminal.

use crate::config::ConfigError;
use fleet_core::{CoreError, ValidationError};
use fleet_db::DbError;

/// Error returned from session commands.
#[derive(Debug, Clone)]
pub struct AppError {
    /// Machine-readable error category
    pub code: ErrorCode,

    /// Human-readable message naming the id or field involved
    pub message: String,
}

/// Error categories the session distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Bad input: blank field, negative price, non-positive days
    Validation,

    /// Unknown vehicle or user id
    NotFound,

    /// Transition illegal from the current status
    Conflict,

    /// Id or email already taken
    DuplicateKey,

    /// Undo requested with an empty slot
    NothingToUndo,

    /// The store cannot be reached right now
    StorageUnavailable,

    /// Anything else
    Internal,
}

impl AppError {
    /// Creates a new error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Validation, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        if err.is_unavailable() {
            tracing::warn!(error = %err, "Store unavailable");
            let message = match err {
                DbError::PoolExhausted => "Database is busy, try again",
                _ => "Database is unavailable",
            };
            return AppError::new(ErrorCode::StorageUnavailable, message);
        }

        match err {
            DbError::NotFound { entity, id } => AppError::not_found(&entity, &id),
            DbError::UniqueViolation { field, value } => AppError::new(
                ErrorCode::DuplicateKey,
                format!("{} '{}' already exists", field, value),
            ),
            DbError::Conflict { entity, id, reason } => AppError::new(
                ErrorCode::Conflict,
                format!("{} {} was changed by someone else ({})", entity, id, reason),
            ),
            // Inputs are validated before they reach the store, so a schema
            // rejection here is a bug rather than bad input
            other => {
                tracing::error!(error = %other, "Store operation failed");
                AppError::internal("Database operation failed")
            }
        }
    }
}

/// Converts domain rule errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::VehicleNotFound(id) => AppError::not_found("Vehicle", &id),
            CoreError::RentalConflict { .. } => AppError::new(ErrorCode::Conflict, err.to_string()),
            CoreError::NothingToUndo => AppError::new(ErrorCode::NothingToUndo, err.to_string()),
            CoreError::Validation(e) => AppError::from(e),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::new(ErrorCode::Internal, format!("Configuration error: {}", err))
    }
}

/// Terminal and report-file I/O.
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::internal(format!("I/O error: {}", err))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}

/// Result type for session commands.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use fleet_core::VehicleStatus;

    #[test]
    fn test_db_errors_map_to_codes() {
        assert_eq!(
            AppError::from(DbError::not_found("Vehicle", "M009")).code,
            ErrorCode::NotFound
        );
        assert_eq!(
            AppError::from(DbError::duplicate("vehicle id", "M001")).code,
            ErrorCode::DuplicateKey
        );
        assert_eq!(
            AppError::from(DbError::conflict("Vehicle", "M001", "expected status available")).code,
            ErrorCode::Conflict
        );
        assert_eq!(AppError::from(DbError::PoolExhausted).code, ErrorCode::StorageUnavailable);
        assert_eq!(
            AppError::from(DbError::ConnectionFailed("closed".into())).code,
            ErrorCode::StorageUnavailable
        );
    }

    #[test]
    fn test_core_errors_keep_their_message() {
        let err = AppError::from(CoreError::RentalConflict {
            vehicle_id: "M003".to_string(),
            status: VehicleStatus::Rented,
        });
        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(err.message, "Vehicle M003 is already rented");

        let err = AppError::from(CoreError::NothingToUndo);
        assert_eq!(err.code, ErrorCode::NothingToUndo);

        let err = AppError::from(CoreError::VehicleNotFound("M404".into()));
        assert_eq!(err.message, "Vehicle not found: M404");
    }

    #[test]
    fn test_display_includes_code() {
        let err = AppError::validation("days must be positive, got 0");
        assert_eq!(err.to_string(), "[Validation] days must be positive, got 0");
    }
}
