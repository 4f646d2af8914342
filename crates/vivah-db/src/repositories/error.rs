//! Error handling utilities for repositories

use sqlx::error::ErrorKind;
use sqlx::Error as SqlxError;
use vivah_core::DomainError;

/// Convert SQLx error to DomainError
///
/// Connectivity problems become `StoreUnavailable` so callers can retry;
/// a check violation means the caller bypassed entity validation.
pub fn map_db_error(e: SqlxError) -> DomainError {
    match &e {
        SqlxError::Database(db_err) => match db_err.kind() {
            ErrorKind::CheckViolation => DomainError::ValidationError(db_err.message().to_string()),
            _ => DomainError::InternalError(e.to_string()),
        },
        SqlxError::Decode(_) | SqlxError::ColumnDecode { .. } | SqlxError::ColumnNotFound(_) => {
            DomainError::InternalError(e.to_string())
        }
        _ => DomainError::StoreUnavailable(e.to_string()),
    }
}

/// A conflicting row vanished between the insert and the read-back
pub fn conflict_row_missing(table: &str) -> DomainError {
    DomainError::InternalError(format!("{table}: conflicting row not found after insert"))
}
