//! Error types for the permission control system.
//!
//! This module defines the error hierarchy used throughout the crate.
//! Errors are organized by subsystem: entity construction and validation
//! (`ModelError`), storage adapters (`StoreError`), and authorization
//! decisions (`AccessError`).
//!
//! The root error type, `Error`, can wrap any of the subsystem-specific
//! errors, allowing for uniform error handling at the top level. The core
//! performs no retries; every failure is surfaced to the caller as-is.

use crate::model::ValidationError;
use thiserror::Error;

/// Root error type for the permission control system.
#[derive(Debug, Error)]
pub enum Error {
    /// Entity construction and validation errors
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Storage adapter errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Authorization decision errors
    #[error("Access error: {0}")]
    Access(#[from] AccessError),
}

/// Errors related to entity construction and validation.
///
/// These are always caller bugs: malformed construction arguments or
/// records that fail field-level validation. They are never retried.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A required attribute was absent
    #[error("'{0}' attribute is missing")]
    MissingAttribute(String),

    /// An attribute was present but of the wrong type
    #[error("'{0}' attribute is wrong type")]
    InvalidAttributeType(String),

    /// Field-level validation failed; carries the full list of errors
    #[error("model validation failed: {}", format_validation_errors(.0))]
    Validation(Vec<ValidationError>),
}

/// Errors related to storage adapter operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No stored record matched the given key
    #[error("{entity} '{key}' not found")]
    DocumentNotFound {
        /// The entity collection that was searched
        entity: String,

        /// The key that failed to resolve
        key: String,
    },

    /// A record with the same identifier already exists
    #[error("unique constraint violated: {0}")]
    UniqueConstraintViolation(String),

    /// The adapter was used before `connect()` completed
    #[error("adapter is not connected")]
    NotConnected,
}

/// Errors raised by the `can()` decision procedure.
#[derive(Debug, Error)]
pub enum AccessError {
    /// The role key was present but semantically invalid (e.g. empty)
    #[error("role '{0}' is invalid")]
    InvalidRole(String),

    /// The permission key was present but semantically invalid (e.g. empty)
    #[error("permission '{0}' is invalid")]
    InvalidPermission(String),

    /// The role is absent from the current index
    #[error("role '{0}' not found")]
    RoleNotFound(String),

    /// The permission is absent from the current index
    #[error("permission '{0}' not found")]
    PermissionNotFound(String),
}

/// Result type used throughout the permission control system.
pub type Result<T> = std::result::Result<T, Error>;

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion() {
        let model_err = ModelError::MissingAttribute("name".to_string());
        let error: Error = model_err.into();
        assert!(matches!(error, Error::Model(_)));

        let store_err = StoreError::NotConnected;
        let error: Error = store_err.into();
        assert!(matches!(error, Error::Store(_)));

        let access_err = AccessError::RoleNotFound("admin".to_string());
        let error: Error = access_err.into();
        assert!(matches!(error, Error::Access(_)));
    }

    #[test]
    fn test_error_display() {
        let error: Error = AccessError::PermissionNotFound("delete-user".to_string()).into();
        let display = format!("{}", error);
        assert!(display.contains("permission 'delete-user' not found"));
    }

    #[test]
    fn test_validation_error_display() {
        let error = ModelError::Validation(vec![ValidationError::new(
            "name",
            "must not be empty",
        )]);
        let display = format!("{}", error);
        assert!(display.contains("name: must not be empty"));
    }
}
