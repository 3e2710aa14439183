//! Entity model.
//!
//! This module defines the three record types the engine operates on:
//!
//! 1. **Role**: an identifier for a party that may be granted access.
//!
//! 2. **Permission**: a label for a protected capability.
//!
//! 3. **Grant**: the association between one role and one permission;
//!    its existence is what makes an authorization decision come out true.
//!
//! All entities expose a [`Validate`] capability producing structured
//! field-level errors (used by adapters before persisting) and a
//! [`Serializable`] capability producing a plain keyed representation of
//! their persisted attributes (used by adapters when writing to a backend).

mod grant;
mod permission;
mod role;

pub use grant::{Grant, RoleIdentity};
pub use permission::Permission;
pub use role::Role;

use serde::{Deserialize, Serialize};

/// A structured field-level validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// The name of the offending field.
    pub field: String,

    /// Human-readable description of the violation.
    pub message: String,
}

impl ValidationError {
    /// Create a new validation error for the given field.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Trait for entities that can report field-level validation errors.
///
/// Adapters call this before persisting; an empty list means the entity
/// is valid.
pub trait Validate {
    /// Validate the entity, returning every violation found.
    fn validate(&self) -> Vec<ValidationError>;
}

/// Trait for entities that can be reduced to a plain keyed representation
/// of their persisted attributes.
pub trait Serializable {
    /// Produce the attribute map written to a storage backend.
    fn serialize(&self) -> serde_json::Value;
}

/// Trait for entities stored through a [`DataAdapter`](crate::store::DataAdapter).
///
/// Storage assigns each record a unique identifier on first create; the
/// natural key used by removals is entity-specific (name for roles and
/// permissions, the (role, permission) name pair for grants).
pub trait Entity: Validate + Serializable {
    /// The collection name used in store diagnostics.
    const KIND: &'static str;

    /// The storage identifier, if one has been assigned.
    fn id(&self) -> Option<&str>;

    /// Assign a storage identifier.
    fn set_id(&mut self, id: String);

    /// The natural key used to locate this record for removal.
    fn natural_key(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_new() {
        let error = ValidationError::new("name", "must not be empty");
        assert_eq!(error.field, "name");
        assert_eq!(error.message, "must not be empty");
    }
}
