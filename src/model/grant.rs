//! Grant entity.

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;

use super::{Entity, Permission, Role, Serializable, Validate, ValidationError};
use crate::error::{ModelError, Result};

/// The association between one role and one permission.
///
/// A grant is an edge in the bipartite role-to-permission graph; if one
/// exists, access is granted. Duplicate (role, permission) grants are
/// permitted at the storage layer and collapse to a single edge in the
/// engine index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grant {
    /// The storage identifier, assigned by an adapter on first create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The role endpoint.
    pub role: Role,

    /// The permission endpoint.
    pub permission: Permission,
}

impl Grant {
    /// Create a new grant.
    ///
    /// Both endpoints must carry a non-empty name; the role endpoint is
    /// checked first. Endpoints of the wrong entity type cannot be
    /// expressed in the signature, so that class of construction error is
    /// rejected at compile time.
    ///
    /// # Arguments
    ///
    /// * `role` - The role endpoint.
    /// * `permission` - The permission endpoint.
    ///
    /// # Returns
    ///
    /// * `Ok(Grant)` - The new grant.
    /// * `Err` - `ModelError::MissingAttribute` naming the offending field.
    pub fn new(role: Role, permission: Permission) -> Result<Self> {
        if role.name.is_empty() {
            return Err(ModelError::MissingAttribute("role".to_string()).into());
        }
        if permission.name.is_empty() {
            return Err(ModelError::MissingAttribute("permission".to_string()).into());
        }

        Ok(Self {
            id: None,
            role,
            permission,
        })
    }
}

impl fmt::Display for Grant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Grant '{}' -> '{}'",
            self.role.name, self.permission.name
        )
    }
}

impl Validate for Grant {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.role.name.is_empty() {
            errors.push(ValidationError::new("role", "must not be empty"));
        }
        if self.permission.name.is_empty() {
            errors.push(ValidationError::new("permission", "must not be empty"));
        }

        errors
    }
}

impl Serializable for Grant {
    fn serialize(&self) -> serde_json::Value {
        json!({
            "role": self.role.name,
            "permission": self.permission.name,
        })
    }
}

impl Entity for Grant {
    const KIND: &'static str = "Grant";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn natural_key(&self) -> String {
        format!("{}:{}", self.role.name, self.permission.name)
    }
}

/// A role carried inside a larger identity payload.
///
/// Callers that hold an authenticated principal (a session record, a token
/// claim set) can pass it to [`can()`](crate::engine::PermissionControl::can)
/// directly instead of extracting the role name first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleIdentity {
    /// The role name this identity resolves to.
    pub role: String,
}

impl RoleIdentity {
    /// Create a new role identity.
    pub fn new(role: impl Into<String>) -> Self {
        Self { role: role.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn endpoints() -> (Role, Permission) {
        (
            Role::new("admin").unwrap(),
            Permission::new("delete-user").unwrap(),
        )
    }

    #[test]
    fn test_grant_new() {
        let (role, permission) = endpoints();
        let grant = Grant::new(role, permission).unwrap();
        assert_eq!(grant.role.name, "admin");
        assert_eq!(grant.permission.name, "delete-user");
        assert!(grant.validate().is_empty());
    }

    #[test]
    fn test_grant_new_empty_role() {
        let (mut role, permission) = endpoints();
        role.name.clear();
        let result = Grant::new(role, permission);
        assert!(matches!(
            result,
            Err(Error::Model(ModelError::MissingAttribute(ref attr))) if attr == "role"
        ));
    }

    #[test]
    fn test_grant_new_empty_permission() {
        let (role, mut permission) = endpoints();
        permission.name.clear();
        let result = Grant::new(role, permission);
        assert!(matches!(
            result,
            Err(Error::Model(ModelError::MissingAttribute(ref attr))) if attr == "permission"
        ));
    }

    #[test]
    fn test_grant_checks_role_before_permission() {
        let (mut role, mut permission) = endpoints();
        role.name.clear();
        permission.name.clear();
        let result = Grant::new(role, permission);
        assert!(matches!(
            result,
            Err(Error::Model(ModelError::MissingAttribute(ref attr))) if attr == "role"
        ));
    }

    #[test]
    fn test_grant_serialize() {
        let (role, permission) = endpoints();
        let grant = Grant::new(role, permission).unwrap();
        assert_eq!(
            Serializable::serialize(&grant),
            json!({ "role": "admin", "permission": "delete-user" })
        );
    }

    #[test]
    fn test_grant_validate_collects_all_errors() {
        let (mut role, mut permission) = endpoints();
        role.name.clear();
        permission.name.clear();
        let grant = Grant {
            id: None,
            role,
            permission,
        };
        let errors = grant.validate();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "role");
        assert_eq!(errors[1].field, "permission");
    }
}
