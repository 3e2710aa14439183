//! Role entity.

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;

use super::{Entity, Serializable, Validate, ValidationError};
use crate::error::{ModelError, Result};

/// An identifier for a party that may be granted access.
///
/// The name is the unique key within the role collection; the engine never
/// mutates a role once it has been loaded into the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// The storage identifier, assigned by an adapter on first create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The unique role name.
    pub name: String,
}

impl Role {
    /// Create a new role.
    ///
    /// # Arguments
    ///
    /// * `name` - The role name; must be non-empty.
    ///
    /// # Returns
    ///
    /// * `Ok(Role)` - The new role.
    /// * `Err` - `ModelError::MissingAttribute("name")` if the name is empty.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(ModelError::MissingAttribute("name".to_string()).into());
        }

        Ok(Self { id: None, name })
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Role '{}'", self.name)
    }
}

impl Validate for Role {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.name.is_empty() {
            errors.push(ValidationError::new("name", "must not be empty"));
        }

        errors
    }
}

impl Serializable for Role {
    fn serialize(&self) -> serde_json::Value {
        json!({ "name": self.name })
    }
}

impl Entity for Role {
    const KIND: &'static str = "Role";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn natural_key(&self) -> String {
        self.name.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_role_new() {
        let role = Role::new("admin").unwrap();
        assert_eq!(role.name, "admin");
        assert!(role.id.is_none());
        assert!(role.validate().is_empty());
    }

    #[test]
    fn test_role_new_empty_name() {
        let result = Role::new("");
        assert!(matches!(
            result,
            Err(Error::Model(ModelError::MissingAttribute(ref attr))) if attr == "name"
        ));
    }

    #[test]
    fn test_role_serialize() {
        let role = Role::new("admin").unwrap();
        assert_eq!(Serializable::serialize(&role), json!({ "name": "admin" }));
    }
}
