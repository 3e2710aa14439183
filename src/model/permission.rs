//! Permission entity.

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;

use super::{Entity, Serializable, Validate, ValidationError};
use crate::error::{ModelError, Result};

/// A label for a protected capability.
///
/// The name is the unique key within the permission collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// The storage identifier, assigned by an adapter on first create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The unique permission name.
    pub name: String,
}

impl Permission {
    /// Create a new permission.
    ///
    /// # Arguments
    ///
    /// * `name` - The permission name; must be non-empty.
    ///
    /// # Returns
    ///
    /// * `Ok(Permission)` - The new permission.
    /// * `Err` - `ModelError::MissingAttribute("name")` if the name is empty.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(ModelError::MissingAttribute("name".to_string()).into());
        }

        Ok(Self { id: None, name })
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Permission '{}'", self.name)
    }
}

impl Validate for Permission {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.name.is_empty() {
            errors.push(ValidationError::new("name", "must not be empty"));
        }

        errors
    }
}

impl Serializable for Permission {
    fn serialize(&self) -> serde_json::Value {
        json!({ "name": self.name })
    }
}

impl Entity for Permission {
    const KIND: &'static str = "Permission";

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
    fn test_permission_new() {
        let permission = Permission::new("delete-user").unwrap();
        assert_eq!(permission.name, "delete-user");
        assert!(permission.id.is_none());
        assert!(permission.validate().is_empty());
    }

    #[test]
    fn test_permission_new_empty_name() {
        let result = Permission::new("");
        assert!(matches!(
            result,
            Err(Error::Model(ModelError::MissingAttribute(ref attr))) if attr == "name"
        ));
    }

    #[test]
    fn test_permission_serialize() {
        let permission = Permission::new("delete-user").unwrap();
        assert_eq!(
            Serializable::serialize(&permission),
            json!({ "name": "delete-user" })
        );
    }
}
