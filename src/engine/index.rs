//! Access index.
//!
//! The index is the engine's private snapshot of the adapter's contents:
//! the set of known role names, the set of known permission names, and the
//! role-to-permissions grant map. It is rebuilt from scratch on every
//! `load()` and replaced wholesale, never patched in place.

use std::collections::{HashMap, HashSet};

use crate::model::{Grant, Permission, Role};

/// A snapshot of roles, permissions, and grants, keyed by name.
#[derive(Debug, Default)]
pub(crate) struct AccessIndex {
    /// The set of known role names.
    roles: HashSet<String>,

    /// The set of known permission names.
    permissions: HashSet<String>,

    /// Role name to the set of permission names granted to that role.
    grant_map: HashMap<String, HashSet<String>>,
}

impl AccessIndex {
    /// Build an index from raw entity collections.
    ///
    /// Duplicate (role, permission) grants collapse via set semantics.
    pub fn build(permissions: &[Permission], roles: &[Role], grants: &[Grant]) -> Self {
        let permissions = permissions.iter().map(|p| p.name.clone()).collect();
        let roles = roles.iter().map(|r| r.name.clone()).collect();

        let mut grant_map: HashMap<String, HashSet<String>> = HashMap::new();
        for grant in grants {
            grant_map
                .entry(grant.role.name.clone())
                .or_default()
                .insert(grant.permission.name.clone());
        }

        Self {
            roles,
            permissions,
            grant_map,
        }
    }

    /// Whether the permission name is in the catalog.
    pub fn has_permission(&self, name: &str) -> bool {
        self.permissions.contains(name)
    }

    /// Whether the role name is known.
    pub fn has_role(&self, name: &str) -> bool {
        self.roles.contains(name)
    }

    /// Whether the role holds a grant for the permission.
    ///
    /// A role with no grant-map entry has the empty permission set.
    pub fn is_granted(&self, role: &str, permission: &str) -> bool {
        self.grant_map
            .get(role)
            .is_some_and(|permissions| permissions.contains(permission))
    }

    /// Collection sizes, for diagnostics.
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.roles.len(), self.permissions.len(), self.grant_map.len())
    }
}
