//! The permission control engine.

use parking_lot::RwLock;
use tracing::debug;

use super::index::AccessIndex;
use crate::error::{AccessError, Result};
use crate::model::{Permission, Role, RoleIdentity};
use crate::store::DataAdapter;

/// The role argument accepted by [`PermissionControl::can`].
///
/// A role can be referenced by its plain name, by the entity itself, or by
/// an identity payload exposing a `role` field. All three forms resolve to
/// the same key and produce identical decisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleRef {
    /// A plain role name.
    Name(String),

    /// A role entity; the key is its name.
    Entity(Role),

    /// An identity payload; the key is its `role` field.
    Identity(RoleIdentity),
}

impl RoleRef {
    /// Resolve the role key.
    fn key(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Entity(role) => &role.name,
            Self::Identity(identity) => &identity.role,
        }
    }
}

impl From<&str> for RoleRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for RoleRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<Role> for RoleRef {
    fn from(role: Role) -> Self {
        Self::Entity(role)
    }
}

impl From<&Role> for RoleRef {
    fn from(role: &Role) -> Self {
        Self::Entity(role.clone())
    }
}

impl From<RoleIdentity> for RoleRef {
    fn from(identity: RoleIdentity) -> Self {
        Self::Identity(identity)
    }
}

impl From<&RoleIdentity> for RoleRef {
    fn from(identity: &RoleIdentity) -> Self {
        Self::Identity(identity.clone())
    }
}

/// The permission argument accepted by [`PermissionControl::can`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionRef {
    /// A plain permission name.
    Name(String),

    /// A permission entity; the key is its name.
    Entity(Permission),
}

impl PermissionRef {
    /// Resolve the permission key.
    fn key(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Entity(permission) => &permission.name,
        }
    }
}

impl From<&str> for PermissionRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for PermissionRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<Permission> for PermissionRef {
    fn from(permission: Permission) -> Self {
        Self::Entity(permission)
    }
}

impl From<&Permission> for PermissionRef {
    fn from(permission: &Permission) -> Self {
        Self::Entity(permission.clone())
    }
}

/// The permission resolution engine.
///
/// The engine snapshots the adapter's collections into a private index on
/// [`load()`](Self::load) and answers [`can()`](Self::can) queries against
/// that snapshot. It is read-only with respect to storage and holds no
/// locks across adapter I/O.
///
/// Before the first successful `load()` the index is empty, so every query
/// fails with a NotFound error rather than guessing.
pub struct PermissionControl<A> {
    /// The storage adapter entities are loaded from.
    adapter: A,

    /// The private index, replaced wholesale on every `load()`.
    index: RwLock<AccessIndex>,
}

impl<A> PermissionControl<A>
where
    A: DataAdapter,
{
    /// Create a new engine over a connected adapter.
    pub fn new(adapter: A) -> Self {
        Self {
            adapter,
            index: RwLock::new(AccessIndex::default()),
        }
    }

    /// The adapter this engine reads from.
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Snapshot the adapter's collections and replace the index.
    ///
    /// All three collections are fetched before the swap; the new index is
    /// built in locals and published with a single assignment, so a
    /// concurrent [`can()`](Self::can) observes either the fully-old or the
    /// fully-new index, never a partially rebuilt one. Re-invoking `load()`
    /// fully replaces prior decisions.
    pub async fn load(&self) -> Result<()> {
        let permissions = self.adapter.get_permissions().await?;
        let roles = self.adapter.get_roles().await?;
        let grants = self.adapter.get_grants().await?;

        let index = AccessIndex::build(&permissions, &roles, &grants);
        let (role_count, permission_count, granted_roles) = index.counts();
        *self.index.write() = index;

        debug!(
            "access index rebuilt: {} role(s), {} permission(s), {} role(s) with grants",
            role_count, permission_count, granted_roles
        );
        Ok(())
    }

    /// Decide whether the role holds the permission.
    ///
    /// Checks run in a fixed priority order so malformed input is rejected
    /// deterministically regardless of index contents: empty role key,
    /// empty permission key, unknown permission, unknown role. A known role
    /// with no grant for a known permission is an `Ok(false)` decision,
    /// never an error.
    ///
    /// # Arguments
    ///
    /// * `role` - A role name, a [`Role`], or a [`RoleIdentity`].
    /// * `permission` - A permission name or a [`Permission`].
    ///
    /// # Returns
    ///
    /// * `Ok(bool)` - Whether a grant exists for the pair.
    /// * `Err` - An [`AccessError`] naming the failed check.
    pub fn can(
        &self,
        role: impl Into<RoleRef>,
        permission: impl Into<PermissionRef>,
    ) -> Result<bool> {
        let role = role.into();
        let permission = permission.into();

        let role_key = role.key();
        if role_key.is_empty() {
            return Err(AccessError::InvalidRole(role_key.to_string()).into());
        }

        let permission_key = permission.key();
        if permission_key.is_empty() {
            return Err(AccessError::InvalidPermission(permission_key.to_string()).into());
        }

        let index = self.index.read();

        // Permission existence is checked before role existence; callers
        // rely on this priority order.
        if !index.has_permission(permission_key) {
            return Err(AccessError::PermissionNotFound(permission_key.to_string()).into());
        }

        if !index.has_role(role_key) {
            return Err(AccessError::RoleNotFound(role_key.to_string()).into());
        }

        Ok(index.is_granted(role_key, permission_key))
    }
}
