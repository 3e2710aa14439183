//! Storage adapters.
//!
//! This module defines the contract any storage backend must satisfy to be
//! usable by the engine, together with the configuration options adapters
//! accept at construction. The reference in-memory implementation lives in
//! [`memory`].

mod memory;

pub use memory::MemoryAdapter;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::model::{Grant, Permission, Role};

/// Configuration options accepted by an adapter at construction.
///
/// Options deserialize with defaults applied, so a caller can supply only
/// the keys it cares about.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterOptions {
    /// Backend discriminator, informational only.
    #[serde(rename = "type")]
    pub kind: String,

    /// Whether `connect()` triggers `migrate()`.
    pub migrate: bool,

    /// Backend-specific connection parameters, opaque to the core.
    pub connection: Value,

    /// Attribute-equality scoping filter applied to every read and removal.
    ///
    /// When present, only records whose serialized attributes match all
    /// filter keys by equality are returned or targeted, so an adapter can
    /// be pinned to a subset of a shared backend.
    pub filter: Map<String, Value>,
}

impl AdapterOptions {
    /// Create options for the given backend kind with defaults applied.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// Disable or enable the `connect()` to `migrate()` hand-off.
    pub fn with_migrate(mut self, migrate: bool) -> Self {
        self.migrate = migrate;
        self
    }

    /// Set the attribute-equality scoping filter.
    pub fn with_filter(mut self, filter: Map<String, Value>) -> Self {
        self.filter = filter;
        self
    }
}

impl Default for AdapterOptions {
    fn default() -> Self {
        Self {
            kind: "abstract".to_string(),
            migrate: true,
            connection: Value::Null,
            filter: Map::new(),
        }
    }
}

/// Trait for storage backends.
///
/// An adapter provides CRUD access to the three entity collections plus a
/// connect/prepare/migrate lifecycle. The engine only ever reads through
/// this contract; all writes are driven by the embedding application.
///
/// Collection reads return the full current collection as an ordered
/// sequence; the ordering is not semantically significant to the engine.
#[async_trait]
pub trait DataAdapter: Send + Sync {
    /// Establish readiness: open storage, initialize internal stores, run
    /// [`prepare()`](Self::prepare), and run [`migrate()`](Self::migrate)
    /// unless the options disable it. Sets the `connected` flag on success.
    async fn connect(&self) -> Result<()>;

    /// Backend-specific setup invoked during connect (index creation,
    /// schema setup). A no-op is valid.
    async fn prepare(&self) -> Result<()>;

    /// Apply schema or data migrations. A no-op is valid for
    /// non-persistent backends.
    async fn migrate(&self) -> Result<()>;

    /// Whether [`connect()`](Self::connect) has completed successfully.
    fn connected(&self) -> bool;

    /// Get all roles.
    async fn get_roles(&self) -> Result<Vec<Role>>;

    /// Get all permissions.
    async fn get_permissions(&self) -> Result<Vec<Permission>>;

    /// Get all grants.
    async fn get_grants(&self) -> Result<Vec<Grant>>;

    /// Validate and persist a new role, assigning an identifier if it has
    /// none.
    ///
    /// # Returns
    ///
    /// * `Ok(Role)` - The persisted role, carrying its identifier.
    /// * `Err` - `ModelError::Validation` if the role is invalid, or
    ///   `StoreError::UniqueConstraintViolation` if its identifier is taken.
    async fn create_role(&self, role: Role) -> Result<Role>;

    /// Validate and persist a new permission. See
    /// [`create_role()`](Self::create_role) for the error contract.
    async fn create_permission(&self, permission: Permission) -> Result<Permission>;

    /// Validate and persist a new grant. See
    /// [`create_role()`](Self::create_role) for the error contract.
    async fn create_grant(&self, grant: Grant) -> Result<Grant>;

    /// Validate the role, locate the stored record by identifier, and merge
    /// the new attributes into it.
    ///
    /// # Returns
    ///
    /// * `Ok(Role)` - The updated role.
    /// * `Err` - `StoreError::DocumentNotFound` if no record carries the
    ///   role's identifier.
    async fn update_role(&self, role: Role) -> Result<Role>;

    /// Update a stored permission. See [`update_role()`](Self::update_role)
    /// for the error contract.
    async fn update_permission(&self, permission: Permission) -> Result<Permission>;

    /// Update a stored grant. See [`update_role()`](Self::update_role) for
    /// the error contract.
    async fn update_grant(&self, grant: Grant) -> Result<Grant>;

    /// Remove the role(s) matching the given role's name.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - The count of records removed.
    /// * `Err` - `StoreError::DocumentNotFound` if nothing matched.
    async fn remove_role(&self, role: &Role) -> Result<usize>;

    /// Remove the permission(s) matching the given permission's name. See
    /// [`remove_role()`](Self::remove_role) for the error contract.
    async fn remove_permission(&self, permission: &Permission) -> Result<usize>;

    /// Remove the grant(s) matching the given grant's (role name,
    /// permission name) pair. See [`remove_role()`](Self::remove_role) for
    /// the error contract.
    async fn remove_grant(&self, grant: &Grant) -> Result<usize>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_adapter_options_defaults() {
        let options = AdapterOptions::default();
        assert_eq!(options.kind, "abstract");
        assert!(options.migrate);
        assert!(options.connection.is_null());
        assert!(options.filter.is_empty());
    }

    #[test]
    fn test_adapter_options_deserialize() {
        let options: AdapterOptions = serde_json::from_value(json!({
            "type": "memory",
            "migrate": false,
            "connection": { "host": "localhost" },
            "filter": { "tenant": "acme" },
        }))
        .unwrap();

        assert_eq!(options.kind, "memory");
        assert!(!options.migrate);
        assert_eq!(options.connection["host"], "localhost");
        assert_eq!(options.filter["tenant"], "acme");
    }

    #[test]
    fn test_adapter_options_deserialize_partial() {
        let options: AdapterOptions = serde_json::from_value(json!({ "type": "memory" })).unwrap();
        assert_eq!(options.kind, "memory");
        assert!(options.migrate);
        assert!(options.filter.is_empty());
    }

    #[test]
    fn test_adapter_options_builders() {
        let mut filter = Map::new();
        filter.insert("name".to_string(), json!("admin"));

        let options = AdapterOptions::new("memory")
            .with_migrate(false)
            .with_filter(filter);

        assert_eq!(options.kind, "memory");
        assert!(!options.migrate);
        assert_eq!(options.filter["name"], "admin");
    }
}
