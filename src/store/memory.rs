//! In-memory storage adapter.
//!
//! This module provides the reference implementation of the
//! [`DataAdapter`](super::DataAdapter) contract. It keeps every collection
//! in process memory and is used as the default adapter and as the
//! correctness baseline in tests.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;
use uuid::Uuid;

use super::{AdapterOptions, DataAdapter};
use crate::error::{ModelError, Result, StoreError};
use crate::model::{Entity, Grant, Permission, Role};

/// An in-memory storage adapter.
pub struct MemoryAdapter {
    /// The construction-time options.
    options: AdapterOptions,

    /// Whether `connect()` has completed.
    connected: AtomicBool,

    /// The role collection.
    roles: RwLock<Vec<Role>>,

    /// The permission collection.
    permissions: RwLock<Vec<Permission>>,

    /// The grant collection.
    grants: RwLock<Vec<Grant>>,
}

impl MemoryAdapter {
    /// Create a new in-memory adapter.
    ///
    /// The backend discriminator in the options is forced to `"memory"`.
    pub fn new(options: AdapterOptions) -> Self {
        let mut options = options;
        options.kind = "memory".to_string();

        Self {
            options,
            connected: AtomicBool::new(false),
            roles: RwLock::new(Vec::new()),
            permissions: RwLock::new(Vec::new()),
            grants: RwLock::new(Vec::new()),
        }
    }

    /// The options this adapter was constructed with.
    pub fn options(&self) -> &AdapterOptions {
        &self.options
    }

    fn ensure_connected(&self) -> Result<()> {
        if !self.connected.load(Ordering::Acquire) {
            return Err(StoreError::NotConnected.into());
        }
        Ok(())
    }

    /// Check the record against the scoping filter.
    ///
    /// Filter values must be scalars; arrays and objects cannot be compared
    /// by attribute equality.
    fn matches_filter<T: Entity>(&self, record: &T) -> Result<bool> {
        if self.options.filter.is_empty() {
            return Ok(true);
        }

        let attributes = record.serialize();
        for (key, expected) in &self.options.filter {
            if expected.is_array() || expected.is_object() {
                return Err(ModelError::InvalidAttributeType(key.clone()).into());
            }
            if attributes.get(key) != Some(expected) {
                return Ok(false);
            }
        }

        Ok(true)
    }

    fn read_records<T: Entity + Clone>(&self, store: &RwLock<Vec<T>>) -> Result<Vec<T>> {
        self.ensure_connected()?;

        let records = store.read();
        let mut matched = Vec::with_capacity(records.len());
        for record in records.iter() {
            if self.matches_filter(record)? {
                matched.push(record.clone());
            }
        }

        Ok(matched)
    }

    fn create_record<T: Entity + Clone>(&self, mut entity: T, store: &RwLock<Vec<T>>) -> Result<T> {
        self.ensure_connected()?;

        let errors = entity.validate();
        if !errors.is_empty() {
            return Err(ModelError::Validation(errors).into());
        }

        if entity.id().is_none() {
            entity.set_id(Uuid::new_v4().to_string());
        }

        let mut records = store.write();
        if records.iter().any(|r| r.id() == entity.id()) {
            return Err(StoreError::UniqueConstraintViolation(format!(
                "id '{}' already exists",
                entity.id().unwrap_or_default()
            ))
            .into());
        }
        records.push(entity.clone());
        drop(records);

        debug!("created {} '{}'", T::KIND, entity.natural_key());
        Ok(entity)
    }

    fn update_record<T: Entity + Clone>(&self, entity: T, store: &RwLock<Vec<T>>) -> Result<T> {
        self.ensure_connected()?;

        let errors = entity.validate();
        if !errors.is_empty() {
            return Err(ModelError::Validation(errors).into());
        }

        let id = entity.id().ok_or_else(|| StoreError::DocumentNotFound {
            entity: T::KIND.to_string(),
            key: entity.natural_key(),
        })?;

        let mut records = store.write();
        let stored = records
            .iter_mut()
            .find(|r| r.id() == Some(id))
            .ok_or_else(|| StoreError::DocumentNotFound {
                entity: T::KIND.to_string(),
                key: id.to_string(),
            })?;
        *stored = entity.clone();
        drop(records);

        debug!("updated {} '{}'", T::KIND, entity.natural_key());
        Ok(entity)
    }

    fn remove_records<T: Entity + Clone>(&self, probe: &T, store: &RwLock<Vec<T>>) -> Result<usize> {
        self.ensure_connected()?;

        let key = probe.natural_key();
        let mut records = store.write();

        // Resolve which indices the natural key (plus the scoping filter)
        // targets before touching the collection.
        let mut targeted = Vec::new();
        for (index, record) in records.iter().enumerate() {
            if record.natural_key() == key && self.matches_filter(record)? {
                targeted.push(index);
            }
        }

        if targeted.is_empty() {
            return Err(StoreError::DocumentNotFound {
                entity: T::KIND.to_string(),
                key,
            }
            .into());
        }

        for index in targeted.iter().rev() {
            records.remove(*index);
        }
        drop(records);

        debug!("removed {} {} record(s) for '{}'", targeted.len(), T::KIND, key);
        Ok(targeted.len())
    }
}

impl Default for MemoryAdapter {
    fn default() -> Self {
        Self::new(AdapterOptions::default())
    }
}

#[async_trait]
impl DataAdapter for MemoryAdapter {
    async fn connect(&self) -> Result<()> {
        self.roles.write().clear();
        self.permissions.write().clear();
        self.grants.write().clear();

        self.prepare().await?;
        if self.options.migrate {
            self.migrate().await?;
        }

        self.connected.store(true, Ordering::Release);
        debug!("memory adapter connected");
        Ok(())
    }

    async fn prepare(&self) -> Result<()> {
        // Nothing to set up for an in-process store.
        Ok(())
    }

    async fn migrate(&self) -> Result<()> {
        // No schema to migrate for an in-process store.
        Ok(())
    }

    fn connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    async fn get_roles(&self) -> Result<Vec<Role>> {
        self.read_records(&self.roles)
    }

    async fn get_permissions(&self) -> Result<Vec<Permission>> {
        self.read_records(&self.permissions)
    }

    async fn get_grants(&self) -> Result<Vec<Grant>> {
        self.read_records(&self.grants)
    }

    async fn create_role(&self, role: Role) -> Result<Role> {
        self.create_record(role, &self.roles)
    }

    async fn create_permission(&self, permission: Permission) -> Result<Permission> {
        self.create_record(permission, &self.permissions)
    }

    async fn create_grant(&self, grant: Grant) -> Result<Grant> {
        self.create_record(grant, &self.grants)
    }

    async fn update_role(&self, role: Role) -> Result<Role> {
        self.update_record(role, &self.roles)
    }

    async fn update_permission(&self, permission: Permission) -> Result<Permission> {
        self.update_record(permission, &self.permissions)
    }

    async fn update_grant(&self, grant: Grant) -> Result<Grant> {
        self.update_record(grant, &self.grants)
    }

    async fn remove_role(&self, role: &Role) -> Result<usize> {
        self.remove_records(role, &self.roles)
    }

    async fn remove_permission(&self, permission: &Permission) -> Result<usize> {
        self.remove_records(permission, &self.permissions)
    }

    async fn remove_grant(&self, grant: &Grant) -> Result<usize> {
        self.remove_records(grant, &self.grants)
    }
}
