//! # Permission Control
//!
//! `permission_control` is an embeddable role-based access-control engine.
//! Given a role and a permission it decides whether access is granted,
//! based on Role/Permission/Grant records fetched from a pluggable storage
//! backend.
//!
//! Key concepts:
//!
//! 1. **Entity model**: [`Role`], [`Permission`], and [`Grant`] value
//!    objects; a grant is a flat (role, permission) pair with no
//!    inheritance.
//!
//! 2. **Storage adapter**: the [`DataAdapter`] contract any backend
//!    implements to provide CRUD access to the three collections plus a
//!    connect/prepare/migrate lifecycle. [`MemoryAdapter`] is the reference
//!    implementation.
//!
//! 3. **Permission control**: [`PermissionControl`] snapshots the adapter's
//!    collections into a private index on `load()` and answers
//!    `can(role, permission)` queries against that snapshot.
//!
//! ```
//! use permission_control::{
//!     AdapterOptions, DataAdapter, Grant, MemoryAdapter, Permission,
//!     PermissionControl, Role,
//! };
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> permission_control::Result<()> {
//! let adapter = MemoryAdapter::new(AdapterOptions::default());
//! adapter.connect().await?;
//!
//! let admin = adapter.create_role(Role::new("admin")?).await?;
//! let delete_user = adapter
//!     .create_permission(Permission::new("delete-user")?)
//!     .await?;
//! adapter
//!     .create_grant(Grant::new(admin, delete_user)?)
//!     .await?;
//!
//! let control = PermissionControl::new(adapter);
//! control.load().await?;
//!
//! assert!(control.can("admin", "delete-user")?);
//! # Ok(())
//! # }
//! ```

pub mod engine;
pub mod error;
pub mod model;
pub mod store;

// Re-export key types and traits for convenience
pub use engine::{PermissionControl, PermissionRef, RoleRef};
pub use error::{AccessError, Error, ModelError, Result, StoreError};
pub use model::{
    Entity, Grant, Permission, Role, RoleIdentity, Serializable, Validate, ValidationError,
};
pub use store::{AdapterOptions, DataAdapter, MemoryAdapter};
