//! Permission resolution engine.
//!
//! This module provides the decision core: [`PermissionControl`] loads
//! entities from a storage adapter, builds a private index over them, and
//! answers `can(role, permission)` queries against that snapshot.

mod control;
mod index;

pub use control::{PermissionControl, PermissionRef, RoleRef};
