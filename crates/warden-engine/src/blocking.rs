//! Blocking facade over the async engine
//!
//! Each facade owns a single-threaded Tokio runtime and drives the async
//! API to completion, for callers without an executor of their own. The
//! behavior is identical to the async engine method for method.

use std::sync::Arc;

use tokio::runtime::{Builder, Runtime};
use warden_core::{AclError, AclResult, Resource, Role};
use warden_store::AclStore;

use crate::engine::{self, UserWithRoles};

/// Blocking counterpart of [`crate::AclEngine`].
///
/// Do not construct or call this inside an async context; the wrapper
/// blocks its thread while the wrapped call runs.
#[derive(Debug)]
pub struct AclEngine {
    inner: engine::AclEngine,
    runtime: Runtime,
}

impl AclEngine {
    /// Create a blocking engine over the given store.
    ///
    /// # Errors
    ///
    /// `Internal` when the runtime cannot be created.
    pub fn new(store: Arc<dyn AclStore>) -> AclResult<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| AclError::Internal(format!("Failed to build runtime: {e}")))?;
        Ok(Self {
            inner: engine::AclEngine::new(store),
            runtime,
        })
    }

    /// Close the engine.
    pub fn close(&self) {
        self.inner.close();
    }

    /// Check whether the engine has been closed.
    pub fn is_closed(&self) -> bool {
        self.inner.is_closed()
    }

    /// Insert or replace a role grant.
    pub fn allow(&self, role: Role) -> AclResult<Role> {
        self.runtime.block_on(self.inner.allow(role))
    }

    /// Insert or replace several role grants.
    pub fn allow_all(&self, roles: Vec<Role>) -> AclResult<Vec<Role>> {
        self.runtime.block_on(self.inner.allow_all(roles))
    }

    /// Grant `resources` under a role with the given name.
    pub fn allow_named(&self, role_name: &str, resources: Vec<Resource>) -> AclResult<Role> {
        self.runtime
            .block_on(self.inner.allow_named(role_name, resources))
    }

    /// Delete a role grant entirely.
    pub fn remove_allow(&self, role_name: &str) -> AclResult<()> {
        self.runtime.block_on(self.inner.remove_allow(role_name))
    }

    /// Remove the named resources from a role.
    pub fn remove_allow_resources(
        &self,
        role_name: &str,
        resource_names: &[String],
    ) -> AclResult<Role> {
        self.runtime
            .block_on(self.inner.remove_allow_resources(role_name, resource_names))
    }

    /// Remove the named permissions from a role's remaining resources.
    pub fn remove_allow_permissions(
        &self,
        role_name: &str,
        resource_names: &[String],
        permission_names: &[String],
    ) -> AclResult<Role> {
        self.runtime.block_on(self.inner.remove_allow_permissions(
            role_name,
            resource_names,
            permission_names,
        ))
    }

    /// Remove every resource with the given name, across all roles.
    pub fn remove_resource(&self, resource_name: &str) -> AclResult<()> {
        self.runtime
            .block_on(self.inner.remove_resource(resource_name))
    }

    /// Remove every permission with the given name, across all roles.
    pub fn remove_permission(&self, permission_name: &str) -> AclResult<()> {
        self.runtime
            .block_on(self.inner.remove_permission(permission_name))
    }

    /// Add parent roles to a role.
    pub fn add_role_parents(&self, role_name: &str, parents: &[String]) -> AclResult<Role> {
        self.runtime
            .block_on(self.inner.add_role_parents(role_name, parents))
    }

    /// Add a single parent role.
    pub fn add_role_parent(&self, role_name: &str, parent: &str) -> AclResult<Role> {
        self.runtime
            .block_on(self.inner.add_role_parent(role_name, parent))
    }

    /// Remove parent roles from a role.
    pub fn remove_role_parents(&self, role_name: &str, parents: &[String]) -> AclResult<Role> {
        self.runtime
            .block_on(self.inner.remove_role_parents(role_name, parents))
    }

    /// Remove a single parent role.
    pub fn remove_role_parent(&self, role_name: &str, parent: &str) -> AclResult<Role> {
        self.runtime
            .block_on(self.inner.remove_role_parent(role_name, parent))
    }

    /// Assign a role to a user by name.
    pub fn add_user_role(&self, user_id: &str, role_name: &str) -> AclResult<()> {
        self.runtime
            .block_on(self.inner.add_user_role(user_id, role_name))
    }

    /// Assign several roles to a user by name.
    pub fn add_user_roles(&self, user_id: &str, role_names: &[String]) -> AclResult<()> {
        self.runtime
            .block_on(self.inner.add_user_roles(user_id, role_names))
    }

    /// Define (or redefine) a role and assign it to a user.
    pub fn grant_user_role(&self, user_id: &str, role: Role) -> AclResult<()> {
        self.runtime
            .block_on(self.inner.grant_user_role(user_id, role))
    }

    /// Define and assign several roles.
    pub fn grant_user_roles(&self, user_id: &str, roles: Vec<Role>) -> AclResult<()> {
        self.runtime
            .block_on(self.inner.grant_user_roles(user_id, roles))
    }

    /// Remove a role assignment from a user.
    pub fn remove_user_role(&self, user_id: &str, role_name: &str) -> AclResult<()> {
        self.runtime
            .block_on(self.inner.remove_user_role(user_id, role_name))
    }

    /// Resolve every role assigned to a user.
    pub fn user_roles(&self, user_id: &str) -> AclResult<Vec<Role>> {
        self.runtime.block_on(self.inner.user_roles(user_id))
    }

    /// Check whether a user directly carries a role name.
    pub fn user_has_role(&self, user_id: &str, role_name: &str) -> AclResult<bool> {
        self.runtime
            .block_on(self.inner.user_has_role(user_id, role_name))
    }

    /// Users directly carrying a role, with their role lists resolved.
    pub fn role_users(&self, role_name: &str) -> AclResult<Vec<UserWithRoles>> {
        self.runtime.block_on(self.inner.role_users(role_name))
    }

    /// Effective permission names a user holds on a resource.
    pub fn allowed_permissions(&self, user_id: &str, resource_name: &str) -> AclResult<Vec<String>> {
        self.runtime
            .block_on(self.inner.allowed_permissions(user_id, resource_name))
    }

    /// Check whether a user holds a permission on a resource.
    pub fn is_allowed(
        &self,
        user_id: &str,
        resource_name: &str,
        permission_name: &str,
    ) -> AclResult<bool> {
        self.runtime
            .block_on(self.inner.is_allowed(user_id, resource_name, permission_name))
    }

    /// Check whether a user holds every permission carried by `resource`.
    pub fn is_allowed_all(&self, user_id: &str, resource: &Resource) -> AclResult<bool> {
        self.runtime
            .block_on(self.inner.is_allowed_all(user_id, resource))
    }

    /// Check a role's own resource list for a permission.
    pub fn is_role_allowed(
        &self,
        role_name: &str,
        resource_name: &str,
        permission_name: &str,
    ) -> AclResult<bool> {
        self.runtime.block_on(self.inner.is_role_allowed(
            role_name,
            resource_name,
            permission_name,
        ))
    }

    /// Check a role's own matching resource for every permission carried
    /// by `resource`.
    pub fn is_role_allowed_all(&self, role_name: &str, resource: &Resource) -> AclResult<bool> {
        self.runtime
            .block_on(self.inner.is_role_allowed_all(role_name, resource))
    }

    /// Effective permission names a role holds on a resource.
    pub fn role_allowed_permissions(
        &self,
        role_name: &str,
        resource_name: &str,
    ) -> AclResult<Vec<String>> {
        self.runtime
            .block_on(self.inner.role_allowed_permissions(role_name, resource_name))
    }

    /// Every resource with the given name, across all roles.
    pub fn resources_named(&self, resource_name: &str) -> AclResult<Vec<Resource>> {
        self.runtime
            .block_on(self.inner.resources_named(resource_name))
    }
}
