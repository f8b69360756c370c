//! Authorization engine
//!
//! This module provides the public grant, revoke, assignment, and query
//! surface over a pluggable store. The engine holds no state beyond the
//! store handle and a closed flag; every check recomputes from the
//! store.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;
use warden_core::{AclError, AclResult, Resource, Role, User};
use warden_store::AclStore;

use crate::resolver::HierarchyResolver;

/// A user together with their fully resolved role list.
///
/// Returned by [`AclEngine::role_users`], where callers want the role
/// objects and not just the carried names.
#[derive(Debug, Clone)]
pub struct UserWithRoles {
    /// The user record
    pub user: User,

    /// Each carried role name resolved to its role, in carry order
    pub roles: Vec<Role>,
}

/// Authorization engine over a pluggable store.
///
/// User-level permission queries walk the role-inheritance graph; the
/// role-level `is_role_allowed*` checks deliberately do not, inspecting
/// only the role's own resource list. Use
/// [`role_allowed_permissions`](AclEngine::role_allowed_permissions) for
/// the hierarchy-aware role view.
///
/// Cloning shares the store handle and the closed flag. After
/// [`close`](AclEngine::close), every operation fails with
/// [`AclError::EngineClosed`].
#[derive(Clone)]
pub struct AclEngine {
    store: Arc<dyn AclStore>,
    closed: Arc<AtomicBool>,
}

impl std::fmt::Debug for AclEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AclEngine")
            .field("closed", &self.closed.load(Ordering::Relaxed))
            .finish()
    }
}

impl AclEngine {
    /// Create a new engine over the given store.
    pub fn new(store: Arc<dyn AclStore>) -> Self {
        Self {
            store,
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Close the engine.
    ///
    /// Subsequent operations fail with [`AclError::EngineClosed`]. The
    /// store itself is not touched; other holders of the store handle
    /// are unaffected.
    pub fn close(&self) {
        self.closed.store(true, Ordering::Relaxed);
        debug!("Engine closed");
    }

    /// Check whether the engine has been closed.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Relaxed)
    }

    fn ensure_open(&self) -> AclResult<()> {
        if self.is_closed() {
            return Err(AclError::EngineClosed);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Grant operations
    // ------------------------------------------------------------------

    /// Insert or replace a role grant.
    ///
    /// Roles are keyed by name: an existing role with the same name is
    /// replaced wholesale, including its resource and parent lists.
    pub async fn allow(&self, role: Role) -> AclResult<Role> {
        self.ensure_open()?;
        let role = self.store.upsert_role(role).await?;
        debug!(role = %role.name, resources = role.resources.len(), "Role granted");
        Ok(role)
    }

    /// Insert or replace several role grants, preserving input order in
    /// the result.
    ///
    /// Not transactional: earlier grants stay applied when a later one
    /// fails.
    pub async fn allow_all(&self, roles: Vec<Role>) -> AclResult<Vec<Role>> {
        self.ensure_open()?;
        let mut granted = Vec::with_capacity(roles.len());
        for role in roles {
            granted.push(self.allow(role).await?);
        }
        Ok(granted)
    }

    /// Grant `resources` under a role with the given name.
    ///
    /// Builds a fresh role and applies [`allow`](AclEngine::allow), so
    /// an existing role with this name is replaced.
    pub async fn allow_named(&self, role_name: &str, resources: Vec<Resource>) -> AclResult<Role> {
        self.ensure_open()?;
        self.allow(Role::new(role_name).with_resources(resources))
            .await
    }

    // ------------------------------------------------------------------
    // Revoke operations
    // ------------------------------------------------------------------

    /// Delete a role grant entirely.
    ///
    /// # Errors
    ///
    /// `RoleNotFound` when no role with this name exists.
    pub async fn remove_allow(&self, role_name: &str) -> AclResult<()> {
        self.ensure_open()?;
        if !self.store.delete_role(role_name).await? {
            return Err(AclError::RoleNotFound(role_name.to_string()));
        }
        debug!(role = %role_name, "Role revoked");
        Ok(())
    }

    /// Remove the named resources from a role.
    ///
    /// An empty `resource_names` list leaves the role's resources
    /// untouched.
    pub async fn remove_allow_resources(
        &self,
        role_name: &str,
        resource_names: &[String],
    ) -> AclResult<Role> {
        self.ensure_open()?;
        let mut role = self.require_role(role_name).await?;
        if !resource_names.is_empty() {
            role.resources.retain(|r| !resource_names.contains(&r.name));
        }
        let role = self.store.upsert_role(role).await?;
        debug!(role = %role.name, "Resources revoked");
        Ok(role)
    }

    /// Remove the named permissions from a role's remaining resources.
    ///
    /// The named resources are dropped first; the permission strip then
    /// applies to every resource still owned by the role.
    pub async fn remove_allow_permissions(
        &self,
        role_name: &str,
        resource_names: &[String],
        permission_names: &[String],
    ) -> AclResult<Role> {
        self.ensure_open()?;
        let mut role = self.require_role(role_name).await?;
        if !resource_names.is_empty() {
            role.resources.retain(|r| !resource_names.contains(&r.name));
        }
        for resource in &mut role.resources {
            resource
                .permissions
                .retain(|p| !permission_names.contains(&p.name));
        }
        let role = self.store.upsert_role(role).await?;
        debug!(role = %role.name, "Permissions revoked");
        Ok(role)
    }

    /// Remove every resource with the given name, across all roles.
    ///
    /// Resource names are not globally unique, so this scans the whole
    /// role set. Roles that do not own a matching resource are left
    /// untouched; removing a name nothing owns is a no-op.
    pub async fn remove_resource(&self, resource_name: &str) -> AclResult<()> {
        self.ensure_open()?;
        for mut role in self.store.list_roles().await? {
            let before = role.resources.len();
            role.resources.retain(|r| r.name != resource_name);
            if role.resources.len() != before {
                self.store.upsert_role(role).await?;
            }
        }
        debug!(resource = %resource_name, "Resource removed from all roles");
        Ok(())
    }

    /// Remove every permission with the given name, across all resources
    /// of all roles.
    pub async fn remove_permission(&self, permission_name: &str) -> AclResult<()> {
        self.ensure_open()?;
        for mut role in self.store.list_roles().await? {
            let mut changed = false;
            for resource in &mut role.resources {
                let before = resource.permissions.len();
                resource.permissions.retain(|p| p.name != permission_name);
                changed |= resource.permissions.len() != before;
            }
            if changed {
                self.store.upsert_role(role).await?;
            }
        }
        debug!(permission = %permission_name, "Permission removed from all resources");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Role hierarchy mutation
    // ------------------------------------------------------------------

    /// Add parent roles to a role.
    ///
    /// Every parent must already exist; the call fails before any change
    /// when one does not. Parent names merge into the existing list with
    /// first-seen-order deduplication.
    ///
    /// # Errors
    ///
    /// `RoleNotFound` when the role is missing; `RoleParentNotFound`
    /// naming the first parent that does not resolve.
    pub async fn add_role_parents(&self, role_name: &str, parents: &[String]) -> AclResult<Role> {
        self.ensure_open()?;
        let mut role = self.require_role(role_name).await?;
        for parent in parents {
            if self.store.find_role(parent).await?.is_none() {
                return Err(AclError::RoleParentNotFound(parent.clone()));
            }
        }
        role.merge_parents(parents);
        let role = self.store.upsert_role(role).await?;
        debug!(role = %role.name, parents = role.parents.len(), "Role parents added");
        Ok(role)
    }

    /// Add a single parent role.
    pub async fn add_role_parent(&self, role_name: &str, parent: &str) -> AclResult<Role> {
        self.add_role_parents(role_name, &[parent.to_string()]).await
    }

    /// Remove parent roles from a role.
    ///
    /// Parent names not on the role are ignored.
    pub async fn remove_role_parents(
        &self,
        role_name: &str,
        parents: &[String],
    ) -> AclResult<Role> {
        self.ensure_open()?;
        let mut role = self.require_role(role_name).await?;
        role.remove_parents(parents);
        let role = self.store.upsert_role(role).await?;
        debug!(role = %role.name, parents = role.parents.len(), "Role parents removed");
        Ok(role)
    }

    /// Remove a single parent role.
    pub async fn remove_role_parent(&self, role_name: &str, parent: &str) -> AclResult<Role> {
        self.remove_role_parents(role_name, &[parent.to_string()])
            .await
    }

    // ------------------------------------------------------------------
    // User-role assignment
    // ------------------------------------------------------------------

    /// Assign a role to a user by name.
    ///
    /// The user record is created on first assignment. Assignment is
    /// append-only: assigning the same role twice leaves two entries on
    /// the user.
    ///
    /// # Errors
    ///
    /// `RoleNotFound` when the role does not exist; `InvalidArgument`
    /// when `user_id` is empty.
    pub async fn add_user_role(&self, user_id: &str, role_name: &str) -> AclResult<()> {
        self.ensure_open()?;
        if user_id.is_empty() {
            return Err(AclError::InvalidArgument(
                "user id must be non-empty".to_string(),
            ));
        }
        self.require_role(role_name).await?;
        let user = match self.store.find_user(user_id).await? {
            Some(mut user) => {
                user.add_role(role_name);
                user
            }
            None => User::new(user_id).with_roles(vec![role_name.to_string()]),
        };
        self.store.upsert_user(user).await?;
        debug!(user = %user_id, role = %role_name, "Role assigned");
        Ok(())
    }

    /// Assign several roles to a user by name, one at a time.
    ///
    /// Not transactional: earlier assignments stay applied when a later
    /// one fails.
    pub async fn add_user_roles(&self, user_id: &str, role_names: &[String]) -> AclResult<()> {
        self.ensure_open()?;
        for role_name in role_names {
            self.add_user_role(user_id, role_name).await?;
        }
        Ok(())
    }

    /// Define (or redefine) a role and assign it to a user.
    ///
    /// The role is upserted via [`allow`](AclEngine::allow) first, so
    /// granting also replaces the role's resource set.
    pub async fn grant_user_role(&self, user_id: &str, role: Role) -> AclResult<()> {
        self.ensure_open()?;
        let role_name = role.name.clone();
        self.allow(role).await?;
        self.add_user_role(user_id, &role_name).await
    }

    /// Define and assign several roles, one at a time.
    pub async fn grant_user_roles(&self, user_id: &str, roles: Vec<Role>) -> AclResult<()> {
        self.ensure_open()?;
        for role in roles {
            self.grant_user_role(user_id, role).await?;
        }
        Ok(())
    }

    /// Remove a role assignment from a user.
    ///
    /// Only the first occurrence of the name is removed; a user assigned
    /// the same role twice keeps one entry. Removing a role the user
    /// does not carry is a no-op.
    ///
    /// # Errors
    ///
    /// `RoleNotFound` when the role name does not exist at all, then
    /// `UserNotFound` when the user is unknown.
    pub async fn remove_user_role(&self, user_id: &str, role_name: &str) -> AclResult<()> {
        self.ensure_open()?;
        self.require_role(role_name).await?;
        let mut user = self.require_user(user_id).await?;
        user.remove_role(role_name);
        self.store.upsert_user(user).await?;
        debug!(user = %user_id, role = %role_name, "Role unassigned");
        Ok(())
    }

    /// Resolve every role assigned to a user, in carry order.
    ///
    /// # Errors
    ///
    /// `UserNotFound` when the user is unknown; `RoleNotFound` when any
    /// carried name no longer resolves.
    pub async fn user_roles(&self, user_id: &str) -> AclResult<Vec<Role>> {
        self.ensure_open()?;
        let user = self.require_user(user_id).await?;
        self.resolve_role_names(&user.roles).await
    }

    /// Check whether a user directly carries a role name.
    ///
    /// This is a raw membership test on the assignment list; inherited
    /// roles are not considered.
    ///
    /// # Errors
    ///
    /// `UserNotFound` when the user is unknown.
    pub async fn user_has_role(&self, user_id: &str, role_name: &str) -> AclResult<bool> {
        self.ensure_open()?;
        let user = self.require_user(user_id).await?;
        Ok(user.has_role(role_name))
    }

    /// Users directly carrying a role, each with their full role list
    /// resolved.
    ///
    /// A role name nobody carries yields an empty list.
    pub async fn role_users(&self, role_name: &str) -> AclResult<Vec<UserWithRoles>> {
        self.ensure_open()?;
        let users = self.store.users_with_role(role_name).await?;
        let mut resolved = Vec::with_capacity(users.len());
        for user in users {
            let roles = self.resolve_role_names(&user.roles).await?;
            resolved.push(UserWithRoles { user, roles });
        }
        Ok(resolved)
    }

    // ------------------------------------------------------------------
    // Permission queries
    // ------------------------------------------------------------------

    /// Effective permission names a user holds on a resource.
    ///
    /// Walks every assigned role and its ancestors, gathers every
    /// reachable resource named `resource_name` (same-named resources
    /// from disjoint roles all count), and unions their permission
    /// names. First-seen order is preserved and duplicates collapse;
    /// callers asserting equality should sort.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` on empty arguments, `UserNotFound` for an
    /// unknown user, `RoleNotFound` for stale role references.
    pub async fn allowed_permissions(
        &self,
        user_id: &str,
        resource_name: &str,
    ) -> AclResult<Vec<String>> {
        self.ensure_open()?;
        if user_id.is_empty() || resource_name.is_empty() {
            return Err(AclError::InvalidArgument(
                "user id and resource name must be non-empty".to_string(),
            ));
        }

        let roles = self.user_roles(user_id).await?;
        let resolver = HierarchyResolver::new(self.store.as_ref());

        let mut seen: HashSet<String> = HashSet::new();
        let mut permissions: Vec<String> = Vec::new();
        for role in roles {
            for resource in resolver.collect_from(role).await? {
                if resource.name != resource_name {
                    continue;
                }
                for permission in resource.permissions {
                    if seen.insert(permission.name.clone()) {
                        permissions.push(permission.name);
                    }
                }
            }
        }
        Ok(permissions)
    }

    /// Check whether a user holds a permission on a resource.
    pub async fn is_allowed(
        &self,
        user_id: &str,
        resource_name: &str,
        permission_name: &str,
    ) -> AclResult<bool> {
        self.ensure_open()?;
        let permissions = self.allowed_permissions(user_id, resource_name).await?;
        Ok(permissions.iter().any(|p| p == permission_name))
    }

    /// Check whether a user holds every permission carried by `resource`.
    ///
    /// This is an AND over the resource object's own permission list; a
    /// resource carrying no permissions is trivially allowed.
    pub async fn is_allowed_all(&self, user_id: &str, resource: &Resource) -> AclResult<bool> {
        self.ensure_open()?;
        let permissions = self.allowed_permissions(user_id, &resource.name).await?;
        Ok(resource
            .permissions
            .iter()
            .all(|p| permissions.contains(&p.name)))
    }

    /// Check a role's own resource list for a permission.
    ///
    /// Parent roles are deliberately not consulted, and only the first
    /// same-named resource on the role is inspected. Use
    /// [`role_allowed_permissions`](AclEngine::role_allowed_permissions)
    /// for the hierarchy-aware view.
    ///
    /// # Errors
    ///
    /// `RoleNotFound` when the role is missing.
    pub async fn is_role_allowed(
        &self,
        role_name: &str,
        resource_name: &str,
        permission_name: &str,
    ) -> AclResult<bool> {
        self.ensure_open()?;
        let role = self.require_role(role_name).await?;
        Ok(role
            .resource(resource_name)
            .map(|r| r.has_permission(permission_name))
            .unwrap_or(false))
    }

    /// Check a role's own matching resource for every permission carried
    /// by `resource`.
    ///
    /// Non-recursive, like [`is_role_allowed`](AclEngine::is_role_allowed).
    pub async fn is_role_allowed_all(
        &self,
        role_name: &str,
        resource: &Resource,
    ) -> AclResult<bool> {
        self.ensure_open()?;
        let role = self.require_role(role_name).await?;
        let owned = match role.resource(&resource.name) {
            Some(owned) => owned,
            None => return Ok(false),
        };
        Ok(resource
            .permissions
            .iter()
            .all(|p| owned.has_permission(&p.name)))
    }

    /// Effective permission names a role holds on a resource, including
    /// everything inherited from ancestors.
    ///
    /// The hierarchy-aware counterpart to
    /// [`is_role_allowed`](AclEngine::is_role_allowed), so callers choose
    /// direct or effective scope explicitly.
    pub async fn role_allowed_permissions(
        &self,
        role_name: &str,
        resource_name: &str,
    ) -> AclResult<Vec<String>> {
        self.ensure_open()?;
        let resolver = HierarchyResolver::new(self.store.as_ref());

        let mut seen: HashSet<String> = HashSet::new();
        let mut permissions: Vec<String> = Vec::new();
        for resource in resolver.collect_resources(role_name).await? {
            if resource.name != resource_name {
                continue;
            }
            for permission in resource.permissions {
                if seen.insert(permission.name.clone()) {
                    permissions.push(permission.name);
                }
            }
        }
        Ok(permissions)
    }

    /// Every resource with the given name, across all roles.
    ///
    /// # Errors
    ///
    /// `ResourceNotFound` when no role owns a resource with this name.
    pub async fn resources_named(&self, resource_name: &str) -> AclResult<Vec<Resource>> {
        self.ensure_open()?;
        let resources = self.store.find_resources(resource_name).await?;
        if resources.is_empty() {
            return Err(AclError::ResourceNotFound(resource_name.to_string()));
        }
        Ok(resources)
    }

    // ------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------

    async fn resolve_role_names(&self, names: &[String]) -> AclResult<Vec<Role>> {
        let mut roles = Vec::with_capacity(names.len());
        for name in names {
            roles.push(self.require_role(name).await?);
        }
        Ok(roles)
    }

    async fn require_role(&self, name: &str) -> AclResult<Role> {
        self.store
            .find_role(name)
            .await?
            .ok_or_else(|| AclError::RoleNotFound(name.to_string()))
    }

    async fn require_user(&self, user_id: &str) -> AclResult<User> {
        self.store
            .find_user(user_id)
            .await?
            .ok_or_else(|| AclError::UserNotFound(user_id.to_string()))
    }
}
