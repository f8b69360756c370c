//! Role hierarchy resolution
//!
//! This module walks the role-inheritance graph to compute the resources
//! reachable from a role, including everything contributed by ancestor
//! roles.

use std::collections::HashSet;

use warden_core::{AclError, AclResult, Resource, Role};
use warden_store::AclStore;

/// Resolves the resources reachable from a role through its parents.
///
/// The walk is depth-first over parent names with a visited set: each
/// role contributes its resources at most once, which both collapses
/// diamond-shaped inheritance and truncates cycles, so a malformed
/// parent graph cannot hang resolution.
pub struct HierarchyResolver<'a> {
    store: &'a dyn AclStore,
}

impl<'a> HierarchyResolver<'a> {
    /// Create a resolver over the given store.
    pub fn new(store: &'a dyn AclStore) -> Self {
        Self { store }
    }

    /// Collect the resources of `role_name` and of every reachable
    /// ancestor.
    ///
    /// Ordering follows the walk (a role's own resources before its
    /// parents'); callers asserting on the result should sort by name.
    ///
    /// # Errors
    ///
    /// `RoleNotFound` when the role, or any parent name reachable from
    /// it, does not resolve.
    pub async fn collect_resources(&self, role_name: &str) -> AclResult<Vec<Resource>> {
        let root = self
            .store
            .find_role(role_name)
            .await?
            .ok_or_else(|| AclError::RoleNotFound(role_name.to_string()))?;
        self.collect_from(root).await
    }

    /// Collect reachable resources starting from an already-loaded role.
    pub async fn collect_from(&self, root: Role) -> AclResult<Vec<Resource>> {
        let mut visited: HashSet<String> = HashSet::new();
        let mut resources: Vec<Resource> = Vec::new();
        let mut pending: Vec<Role> = vec![root];

        while let Some(role) = pending.pop() {
            if !visited.insert(role.name.clone()) {
                continue;
            }
            resources.extend(role.resources.iter().cloned());

            // Reverse so the stack pops parents in declaration order
            for parent in role.parents.iter().rev() {
                if visited.contains(parent) {
                    continue;
                }
                let parent_role = self
                    .store
                    .find_role(parent)
                    .await?
                    .ok_or_else(|| AclError::RoleNotFound(parent.clone()))?;
                pending.push(parent_role);
            }
        }

        Ok(resources)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_core::Permission;
    use warden_store::MemoryAclStore;

    fn role_with_resource(role: &str, resource: &str, permissions: &[&str]) -> Role {
        Role::new(role).with_resources(vec![Resource::new(resource).with_permissions(
            permissions.iter().map(|p| Permission::new(*p)).collect(),
        )])
    }

    fn sorted_names(resources: &[Resource]) -> Vec<String> {
        let mut names: Vec<String> = resources.iter().map(|r| r.name.clone()).collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn test_collects_own_resources_only_for_root_role() {
        let store = MemoryAclStore::new();
        store
            .upsert_role(role_with_resource("editor", "article", &["write"]))
            .await
            .unwrap();

        let resolver = HierarchyResolver::new(&store);
        let resources = resolver.collect_resources("editor").await.unwrap();

        assert_eq!(sorted_names(&resources), vec!["article"]);
    }

    #[tokio::test]
    async fn test_collects_through_parent_chain() {
        let store = MemoryAclStore::new();
        store
            .upsert_role(role_with_resource("admin", "settings", &["manage"]))
            .await
            .unwrap();
        let mut editor = role_with_resource("editor", "article", &["write"]);
        editor.parents = vec!["admin".to_string()];
        store.upsert_role(editor).await.unwrap();
        let mut viewer = role_with_resource("viewer", "article", &["read"]);
        viewer.parents = vec!["editor".to_string()];
        store.upsert_role(viewer).await.unwrap();

        let resolver = HierarchyResolver::new(&store);
        let resources = resolver.collect_resources("viewer").await.unwrap();

        assert_eq!(
            sorted_names(&resources),
            vec!["article", "article", "settings"]
        );
    }

    #[tokio::test]
    async fn test_diamond_inheritance_contributes_each_role_once() {
        let store = MemoryAclStore::new();
        store
            .upsert_role(role_with_resource("base", "article", &["read"]))
            .await
            .unwrap();
        let mut left = Role::new("left");
        left.parents = vec!["base".to_string()];
        store.upsert_role(left).await.unwrap();
        let mut right = Role::new("right");
        right.parents = vec!["base".to_string()];
        store.upsert_role(right).await.unwrap();
        let mut top = Role::new("top");
        top.parents = vec!["left".to_string(), "right".to_string()];
        store.upsert_role(top).await.unwrap();

        let resolver = HierarchyResolver::new(&store);
        let resources = resolver.collect_resources("top").await.unwrap();

        // "base" is reachable through both sides but contributes once
        assert_eq!(sorted_names(&resources), vec!["article"]);
    }

    #[tokio::test]
    async fn test_cycle_is_truncated() {
        let store = MemoryAclStore::new();
        let mut a = role_with_resource("a", "alpha", &["read"]);
        a.parents = vec!["b".to_string()];
        store.upsert_role(a).await.unwrap();
        let mut b = role_with_resource("b", "beta", &["read"]);
        b.parents = vec!["a".to_string()];
        store.upsert_role(b).await.unwrap();

        let resolver = HierarchyResolver::new(&store);
        let resources = resolver.collect_resources("a").await.unwrap();

        assert_eq!(sorted_names(&resources), vec!["alpha", "beta"]);
    }

    #[tokio::test]
    async fn test_missing_role_fails() {
        let store = MemoryAclStore::new();
        let resolver = HierarchyResolver::new(&store);

        let result = resolver.collect_resources("ghost").await;
        assert!(matches!(result, Err(AclError::RoleNotFound(name)) if name == "ghost"));
    }

    #[tokio::test]
    async fn test_stale_parent_reference_fails() {
        let store = MemoryAclStore::new();
        let mut viewer = role_with_resource("viewer", "article", &["read"]);
        viewer.parents = vec!["deleted".to_string()];
        store.upsert_role(viewer).await.unwrap();

        let resolver = HierarchyResolver::new(&store);
        let result = resolver.collect_resources("viewer").await;

        assert!(matches!(result, Err(AclError::RoleNotFound(name)) if name == "deleted"));
    }
}
