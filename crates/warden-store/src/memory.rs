//! In-memory store implementation
//!
//! This module provides the reference [`AclStore`] backend over plain
//! maps guarded by an async read/write lock.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;
use warden_core::{AclResult, Claim, Resource, Role, User};

use crate::store::AclStore;

/// In-memory store implementation.
///
/// This is suitable for single-process applications and testing. For
/// durable deployments, implement [`AclStore`] over a database.
///
/// Each trait method takes a single lock section, so individual
/// operations are atomic with respect to each other; multi-step engine
/// operations still interleave, as they would against any shared store.
pub struct MemoryAclStore {
    /// Roles keyed by name
    roles: Arc<RwLock<HashMap<String, Role>>>,
    /// Users keyed by external user ID
    users: Arc<RwLock<HashMap<String, User>>>,
    /// Claims in insertion order
    claims: Arc<RwLock<Vec<Claim>>>,
}

impl std::fmt::Debug for MemoryAclStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryAclStore").finish_non_exhaustive()
    }
}

impl MemoryAclStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            roles: Arc::new(RwLock::new(HashMap::new())),
            users: Arc::new(RwLock::new(HashMap::new())),
            claims: Arc::new(RwLock::new(Vec::new())),
        }
    }

    fn newest_for(claims: &[Claim], user_id: Uuid) -> Option<Claim> {
        claims
            .iter()
            .filter(|c| c.user_id == user_id)
            .max_by_key(|c| c.created_at)
            .cloned()
    }
}

impl Default for MemoryAclStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AclStore for MemoryAclStore {
    async fn find_role(&self, name: &str) -> AclResult<Option<Role>> {
        let roles = self.roles.read().await;
        Ok(roles.get(name).cloned())
    }

    async fn upsert_role(&self, role: Role) -> AclResult<Role> {
        let mut roles = self.roles.write().await;
        roles.insert(role.name.clone(), role.clone());
        Ok(role)
    }

    async fn delete_role(&self, name: &str) -> AclResult<bool> {
        let mut roles = self.roles.write().await;
        Ok(roles.remove(name).is_some())
    }

    async fn list_roles(&self) -> AclResult<Vec<Role>> {
        let roles = self.roles.read().await;
        let mut all: Vec<Role> = roles.values().cloned().collect();
        // Map order is arbitrary; keep listings deterministic
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn find_user(&self, user_id: &str) -> AclResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(user_id).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> AclResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.id == id).cloned())
    }

    async fn upsert_user(&self, user: User) -> AclResult<User> {
        let mut users = self.users.write().await;
        users.insert(user.user_id.clone(), user.clone());
        Ok(user)
    }

    async fn list_users(&self) -> AclResult<Vec<User>> {
        let users = self.users.read().await;
        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        Ok(all)
    }

    async fn users_with_role(&self, role_name: &str) -> AclResult<Vec<User>> {
        let users = self.users.read().await;
        let mut matching: Vec<User> = users
            .values()
            .filter(|u| u.has_role(role_name))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        Ok(matching)
    }

    async fn find_resources(&self, name: &str) -> AclResult<Vec<Resource>> {
        let roles = self.roles.read().await;
        let mut found: Vec<Resource> = roles
            .values()
            .flat_map(|role| role.resources.iter())
            .filter(|resource| resource.name == name)
            .cloned()
            .collect();
        // UUID v7 sorts by creation time
        found.sort_by_key(|r| r.id);
        Ok(found)
    }

    async fn list_resources(&self) -> AclResult<Vec<Resource>> {
        let roles = self.roles.read().await;
        let mut all: Vec<Resource> = roles
            .values()
            .flat_map(|role| role.resources.iter())
            .cloned()
            .collect();
        all.sort_by_key(|r| r.id);
        Ok(all)
    }

    async fn latest_claim(&self, user_id: Uuid) -> AclResult<Option<Claim>> {
        let claims = self.claims.read().await;
        Ok(Self::newest_for(&claims, user_id))
    }

    async fn find_claim_by_token(&self, token: &str) -> AclResult<Option<Claim>> {
        let claims = self.claims.read().await;
        Ok(claims.iter().find(|c| c.token == token).cloned())
    }

    async fn insert_claim(&self, claim: Claim) -> AclResult<Claim> {
        let mut claims = self.claims.write().await;
        claims.push(claim.clone());
        Ok(claim)
    }

    async fn insert_claim_if_stale(
        &self,
        candidate: Claim,
        fresh_after: DateTime<Utc>,
    ) -> AclResult<Claim> {
        // Decide and insert under one write section so concurrent
        // rotations converge on a single claim
        let mut claims = self.claims.write().await;
        if let Some(existing) = Self::newest_for(&claims, candidate.user_id) {
            if existing.created_at >= fresh_after {
                return Ok(existing);
            }
        }
        claims.push(candidate.clone());
        Ok(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use warden_core::Permission;

    fn editor_role() -> Role {
        Role::new("editor").with_resources(vec![Resource::new("article")
            .with_permissions(vec![Permission::new("read"), Permission::new("write")])])
    }

    #[tokio::test]
    async fn test_role_upsert_and_find() {
        let store = MemoryAclStore::new();

        store.upsert_role(editor_role()).await.unwrap();
        let found = store.find_role("editor").await.unwrap().unwrap();
        assert_eq!(found.name, "editor");
        assert_eq!(found.resources.len(), 1);

        assert!(store.find_role("viewer").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_replaces_by_name() {
        let store = MemoryAclStore::new();

        store.upsert_role(editor_role()).await.unwrap();
        store
            .upsert_role(Role::new("editor").with_resources(vec![Resource::new("comment")]))
            .await
            .unwrap();

        let found = store.find_role("editor").await.unwrap().unwrap();
        assert_eq!(found.resources.len(), 1);
        assert_eq!(found.resources[0].name, "comment");
    }

    #[tokio::test]
    async fn test_delete_role() {
        let store = MemoryAclStore::new();

        store.upsert_role(editor_role()).await.unwrap();
        assert!(store.delete_role("editor").await.unwrap());
        assert!(!store.delete_role("editor").await.unwrap());
        assert!(store.find_role("editor").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_roles_sorted_by_name() {
        let store = MemoryAclStore::new();

        store.upsert_role(Role::new("viewer")).await.unwrap();
        store.upsert_role(Role::new("admin")).await.unwrap();
        store.upsert_role(Role::new("editor")).await.unwrap();

        let names: Vec<String> = store
            .list_roles()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["admin", "editor", "viewer"]);
    }

    #[tokio::test]
    async fn test_find_user_by_internal_id() {
        let store = MemoryAclStore::new();

        let user = store.upsert_user(User::new("user-1")).await.unwrap();
        let found = store.find_user_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(found.user_id, "user-1");

        assert!(store
            .find_user_by_id(Uuid::now_v7())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_users_with_role() {
        let store = MemoryAclStore::new();

        store
            .upsert_user(User::new("user-b").with_roles(vec!["editor".to_string()]))
            .await
            .unwrap();
        store
            .upsert_user(User::new("user-a").with_roles(vec!["editor".to_string()]))
            .await
            .unwrap();
        store
            .upsert_user(User::new("user-c").with_roles(vec!["viewer".to_string()]))
            .await
            .unwrap();

        let carrying: Vec<String> = store
            .users_with_role("editor")
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.user_id)
            .collect();
        assert_eq!(carrying, vec!["user-a", "user-b"]);
    }

    #[tokio::test]
    async fn test_list_users_sorted_by_user_id() {
        let store = MemoryAclStore::new();

        store.upsert_user(User::new("user-b")).await.unwrap();
        store.upsert_user(User::new("user-a")).await.unwrap();

        let ids: Vec<String> = store
            .list_users()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.user_id)
            .collect();
        assert_eq!(ids, vec!["user-a", "user-b"]);
    }

    #[tokio::test]
    async fn test_list_resources_spans_roles() {
        let store = MemoryAclStore::new();

        store.upsert_role(editor_role()).await.unwrap();
        store
            .upsert_role(Role::new("viewer").with_resources(vec![Resource::new("comment")]))
            .await
            .unwrap();

        let names: Vec<String> = store
            .list_resources()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"article".to_string()));
        assert!(names.contains(&"comment".to_string()));
    }

    #[tokio::test]
    async fn test_find_resources_across_roles() {
        let store = MemoryAclStore::new();

        store.upsert_role(editor_role()).await.unwrap();
        store
            .upsert_role(Role::new("viewer").with_resources(vec![
                Resource::new("article").with_permissions(vec![Permission::new("read")]),
            ]))
            .await
            .unwrap();

        let found = store.find_resources("article").await.unwrap();
        assert_eq!(found.len(), 2);

        assert!(store.find_resources("report").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_latest_claim_picks_newest() {
        let store = MemoryAclStore::new();
        let user_id = Uuid::now_v7();

        let mut old = Claim::new("old-token", user_id);
        old.created_at = Utc::now() - Duration::hours(2);
        store.insert_claim(old).await.unwrap();
        store
            .insert_claim(Claim::new("new-token", user_id))
            .await
            .unwrap();

        let latest = store.latest_claim(user_id).await.unwrap().unwrap();
        assert_eq!(latest.token, "new-token");
    }

    #[tokio::test]
    async fn test_insert_claim_if_stale_keeps_fresh_claim() {
        let store = MemoryAclStore::new();
        let user_id = Uuid::now_v7();
        let fresh_after = Utc::now() - Duration::hours(24);

        let first = store
            .insert_claim_if_stale(Claim::new("first", user_id), fresh_after)
            .await
            .unwrap();
        let second = store
            .insert_claim_if_stale(Claim::new("second", user_id), fresh_after)
            .await
            .unwrap();

        assert_eq!(first.token, "first");
        assert_eq!(second.token, "first");
        assert!(store
            .find_claim_by_token("second")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_insert_claim_if_stale_replaces_stale_claim() {
        let store = MemoryAclStore::new();
        let user_id = Uuid::now_v7();

        let mut stale = Claim::new("stale", user_id);
        stale.created_at = Utc::now() - Duration::hours(25);
        store.insert_claim(stale).await.unwrap();

        let rotated = store
            .insert_claim_if_stale(Claim::new("rotated", user_id), Utc::now() - Duration::hours(24))
            .await
            .unwrap();

        assert_eq!(rotated.token, "rotated");
        let latest = store.latest_claim(user_id).await.unwrap().unwrap();
        assert_eq!(latest.token, "rotated");
    }

    #[tokio::test]
    async fn test_concurrent_rotation_converges() {
        let store = Arc::new(MemoryAclStore::new());
        let user_id = Uuid::now_v7();
        let fresh_after = Utc::now() - Duration::hours(24);

        let (a, b) = tokio::join!(
            store.insert_claim_if_stale(Claim::new("candidate-a", user_id), fresh_after),
            store.insert_claim_if_stale(Claim::new("candidate-b", user_id), fresh_after),
        );

        // Whichever call won the write lock, both observe the same claim
        assert_eq!(a.unwrap().token, b.unwrap().token);
    }
}
