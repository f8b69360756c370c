//! Storage boundary for access-control state
//!
//! This module defines the repository trait the engine and token issuer
//! are written against, keeping persistence pluggable. The engine holds
//! no process-wide state of its own; every operation goes through a
//! store handle.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use warden_core::{AclResult, Claim, Resource, Role, User};

/// Storage trait for roles, users, and claims.
///
/// [`MemoryAclStore`](crate::MemoryAclStore) is the in-process reference
/// implementation; durable deployments implement this trait over their
/// own backend. Role names key roles and external user IDs key users;
/// the upsert operations replace whole records.
///
/// Implementations surface backend faults as
/// [`AclError::Storage`](warden_core::AclError::Storage). Not-found is
/// expressed through `Option`, never through an error.
#[async_trait]
pub trait AclStore: Send + Sync {
    /// Find a role by name.
    async fn find_role(&self, name: &str) -> AclResult<Option<Role>>;

    /// Insert or replace a role, keyed by name.
    async fn upsert_role(&self, role: Role) -> AclResult<Role>;

    /// Delete a role by name.
    ///
    /// # Returns
    ///
    /// `true` if a role was deleted
    async fn delete_role(&self, name: &str) -> AclResult<bool>;

    /// List every stored role.
    async fn list_roles(&self) -> AclResult<Vec<Role>>;

    /// Find a user by external user ID.
    async fn find_user(&self, user_id: &str) -> AclResult<Option<User>>;

    /// Find a user by internal ID.
    async fn find_user_by_id(&self, id: Uuid) -> AclResult<Option<User>>;

    /// Insert or replace a user, keyed by external user ID.
    async fn upsert_user(&self, user: User) -> AclResult<User>;

    /// List every stored user.
    async fn list_users(&self) -> AclResult<Vec<User>>;

    /// Users directly carrying the given role name.
    ///
    /// Inherited roles are not considered.
    async fn users_with_role(&self, role_name: &str) -> AclResult<Vec<User>>;

    /// All resources with the given name, across every role.
    ///
    /// Resource names are not globally unique, so this may return
    /// resources owned by several distinct roles.
    async fn find_resources(&self, name: &str) -> AclResult<Vec<Resource>>;

    /// All resources across every role.
    async fn list_resources(&self) -> AclResult<Vec<Resource>>;

    /// Most recently created claim for a user.
    async fn latest_claim(&self, user_id: Uuid) -> AclResult<Option<Claim>>;

    /// Find a claim by its token string.
    async fn find_claim_by_token(&self, token: &str) -> AclResult<Option<Claim>>;

    /// Persist a new claim.
    async fn insert_claim(&self, claim: Claim) -> AclResult<Claim>;

    /// Persist `candidate` unless the user already has a claim created at
    /// or after `fresh_after`.
    ///
    /// The check and the insert happen under the store's own exclusion, so
    /// concurrent callers converge on a single stored claim instead of
    /// each minting their own.
    ///
    /// # Returns
    ///
    /// The existing fresh claim, or `candidate` once persisted
    async fn insert_claim_if_stale(
        &self,
        candidate: Claim,
        fresh_after: DateTime<Utc>,
    ) -> AclResult<Claim>;
}
