//! Claim issuance and rotation
//!
//! The issuer mints opaque tokens, wraps them in claims, and rotates
//! them once they age past the configured rotation period. Rotation is
//! decided inside the store, so concurrent callers converge on one
//! claim instead of each minting their own.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::debug;
use warden_core::{AclError, AclResult, Claim, User};
use warden_store::AclStore;

use crate::cipher::generate_token;
use crate::secrets::SecretsProvider;

/// Settings for claim issuance.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Age at which [`TokenIssuer::update_claim`] replaces the newest
    /// claim instead of returning it.
    pub rotation_period: Duration,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            rotation_period: Duration::hours(24),
        }
    }
}

/// Issues and rotates claims for users.
///
/// Tokens are write-only: [`resolve_token`](TokenIssuer::resolve_token)
/// looks the claim up by the stored token string rather than decrypting
/// it.
pub struct TokenIssuer {
    store: Arc<dyn AclStore>,
    secrets: Arc<dyn SecretsProvider>,
    config: TokenConfig,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("secrets", &"[REDACTED]")
            .field("config", &self.config)
            .finish()
    }
}

impl TokenIssuer {
    /// Create an issuer with the default configuration.
    pub fn new(store: Arc<dyn AclStore>, secrets: Arc<dyn SecretsProvider>) -> Self {
        Self {
            store,
            secrets,
            config: TokenConfig::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: TokenConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &TokenConfig {
        &self.config
    }

    /// Newest claim issued to a user, if any.
    pub async fn claim(&self, user: &User) -> AclResult<Option<Claim>> {
        self.store.latest_claim(user.id).await
    }

    /// Mint and persist a new claim for a user.
    ///
    /// Existing claims are left in place; the new claim becomes the
    /// newest one.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when the encryption key has the wrong length.
    pub async fn add_claim(&self, user: &User) -> AclResult<Claim> {
        let token = generate_token(user.id, self.secrets.secret())?;
        let claim = self.store.insert_claim(Claim::new(token, user.id)).await?;
        debug!(user = %user.user_id, claim_id = %claim.id, "Claim issued");
        Ok(claim)
    }

    /// Return the user's current claim, minting a replacement when the
    /// newest one has aged past the rotation period.
    ///
    /// The candidate claim is minted up front and handed to the store,
    /// which persists it only if no fresh claim exists. A first call for
    /// a user therefore also works: there is no fresh claim to keep.
    pub async fn update_claim(&self, user: &User) -> AclResult<Claim> {
        let token = generate_token(user.id, self.secrets.secret())?;
        let candidate = Claim::new(token, user.id);
        let candidate_id = candidate.id;

        let fresh_after = Utc::now() - self.config.rotation_period;
        let claim = self
            .store
            .insert_claim_if_stale(candidate, fresh_after)
            .await?;

        if claim.id == candidate_id {
            debug!(user = %user.user_id, claim_id = %claim.id, "Claim rotated");
        } else {
            debug!(user = %user.user_id, claim_id = %claim.id, "Existing claim still fresh");
        }
        Ok(claim)
    }

    /// Resolve a token back to the user it was issued to.
    ///
    /// # Returns
    ///
    /// `None` when no claim carries this token, or when the claim's
    /// user no longer exists.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` when `token` is empty.
    pub async fn resolve_token(&self, token: &str) -> AclResult<Option<User>> {
        if token.is_empty() {
            return Err(AclError::InvalidArgument(
                "token must be non-empty".to_string(),
            ));
        }
        let claim = match self.store.find_claim_by_token(token).await? {
            Some(claim) => claim,
            None => return Ok(None),
        };
        self.store.find_user_by_id(claim.user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::secrets::StaticSecretsProvider;
    use warden_store::MemoryAclStore;

    fn issuer_fixture() -> (Arc<MemoryAclStore>, TokenIssuer) {
        let store = Arc::new(MemoryAclStore::new());
        let issuer = TokenIssuer::new(
            store.clone(),
            Arc::new(StaticSecretsProvider::new([7u8; 32])),
        );
        (store, issuer)
    }

    #[tokio::test]
    async fn test_add_claim_then_claim_returns_it() {
        let (_, issuer) = issuer_fixture();
        let user = User::new("user-1");

        let issued = issuer.add_claim(&user).await.unwrap();
        let found = issuer.claim(&user).await.unwrap().unwrap();

        assert_eq!(found.id, issued.id);
        assert_eq!(found.token, issued.token);
        assert_eq!(found.user_id, user.id);
    }

    #[tokio::test]
    async fn test_claim_is_none_before_issuance() {
        let (_, issuer) = issuer_fixture();

        assert!(issuer.claim(&User::new("user-1")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_claim_keeps_fresh_claim() {
        let (_, issuer) = issuer_fixture();
        let user = User::new("user-1");
        let issued = issuer.add_claim(&user).await.unwrap();

        let kept = issuer.update_claim(&user).await.unwrap();

        assert_eq!(kept.id, issued.id);
        assert_eq!(kept.token, issued.token);
    }

    #[tokio::test]
    async fn test_update_claim_rotates_stale_claim() {
        let (store, issuer) = issuer_fixture();
        let user = User::new("user-1");

        let mut stale = Claim::new("old-token".to_string(), user.id);
        stale.created_at = Utc::now() - Duration::hours(25);
        store.insert_claim(stale.clone()).await.unwrap();

        let rotated = issuer.update_claim(&user).await.unwrap();

        assert_ne!(rotated.id, stale.id);
        assert_ne!(rotated.token, stale.token);
        let newest = issuer.claim(&user).await.unwrap().unwrap();
        assert_eq!(newest.id, rotated.id);
    }

    #[tokio::test]
    async fn test_update_claim_mints_first_claim_then_reuses_it() {
        let (_, issuer) = issuer_fixture();
        let user = User::new("user-1");

        let minted = issuer.update_claim(&user).await.unwrap();
        let reused = issuer.update_claim(&user).await.unwrap();

        assert_eq!(reused.id, minted.id);
        assert_eq!(reused.token, minted.token);
        let newest = issuer.claim(&user).await.unwrap().unwrap();
        assert_eq!(newest.id, minted.id);
    }

    #[tokio::test]
    async fn test_invalid_key_fails_before_storing_anything() {
        let store = Arc::new(MemoryAclStore::new());
        let issuer = TokenIssuer::new(
            store.clone(),
            Arc::new(StaticSecretsProvider::new([0u8; 16])),
        );
        let user = User::new("user-1");

        assert!(matches!(
            issuer.add_claim(&user).await,
            Err(AclError::InvalidArgument(_))
        ));
        assert!(issuer.claim(&user).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_resolve_token_roundtrip() {
        let (store, issuer) = issuer_fixture();
        let user = store.upsert_user(User::new("user-1")).await.unwrap();

        let issued = issuer.add_claim(&user).await.unwrap();
        let resolved = issuer.resolve_token(&issued.token).await.unwrap().unwrap();

        assert_eq!(resolved.id, user.id);
        assert_eq!(resolved.user_id, "user-1");
    }

    #[tokio::test]
    async fn test_resolve_token_unknown_is_none() {
        let (_, issuer) = issuer_fixture();

        assert!(issuer.resolve_token("no-such-token").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_resolve_token_rejects_empty() {
        let (_, issuer) = issuer_fixture();

        assert!(matches!(
            issuer.resolve_token("").await,
            Err(AclError::InvalidArgument(_))
        ));
    }
}
