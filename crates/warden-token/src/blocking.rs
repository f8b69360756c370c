//! Blocking facade over the async issuer
//!
//! Owns a single-threaded Tokio runtime and drives the async API to
//! completion, for callers without an executor of their own.

use std::sync::Arc;

use tokio::runtime::{Builder, Runtime};
use warden_core::{AclError, AclResult, Claim, User};
use warden_store::AclStore;

use crate::issuer::{self, TokenConfig};
use crate::secrets::SecretsProvider;

/// Blocking counterpart of [`crate::TokenIssuer`].
///
/// Do not construct or call this inside an async context; the wrapper
/// blocks its thread while the wrapped call runs.
#[derive(Debug)]
pub struct TokenIssuer {
    inner: issuer::TokenIssuer,
    runtime: Runtime,
}

impl TokenIssuer {
    /// Create a blocking issuer with the default configuration.
    ///
    /// # Errors
    ///
    /// `Internal` when the runtime cannot be created.
    pub fn new(store: Arc<dyn AclStore>, secrets: Arc<dyn SecretsProvider>) -> AclResult<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| AclError::Internal(format!("Failed to build runtime: {e}")))?;
        Ok(Self {
            inner: issuer::TokenIssuer::new(store, secrets),
            runtime,
        })
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: TokenConfig) -> Self {
        self.inner = self.inner.with_config(config);
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &TokenConfig {
        self.inner.config()
    }

    /// Newest claim issued to a user, if any.
    pub fn claim(&self, user: &User) -> AclResult<Option<Claim>> {
        self.runtime.block_on(self.inner.claim(user))
    }

    /// Mint and persist a new claim for a user.
    pub fn add_claim(&self, user: &User) -> AclResult<Claim> {
        self.runtime.block_on(self.inner.add_claim(user))
    }

    /// Return the user's current claim, rotating it when stale.
    pub fn update_claim(&self, user: &User) -> AclResult<Claim> {
        self.runtime.block_on(self.inner.update_claim(user))
    }

    /// Resolve a token back to the user it was issued to.
    pub fn resolve_token(&self, token: &str) -> AclResult<Option<User>> {
        self.runtime.block_on(self.inner.resolve_token(token))
    }
}
