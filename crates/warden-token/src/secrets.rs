//! Encryption key sourcing
//!
//! The issuer takes its encryption key through the [`SecretsProvider`]
//! trait, so deployments choose where the key lives: inline for tests,
//! an environment variable in production, or a custom provider backed
//! by a secrets manager.

use std::env;

use warden_core::{AclError, AclResult};

/// Source of the token encryption key.
pub trait SecretsProvider: Send + Sync {
    /// The raw key bytes. Must be 32 bytes for AES-256.
    fn secret(&self) -> &[u8];
}

/// Provider over a key held in memory.
pub struct StaticSecretsProvider {
    secret: Vec<u8>,
}

impl StaticSecretsProvider {
    /// Create a provider from the given key bytes.
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl SecretsProvider for StaticSecretsProvider {
    fn secret(&self) -> &[u8] {
        &self.secret
    }
}

impl std::fmt::Debug for StaticSecretsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticSecretsProvider")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Provider that reads the key from an environment variable at
/// construction time.
pub struct EnvSecretsProvider {
    secret: Vec<u8>,
}

impl EnvSecretsProvider {
    /// Environment variable read by [`from_env`](EnvSecretsProvider::from_env).
    pub const DEFAULT_VAR: &'static str = "WARDEN_CRYPTOGRAPHY_KEY";

    /// Read the key from [`DEFAULT_VAR`](EnvSecretsProvider::DEFAULT_VAR).
    ///
    /// # Errors
    /// `InvalidArgument` when the variable is not set.
    pub fn from_env() -> AclResult<Self> {
        Self::from_var(Self::DEFAULT_VAR)
    }

    /// Read the key from the named environment variable.
    ///
    /// # Errors
    /// `InvalidArgument` when the variable is not set.
    pub fn from_var(var: &str) -> AclResult<Self> {
        let value = env::var(var)
            .map_err(|_| AclError::InvalidArgument(format!("{var} is not set")))?;
        Ok(Self {
            secret: value.into_bytes(),
        })
    }
}

impl SecretsProvider for EnvSecretsProvider {
    fn secret(&self) -> &[u8] {
        &self.secret
    }
}

impl std::fmt::Debug for EnvSecretsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvSecretsProvider")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
