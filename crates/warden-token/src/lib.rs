//! # Warden Token
//!
//! This crate provides opaque token and claim issuance for the Warden
//! access control library, giving authenticated users a bearer handle
//! that maps back to their user record.
//!
//! ## Overview
//!
//! The warden-token crate handles:
//! - **Token Generation**: AES-256-CBC encrypted, base64-encoded tokens
//! - **Claim Issuance**: Persisting tokens as claims with a timestamp
//! - **Rotation**: Replacing claims once they age past a configured period
//! - **Resolution**: Mapping a presented token back to its user
//! - **Key Sourcing**: Pluggable secrets providers, static or environment
//!
//! Tokens are write-only. Resolution never decrypts; it looks the claim
//! up by the stored token string, so losing the encryption key does not
//! invalidate issued claims.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use warden_core::User;
//! use warden_store::{AclStore, MemoryAclStore};
//! use warden_token::{StaticSecretsProvider, TokenIssuer};
//!
//! async fn issue_example() {
//!     let store = Arc::new(MemoryAclStore::new());
//!     let issuer = TokenIssuer::new(
//!         store.clone(),
//!         Arc::new(StaticSecretsProvider::new([7u8; 32])),
//!     );
//!
//!     let user = store.upsert_user(User::new("user-1")).await.unwrap();
//!
//!     // Issue once, then hand the claim's token to the client
//!     let claim = issuer.add_claim(&user).await.unwrap();
//!
//!     // Later: map a presented token back to the user
//!     let resolved = issuer.resolve_token(&claim.token).await.unwrap();
//!     assert!(resolved.is_some());
//! }
//! ```

pub mod blocking;
pub mod cipher;
pub mod issuer;
pub mod secrets;

// Re-export main types
pub use cipher::generate_token;
pub use issuer::{TokenConfig, TokenIssuer};
pub use secrets::{EnvSecretsProvider, SecretsProvider, StaticSecretsProvider};
