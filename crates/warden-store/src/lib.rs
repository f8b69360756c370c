//! # Warden Store
//!
//! This crate provides the storage boundary for the Warden
//! access-control library: the repository trait consumed by the engine
//! and token issuer, plus an in-memory reference backend.
//!
//! ## Overview
//!
//! The warden-store crate handles:
//! - **AclStore**: Async repository trait for roles, users, resources,
//!   and claims
//! - **MemoryAclStore**: In-process implementation for single-process
//!   applications and testing
//!
//! Durable deployments implement [`AclStore`] over their own database;
//! the engine never touches storage directly.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use warden_core::{Permission, Resource, Role};
//! use warden_store::{AclStore, MemoryAclStore};
//!
//! async fn store_example() {
//!     let store = MemoryAclStore::new();
//!
//!     let editor = Role::new("editor").with_resources(vec![
//!         Resource::new("article").with_permissions(vec![Permission::new("write")]),
//!     ]);
//!     store.upsert_role(editor).await.unwrap();
//!
//!     let found = store.find_role("editor").await.unwrap();
//!     assert!(found.is_some());
//! }
//! ```

pub mod memory;
pub mod store;

// Re-export main types
pub use memory::MemoryAclStore;
pub use store::AclStore;
