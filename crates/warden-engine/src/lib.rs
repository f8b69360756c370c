//! # Warden Engine
//!
//! This crate provides the authorization engine for the Warden access
//! control library, turning the entity model from `warden-core` and a
//! store from `warden-store` into grant, revoke, and permission-check
//! operations.
//!
//! ## Overview
//!
//! The warden-engine crate handles:
//! - **Grants**: Insert, replace, and revoke roles with their resources
//! - **Hierarchy**: Parent-role wiring and cycle-safe inheritance walks
//! - **Assignment**: Attaching and detaching roles on users
//! - **Checks**: Effective-permission queries for users and roles
//! - **Blocking Facade**: The same API for callers without an executor
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use warden_core::{Permission, Resource, Role};
//! use warden_engine::AclEngine;
//! use warden_store::MemoryAclStore;
//!
//! async fn check_example() {
//!     let engine = AclEngine::new(Arc::new(MemoryAclStore::new()));
//!
//!     // Grant: the "editor" role may read and write articles
//!     engine
//!         .allow(Role::new("editor").with_resources(vec![
//!             Resource::new("article").with_permissions(vec![
//!                 Permission::new("read"),
//!                 Permission::new("write"),
//!             ]),
//!         ]))
//!         .await
//!         .unwrap();
//!
//!     // Assign the role, then check
//!     engine.add_user_role("user-1", "editor").await.unwrap();
//!     assert!(engine.is_allowed("user-1", "article", "write").await.unwrap());
//! }
//! ```
//!
//! ## Inheritance
//!
//! Roles name their parents, and a role inherits every resource its
//! ancestors own. User-level checks always walk the full hierarchy;
//! role-level checks come in a direct flavor (`is_role_allowed`) and an
//! effective flavor (`role_allowed_permissions`), so callers pick the
//! scope explicitly. Cyclic parent declarations are tolerated: each
//! role contributes once and the walk stops where it started.

pub mod blocking;
pub mod engine;
pub mod resolver;

// Re-export main types
pub use engine::{AclEngine, UserWithRoles};
pub use resolver::HierarchyResolver;
