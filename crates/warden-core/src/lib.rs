//! # Warden Core
//!
//! This crate provides the entity model and shared error types for the
//! Warden access-control library, used by the store, engine, and token
//! crates.
//!
//! ## Overview
//!
//! The warden-core crate defines:
//! - **Role**: A named bundle of resource grants with parent inheritance
//! - **Resource**: A named protectable entity carrying permissions
//! - **Permission**: A named capability scoped to a single resource
//! - **User**: An external identity mapped to assigned role names
//! - **Claim**: An issued bearer-token record bound to a user
//! - **AclError**: The shared error type for every warden operation
//!
//! ## Usage
//!
//! ```rust
//! use warden_core::{Permission, Resource, Role, User};
//!
//! // Define a role owning one resource
//! let article = Resource::new("article")
//!     .with_permissions(vec![Permission::new("read"), Permission::new("write")]);
//! let editor = Role::new("editor").with_resources(vec![article]);
//!
//! // Assign it to a user by name
//! let user = User::new("user-1").with_roles(vec![editor.name.clone()]);
//!
//! assert!(editor.resource("article").is_some());
//! assert!(user.has_role("editor"));
//! ```
//!
//! ## Cross-Crate Integration
//!
//! This crate is consumed by:
//! - `warden-store`: Persistence boundary for these entities
//! - `warden-engine`: Grant, revoke, and permission-query operations
//! - `warden-token`: Opaque token and claim issuance

pub mod claim;
pub mod error;
pub mod resource;
pub mod role;
pub mod user;

// Re-export main types
pub use claim::Claim;
pub use error::{AclError, AclResult};
pub use resource::{Permission, Resource};
pub use role::Role;
pub use user::User;
