//! User domain model
//!
//! Users map an external caller identity to a list of assigned role
//! names. The engine resolves those names against the store on every
//! query; nothing is cached on the user record itself.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An external identity with its assigned role names.
///
/// The role list is ordered and append-only on assignment: assigning the
/// same role twice leaves two entries, and removal strips only the first
/// occurrence. Resolution-side queries treat the list with set
/// semantics, so duplicates never widen a user's effective permissions.
///
/// # Examples
///
/// ```
/// use warden_core::User;
///
/// let mut user = User::new("user-1");
/// user.add_role("editor");
/// user.add_role("editor");
///
/// assert_eq!(user.roles.len(), 2);
/// assert!(user.remove_role("editor"));
/// assert_eq!(user.roles, vec!["editor"]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Internal user ID
    pub id: Uuid,

    /// External caller-supplied identifier (unique across the store)
    pub user_id: String,

    /// Assigned role names, in assignment order; may contain duplicates
    #[serde(default)]
    pub roles: Vec<String>,
}

impl User {
    /// Creates a new user with no assigned roles.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The external identifier for this user
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            user_id: user_id.into(),
            roles: Vec::new(),
        }
    }

    /// Set the assigned role names.
    ///
    /// # Arguments
    ///
    /// * `roles` - The full role-name list, replacing any existing one
    pub fn with_roles(mut self, roles: Vec<String>) -> Self {
        self.roles = roles;
        self
    }

    /// Check if this user directly carries a role name.
    ///
    /// Inherited roles are not considered; this is a raw membership test
    /// on the assignment list.
    pub fn has_role(&self, name: &str) -> bool {
        self.roles.iter().any(|r| r == name)
    }

    /// Append a role name to the assignment list.
    ///
    /// No duplicate check is performed.
    pub fn add_role(&mut self, name: impl Into<String>) {
        self.roles.push(name.into());
    }

    /// Remove the first occurrence of a role name.
    ///
    /// # Returns
    ///
    /// `true` if an entry was removed
    pub fn remove_role(&mut self, name: &str) -> bool {
        match self.roles.iter().position(|r| r == name) {
            Some(index) => {
                self.roles.remove(index);
                true
            }
            None => false,
        }
    }
}
