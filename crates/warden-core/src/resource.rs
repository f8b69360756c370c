//! Resource and permission domain models
//!
//! Resources are the protectable entities of the access-control model.
//! Each resource is owned by exactly one role (positionally, inside the
//! role's resource list) and carries the permissions that can be
//! exercised on it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named capability scoped to a single resource.
///
/// Permission names are expected to be unique within their resource;
/// the engine's mutation operations preserve this, but the type itself
/// does not enforce it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Permission {
    /// Unique permission ID
    pub id: Uuid,

    /// Permission name (unique within its resource)
    pub name: String,
}

impl Permission {
    /// Creates a new permission with a generated UUID v7 ID.
    ///
    /// # Examples
    ///
    /// ```
    /// use warden_core::Permission;
    ///
    /// let read = Permission::new("read");
    /// assert_eq!(read.name, "read");
    /// ```
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
        }
    }
}

/// A named protectable entity carrying permissions.
///
/// Resource names are **not** globally unique: distinct roles may each
/// own a resource with the same name, and name-based lookups therefore
/// return collections.
///
/// # Examples
///
/// ```
/// use warden_core::{Permission, Resource};
///
/// let article = Resource::new("article")
///     .with_permissions(vec![Permission::new("read"), Permission::new("write")]);
///
/// assert!(article.has_permission("read"));
/// assert!(!article.has_permission("delete"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    /// Unique resource ID
    pub id: Uuid,

    /// Resource name (not globally unique)
    pub name: String,

    /// Permissions that can be exercised on this resource
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

impl Resource {
    /// Creates a new resource with no permissions.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            permissions: Vec::new(),
        }
    }

    /// Set the permissions carried by this resource.
    ///
    /// # Arguments
    ///
    /// * `permissions` - The full permission list, replacing any existing one
    pub fn with_permissions(mut self, permissions: Vec<Permission>) -> Self {
        self.permissions = permissions;
        self
    }

    /// Check if this resource carries a permission with the given name.
    ///
    /// # Arguments
    ///
    /// * `name` - The permission name to check
    pub fn has_permission(&self, name: &str) -> bool {
        self.permissions.iter().any(|p| p.name == name)
    }

    /// The names of every permission on this resource, in order.
    pub fn permission_names(&self) -> Vec<String> {
        self.permissions.iter().map(|p| p.name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_creation() {
        let resource = Resource::new("article");

        assert_eq!(resource.name, "article");
        assert!(resource.permissions.is_empty());
    }

    #[test]
    fn test_resource_with_permissions() {
        let resource = Resource::new("article")
            .with_permissions(vec![Permission::new("read"), Permission::new("write")]);

        assert_eq!(resource.permissions.len(), 2);
        assert!(resource.has_permission("read"));
        assert!(resource.has_permission("write"));
        assert!(!resource.has_permission("delete"));
    }

    #[test]
    fn test_permission_names_preserve_order() {
        let resource = Resource::new("report").with_permissions(vec![
            Permission::new("write"),
            Permission::new("read"),
            Permission::new("share"),
        ]);

        assert_eq!(resource.permission_names(), vec!["write", "read", "share"]);
    }

    #[test]
    fn test_resource_ids_are_unique() {
        let a = Resource::new("article");
        let b = Resource::new("article");

        assert_ne!(a.id, b.id);
    }
}
