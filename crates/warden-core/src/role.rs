//! Role domain model
//!
//! Roles are the unit of grant in the access-control model: each role
//! owns a list of protected resources and may inherit further resources
//! from parent roles, referenced by name. A role with no parents is a
//! root role.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::resource::Resource;

/// A named bundle of resource grants with parent inheritance.
///
/// Role names are unique across a store; the storage layer keys roles by
/// name and upserts replace the whole record. The parent list holds role
/// names, is kept in insertion order, and is deduplicated on merge.
///
/// # Examples
///
/// ```
/// use warden_core::{Permission, Resource, Role};
///
/// let article = Resource::new("article")
///     .with_permissions(vec![Permission::new("write")]);
/// let editor = Role::new("editor")
///     .with_resources(vec![article])
///     .with_parent("viewer");
///
/// assert!(editor.resource("article").is_some());
/// assert!(editor.has_parent("viewer"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    /// Unique role ID
    pub id: Uuid,

    /// Role name (unique across the store)
    pub name: String,

    /// Resources owned by this role
    #[serde(default)]
    pub resources: Vec<Resource>,

    /// Names of parent roles this role inherits from
    #[serde(default)]
    pub parents: Vec<String>,
}

impl Role {
    /// Creates a new role with no resources and no parents.
    ///
    /// # Examples
    ///
    /// ```
    /// use warden_core::Role;
    ///
    /// let role = Role::new("editor");
    /// assert_eq!(role.name, "editor");
    /// assert!(role.parents.is_empty());
    /// ```
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            resources: Vec::new(),
            parents: Vec::new(),
        }
    }

    /// Set the resources owned by this role.
    ///
    /// # Arguments
    ///
    /// * `resources` - The full resource list, replacing any existing one
    pub fn with_resources(mut self, resources: Vec<Resource>) -> Self {
        self.resources = resources;
        self
    }

    /// Add a parent role by name.
    ///
    /// # Arguments
    ///
    /// * `parent` - The parent role name
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parents.push(parent.into());
        self
    }

    /// Check if this role lists a parent with the given name.
    pub fn has_parent(&self, name: &str) -> bool {
        self.parents.iter().any(|p| p == name)
    }

    /// Find the first owned resource with the given name.
    ///
    /// Only this role's own resources are searched; inherited resources
    /// are resolved by the hierarchy walk, not here.
    pub fn resource(&self, name: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.name == name)
    }

    /// Merge parent names into this role's parent list.
    ///
    /// Existing entries keep their position; new names are appended in
    /// input order. Duplicates collapse to the first occurrence.
    ///
    /// # Arguments
    ///
    /// * `parents` - Parent role names to merge in
    pub fn merge_parents(&mut self, parents: &[String]) {
        for parent in parents {
            if !self.parents.contains(parent) {
                self.parents.push(parent.clone());
            }
        }
    }

    /// Remove the listed parent names from this role.
    ///
    /// # Arguments
    ///
    /// * `parents` - Parent role names to remove
    pub fn remove_parents(&mut self, parents: &[String]) {
        self.parents.retain(|p| !parents.contains(p));
    }
}
