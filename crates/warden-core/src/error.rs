//! Error types for access-control operations
//!
//! This module defines all error types that can occur during grant,
//! revoke, assignment, query, and token issuance operations.

use thiserror::Error;

/// Access-control error types.
///
/// These errors cover role, user, and resource resolution failures,
/// argument validation, and storage-level faults. No operation retries
/// internally; every failure surfaces to the immediate caller.
#[derive(Debug, Error)]
pub enum AclError {
    /// Referenced role name does not resolve
    #[error("Role not found: {0}")]
    RoleNotFound(String),

    /// Referenced parent role does not resolve during parent validation
    #[error("Parent role not found: {0}")]
    RoleParentNotFound(String),

    /// Referenced user does not resolve
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// No resource exists with the given name
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    /// Empty or malformed argument where a usable value is required
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Operation invoked on an engine that has been closed
    #[error("Engine is closed")]
    EngineClosed,

    /// Backend storage failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type for access-control operations.
pub type AclResult<T> = Result<T, AclError>;

impl AclError {
    /// Check if this error is a not-found condition.
    ///
    /// Not-found conditions are expected in normal operation and are
    /// usually handled rather than logged as failures.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AclError::RoleNotFound(_)
                | AclError::RoleParentNotFound(_)
                | AclError::UserNotFound(_)
                | AclError::ResourceNotFound(_)
        )
    }

    /// Get error code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            AclError::RoleNotFound(_) => "ROLE_NOT_FOUND",
            AclError::RoleParentNotFound(_) => "ROLE_PARENT_NOT_FOUND",
            AclError::UserNotFound(_) => "USER_NOT_FOUND",
            AclError::ResourceNotFound(_) => "RESOURCE_NOT_FOUND",
            AclError::InvalidArgument(_) => "INVALID_ARGUMENT",
            AclError::EngineClosed => "ENGINE_CLOSED",
            AclError::Storage(_) => "STORAGE_ERROR",
            AclError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
