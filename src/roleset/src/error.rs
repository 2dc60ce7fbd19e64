//! Error types for the role set

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Which index a duplicate key collided in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    /// Two roles share the same identifier
    Id,
    /// Two roles normalize to the same name
    NormalizedName,
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyKind::Id => f.write_str("id"),
            KeyKind::NormalizedName => f.write_str("normalized name"),
        }
    }
}

/// Role set errors
#[derive(Debug, Error)]
pub enum RoleSetError {
    /// Lookup miss against the snapshot
    #[error("Role not found: {0}")]
    NotFound(String),

    /// Snapshot contains two roles with the same key
    #[error("Duplicate role {kind}: {key}")]
    DuplicateKey { kind: KeyKind, key: String },

    /// Declared slot has no matching role
    #[error("Unbound role slot: {0}")]
    UnboundSlot(String),

    /// Role store failure
    #[error("Role store error: {0}")]
    Store(String),

    /// Role enumeration did not finish in time
    #[error("Role store did not respond within {0:?}")]
    Timeout(Duration),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl RoleSetError {
    /// True for lookup misses
    pub fn is_not_found(&self) -> bool {
        matches!(self, RoleSetError::NotFound(_))
    }
}

/// Result type for role set operations
pub type Result<T> = std::result::Result<T, RoleSetError>;
