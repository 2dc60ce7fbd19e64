//! Role record types

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;
use uuid::Uuid;

/// A role record as held by a role store.
///
/// The set only reads the identifier and the already-normalized name; any
/// other fields ride along untouched.
pub trait Role: Clone + Send + Sync + 'static {
    /// Identifier type
    type Key: Eq + Hash + Clone + Debug + Send + Sync + 'static;

    /// Role identifier
    fn id(&self) -> &Self::Key;

    /// Display name
    fn name(&self) -> Option<&str>;

    /// Name as normalized by the store, if it was ever set
    fn normalized_name(&self) -> Option<&str>;
}

/// Default identity role record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRole<K = String> {
    /// Role identifier
    pub id: K,

    /// Role name (e.g., "Admin")
    #[serde(default)]
    pub name: Option<String>,

    /// Lookup key produced by the store's normalizer (e.g., "ADMIN")
    #[serde(default)]
    pub normalized_name: Option<String>,

    /// Opaque token changed whenever the role is persisted
    #[serde(default)]
    pub concurrency_stamp: Option<String>,
}

impl IdentityRole<String> {
    /// Create a role with a fresh UUID identifier
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), name)
    }
}

impl<K> IdentityRole<K> {
    /// Create a role with an explicit identifier
    ///
    /// The normalized name is left empty; stores fill it in on insert.
    pub fn with_id(id: K, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
            normalized_name: None,
            concurrency_stamp: Some(Uuid::new_v4().to_string()),
        }
    }

    /// Set the normalized name
    pub fn with_normalized_name(mut self, normalized: impl Into<String>) -> Self {
        self.normalized_name = Some(normalized.into());
        self
    }
}

impl<K> Role for IdentityRole<K>
where
    K: Eq + Hash + Clone + Debug + Send + Sync + 'static,
{
    type Key = K;

    fn id(&self) -> &K {
        &self.id
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn normalized_name(&self) -> Option<&str> {
        self.normalized_name.as_deref()
    }
}
