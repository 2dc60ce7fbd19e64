//! Role store boundary and the in-memory implementation

use crate::error::Result;
use crate::normalizer::{LookupNormalizer, UpperInvariantNormalizer};
use crate::types::{IdentityRole, Role};
use async_trait::async_trait;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;
use tokio::sync::RwLock;

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::PostgresRoleStore;

/// Role store trait
///
/// The only collaborator a [`RoleSet`](crate::RoleSet) needs: a way to list
/// every role once and the normalizer the store used for role names.
#[async_trait]
pub trait RoleStore<R: Role>: Send + Sync {
    /// List all roles as of the call
    async fn list_roles(&self) -> Result<Vec<R>>;

    /// Normalizer applied to stored role names
    fn normalizer(&self) -> Arc<dyn LookupNormalizer>;
}

/// In-memory role store implementation
///
/// Keeps roles in insertion order and does not enforce uniqueness, so it can
/// hold exactly the data a misbehaving backend would return.
pub struct InMemoryRoleStore<R> {
    roles: Arc<RwLock<Vec<R>>>,
    normalizer: Arc<dyn LookupNormalizer>,
}

impl<R: Role> InMemoryRoleStore<R> {
    /// Create an empty store with the given normalizer
    pub fn new(normalizer: Arc<dyn LookupNormalizer>) -> Self {
        Self {
            roles: Arc::new(RwLock::new(Vec::new())),
            normalizer,
        }
    }

    /// Append a role exactly as given
    pub async fn insert(&self, role: R) {
        let mut roles = self.roles.write().await;
        roles.push(role);
    }

    /// Remove every role with the given id, returning how many were removed
    pub async fn remove(&self, id: &R::Key) -> usize {
        let mut roles = self.roles.write().await;
        let before = roles.len();
        roles.retain(|r| r.id() != id);
        before - roles.len()
    }

    /// Number of stored roles
    pub async fn len(&self) -> usize {
        self.roles.read().await.len()
    }

    /// True when no roles are stored
    pub async fn is_empty(&self) -> bool {
        self.roles.read().await.is_empty()
    }
}

impl<K> InMemoryRoleStore<IdentityRole<K>>
where
    K: Eq + Hash + Clone + Debug + Send + Sync + 'static,
{
    /// Store a role, computing its normalized name from its name
    pub async fn add(&self, mut role: IdentityRole<K>) -> IdentityRole<K> {
        role.normalized_name = role
            .name
            .as_deref()
            .map(|name| self.normalizer.normalize_name(name));
        self.insert(role.clone()).await;
        role
    }

    /// Rename a stored role, keeping its normalized name in step
    pub async fn rename(&self, id: &K, name: impl Into<String>) -> bool {
        let name = name.into();
        let normalized = self.normalizer.normalize_name(&name);
        let mut roles = self.roles.write().await;

        let mut renamed = false;
        for role in roles.iter_mut().filter(|r| &r.id == id) {
            role.name = Some(name.clone());
            role.normalized_name = Some(normalized.clone());
            renamed = true;
        }
        renamed
    }
}

impl InMemoryRoleStore<IdentityRole<String>> {
    /// Create and store a role with a fresh id
    pub async fn create(&self, name: impl Into<String>) -> IdentityRole<String> {
        self.add(IdentityRole::new(name)).await
    }
}

impl<R: Role> Default for InMemoryRoleStore<R> {
    fn default() -> Self {
        Self::new(Arc::new(UpperInvariantNormalizer))
    }
}

#[async_trait]
impl<R: Role> RoleStore<R> for InMemoryRoleStore<R> {
    async fn list_roles(&self) -> Result<Vec<R>> {
        let roles = self.roles.read().await;
        Ok(roles.clone())
    }

    fn normalizer(&self) -> Arc<dyn LookupNormalizer> {
        Arc::clone(&self.normalizer)
    }
}
