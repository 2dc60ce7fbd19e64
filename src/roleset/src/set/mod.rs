//! Role set module
//!
//! A [`RoleSet`] is a read-only snapshot of every role in a role store,
//! indexed by identifier and by normalized name.
//!
//! # Features
//!
//! - **One-shot load**: the store is enumerated exactly once, at construction
//! - **Dual index**: `find(id)` and `find_by_name(name)` are plain map reads
//! - **Named slots**: well-known roles resolved once and checked up front
//! - **Lock-free reads**: nothing is mutated after construction
//!
//! # Example
//!
//! ```rust
//! use roleset::{InMemoryRoleStore, IdentityRole, RoleSet};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store: InMemoryRoleStore<IdentityRole> = InMemoryRoleStore::default();
//! store.create("Admin").await;
//! store.create("User").await;
//!
//! let roles = RoleSet::builder(&store).slot("Admin").build().await?;
//!
//! let admin = roles.find_by_name("admin")?;
//! assert_eq!(roles.find(&admin.id)?.name.as_deref(), Some("Admin"));
//! assert_eq!(roles.named("Admin")?, admin);
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod named;


pub use builder::RoleSetBuilder;
pub use named::NamedRoles;

use crate::config::{DuplicateNamePolicy, RoleSetConfig, UnboundSlotPolicy};
use crate::error::{KeyKind, Result, RoleSetError};
use crate::normalizer::LookupNormalizer;
use crate::store::RoleStore;
use crate::types::{IdentityRole, Role};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Role set over the default identity role
pub type DefaultRoleSet = RoleSet<IdentityRole<String>>;

/// Immutable snapshot of a role store, indexed by id and normalized name
pub struct RoleSet<R: Role> {
    /// Roles in the order the store listed them
    roles: Vec<R>,

    /// Identifier -> position in `roles`
    by_id: HashMap<R::Key, usize>,

    /// Normalized name -> position in `roles`
    by_normalized_name: HashMap<String, usize>,

    /// Normalized slot name -> bound role, `None` when left empty
    slots: HashMap<String, Option<usize>>,

    /// Store normalizer used for name lookups
    normalizer: Arc<dyn LookupNormalizer>,
}

impl<R: Role> RoleSet<R> {
    /// Load every role from the store with the default configuration
    pub async fn load<S>(store: &S) -> Result<Self>
    where
        S: RoleStore<R> + ?Sized,
    {
        Self::builder(store).build().await
    }

    /// Load every role and bind the slots declared by `T`
    ///
    /// Uses the default configuration; see [`RoleSetBuilder::build_named`]
    /// to pick the policies.
    pub async fn load_named<S, T>(store: &S) -> Result<(Self, T)>
    where
        S: RoleStore<R> + ?Sized,
        T: NamedRoles<R>,
    {
        Self::builder(store).build_named::<T>().await
    }

    /// Start configuring a role set over `store`
    pub fn builder<S>(store: &S) -> RoleSetBuilder<'_, R, S>
    where
        S: RoleStore<R> + ?Sized,
    {
        RoleSetBuilder::new(store)
    }

    /// Index a snapshot and resolve the declared slots
    pub(crate) fn from_snapshot(
        roles: Vec<R>,
        normalizer: Arc<dyn LookupNormalizer>,
        slots: &[String],
        config: &RoleSetConfig,
    ) -> Result<Self> {
        let mut by_id = HashMap::with_capacity(roles.len());
        let mut by_normalized_name = HashMap::with_capacity(roles.len());

        for (index, role) in roles.iter().enumerate() {
            match by_id.entry(role.id().clone()) {
                Entry::Occupied(_) => {
                    return Err(RoleSetError::DuplicateKey {
                        kind: KeyKind::Id,
                        key: format!("{:?}", role.id()),
                    });
                }
                Entry::Vacant(entry) => {
                    entry.insert(index);
                }
            }

            let Some(normalized) = role.normalized_name() else {
                warn!(id = ?role.id(), "Role has no normalized name, indexed by id only");
                continue;
            };

            match by_normalized_name.entry(normalized.to_string()) {
                Entry::Occupied(mut entry) => match config.duplicate_names {
                    DuplicateNamePolicy::Reject => {
                        return Err(RoleSetError::DuplicateKey {
                            kind: KeyKind::NormalizedName,
                            key: normalized.to_string(),
                        });
                    }
                    DuplicateNamePolicy::LastWriteWins => {
                        warn!(name = %normalized, id = ?role.id(), "Duplicate role name, keeping the later role");
                        entry.insert(index);
                    }
                },
                Entry::Vacant(entry) => {
                    entry.insert(index);
                }
            }
        }

        let mut bound = HashMap::with_capacity(slots.len());
        for slot in slots {
            let key = normalizer.normalize_name(slot);
            let index = by_normalized_name.get(&key).copied();

            if index.is_none() {
                match config.unbound_slots {
                    UnboundSlotPolicy::Reject => {
                        return Err(RoleSetError::UnboundSlot(slot.clone()));
                    }
                    UnboundSlotPolicy::Optional => {
                        debug!(slot = %slot, "No role for slot, leaving it empty");
                    }
                }
            }

            bound.insert(key, index);
        }

        info!(
            roles = roles.len(),
            slots = bound.len(),
            "Role set loaded"
        );

        Ok(Self {
            roles,
            by_id,
            by_normalized_name,
            slots: bound,
            normalizer,
        })
    }

    /// Find a role by identifier
    ///
    /// # Errors
    ///
    /// `NotFound` if the snapshot has no role with this id.
    pub fn find(&self, id: &R::Key) -> Result<&R> {
        self.by_id
            .get(id)
            .map(|&index| &self.roles[index])
            .ok_or_else(|| RoleSetError::NotFound(format!("id {:?}", id)))
    }

    /// Find a role by name, in any case the normalizer folds
    ///
    /// # Errors
    ///
    /// `NotFound` if no role normalizes to the same key.
    pub fn find_by_name(&self, name: &str) -> Result<&R> {
        let key = self.normalizer.normalize_name(name);
        self.by_normalized_name
            .get(&key)
            .map(|&index| &self.roles[index])
            .ok_or_else(|| RoleSetError::NotFound(format!("name '{}'", name)))
    }

    /// Role bound to a declared slot
    ///
    /// # Errors
    ///
    /// - `UnboundSlot` if the slot was declared but no role matched
    /// - `NotFound` if the slot was never declared
    pub fn named(&self, slot: &str) -> Result<&R> {
        match self.slots.get(&self.normalizer.normalize_name(slot)) {
            Some(Some(index)) => Ok(&self.roles[*index]),
            Some(None) => Err(RoleSetError::UnboundSlot(slot.to_string())),
            None => Err(RoleSetError::NotFound(format!("slot '{}'", slot))),
        }
    }

    /// Role bound to a declared slot, if any
    pub fn try_named(&self, slot: &str) -> Option<&R> {
        self.named(slot).ok()
    }

    /// Build a typed view of the named slots
    pub fn bind<T: NamedRoles<R>>(&self) -> Result<T> {
        T::from_role_set(self)
    }

    /// Normalize a name with the store's normalizer
    pub fn normalize(&self, name: &str) -> String {
        self.normalizer.normalize_name(name)
    }

    /// True if the snapshot has a role with this id
    pub fn contains_id(&self, id: &R::Key) -> bool {
        self.by_id.contains_key(id)
    }

    /// True if some role normalizes to the same key as `name`
    pub fn contains_name(&self, name: &str) -> bool {
        self.by_normalized_name.contains_key(&self.normalize(name))
    }

    /// All roles, in the order the store listed them
    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.roles.iter()
    }

    /// Number of roles in the snapshot
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// True if the snapshot is empty
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

impl<'a, R: Role> IntoIterator for &'a RoleSet<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<R: Role + fmt::Debug> fmt::Debug for RoleSet<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoleSet")
            .field("roles", &self.roles)
            .field("slots", &self.slots.keys().collect::<Vec<_>>())
            .finish()
    }
}
