//! Role set construction

use super::named::NamedRoles;
use super::RoleSet;
use crate::config::RoleSetConfig;
use crate::error::{Result, RoleSetError};
use crate::store::RoleStore;
use crate::types::Role;
use std::marker::PhantomData;
use tracing::{debug, instrument};

/// Declares slots and policies, then loads a [`RoleSet`] in one step.
///
/// Nothing touches the store until [`build`](Self::build) is awaited, and a
/// failed or dropped build leaves nothing behind.
pub struct RoleSetBuilder<'a, R: Role, S: RoleStore<R> + ?Sized> {
    store: &'a S,
    slots: Vec<String>,
    config: RoleSetConfig,
    _role: PhantomData<fn() -> R>,
}

impl<'a, R: Role, S: RoleStore<R> + ?Sized> RoleSetBuilder<'a, R, S> {
    pub(crate) fn new(store: &'a S) -> Self {
        Self {
            store,
            slots: Vec::new(),
            config: RoleSetConfig::default(),
            _role: PhantomData,
        }
    }

    /// Declare a named slot
    pub fn slot(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.slots.contains(&name) {
            self.slots.push(name);
        }
        self
    }

    /// Declare several named slots
    pub fn slots<I>(self, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        names.into_iter().fold(self, |builder, name| builder.slot(name))
    }

    /// Declare every slot `T` binds
    pub fn with_named<T: NamedRoles<R>>(self) -> Self {
        self.slots(T::slot_names().iter().copied())
    }

    /// Replace the configuration
    pub fn config(mut self, config: RoleSetConfig) -> Self {
        self.config = config;
        self
    }

    /// Enumerate the store and build the role set
    ///
    /// # Errors
    ///
    /// - `Store` if the enumeration fails
    /// - `Timeout` if it outlives the configured load timeout
    /// - `DuplicateKey` / `UnboundSlot` per the configured policies
    #[instrument(skip(self), fields(slots = self.slots.len()))]
    pub async fn build(self) -> Result<RoleSet<R>> {
        let roles = match self.config.load_timeout {
            Some(limit) => tokio::time::timeout(limit, self.store.list_roles())
                .await
                .map_err(|_| RoleSetError::Timeout(limit))??,
            None => self.store.list_roles().await?,
        };

        debug!(count = roles.len(), "Enumerated roles");

        RoleSet::from_snapshot(roles, self.store.normalizer(), &self.slots, &self.config)
    }

    /// Declare the slots `T` binds, build, and bind them
    ///
    /// Honors the configured unbound slot policy, so with
    /// `UnboundSlotPolicy::Optional` it is up to `T` how to treat empty slots.
    pub async fn build_named<T: NamedRoles<R>>(self) -> Result<(RoleSet<R>, T)> {
        let roles = self.with_named::<T>().build().await?;
        let named = roles.bind::<T>()?;
        Ok((roles, named))
    }
}
