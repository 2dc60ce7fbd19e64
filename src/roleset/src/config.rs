//! Role set configuration

use crate::error::{Result, RoleSetError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// What to do when two roles normalize to the same name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateNamePolicy {
    /// Fail construction with `DuplicateKey`
    #[default]
    Reject,
    /// Keep the role the store listed last
    LastWriteWins,
}

impl FromStr for DuplicateNamePolicy {
    type Err = RoleSetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "last-write-wins" | "last_write_wins" => Ok(Self::LastWriteWins),
            other => Err(RoleSetError::Config(format!(
                "unknown duplicate name policy '{}'",
                other
            ))),
        }
    }
}

/// What to do when a declared slot matches no role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnboundSlotPolicy {
    /// Fail construction with `UnboundSlot`
    #[default]
    Reject,
    /// Leave the slot explicitly empty
    Optional,
}

impl FromStr for UnboundSlotPolicy {
    type Err = RoleSetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(Self::Reject),
            "optional" => Ok(Self::Optional),
            other => Err(RoleSetError::Config(format!(
                "unknown unbound slot policy '{}'",
                other
            ))),
        }
    }
}

/// Role set configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleSetConfig {
    /// Handling of roles sharing a normalized name
    pub duplicate_names: DuplicateNamePolicy,

    /// Handling of slots with no matching role
    pub unbound_slots: UnboundSlotPolicy,

    /// Upper bound on the store enumeration, none by default
    #[serde(with = "millis", skip_serializing_if = "Option::is_none")]
    pub load_timeout: Option<Duration>,
}

impl RoleSetConfig {
    /// Load configuration from the environment
    ///
    /// - `ROLESET_DUPLICATE_NAMES` - `reject` (default) or `last-write-wins`
    /// - `ROLESET_UNBOUND_SLOTS` - `reject` (default) or `optional`
    /// - `ROLESET_LOAD_TIMEOUT_MS` - enumeration timeout in milliseconds
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(value) = lookup("ROLESET_DUPLICATE_NAMES") {
            config.duplicate_names = value.parse()?;
        }

        if let Some(value) = lookup("ROLESET_UNBOUND_SLOTS") {
            config.unbound_slots = value.parse()?;
        }

        if let Some(value) = lookup("ROLESET_LOAD_TIMEOUT_MS") {
            let millis: u64 = value.trim().parse().map_err(|_| {
                RoleSetError::Config(format!("ROLESET_LOAD_TIMEOUT_MS is not a number: '{}'", value))
            })?;
            config.load_timeout = Some(Duration::from_millis(millis));
        }

        Ok(config)
    }

    /// Set the duplicate name policy
    pub fn with_duplicate_names(mut self, policy: DuplicateNamePolicy) -> Self {
        self.duplicate_names = policy;
        self
    }

    /// Set the unbound slot policy
    pub fn with_unbound_slots(mut self, policy: UnboundSlotPolicy) -> Self {
        self.unbound_slots = policy;
        self
    }

    /// Bound the store enumeration
    pub fn with_load_timeout(mut self, timeout: Duration) -> Self {
        self.load_timeout = Some(timeout);
        self
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => serializer.serialize_some(&(d.as_millis() as u64)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_millis))
    }
}
