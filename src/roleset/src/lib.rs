//! # RoleSet
//!
//! Read-only, indexed snapshot of the roles held by an identity store.
//!
//! ## Features
//!
//! - **One-shot load** from any [`RoleStore`] (in-memory or PostgreSQL)
//! - **Lookups by id and by name**, with names folded by the store's normalizer
//! - **Named slots** for well-known roles, resolved and checked at load time
//! - **Explicit policies** for duplicate names and unmatched slots
//!
//! ## Example
//!
//! ```rust
//! use roleset::{InMemoryRoleStore, IdentityRole, RoleSet};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store: InMemoryRoleStore<IdentityRole<i32>> = InMemoryRoleStore::default();
//!     store.add(IdentityRole::with_id(1, "Admin")).await;
//!     store.add(IdentityRole::with_id(2, "User")).await;
//!
//!     let roles = RoleSet::load(&store).await?;
//!
//!     assert_eq!(roles.find(&1)?.name.as_deref(), Some("Admin"));
//!     assert_eq!(roles.find_by_name("user")?.id, 2);
//!     assert!(roles.find(&3).unwrap_err().is_not_found());
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod normalizer;
pub mod set;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use config::{DuplicateNamePolicy, RoleSetConfig, UnboundSlotPolicy};
pub use error::{KeyKind, Result, RoleSetError};
pub use normalizer::{LookupNormalizer, UpperInvariantNormalizer};
pub use set::{DefaultRoleSet, NamedRoles, RoleSet, RoleSetBuilder};
pub use store::{InMemoryRoleStore, RoleStore};
pub use types::{IdentityRole, Role};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
