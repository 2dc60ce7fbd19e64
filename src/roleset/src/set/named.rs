//! Typed access to well-known roles

use super::RoleSet;
use crate::error::Result;
use crate::types::Role;

/// A struct whose fields are well-known roles, filled from named slots.
///
/// ```rust
/// use roleset::{IdentityRole, NamedRoles, Result, RoleSet};
///
/// struct AppRoles {
///     admin: IdentityRole,
///     user: IdentityRole,
/// }
///
/// impl NamedRoles<IdentityRole> for AppRoles {
///     fn slot_names() -> &'static [&'static str] {
///         &["Admin", "User"]
///     }
///
///     fn from_role_set(roles: &RoleSet<IdentityRole>) -> Result<Self> {
///         Ok(Self {
///             admin: roles.named("Admin")?.clone(),
///             user: roles.named("User")?.clone(),
///         })
///     }
/// }
/// ```
pub trait NamedRoles<R: Role>: Sized {
    /// Slot names to declare on the builder
    fn slot_names() -> &'static [&'static str];

    /// Read the bound slots out of a loaded role set
    fn from_role_set(roles: &RoleSet<R>) -> Result<Self>;
}
