//! Integration tests for the role set
//!
//! Walks the documented scenarios end to end through the public API and
//! checks lookup completeness and case folding over generated role names.

use proptest::prelude::*;
use roleset::{
    DefaultRoleSet, DuplicateNamePolicy, IdentityRole, InMemoryRoleStore, KeyKind, NamedRoles,
    Result, RoleSet, RoleSetConfig, RoleSetError, RoleStore, UnboundSlotPolicy,
};
use std::collections::HashSet;
use std::sync::Arc;

async fn numbered_store(roles: &[(i64, &str)]) -> InMemoryRoleStore<IdentityRole<i64>> {
    let store = InMemoryRoleStore::default();
    for (id, name) in roles {
        store.add(IdentityRole::with_id(*id, *name)).await;
    }
    store
}

// ============================================================================
// Documented Scenarios
// ============================================================================

#[tokio::test]
async fn test_admin_and_user_lookup() {
    let store = numbered_store(&[(1, "Admin"), (2, "User")]).await;
    let roles = RoleSet::load(&store).await.unwrap();

    assert_eq!(roles.find(&1).unwrap().id, 1);
    assert_eq!(roles.find_by_name("user").unwrap().id, 2);
    assert!(matches!(roles.find(&3), Err(RoleSetError::NotFound(_))));
}

#[tokio::test]
async fn test_names_colliding_after_normalization() {
    let store = numbered_store(&[(1, "Admin"), (2, "ADMIN")]).await;

    let err = RoleSet::load(&store).await.unwrap_err();
    assert!(matches!(
        err,
        RoleSetError::DuplicateKey { kind: KeyKind::NormalizedName, ref key } if key == "ADMIN"
    ));

    let config = RoleSetConfig::default().with_duplicate_names(DuplicateNamePolicy::LastWriteWins);
    let roles = RoleSet::builder(&store).config(config).build().await.unwrap();
    assert_eq!(roles.find_by_name("Admin").unwrap().id, 2);
}

#[tokio::test]
async fn test_slot_without_role() {
    let store = numbered_store(&[(1, "Admin"), (2, "User")]).await;

    let err = RoleSet::builder(&store)
        .slot("Moderator")
        .build()
        .await
        .unwrap_err();
    assert!(matches!(err, RoleSetError::UnboundSlot(ref slot) if slot == "Moderator"));

    let roles = RoleSet::builder(&store)
        .slot("Moderator")
        .config(RoleSetConfig::default().with_unbound_slots(UnboundSlotPolicy::Optional))
        .build()
        .await
        .unwrap();
    assert!(roles.try_named("Moderator").is_none());
}

// ============================================================================
// Default Identity Roles
// ============================================================================

struct SiteRoles {
    administrator: IdentityRole,
    member: IdentityRole,
}

impl NamedRoles<IdentityRole> for SiteRoles {
    fn slot_names() -> &'static [&'static str] {
        &["Administrator", "Member"]
    }

    fn from_role_set(roles: &RoleSet<IdentityRole>) -> Result<Self> {
        Ok(Self {
            administrator: roles.named("Administrator")?.clone(),
            member: roles.named("Member")?.clone(),
        })
    }
}

#[tokio::test]
async fn test_default_role_set_with_named_roles() {
    let store: InMemoryRoleStore<IdentityRole> = InMemoryRoleStore::default();
    let admin = store.create("Administrator").await;
    let member = store.create("Member").await;
    store.create("Auditor").await;

    let (roles, site): (DefaultRoleSet, SiteRoles) =
        RoleSet::load_named(&store).await.unwrap();

    assert_eq!(site.administrator, admin);
    assert_eq!(site.member, member);
    assert_eq!(roles.find(&admin.id).unwrap(), &admin);
    assert_eq!(roles.find_by_name("auditor").unwrap().name.as_deref(), Some("Auditor"));
}

#[tokio::test]
async fn test_shared_between_tasks() {
    let store: InMemoryRoleStore<IdentityRole> = InMemoryRoleStore::default();
    for name in ["Admin", "Editor", "Viewer"] {
        store.create(name).await;
    }
    let store: Arc<dyn RoleStore<IdentityRole>> = Arc::new(store);

    let roles = Arc::new(DefaultRoleSet::load(store.as_ref()).await.unwrap());

    let tasks: Vec<_> = ["admin", "EDITOR", "Viewer"]
        .into_iter()
        .map(|name| {
            let roles = Arc::clone(&roles);
            tokio::spawn(async move { roles.find_by_name(name).map(|r| r.id.clone()) })
        })
        .collect();

    let mut ids = HashSet::new();
    for task in tasks {
        ids.insert(task.await.unwrap().unwrap());
    }
    assert_eq!(ids.len(), 3);
}

#[tokio::test]
async fn test_independent_sets_do_not_interfere() {
    let tenant_a = numbered_store(&[(1, "Admin")]).await;
    let tenant_b = numbered_store(&[(1, "Owner"), (2, "Admin")]).await;

    let (a, b) = tokio::join!(RoleSet::load(&tenant_a), RoleSet::load(&tenant_b));
    let (a, b) = (a.unwrap(), b.unwrap());

    assert_eq!(a.find_by_name("admin").unwrap().id, 1);
    assert_eq!(b.find_by_name("admin").unwrap().id, 2);
    assert!(a.find_by_name("owner").is_err());
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn test_every_role_is_found(names in prop::collection::hash_set("[a-zäöüéß]{1,12}", 1..20)) {
        tokio_test::block_on(async {
            let store: InMemoryRoleStore<IdentityRole<i64>> = InMemoryRoleStore::default();
            for (id, name) in names.iter().enumerate() {
                store.add(IdentityRole::with_id(id as i64, name.clone())).await;
            }

            let roles = RoleSet::load(&store).await.unwrap();
            assert_eq!(roles.len(), names.len());

            for role in store.list_roles().await.unwrap() {
                let name = role.name.clone().unwrap();
                assert_eq!(roles.find(&role.id).unwrap(), &role);
                assert_eq!(roles.find_by_name(&name).unwrap(), &role);
                let stored_key = role.normalized_name.clone().unwrap();
                assert_eq!(roles.find_by_name(&stored_key).unwrap(), &role);
                assert_eq!(stored_key.chars().count(), name.chars().count());
            }
        });
    }

    #[test]
    fn test_absent_ids_are_not_found(count in 0i64..20, missing in 20i64..1000) {
        tokio_test::block_on(async {
            let store: InMemoryRoleStore<IdentityRole<i64>> = InMemoryRoleStore::default();
            for id in 0..count {
                store.add(IdentityRole::with_id(id, format!("role-{}", id))).await;
            }

            let roles = RoleSet::load(&store).await.unwrap();
            assert!(roles.find(&missing).unwrap_err().is_not_found());
        });
    }
}
